//! Общие фичи поверх локомоции (camera feedback)

pub mod tilt;

pub use tilt::{update_camera_tilt, CameraTilt};
