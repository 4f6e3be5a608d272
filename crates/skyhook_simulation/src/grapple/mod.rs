//! Grapple-домен: hook state machine, силы, события к движку
//!
//! ECS ответственность:
//! - Game state: HookState, лимит каната, tension
//! - Правила: валидация зацепа, pull/swing силы, retraction timing
//! - События: HookAttached/HookReleased, JointCommand, SparkCue
//!
//! Движок (адаптер) ответственность:
//! - Настоящий distance-joint на rigidbody
//! - LineRenderer по RopePath, particle systems по SparkCue

pub mod attach;
pub mod events;
pub mod math;
pub mod reel;

pub use attach::{fire_hooks, release_hooks};
pub use events::{HookAttached, HookReleased, JointCommand, JointOp, SparkAction, SparkCue};
pub use reel::{apply_pull_and_swing, drive_spark_cues};
