//! ECS Components для grappling-локомоции
//!
//! Организация по доменам:
//! - hand: рука-контроллер (Side, HandPose, HandInput, WaistAnchor, HookState)
//! - player: тело игрока (HeadRig, PhysicsBody, GroundContact, AngularDragCommand)
//! - rope: канат (Rope tunables + spring state, RopePath для line service)
//! - aim: прицеливание (AssistMarker, AimSolution, Crosshair)
//! - boost: дэши (BoostMeter, TapTracker, SparkState)

pub mod aim;
pub mod boost;
pub mod hand;
pub mod player;
pub mod rope;

// Re-exports для удобного импорта
pub use aim::*;
pub use boost::*;
pub use hand::*;
pub use player::*;
pub use rope::*;
