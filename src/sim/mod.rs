//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only advances through the `delta` handed to `tick`
//! - Seeded RNG only
//! - Audio is requested through an injected `AudioPort`
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod random;
pub mod rect;
pub mod spawn;
pub mod state;
pub mod tick;

pub use random::SimRng;
pub use rect::{Rect, overlaps};
pub use spawn::spawn_obstacle;
pub use state::{GamePhase, GameState, Obstacle, ObstacleKind, Particle, Player};
pub use tick::{TickOutcome, tick};
