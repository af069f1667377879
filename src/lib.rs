//! Corgi Run - a side-scrolling obstacle runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, scoring)
//! - `game`: Start / playing / game-over state machine around the simulation
//! - `render`: Frame snapshot and draw-list adapter for any renderer
//! - `audio`: Sound cue port (Web Audio elements on wasm, recording stub in tests)
//! - `highscores`: Recent score history, persisted to LocalStorage
//! - `settings`: Volumes, key bindings and frame pacing

pub mod audio;
pub mod game;
pub mod highscores;
pub mod input;
pub mod render;
pub mod settings;
pub mod sim;

pub use audio::{AudioPort, Channel, Cue};
pub use game::Game;
pub use highscores::ScoreHistory;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions (canvas pixels)
    pub const FIELD_WIDTH: f32 = 900.0;
    pub const FIELD_HEIGHT: f32 = 400.0;
    /// Height of the grass strip below the ground line
    pub const GROUND_HEIGHT: f32 = 60.0;
    /// Y coordinate of the ground line (screen space, y grows downward)
    pub const GROUND_Y: f32 = FIELD_HEIGHT - GROUND_HEIGHT;

    /// Player defaults - the corgi runs at a fixed x
    pub const PLAYER_X: f32 = 150.0;
    pub const PLAYER_BASE_WIDTH: f32 = 110.0;
    pub const PLAYER_BASE_HEIGHT: f32 = 90.0;
    /// Inset applied on every side of the player rect for collision checks
    pub const HITBOX_INSET: f32 = 10.0;

    /// Gravity (pixels/s², positive is down)
    pub const GRAVITY: f32 = 1800.0;
    /// Upward speed applied by a jump
    pub const JUMP_POWER: f32 = 750.0;
    pub const MAX_JUMPS: u8 = 2;

    /// Scroll speed at the start of a run (pixels/s)
    pub const INITIAL_SPEED: f32 = 260.0;
    pub const SPEED_INCREASE_PER_SEC: f32 = 15.0;

    /// Seconds between spawns, sampled uniformly per spawn
    pub const SPAWN_INTERVAL_MIN: f32 = 1.2;
    pub const SPAWN_INTERVAL_MAX: f32 = 2.0;
    /// Obstacles appear this far past the right edge
    pub const SPAWN_MARGIN: f32 = 40.0;
    /// Obstacles are dropped once their right edge is left of this x
    pub const DESPAWN_X: f32 = -50.0;
    /// Chance that a spawn is a heart instead of a hazard
    pub const HEART_CHANCE: f64 = 0.18;

    pub const MAX_LIVES: u8 = 3;
    pub const PASS_REWARD: u32 = 100;

    /// Dust trail
    pub const DUST_INTERVAL: f32 = 0.04;
    pub const DUST_GRAVITY: f32 = 220.0;
    pub const DUST_FADE_PER_SEC: f32 = 0.9;
    pub const DUST_START_ALPHA: f32 = 0.6;
}
