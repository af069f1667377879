//! Game state and core simulation types
//!
//! Everything a run needs lives in `GameState`; the controller owns exactly
//! one and hands it to `tick` each frame.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::random::SimRng;
use super::rect::Rect;
use crate::consts::*;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, before the first run
    Start,
    /// Active gameplay
    Playing,
    /// Run ended, waiting for restart
    GameOver,
}

/// The corgi
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner. x never changes during a run.
    pub pos: Vec2,
    /// Current size; height is halved while sliding
    pub size: Vec2,
    /// Vertical velocity (positive is down)
    pub vy: f32,
    pub jumps_left: u8,
    pub on_ground: bool,
    pub is_sliding: bool,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(PLAYER_X, GROUND_Y - PLAYER_BASE_HEIGHT),
            size: Vec2::new(PLAYER_BASE_WIDTH, PLAYER_BASE_HEIGHT),
            vy: 0.0,
            jumps_left: MAX_JUMPS,
            on_ground: true,
            is_sliding: false,
        }
    }
}

impl Player {
    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    /// Forgiving collision box, inset on every side
    pub fn hitbox(&self) -> Rect {
        self.rect().inset(HITBOX_INSET)
    }

    /// Y of the top edge when standing on the ground at the current height
    #[inline]
    pub fn ground_top(&self) -> f32 {
        GROUND_Y - self.size.y
    }

    /// Spend a jump charge. Returns false (and changes nothing) when out of
    /// charges or sliding.
    pub fn jump(&mut self) -> bool {
        if self.jumps_left == 0 || self.is_sliding {
            return false;
        }
        self.vy = -JUMP_POWER;
        self.on_ground = false;
        self.jumps_left -= 1;
        true
    }

    /// Duck to half height. Only from the ground.
    pub fn start_slide(&mut self) -> bool {
        if !self.on_ground || self.is_sliding {
            return false;
        }
        self.is_sliding = true;
        self.size.y = PLAYER_BASE_HEIGHT * 0.5;
        self.pos.y = self.ground_top();
        true
    }

    /// Stand back up to full height
    pub fn end_slide(&mut self) -> bool {
        if !self.is_sliding {
            return false;
        }
        self.is_sliding = false;
        self.size.y = PLAYER_BASE_HEIGHT;
        self.pos.y = self.ground_top();
        true
    }
}

/// Obstacle types. Each kind has fixed geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Flies at head height - slide under it
    Bird,
    /// Low log lying on the ground - jump over it
    LogHorizontal,
    /// Tall upright log - jump over it
    LogVertical,
    /// Heart pickup - restores a life
    Heart,
}

impl ObstacleKind {
    /// Kinds that cost a life on contact
    pub const HAZARDS: [ObstacleKind; 3] = [
        ObstacleKind::LogHorizontal,
        ObstacleKind::LogVertical,
        ObstacleKind::Bird,
    ];

    pub fn size(&self) -> Vec2 {
        match self {
            ObstacleKind::Bird => Vec2::new(75.0, 55.0),
            ObstacleKind::LogHorizontal => Vec2::new(130.0, 45.0),
            ObstacleKind::LogVertical => Vec2::new(80.0, 100.0),
            ObstacleKind::Heart => Vec2::new(45.0, 45.0),
        }
    }

    pub fn is_hazard(&self) -> bool {
        !matches!(self, ObstacleKind::Heart)
    }
}

/// An obstacle or pickup scrolling toward the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    pub pos: Vec2,
    pub size: Vec2,
    /// Score already awarded for getting past it
    pub passed: bool,
}

impl Obstacle {
    pub fn new(kind: ObstacleKind, x: f32, y: f32) -> Self {
        Self {
            kind,
            pos: Vec2::new(x, y),
            size: kind.size(),
            passed: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    /// X of the trailing (right) edge
    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }
}

/// Dust puff kicked up behind the running corgi (not gameplay-affecting)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Opacity, fades to 0
    pub alpha: f32,
    pub radius: f32,
}

/// Complete run state
#[derive(Debug, Clone)]
pub struct GameState {
    pub rng: SimRng,
    pub phase: GamePhase,
    pub player: Player,
    /// Live obstacles, oldest first
    pub obstacles: Vec<Obstacle>,
    pub particles: Vec<Particle>,
    pub score: u32,
    pub lives: u8,
    /// Scroll speed (pixels/s), grows through the run
    pub game_speed: f32,
    /// Seconds since the last spawn
    pub spawn_timer: f32,
    /// Seconds between the last spawn and the next one
    pub next_spawn_time: f32,
    /// Seconds since the last dust particle
    pub dust_timer: f32,
    /// Wall-clock seconds for cosmetic animation, advances in every phase
    pub elapsed: f32,
}

impl GameState {
    /// Create a fresh state on the start screen
    pub fn new(seed: u64) -> Self {
        let mut state = Self {
            rng: SimRng::new(seed),
            phase: GamePhase::Start,
            player: Player::default(),
            obstacles: Vec::new(),
            particles: Vec::new(),
            score: 0,
            lives: MAX_LIVES,
            game_speed: INITIAL_SPEED,
            spawn_timer: 0.0,
            next_spawn_time: SPAWN_INTERVAL_MIN,
            dust_timer: 0.0,
            elapsed: 0.0,
        };
        state.reset();
        state
    }

    /// Start a new run. Leaves the phase and the RNG stream alone.
    pub fn reset(&mut self) {
        self.player = Player::default();
        self.score = 0;
        self.lives = MAX_LIVES;
        self.game_speed = INITIAL_SPEED;
        self.spawn_timer = 0.0;
        self.next_spawn_time = self.rng.uniform(SPAWN_INTERVAL_MIN, SPAWN_INTERVAL_MAX);
        self.obstacles.clear();
        self.particles.clear();
        self.dust_timer = 0.0;
    }
}
