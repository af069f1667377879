//! Render adapter
//!
//! The simulation never draws. Each frame the driver builds a `Frame`
//! snapshot and hands it to a `Renderer`. `draw_list` turns a frame into an
//! ordered list of primitive draw calls (back to front) that a canvas or
//! test renderer can replay.

use glam::Vec2;

use crate::consts::*;
use crate::highscores::ScoreHistory;
use crate::sim::{GamePhase, GameState, Obstacle, ObstacleKind, Particle, Rect};

/// Player as seen by the renderer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerView {
    /// Simulated rectangle (what collisions use)
    pub rect: Rect,
    /// Vertical bob while running, added to the drawn y only
    pub bob: f32,
    /// Rotation (radians) while running
    pub tilt: f32,
    pub on_ground: bool,
    pub sliding: bool,
}

impl PlayerView {
    fn new(state: &GameState) -> Self {
        let player = &state.player;
        let running = player.on_ground && !player.is_sliding;
        let t = state.elapsed;
        let (bob, tilt) = if running {
            ((t * 15.0).sin() * 4.0, (t * 10.0).sin() * 0.06)
        } else {
            (0.0, 0.0)
        };
        Self {
            rect: player.rect(),
            bob,
            tilt,
            on_ground: player.on_ground,
            sliding: player.is_sliding,
        }
    }
}

/// Read-only snapshot of everything on screen
#[derive(Debug, Clone)]
pub struct Frame<'a> {
    pub phase: GamePhase,
    pub player: PlayerView,
    pub obstacles: &'a [Obstacle],
    pub particles: &'a [Particle],
    pub score: u32,
    pub lives: u8,
    pub history: &'a ScoreHistory,
}

impl<'a> Frame<'a> {
    pub fn new(state: &'a GameState, history: &'a ScoreHistory) -> Self {
        Self {
            phase: state.phase,
            player: PlayerView::new(state),
            obstacles: &state.obstacles,
            particles: &state.particles,
            score: state.score,
            lives: state.lives,
            history,
        }
    }

    pub fn best_score(&self) -> u32 {
        self.history.best()
    }

    /// In-game HUD (score, hearts) is shown once a run has started
    pub fn show_hud(&self) -> bool {
        self.phase != GamePhase::Start
    }

    /// How-to-play panel only on the title screen
    pub fn show_instructions(&self) -> bool {
        self.phase == GamePhase::Start
    }

    pub fn show_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Opacity of each HUD heart: lit for remaining lives, dimmed otherwise
    pub fn heart_opacities(&self) -> [f32; MAX_LIVES as usize] {
        std::array::from_fn(|i| if i < self.lives as usize { 1.0 } else { 0.2 })
    }
}

/// Something that can present a frame
pub trait Renderer {
    fn render(&mut self, frame: &Frame<'_>);
}

/// Sprite images
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sprite {
    Corgi,
    Bird,
    LogHorizontal,
    LogVertical,
    Heart,
}

impl Sprite {
    pub fn for_obstacle(kind: ObstacleKind) -> Self {
        match kind {
            ObstacleKind::Bird => Sprite::Bird,
            ObstacleKind::LogHorizontal => Sprite::LogHorizontal,
            ObstacleKind::LogVertical => Sprite::LogVertical,
            ObstacleKind::Heart => Sprite::Heart,
        }
    }

    /// DOM id of the preloaded `<img>`
    pub fn element_id(&self) -> &'static str {
        match self {
            Sprite::Corgi => "spriteCorgi",
            Sprite::Bird => "spriteBird",
            Sprite::LogHorizontal => "spriteLogHorizontal",
            Sprite::LogVertical => "spriteLogVertical",
            Sprite::Heart => "spriteHeart",
        }
    }
}

/// Primitive draw calls, in paint order
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Vertical gradient fill
    Gradient {
        rect: Rect,
        top: [f32; 4],
        bottom: [f32; 4],
    },
    /// Filled circle
    Circle {
        center: Vec2,
        radius: f32,
        color: [f32; 4],
    },
    /// Image drawn into `rect`, rotated about its center
    Sprite {
        sprite: Sprite,
        rect: Rect,
        rotation: f32,
    },
}

/// Colors for scene elements
pub mod colors {
    pub const SKY_TOP: [f32; 4] = [0.749, 0.914, 1.0, 1.0];
    pub const SKY_BOTTOM: [f32; 4] = [0.902, 0.969, 1.0, 1.0];
    pub const GRASS_TOP: [f32; 4] = [0.718, 0.894, 0.627, 1.0];
    pub const GRASS_BOTTOM: [f32; 4] = [0.541, 0.796, 0.435, 1.0];
    /// Dust (alpha comes from the particle)
    pub const DUST: [f32; 3] = [0.471, 0.314, 0.157];
}

/// Build the draw calls for a frame: sky, grass, dust, corgi, obstacles
pub fn draw_list(frame: &Frame<'_>) -> Vec<DrawCommand> {
    let mut commands = Vec::with_capacity(3 + frame.particles.len() + frame.obstacles.len());

    commands.push(DrawCommand::Gradient {
        rect: Rect::new(0.0, 0.0, FIELD_WIDTH, GROUND_Y),
        top: colors::SKY_TOP,
        bottom: colors::SKY_BOTTOM,
    });
    commands.push(DrawCommand::Gradient {
        rect: Rect::new(0.0, GROUND_Y, FIELD_WIDTH, GROUND_HEIGHT),
        top: colors::GRASS_TOP,
        bottom: colors::GRASS_BOTTOM,
    });

    for p in frame.particles {
        let [r, g, b] = colors::DUST;
        commands.push(DrawCommand::Circle {
            center: p.pos,
            radius: p.radius,
            color: [r, g, b, p.alpha.clamp(0.0, 1.0)],
        });
    }

    let mut corgi = frame.player.rect;
    corgi.pos.y += frame.player.bob;
    commands.push(DrawCommand::Sprite {
        sprite: Sprite::Corgi,
        rect: corgi,
        rotation: frame.player.tilt,
    });

    commands.extend(frame.obstacles.iter().map(|o| DrawCommand::Sprite {
        sprite: Sprite::for_obstacle(o.kind),
        rect: o.rect(),
        rotation: 0.0,
    }));

    commands
}

/// Renderer that keeps the last frame's draw list (headless runs, tests)
#[derive(Debug, Default)]
pub struct DrawListRenderer {
    pub commands: Vec<DrawCommand>,
    pub frames: u64,
}

impl Renderer for DrawListRenderer {
    fn render(&mut self, frame: &Frame<'_>) {
        self.commands = draw_list(frame);
        self.frames += 1;
    }
}
