//! Obstacle spawner
//!
//! Picks what comes next and where it sits relative to the ground line.

use super::random::SimRng;
use super::state::{Obstacle, ObstacleKind};
use crate::consts::*;

/// Vertical band (above standing head height) in which hearts float
const HEART_LIFT_MIN: f32 = 30.0;
const HEART_LIFT_MAX: f32 = 110.0;

/// Top edge for a hazard of the given kind. Logs sink slightly into the
/// grass; the bird flies just above a standing corgi's head.
fn hazard_top(kind: ObstacleKind) -> f32 {
    match kind {
        ObstacleKind::Bird => GROUND_Y - PLAYER_BASE_HEIGHT - 40.0,
        ObstacleKind::LogHorizontal => GROUND_Y - 45.0 + 10.0,
        ObstacleKind::LogVertical => GROUND_Y - 100.0 + 25.0,
        ObstacleKind::Heart => GROUND_Y - PLAYER_BASE_HEIGHT - HEART_LIFT_MIN,
    }
}

/// Create the next obstacle just past the right edge of the field
pub fn spawn_obstacle(rng: &mut SimRng) -> Obstacle {
    let x = FIELD_WIDTH + SPAWN_MARGIN;

    if rng.chance(HEART_CHANCE) {
        let y = GROUND_Y - PLAYER_BASE_HEIGHT - rng.uniform(HEART_LIFT_MIN, HEART_LIFT_MAX);
        return Obstacle::new(ObstacleKind::Heart, x, y);
    }

    let kind = rng
        .choose(&ObstacleKind::HAZARDS)
        .copied()
        .unwrap_or(ObstacleKind::LogHorizontal);
    Obstacle::new(kind, x, hazard_top(kind))
}
