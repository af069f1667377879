//! Attract-mode autopilot
//!
//! Looks at the nearest hazard and picks a command: slide under birds, jump
//! (and double jump) over logs. Drives the native headless demo; not part of
//! the rules.

use super::state::{GameState, ObstacleKind};
use crate::input::Command;

/// Seconds of travel before contact at which to react
const JUMP_LEAD: f32 = 0.1;
const SLIDE_LEAD: f32 = 0.25;

/// Decide what to press this frame, if anything
pub fn decide(state: &GameState) -> Option<Command> {
    let player = &state.player;
    let hitbox = player.hitbox();

    // Nearest hazard that can still touch us
    let threat = state
        .obstacles
        .iter()
        .filter(|o| o.kind.is_hazard() && o.right() >= hitbox.left())
        .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x));

    let Some(threat) = threat else {
        return player.is_sliding.then_some(Command::SlideEnd);
    };

    let gap = threat.pos.x - hitbox.right();

    if threat.kind == ObstacleKind::Bird {
        let near = gap < state.game_speed * SLIDE_LEAD;
        if near && player.on_ground && !player.is_sliding {
            return Some(Command::SlideStart);
        }
        return None;
    }

    if player.is_sliding {
        return Some(Command::SlideEnd);
    }

    if player.on_ground {
        return (gap < state.game_speed * JUMP_LEAD).then_some(Command::Jump);
    }

    // Falling back onto a log we haven't cleared yet: spend the second jump
    let over_log = gap < 0.0;
    let dropping_into = hitbox.bottom() + player.vy * JUMP_LEAD >= threat.rect().top();
    (player.vy > 0.0 && player.jumps_left > 0 && over_log && dropping_into)
        .then_some(Command::Jump)
}
