//! Per-frame simulation tick
//!
//! Advances the run by `dt` seconds. The step order is fixed: speed, player
//! physics, dust, obstacles (move, score, collide, cull), then spawning.
//! `dt` is used as given; the frame driver is responsible for clamping it.

use glam::Vec2;

use super::rect::overlaps;
use super::spawn::spawn_obstacle;
use super::state::{GamePhase, GameState, ObstacleKind, Particle};
use crate::audio::{AudioPort, Cue};
use crate::consts::*;

/// What a tick did to the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not playing, nothing simulated
    Idle,
    /// Run continues
    Running,
    /// The last life was lost during this tick
    GameOver,
}

/// Advance the game state by `dt` seconds
pub fn tick(state: &mut GameState, dt: f32, audio: &mut dyn AudioPort) -> TickOutcome {
    if state.phase != GamePhase::Playing {
        return TickOutcome::Idle;
    }

    // Difficulty ramps linearly with time, no cap
    state.game_speed += SPEED_INCREASE_PER_SEC * dt;

    update_player(state, dt);
    emit_dust(state, dt);
    update_particles(state, dt);

    if update_obstacles(state, dt, audio) == TickOutcome::GameOver {
        return TickOutcome::GameOver;
    }

    state.spawn_timer += dt;
    if state.spawn_timer >= state.next_spawn_time {
        let obstacle = spawn_obstacle(&mut state.rng);
        state.obstacles.push(obstacle);
        state.spawn_timer = 0.0;
        state.next_spawn_time = state.rng.uniform(SPAWN_INTERVAL_MIN, SPAWN_INTERVAL_MAX);
    }

    TickOutcome::Running
}

fn update_player(state: &mut GameState, dt: f32) {
    let player = &mut state.player;
    player.vy += GRAVITY * dt;
    player.pos.y += player.vy * dt;

    let ground = player.ground_top();
    if player.pos.y >= ground {
        player.pos.y = ground;
        player.vy = 0.0;
        if !player.on_ground {
            player.on_ground = true;
            player.jumps_left = MAX_JUMPS;
        }
    } else {
        player.on_ground = false;
    }
}

/// Kick up dust behind the corgi while it runs along the ground
fn emit_dust(state: &mut GameState, dt: f32) {
    if !state.player.on_ground || state.player.is_sliding {
        return;
    }

    state.dust_timer += dt;
    if state.dust_timer >= DUST_INTERVAL {
        // Leftover time is dropped, not carried into the next interval
        state.dust_timer = 0.0;
        let vy = state.rng.uniform(-30.0, -10.0);
        let radius = state.rng.uniform(2.0, 4.0);
        state.particles.push(Particle {
            pos: Vec2::new(state.player.pos.x + 20.0, GROUND_Y - 5.0),
            vel: Vec2::new(-state.game_speed * 0.6, vy),
            alpha: DUST_START_ALPHA,
            radius,
        });
    }
}

fn update_particles(state: &mut GameState, dt: f32) {
    for particle in state.particles.iter_mut() {
        particle.pos += particle.vel * dt;
        particle.vel.y += DUST_GRAVITY * dt;
        particle.alpha -= DUST_FADE_PER_SEC * dt;
    }
    state.particles.retain(|p| p.alpha > 0.0);
}

/// Move, score, collide and cull obstacles, newest first.
///
/// Returns `GameOver` as soon as the last life is lost; obstacles not yet
/// visited this tick are left where they are.
fn update_obstacles(state: &mut GameState, dt: f32, audio: &mut dyn AudioPort) -> TickOutcome {
    let shift = state.game_speed * dt;
    let anchor_x = state.player.pos.x;
    let hitbox = state.player.hitbox();

    let mut i = state.obstacles.len();
    while i > 0 {
        i -= 1;

        let obstacle = &mut state.obstacles[i];
        obstacle.pos.x -= shift;

        if !obstacle.passed && obstacle.kind.is_hazard() && obstacle.right() < anchor_x {
            obstacle.passed = true;
            state.score += PASS_REWARD;
        }

        if overlaps(&hitbox, &obstacle.rect()) {
            let kind = obstacle.kind;
            state.obstacles.remove(i);

            if kind == ObstacleKind::Heart {
                if state.lives < MAX_LIVES {
                    state.lives += 1;
                }
                // Cue plays even when already at full health
                audio.play(Cue::Heart);
                continue;
            }

            state.lives = state.lives.saturating_sub(1);
            audio.play(Cue::Hit);
            if state.lives == 0 {
                state.phase = GamePhase::GameOver;
                log::info!("Game over with score {}", state.score);
                return TickOutcome::GameOver;
            }
            continue;
        }

        if obstacle.right() < DESPAWN_X {
            state.obstacles.remove(i);
        }
    }

    TickOutcome::Running
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::RecordingAudio;
    use crate::sim::state::Obstacle;

    const DT: f32 = 1.0 / 60.0;

    /// Playing state with spawning pushed out of reach
    fn playing_state() -> GameState {
        let mut state = GameState::new(12345);
        state.phase = GamePhase::Playing;
        state.next_spawn_time = f32::MAX;
        state
    }

    /// A horizontal log sitting inside the standing corgi's hitbox
    fn log_on_player() -> Obstacle {
        Obstacle::new(ObstacleKind::LogHorizontal, 170.0, GROUND_Y - 35.0)
    }

    #[test]
    fn test_tick_idle_outside_playing() {
        let mut state = GameState::new(1);
        let mut audio = RecordingAudio::new();
        assert_eq!(tick(&mut state, DT, &mut audio), TickOutcome::Idle);
        assert_eq!(state.game_speed, INITIAL_SPEED);

        state.phase = GamePhase::GameOver;
        assert_eq!(tick(&mut state, DT, &mut audio), TickOutcome::Idle);
    }

    #[test]
    fn test_speed_increases() {
        let mut state = playing_state();
        let mut audio = RecordingAudio::new();
        tick(&mut state, 0.5, &mut audio);
        assert!((state.game_speed - 267.5).abs() < 1e-3);
    }

    #[test]
    fn test_three_hits_end_the_run() {
        let mut state = playing_state();
        let mut audio = RecordingAudio::new();

        for expected in [2, 1] {
            state.obstacles.push(log_on_player());
            assert_eq!(tick(&mut state, DT, &mut audio), TickOutcome::Running);
            assert_eq!(state.lives, expected);
            assert_eq!(state.phase, GamePhase::Playing);
            assert!(state.obstacles.is_empty());
        }

        state.obstacles.push(log_on_player());
        assert_eq!(tick(&mut state, DT, &mut audio), TickOutcome::GameOver);
        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(audio.count(Cue::Hit), 3);

        // Further ticks do nothing
        assert_eq!(tick(&mut state, DT, &mut audio), TickOutcome::Idle);
    }

    #[test]
    fn test_game_over_stops_obstacle_processing() {
        let mut state = playing_state();
        let mut audio = RecordingAudio::new();
        state.lives = 1;

        // Oldest obstacle is far away; the newest one is processed first and kills
        state
            .obstacles
            .push(Obstacle::new(ObstacleKind::LogVertical, 600.0, GROUND_Y - 75.0));
        state.obstacles.push(log_on_player());

        assert_eq!(tick(&mut state, DT, &mut audio), TickOutcome::GameOver);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.obstacles[0].pos.x, 600.0);
    }

    #[test]
    fn test_heart_capped_at_max_lives() {
        let mut state = playing_state();
        let mut audio = RecordingAudio::new();
        let heart = Obstacle::new(ObstacleKind::Heart, 180.0, GROUND_Y - 80.0);

        state.obstacles.push(heart.clone());
        tick(&mut state, DT, &mut audio);
        assert_eq!(state.lives, 3);
        assert!(state.obstacles.is_empty());
        assert_eq!(audio.count(Cue::Heart), 1);

        state.lives = 2;
        state.obstacles.push(heart);
        tick(&mut state, DT, &mut audio);
        assert_eq!(state.lives, 3);
        assert_eq!(audio.count(Cue::Heart), 2);
    }

    #[test]
    fn test_score_once_per_hazard() {
        let mut state = playing_state();
        let mut audio = RecordingAudio::new();

        // Right edge ends up just left of the anchor, clear of the hitbox
        state
            .obstacles
            .push(Obstacle::new(ObstacleKind::LogVertical, 69.5, GROUND_Y - 75.0));
        state
            .obstacles
            .push(Obstacle::new(ObstacleKind::Heart, 100.0, 100.0));

        tick(&mut state, 0.001, &mut audio);
        assert_eq!(state.score, 100);
        assert!(state.obstacles[0].passed);
        assert!(!state.obstacles[1].passed);

        tick(&mut state, 0.001, &mut audio);
        assert_eq!(state.score, 100);
    }

    #[test]
    fn test_offscreen_obstacles_removed() {
        let mut state = playing_state();
        let mut audio = RecordingAudio::new();
        state
            .obstacles
            .push(Obstacle::new(ObstacleKind::Bird, -200.0, GROUND_Y - 130.0));
        state
            .obstacles
            .push(Obstacle::new(ObstacleKind::Heart, -100.0, 100.0));

        tick(&mut state, DT, &mut audio);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.lives, 3);
    }

    #[test]
    fn test_dust_cadence() {
        let mut state = playing_state();
        let mut audio = RecordingAudio::new();

        for n in 1..=5 {
            tick(&mut state, 0.05, &mut audio);
            assert_eq!(state.particles.len(), n);
        }

        let p = &state.particles[0];
        assert!(p.alpha < DUST_START_ALPHA);
        assert!((2.0..4.0).contains(&p.radius));
        assert!(p.vel.x < 0.0);
    }

    #[test]
    fn test_dust_half_rate_with_short_frames() {
        let mut state = playing_state();
        let mut audio = RecordingAudio::new();
        for _ in 0..10 {
            tick(&mut state, 0.025, &mut audio);
        }
        assert_eq!(state.particles.len(), 5);
    }

    #[test]
    fn test_no_dust_while_sliding_or_airborne() {
        let mut state = playing_state();
        let mut audio = RecordingAudio::new();
        state.player.start_slide();
        for _ in 0..10 {
            tick(&mut state, 0.05, &mut audio);
        }
        assert!(state.particles.is_empty());

        state.player.end_slide();
        state.player.jump();
        tick(&mut state, 0.05, &mut audio);
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_particles_expire() {
        let mut state = playing_state();
        let mut audio = RecordingAudio::new();
        tick(&mut state, 0.05, &mut audio);
        assert_eq!(state.particles.len(), 1);

        state.player.start_slide();
        // 0.6 alpha at 0.9/s is gone within a second
        for _ in 0..20 {
            tick(&mut state, 0.05, &mut audio);
        }
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_landing_refills_jumps() {
        let mut state = playing_state();
        let mut audio = RecordingAudio::new();
        assert!(state.player.jump());
        assert!(state.player.jump());
        assert_eq!(state.player.jumps_left, 0);

        let mut ticks = 0;
        while !state.player.on_ground {
            tick(&mut state, DT, &mut audio);
            ticks += 1;
            assert!(ticks < 600, "player never landed");
        }
        assert_eq!(state.player.jumps_left, MAX_JUMPS);
        assert_eq!(state.player.vy, 0.0);
        assert_eq!(state.player.pos.y, GROUND_Y - PLAYER_BASE_HEIGHT);
    }

    #[test]
    fn test_spawn_schedule() {
        let mut state = playing_state();
        let mut audio = RecordingAudio::new();
        state.next_spawn_time = 0.05;

        tick(&mut state, 0.03, &mut audio);
        assert!(state.obstacles.is_empty());

        tick(&mut state, 0.03, &mut audio);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.spawn_timer, 0.0);
        assert!((SPAWN_INTERVAL_MIN..SPAWN_INTERVAL_MAX).contains(&state.next_spawn_time));
    }

    #[test]
    fn test_determinism() {
        let mut a = GameState::new(99999);
        let mut b = GameState::new(99999);
        a.phase = GamePhase::Playing;
        b.phase = GamePhase::Playing;
        let mut audio = RecordingAudio::new();

        for i in 0..600 {
            if i % 45 == 0 {
                a.player.jump();
                b.player.jump();
            }
            tick(&mut a, DT, &mut audio);
            tick(&mut b, DT, &mut audio);
        }

        assert_eq!(a.score, b.score);
        assert_eq!(a.lives, b.lives);
        assert_eq!(a.obstacles.len(), b.obstacles.len());
        assert_eq!(a.particles.len(), b.particles.len());
        for (oa, ob) in a.obstacles.iter().zip(&b.obstacles) {
            assert_eq!(oa.kind, ob.kind);
            assert_eq!(oa.pos, ob.pos);
        }
    }
}
