//! Game controller
//!
//! Owns the run state, the score history, settings and the audio port, and
//! drives the start / playing / game-over state machine:
//!
//! - `Start` + jump → new run, `Playing`, and the corgi jumps right away
//! - `Playing` + jump / slide → player control
//! - `Playing` → `GameOver` when the last life is lost (score is recorded)
//! - `GameOver` + jump → new run, `Playing` (no jump)

use crate::audio::{AudioPort, Channel, Cue};
use crate::highscores::ScoreHistory;
use crate::input::{Command, KeyEdge};
use crate::render::Frame;
use crate::settings::Settings;
use crate::sim::{GamePhase, GameState, TickOutcome, tick};

pub struct Game<A: AudioPort> {
    state: GameState,
    history: ScoreHistory,
    settings: Settings,
    audio: A,
}

impl<A: AudioPort> Game<A> {
    pub fn new(seed: u64, settings: Settings, history: ScoreHistory, mut audio: A) -> Self {
        audio.set_volume(Channel::Effects, settings.sfx_volume);
        audio.set_volume(Channel::Music, settings.music_volume);
        audio.set_muted(settings.muted);
        log::info!(
            "Game created (seed {}, best score {})",
            seed,
            history.best()
        );
        Self {
            state: GameState::new(seed),
            history,
            settings,
            audio,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn history(&self) -> &ScoreHistory {
        &self.history
    }

    pub fn best_score(&self) -> u32 {
        self.history.best()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    /// Advance one frame. The raw delta is clamped to `max_frame_dt` first.
    pub fn update(&mut self, raw_dt: f32) -> TickOutcome {
        let dt = self.settings.clamp_frame_dt(raw_dt);
        self.state.elapsed += dt;

        let outcome = tick(&mut self.state, dt, &mut self.audio);
        if outcome == TickOutcome::GameOver {
            self.finish_run();
        }
        outcome
    }

    /// Snapshot for the renderer
    pub fn frame(&self) -> Frame<'_> {
        Frame::new(&self.state, &self.history)
    }

    /// Route a key event through the bindings. Returns true if it was bound.
    pub fn handle_key(&mut self, code: &str, edge: KeyEdge) -> bool {
        match self.settings.keys.command_for(code, edge) {
            Some(command) => {
                self.handle(command);
                true
            }
            None => self.settings.keys.is_bound(code),
        }
    }

    pub fn handle(&mut self, command: Command) {
        match command {
            Command::Jump => self.on_jump_pressed(),
            Command::SlideStart if self.state.phase == GamePhase::Playing => {
                self.state.player.start_slide();
            }
            Command::SlideEnd if self.state.phase == GamePhase::Playing => {
                self.state.player.end_slide();
            }
            Command::ToggleMute => self.set_muted(!self.settings.muted),
            _ => {}
        }
    }

    fn on_jump_pressed(&mut self) {
        // First gesture unlocks audio; music retries until it sticks
        self.audio.unlock();
        self.audio.start_music();

        match self.state.phase {
            GamePhase::Start => {
                self.start_run();
                self.jump();
            }
            GamePhase::Playing => self.jump(),
            GamePhase::GameOver => self.start_run(),
        }
    }

    fn jump(&mut self) {
        if self.state.player.jump() {
            self.audio.play(Cue::Jump);
        }
    }

    fn start_run(&mut self) {
        self.state.reset();
        self.state.phase = GamePhase::Playing;
        log::info!("Run started");
    }

    fn finish_run(&mut self) {
        self.history.append(self.state.score);
        self.history.save();
        log::info!(
            "Run finished: score {}, best {}",
            self.state.score,
            self.history.best()
        );
    }

    /// Change a volume and remember it
    pub fn set_volume(&mut self, channel: Channel, level: f32) {
        self.settings.set_volume(channel, level);
        self.audio.set_volume(channel, self.settings.volume(channel));
        self.settings.save();
    }

    /// Mute or unmute all audio and remember it
    pub fn set_muted(&mut self, muted: bool) {
        self.settings.muted = muted;
        self.audio.set_muted(muted);
        self.settings.save();
        log::info!("Audio {}", if muted { "muted" } else { "unmuted" });
    }
}
