//! Sound cues
//!
//! The simulation only ever asks for a named cue through `AudioPort`; what
//! happens next is up to the implementation. On wasm the cues are short
//! `<audio>` elements plus one looping music track. Playback is best effort:
//! a rejected `play()` (autoplay policy, missing file) is logged and dropped.

/// Sound effect cues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    /// Corgi jumped
    Jump,
    /// Hazard hit, life lost
    Hit,
    /// Heart collected
    Heart,
}

impl Cue {
    pub const ALL: [Cue; 3] = [Cue::Jump, Cue::Hit, Cue::Heart];

    pub fn as_str(&self) -> &'static str {
        match self {
            Cue::Jump => "jump",
            Cue::Hit => "hit",
            Cue::Heart => "heart",
        }
    }

    /// Audio file served next to the page
    pub fn file_name(&self) -> &'static str {
        match self {
            Cue::Jump => "jump.mp3",
            Cue::Hit => "hit.mp3",
            Cue::Heart => "heart.mp3",
        }
    }
}

/// Volume channels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    /// Sound effects
    Effects,
    /// Background music
    Music,
}

/// Capability the game uses to make noise
pub trait AudioPort {
    /// Fire-and-forget a cue
    fn play(&mut self, cue: Cue);

    /// Set a channel volume (0.0 - 1.0)
    fn set_volume(&mut self, channel: Channel, level: f32);

    /// Silence (or restore) every channel without touching the volumes
    fn set_muted(&mut self, _muted: bool) {}

    /// Start the looping music track if it isn't already playing
    fn start_music(&mut self) {}

    /// Prime playback after the first user gesture
    fn unlock(&mut self) {}
}

/// Audio sink that drops everything (headless runs)
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAudio;

impl AudioPort for NullAudio {
    fn play(&mut self, _cue: Cue) {}

    fn set_volume(&mut self, _channel: Channel, _level: f32) {}
}

/// Audio sink that remembers every request, for tests and replays
#[derive(Debug, Default, Clone)]
pub struct RecordingAudio {
    pub cues: Vec<Cue>,
    pub volumes: Vec<(Channel, f32)>,
    pub mutes: Vec<bool>,
    pub music_requests: u32,
    pub unlocks: u32,
}

impl RecordingAudio {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times a given cue was requested
    pub fn count(&self, cue: Cue) -> usize {
        self.cues.iter().filter(|&&c| c == cue).count()
    }
}

impl AudioPort for RecordingAudio {
    fn play(&mut self, cue: Cue) {
        self.cues.push(cue);
    }

    fn set_volume(&mut self, channel: Channel, level: f32) {
        self.volumes.push((channel, level));
    }

    fn set_muted(&mut self, muted: bool) {
        self.mutes.push(muted);
    }

    fn start_music(&mut self) {
        self.music_requests += 1;
    }

    fn unlock(&mut self) {
        self.unlocks += 1;
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::WebAudio;

#[cfg(target_arch = "wasm32")]
mod web {
    use std::cell::Cell;
    use std::rc::Rc;

    use wasm_bindgen_futures::{JsFuture, spawn_local};
    use web_sys::HtmlAudioElement;

    use super::{AudioPort, Channel, Cue};

    const MUSIC_FILE: &str = "bgm.mp3";

    /// `<audio>` element backed sound
    pub struct WebAudio {
        cues: Vec<(Cue, HtmlAudioElement)>,
        music: Option<HtmlAudioElement>,
        sfx_volume: f32,
        music_volume: f32,
        muted: bool,
        music_started: Rc<Cell<bool>>,
        warmed_up: bool,
    }

    fn load_element(src: &str) -> Option<HtmlAudioElement> {
        match HtmlAudioElement::new_with_src(src) {
            Ok(el) => {
                el.set_preload("auto");
                el.load();
                Some(el)
            }
            Err(e) => {
                log::warn!("Failed to create audio element for {}: {:?}", src, e);
                None
            }
        }
    }

    /// Start playback and swallow a rejected promise
    fn play_element(el: &HtmlAudioElement, label: &'static str) {
        match el.play() {
            Ok(promise) => spawn_local(async move {
                if let Err(e) = JsFuture::from(promise).await {
                    log::debug!("Playback of {} rejected: {:?}", label, e);
                }
            }),
            Err(e) => log::debug!("Playback of {} failed: {:?}", label, e),
        }
    }

    impl WebAudio {
        pub fn new(sfx_volume: f32, music_volume: f32) -> Self {
            let cues = Cue::ALL
                .iter()
                .filter_map(|&cue| load_element(cue.file_name()).map(|el| (cue, el)))
                .collect();
            let music = load_element(MUSIC_FILE);
            if let Some(music) = &music {
                music.set_loop(true);
            }

            let mut audio = Self {
                cues,
                music,
                sfx_volume,
                music_volume,
                muted: false,
                music_started: Rc::new(Cell::new(false)),
                warmed_up: false,
            };
            audio.apply_volumes();
            audio
        }

        fn effective(&self, level: f32) -> f64 {
            if self.muted { 0.0 } else { level as f64 }
        }

        fn apply_volumes(&mut self) {
            let sfx = self.effective(self.sfx_volume);
            for (_, el) in &self.cues {
                el.set_volume(sfx);
            }
            if let Some(music) = &self.music {
                music.set_volume(self.effective(self.music_volume));
            }
        }
    }

    impl AudioPort for WebAudio {
        fn play(&mut self, cue: Cue) {
            let Some((_, el)) = self.cues.iter().find(|(c, _)| *c == cue) else {
                return;
            };
            el.set_current_time(0.0);
            el.set_volume(self.effective(self.sfx_volume));
            play_element(el, cue.as_str());
        }

        fn set_volume(&mut self, channel: Channel, level: f32) {
            let level = level.clamp(0.0, 1.0);
            match channel {
                Channel::Effects => self.sfx_volume = level,
                Channel::Music => self.music_volume = level,
            }
            self.apply_volumes();
        }

        fn set_muted(&mut self, muted: bool) {
            self.muted = muted;
            self.apply_volumes();
        }

        fn start_music(&mut self) {
            if self.music_started.get() {
                return;
            }
            let Some(music) = &self.music else { return };
            let Ok(promise) = music.play() else { return };

            let started = self.music_started.clone();
            spawn_local(async move {
                // Autoplay policy may reject; the next key press tries again
                let ok = JsFuture::from(promise).await.is_ok();
                started.set(ok);
                if !ok {
                    log::debug!("Music playback blocked, will retry on next input");
                }
            });
        }

        fn unlock(&mut self) {
            if self.warmed_up {
                return;
            }
            self.warmed_up = true;

            // Play each cue silently once so later plays start without delay
            let restore = self.effective(self.sfx_volume);
            for (_, el) in &self.cues {
                el.set_volume(0.0);
                let Ok(promise) = el.play() else { continue };
                let el = el.clone();
                spawn_local(async move {
                    if JsFuture::from(promise).await.is_ok() {
                        let _ = el.pause();
                        el.set_current_time(0.0);
                    }
                    el.set_volume(restore);
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_audio() {
        let mut audio = RecordingAudio::new();
        audio.play(Cue::Jump);
        audio.play(Cue::Hit);
        audio.play(Cue::Jump);
        audio.set_volume(Channel::Music, 0.4);
        audio.set_muted(true);
        audio.start_music();

        assert_eq!(audio.count(Cue::Jump), 2);
        assert_eq!(audio.count(Cue::Heart), 0);
        assert_eq!(audio.volumes, vec![(Channel::Music, 0.4)]);
        assert_eq!(audio.mutes, vec![true]);
        assert_eq!(audio.music_requests, 1);
    }

    #[test]
    fn test_cue_names() {
        let names: Vec<_> = Cue::ALL.iter().map(Cue::as_str).collect();
        assert_eq!(names, ["jump", "hit", "heart"]);
    }
}
