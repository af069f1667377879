//! Input commands and key bindings

use serde::{Deserialize, Serialize};

/// Commands the game understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Jump; also starts or restarts a run
    Jump,
    /// Slide key pressed
    SlideStart,
    /// Slide key released
    SlideEnd,
    /// Flip the mute setting
    ToggleMute,
}

/// Whether a key went down or came up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEdge {
    Down,
    Up,
}

/// Physical keys (`KeyboardEvent.code` values) mapped to commands
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub jump: Vec<String>,
    pub slide: Vec<String>,
    pub mute: Vec<String>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            jump: vec!["Space".to_string(), "ArrowUp".to_string()],
            slide: vec!["ArrowDown".to_string()],
            mute: vec!["KeyM".to_string()],
        }
    }
}

impl KeyBindings {
    /// Map a key event to a command. Jump fires on press only.
    pub fn command_for(&self, code: &str, edge: KeyEdge) -> Option<Command> {
        match edge {
            KeyEdge::Down if bound_to(&self.jump, code) => Some(Command::Jump),
            KeyEdge::Down if bound_to(&self.slide, code) => Some(Command::SlideStart),
            KeyEdge::Up if bound_to(&self.slide, code) => Some(Command::SlideEnd),
            KeyEdge::Down if bound_to(&self.mute, code) => Some(Command::ToggleMute),
            _ => None,
        }
    }

    /// True if the key is bound to anything (so the page shouldn't scroll)
    pub fn is_bound(&self, code: &str) -> bool {
        bound_to(&self.jump, code) || bound_to(&self.slide, code) || bound_to(&self.mute, code)
    }
}

fn bound_to(keys: &[String], code: &str) -> bool {
    keys.iter().any(|k| k == code)
}
