use crate::layout::Note;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub player: PlayerSettings,
    #[serde(default)]
    pub keyboard: KeyboardSettings,
    #[serde(default)]
    pub midi: MidiSettings,
    #[serde(default)]
    pub stages: Vec<String>,
    pub store: Option<PathBuf>,     // Leaderboard file, defaults under the data dir
}

#[derive(Debug, Default, Deserialize)]
pub struct PlayerSettings {
    pub name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct KeyboardSettings {
    pub note_start: Option<Note>,
    pub note_end: Option<Note>,
}

#[derive(Debug, Default, Deserialize)]
pub struct MidiSettings {
    pub enabled: Option<bool>,
    pub port: Option<String>,       // Substring of the input port name to connect to
}

impl Settings {
    pub fn load() -> Self {
        let path = Self::config_path();
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => Self::parse(&content),
            Err(e) => {
                log::warn!("could not read {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn parse(content: &str) -> Self {
        toml::from_str(content).unwrap_or_else(|e| {
            log::warn!("ignoring invalid settings: {}", e);
            Self::default()
        })
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("pianotype")
            .join("config.toml")
    }
}
