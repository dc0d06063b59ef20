use crate::layout::{Note, DEFAULT_ACCIDENTAL_OFFSETS};
use crate::leaderboard::JsonFileStore;
use crate::settings::Settings;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_NOTE_START: Note = 36;
pub const DEFAULT_NOTE_END: Note = 96;

/// Built-in stages: two warm-ups, then the timed phrase.
pub const DEFAULT_STAGES: [&str; 3] = ["CAT DOG", "AEROPLANE", "TYPE ME AS FAST AS YOU CAN!"];

/// Key highlight after any press
pub const FLASH_DURATION: Duration = Duration::from_millis(160);
/// Success/error effect on the phrase box
pub const PULSE_DURATION: Duration = Duration::from_millis(200);
/// Redraw cadence, also the timer display refresh
pub const FRAME_INTERVAL: Duration = Duration::from_millis(50);

/// Command-line values that take precedence over the settings file
#[derive(Clone, Default)]
pub struct Overrides {
    pub name: Option<String>,
    pub no_midi: bool,
    pub midi_port: Option<String>,
    pub note_start: Option<Note>,
    pub note_end: Option<Note>,
    pub store: Option<PathBuf>,
}

/// Resolved configuration for a tutor run
#[derive(Clone, Debug)]
pub struct TutorConfig {
    pub note_start: Note,
    pub note_end: Note,
    pub accidental_offsets: Vec<u8>,
    pub stages: Vec<String>,
    pub player_name: Option<String>,
    pub midi: bool,
    pub midi_port: Option<String>,
    pub store_path: PathBuf,
}

impl TutorConfig {
    pub fn resolve(settings: &Settings, overrides: Overrides) -> Self {
        // Empty phrases could never be completed by a press.
        let stages: Vec<String> = settings
            .stages
            .iter()
            .filter(|s| !s.is_empty())
            .cloned()
            .collect();
        let stages = if stages.is_empty() {
            DEFAULT_STAGES.iter().map(|s| s.to_string()).collect()
        } else {
            stages
        };

        let player_name = overrides
            .name
            .or_else(|| settings.player.name.clone())
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        Self {
            note_start: overrides
                .note_start
                .or(settings.keyboard.note_start)
                .unwrap_or(DEFAULT_NOTE_START),
            note_end: overrides
                .note_end
                .or(settings.keyboard.note_end)
                .unwrap_or(DEFAULT_NOTE_END),
            accidental_offsets: DEFAULT_ACCIDENTAL_OFFSETS.to_vec(),
            stages,
            player_name,
            midi: !overrides.no_midi && settings.midi.enabled.unwrap_or(true),
            midi_port: overrides.midi_port.or_else(|| settings.midi.port.clone()),
            store_path: overrides
                .store
                .or_else(|| settings.store.clone())
                .unwrap_or_else(JsonFileStore::default_path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_settings_or_flags() {
        let config = TutorConfig::resolve(&Settings::default(), Overrides::default());
        assert_eq!(config.note_start, 36);
        assert_eq!(config.note_end, 96);
        assert_eq!(config.stages, DEFAULT_STAGES);
        assert_eq!(config.player_name, None);
        assert!(config.midi);
    }

    #[test]
    fn flags_win_over_settings() {
        let settings = Settings::parse(
            r#"
            stages = ["HI", ""]

            [player]
            name = "from-file"

            [keyboard]
            note_start = 48
            note_end = 72

            [midi]
            enabled = true
            "#,
        );
        let overrides = Overrides {
            name: Some("  flag ".to_string()),
            no_midi: true,
            note_end: Some(60),
            ..Overrides::default()
        };
        let config = TutorConfig::resolve(&settings, overrides);
        assert_eq!(config.player_name.as_deref(), Some("flag"));
        assert_eq!(config.note_start, 48);
        assert_eq!(config.note_end, 60);
        assert_eq!(config.stages, ["HI"]);
        assert!(!config.midi);
    }

    #[test]
    fn blank_name_counts_as_missing() {
        let overrides = Overrides {
            name: Some("   ".to_string()),
            ..Overrides::default()
        };
        let config = TutorConfig::resolve(&Settings::default(), overrides);
        assert_eq!(config.player_name, None);
    }
}
