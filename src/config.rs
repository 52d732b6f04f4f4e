// Copyright (C) 2026 Michael Wilson <mike@mdwn.dev>
//
// This program is free software: you can redistribute it and/or modify it under
// the terms of the GNU General Public License as published by the Free Software
// Foundation, version 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//
use std::fs;
use std::path::Path;

use serde::Deserialize;

mod controller;
mod error;
mod instrument;
mod midi;
mod pose;

pub use controller::{Controller, OscController};
pub use error::ConfigError;
pub use instrument::{Instrument, CHORD_SET_DEFAULT};
pub use midi::Midi;
pub use pose::Pose;

/// The configuration for the gesture instrument.
#[derive(Deserialize)]
pub struct Config {
    /// The pose source configuration.
    #[serde(default)]
    pose: Pose,
    /// The MIDI output configuration.
    midi: Midi,
    /// The instrument mapping configuration.
    #[serde(default)]
    instrument: Instrument,
    /// The live settings surface configuration.
    controller: Option<Controller>,
}

impl Config {
    /// Loads and validates the instrument configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let config: Config = serde_yml::from_str(&fs::read_to_string(path)?)?;
        config.instrument.validate().map_err(ConfigError::Invalid)?;
        config.midi.validate().map_err(ConfigError::Invalid)?;
        Ok(config)
    }

    /// Returns the pose source configuration.
    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    /// Returns the MIDI output configuration.
    pub fn midi(&self) -> &Midi {
        &self.midi
    }

    /// Returns the instrument configuration.
    pub fn instrument(&self) -> &Instrument {
        &self.instrument
    }

    /// Returns the controller configuration.
    pub fn controller(&self) -> Option<&Controller> {
        self.controller.as_ref()
    }
}

#[cfg(test)]
mod test {
    use std::io::Write;
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_load_full_config() {
        let mut file = tempfile::NamedTempFile::new().expect("unable to create temp file");
        file.write_all(
            br#"
pose:
  source: osc
  listen: "127.0.0.1:9340"
midi:
  device: IAC
  channel: 2
instrument:
  width_factor: 0.5
  height_factor: 0.7
  zone_offset: 10
  chord_set: major
  note_duration: 250ms
  frame_rate: 60
controller:
  kind: osc
  port: 9341
"#,
        )
        .expect("unable to write temp file");

        let config = Config::load(file.path()).expect("config should load");
        assert_eq!(config.pose().listen(), "127.0.0.1:9340");
        assert_eq!(config.midi().device(), "IAC");
        assert_eq!(config.midi().channel(), 1);
        assert_eq!(config.instrument().chord_set().as_deref(), Some("major"));
        assert_eq!(
            config.instrument().note_duration().expect("duration should parse"),
            Duration::from_millis(250)
        );
        assert_eq!(config.instrument().frame_rate(), 60);
        assert!(config.controller().is_some());
    }

    #[test]
    fn test_load_minimal_config() {
        let mut file = tempfile::NamedTempFile::new().expect("unable to create temp file");
        file.write_all(b"midi:\n  device: mock:out\n")
            .expect("unable to write temp file");

        let config = Config::load(file.path()).expect("config should load");
        assert_eq!(config.pose().source(), "osc");
        assert_eq!(config.instrument().chord_set().as_deref(), Some("minor0"));
        assert!(config.controller().is_none());
    }

    #[test]
    fn test_load_rejects_unknown_chord_set() {
        let mut file = tempfile::NamedTempFile::new().expect("unable to create temp file");
        file.write_all(b"midi:\n  device: mock:out\ninstrument:\n  chord_set: dorian\n")
            .expect("unable to write temp file");

        assert!(matches!(
            Config::load(file.path()),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            Config::load("/nonexistent/handwave.yaml"),
            Err(ConfigError::Read(_))
        ));
    }
}
