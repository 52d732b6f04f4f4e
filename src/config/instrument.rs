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
use std::{error::Error, time::Duration};

use duration_string::DurationString;
use serde::Deserialize;

const DEFAULT_NOTE_DURATION: Duration = Duration::from_millis(300);

/// Name that selects continuous pitch instead of a chord set.
pub const CHORD_SET_DEFAULT: &str = "default";

/// A YAML representation of the instrument configuration. The defaults mirror
/// the constants of the original installation: a 50/50 zone split, zones
/// spanning 70% of the frame height, a 10 pixel edge offset.
#[derive(Deserialize, Clone, Default)]
pub struct Instrument {
    /// The fraction of the frame width where the zone split sits.
    width_factor: Option<f32>,

    /// The fraction of the frame height the zones span.
    height_factor: Option<f32>,

    /// The pixel offset applied to the zone edges.
    zone_offset: Option<f32>,

    /// The chord set to quantize against, or "default" for continuous pitch.
    chord_set: Option<String>,

    /// How long an emitted note stays on.
    note_duration: Option<String>,

    /// The frame rate the engine runs the mapping loop at.
    frame_rate: Option<u32>,
}

impl Instrument {
    /// Returns the zone width factor from the configuration.
    pub fn width_factor(&self) -> f32 {
        self.width_factor.unwrap_or(0.5)
    }

    /// Returns the zone height factor from the configuration.
    pub fn height_factor(&self) -> f32 {
        self.height_factor.unwrap_or(0.7)
    }

    /// Returns the zone edge offset from the configuration.
    pub fn zone_offset(&self) -> f32 {
        self.zone_offset.unwrap_or(10.0)
    }

    /// Returns the configured chord set, with "default" mapped to None.
    pub fn chord_set(&self) -> Option<String> {
        match self.chord_set.as_deref() {
            None => Some("minor0".to_string()),
            Some(CHORD_SET_DEFAULT) => None,
            Some(name) => Some(name.to_string()),
        }
    }

    /// Returns the note duration from the configuration.
    pub fn note_duration(&self) -> Result<Duration, Box<dyn Error>> {
        match &self.note_duration {
            Some(note_duration) => Ok(DurationString::from_string(note_duration.clone())?.into()),
            None => Ok(DEFAULT_NOTE_DURATION),
        }
    }

    /// Returns the engine frame rate from the configuration.
    pub fn frame_rate(&self) -> u32 {
        self.frame_rate.unwrap_or(30)
    }

    /// Validates the authored values. Zone factors and offset are a caller
    /// contract for the zone geometry, so they are checked here rather than
    /// at runtime.
    pub fn validate(&self) -> Result<(), String> {
        let width_factor = self.width_factor();
        if !(width_factor > 0.0 && width_factor < 1.0) {
            return Err(format!("width_factor {} must be in (0, 1)", width_factor));
        }
        let height_factor = self.height_factor();
        if !(height_factor > 0.0 && height_factor < 1.0) {
            return Err(format!("height_factor {} must be in (0, 1)", height_factor));
        }
        if self.zone_offset() < 0.0 {
            return Err(format!("zone_offset {} must not be negative", self.zone_offset()));
        }
        if let Some(name) = self.chord_set() {
            if crate::notes::chords::get(&name).is_none() {
                return Err(format!("unknown chord set {}", name));
            }
        }
        if self.frame_rate() == 0 {
            return Err("frame_rate must be positive".to_string());
        }
        Ok(())
    }
}
