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
use std::time::Duration;

use crate::gesture::NormalizedPosition;
use crate::settings::Settings;

pub mod chords;

/// The instruction handed to the MIDI sink, at most once per frame. The note
/// is a continuous [0, 1] pitch parameter; quantizing it against a chord set
/// is the sink's job, so a directive carries the set name along.
#[derive(Debug, Clone, PartialEq)]
pub struct Directive {
    /// The continuous pitch parameter in [0, 1].
    pub note: f32,
    /// The volume in [0, 1].
    pub volume: f32,
    /// How long the note should sound.
    pub duration: Duration,
    /// The chord set to quantize against, or None for continuous pitch.
    pub chord_set: Option<String>,
}

impl Directive {
    /// The degenerate silence directive.
    pub fn mute() -> Directive {
        Directive {
            note: 0.0,
            volume: 0.0,
            duration: Duration::ZERO,
            chord_set: None,
        }
    }

    /// Returns true if this directive asks for silence.
    pub fn is_mute(&self) -> bool {
        self.note <= 0.0 || self.volume <= 0.0
    }
}

/// Maps a normalized position to a note directive: the right zone's vertical
/// axis is pitch, the left zone's horizontal axis is volume. Both must be
/// strictly positive, so a wrist exactly on a zone boundary is silent, the
/// same as a wrist outside the zone.
pub fn map_to_note(position: &NormalizedPosition, settings: &Settings) -> Directive {
    let note = position.right.vertical.value();
    let volume = position.left.horizontal.value();

    if note > 0.0 && volume > 0.0 {
        Directive {
            note,
            volume,
            duration: settings.note_duration,
            chord_set: settings.chord_set.clone(),
        }
    } else {
        Directive::mute()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::gesture::{AxisReading, NormalizedPosition};

    fn reading(pct: f32) -> AxisReading {
        AxisReading { pct, in_zone: true }
    }

    fn settings() -> Settings {
        Settings {
            chord_set: Some("minor0".to_string()),
            note_duration: Duration::from_millis(300),
        }
    }

    #[test]
    fn test_map_to_note_plays_when_both_axes_positive() {
        let mut position = NormalizedPosition::default();
        position.right.vertical = reading(0.382);
        position.left.horizontal = reading(0.563);

        let directive = map_to_note(&position, &settings());
        assert!(!directive.is_mute());
        assert!((directive.note - 0.382).abs() < 1e-6);
        assert!((directive.volume - 0.563).abs() < 1e-6);
        assert_eq!(directive.duration, Duration::from_millis(300));
        assert_eq!(directive.chord_set.as_deref(), Some("minor0"));
    }

    #[test]
    fn test_map_to_note_mutes_on_any_zero_axis() {
        for (note, volume) in [(0.0, 0.5), (0.5, 0.0), (0.0, 0.0)] {
            let mut position = NormalizedPosition::default();
            position.right.vertical = reading(note);
            position.left.horizontal = reading(volume);

            let directive = map_to_note(&position, &settings());
            assert_eq!(directive, Directive::mute(), "note={} volume={}", note, volume);
        }
    }

    #[test]
    fn test_map_to_note_ignores_other_axes() {
        // The unused axes may be anything without affecting the gate.
        let mut position = NormalizedPosition::default();
        position.right.horizontal = reading(0.9);
        position.left.vertical = reading(0.9);

        let directive = map_to_note(&position, &settings());
        assert!(directive.is_mute());
    }

    #[test]
    fn test_map_to_note_out_of_zone_reading_mutes() {
        let mut position = NormalizedPosition::default();
        // A computed percentage that never passed the zone gate collapses to
        // 0 and is silent, even though the raw pct is positive.
        position.right.vertical = AxisReading {
            pct: 0.4,
            in_zone: false,
        };
        position.left.horizontal = reading(0.5);

        let directive = map_to_note(&position, &settings());
        assert!(directive.is_mute());
    }

    #[test]
    fn test_mute_is_mute() {
        assert!(Directive::mute().is_mute());
    }
}
