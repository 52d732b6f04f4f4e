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
use serde::Deserialize;

/// A YAML representation of the MIDI output configuration.
#[derive(Deserialize, Clone)]
pub struct Midi {
    /// The MIDI output device. Matched as a substring of the port name, or
    /// "mock..." for a mock sink.
    device: String,

    /// The MIDI channel to emit notes on, 1-based.
    channel: Option<u8>,
}

impl Midi {
    /// Returns the device from the configuration.
    pub fn device(&self) -> &str {
        &self.device
    }

    /// Returns the 0-based MIDI channel from the configuration.
    pub fn channel(&self) -> u8 {
        self.channel.unwrap_or(1).saturating_sub(1)
    }

    /// Validates the authored values.
    pub fn validate(&self) -> Result<(), String> {
        match self.channel {
            Some(channel) if !(1..=16).contains(&channel) => {
                Err(format!("MIDI channel {} must be in 1..=16", channel))
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_channel_is_zero_based() {
        let midi: Midi = serde_yml::from_str("device: mock:device").expect("config should parse");
        assert_eq!(midi.channel(), 0);

        let midi: Midi =
            serde_yml::from_str("device: IAC\nchannel: 10").expect("config should parse");
        assert_eq!(midi.channel(), 9);
        assert!(midi.validate().is_ok());
    }

    #[test]
    fn test_out_of_range_channel_rejected() {
        let midi: Midi =
            serde_yml::from_str("device: IAC\nchannel: 17").expect("config should parse");
        assert!(midi.validate().is_err());
    }
}
