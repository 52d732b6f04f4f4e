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

/// Allows users to specify a live settings surface.
#[derive(Deserialize, Clone)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Controller {
    Osc(OscController),
}

/// The configuration for the OSC settings controller.
#[derive(Deserialize, Clone)]
pub struct OscController {
    /// The port to listen for OSC settings messages on.
    port: Option<u16>,
}

impl OscController {
    /// Returns the port from the configuration.
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(9341)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_osc_controller() {
        let controller: Controller =
            serde_yml::from_str("kind: osc\nport: 9500").expect("config should parse");
        let Controller::Osc(osc) = controller;
        assert_eq!(osc.port(), 9500);
    }

    #[test]
    fn test_default_port() {
        let controller: Controller = serde_yml::from_str("kind: osc").expect("config should parse");
        let Controller::Osc(osc) = controller;
        assert_eq!(osc.port(), 9341);
    }
}
