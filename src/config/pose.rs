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

/// A YAML representation of the pose source configuration.
#[derive(Deserialize, Clone, Default)]
pub struct Pose {
    /// The pose source kind: "osc", or "mock..." for a mock source.
    source: Option<String>,

    /// The address the OSC pose listener binds to.
    listen: Option<String>,
}

impl Pose {
    /// Returns the source kind from the configuration.
    pub fn source(&self) -> &str {
        self.source.as_deref().unwrap_or("osc")
    }

    /// Returns the OSC listen address from the configuration.
    pub fn listen(&self) -> &str {
        self.listen.as_deref().unwrap_or("0.0.0.0:9340")
    }
}
