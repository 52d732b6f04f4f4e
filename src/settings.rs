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
use std::sync::{Arc, RwLock};
use std::time::Duration;

/// The live part of the configuration. A settings surface (the OSC controller)
/// may rewrite it at any time; the engine reads a fresh snapshot every
/// iteration so a change takes effect on the very next frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// The chord set to quantize notes against, or None for continuous pitch.
    pub chord_set: Option<String>,
    /// How long an emitted note stays on.
    pub note_duration: Duration,
}

/// A handle to settings shared between the engine and the controller.
pub type SharedSettings = Arc<RwLock<Settings>>;

/// Wraps settings for sharing.
pub fn shared(settings: Settings) -> SharedSettings {
    Arc::new(RwLock::new(settings))
}
