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
use std::{error::Error, fmt, sync::Arc};

use crate::config;
use crate::notes::Directive;

mod midir;
mod mock;

/// A MIDI sink that can sound note directives.
pub trait Sink: fmt::Display + Send + Sync {
    /// Returns the name of the sink.
    fn name(&self) -> String;

    /// Sounds the given directive. A mute directive releases whatever is
    /// currently sounding. Called at most once per frame.
    fn play(&self, directive: &Directive) -> Result<(), Box<dyn Error>>;
}

/// Lists MIDI output devices known to midir.
pub fn list_devices() -> Result<Vec<String>, Box<dyn Error>> {
    midir::list()
}

/// Gets a sink matching the given configuration.
pub fn get_sink(config: &config::Midi) -> Result<Arc<dyn Sink>, Box<dyn Error>> {
    if config.device().starts_with("mock") {
        return Ok(Arc::new(mock::Sink::get(config.device())));
    }

    Ok(Arc::new(midir::get(config.device(), config.channel())?))
}
