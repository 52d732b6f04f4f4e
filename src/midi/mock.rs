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
use std::{
    error::Error,
    fmt,
    sync::{Arc, Mutex},
};

use crate::notes::Directive;

/// A mock sink. Doesn't actually play anything; records every directive.
#[derive(Clone)]
pub struct Sink {
    name: String,
    played: Arc<Mutex<Vec<Directive>>>,
}

impl Sink {
    /// Gets the given mock sink.
    pub fn get(name: &str) -> Sink {
        Sink {
            name: name.to_string(),
            played: Arc::new(Mutex::new(Vec::new())),
        }
    }

    #[cfg(test)]
    /// Returns every directive played so far.
    pub fn played(&self) -> Vec<Directive> {
        self.played
            .lock()
            .expect("unable to get played lock")
            .clone()
    }

    #[cfg(test)]
    /// Returns the last directive played, if any.
    pub fn last_played(&self) -> Option<Directive> {
        self.played
            .lock()
            .expect("unable to get played lock")
            .last()
            .cloned()
    }
}

impl super::Sink for Sink {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn play(&self, directive: &Directive) -> Result<(), Box<dyn Error>> {
        let mut played = self.played.lock().expect("unable to get played lock");
        played.push(directive.clone());
        Ok(())
    }
}

impl fmt::Display for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (mock)", self.name)
    }
}
