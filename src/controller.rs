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
use std::error::Error;

use crate::config;
use crate::settings::SharedSettings;

mod osc;

/// Starts the configured settings surface, if any. Settings changes apply on
/// the very next frame; the engine reads a fresh snapshot each iteration.
pub async fn start(
    config: Option<&config::Controller>,
    settings: SharedSettings,
) -> Result<(), Box<dyn Error>> {
    match config {
        Some(config::Controller::Osc(osc_config)) => osc::Driver::start(osc_config, settings).await,
        None => Ok(()),
    }
}
