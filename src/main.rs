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
mod config;
mod controller;
mod engine;
mod gesture;
mod midi;
mod notes;
mod pose;
mod settings;
mod zone;

use std::error::Error;

use clap::{crate_version, Parser, Subcommand};
use tracing::error;

use crate::notes::chords;

const SYSTEMD_SERVICE: &str = r#"
[Unit]
Description=gesture instrument

[Service]
Type=simple
Restart=on-failure
EnvironmentFile=-/etc/default/handwave
ExecStart=/usr/local/bin/handwave start "$HANDWAVE_CONFIG"
ExecReload=/bin/kill -HUP $MAINPID

[Install]
WantedBy=multi-user.target
Alias=handwave.service
"#;

#[derive(Parser)]
#[clap(
    author = "Michael Wilson",
    version = crate_version!(),
    about = "A gesture-controlled MIDI instrument."
)]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lists the available MIDI output devices.
    MidiDevices {},
    /// Lists the built-in chord sets.
    Chords {},
    /// Start will start the gesture instrument.
    Start {
        /// The path to the instrument config.
        config_path: String,
    },
    /// Prints a systemd service definition to stdout.
    Systemd {},
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::MidiDevices {} => {
            let devices = midi::list_devices()?;

            if devices.is_empty() {
                println!("No MIDI output devices found.");
                return Ok(());
            }

            println!("MIDI output devices (count: {}):", devices.len());
            for device in devices {
                println!("- {}", device);
            }
        }
        Commands::Chords {} => {
            println!("Chord sets (count: {}):", chords::NAMES.len());
            for name in chords::NAMES {
                if let Some(set) = chords::get(name) {
                    let kind = match set {
                        chords::ChordSet::Single(_) => "single-note",
                        chords::ChordSet::Pair(_) => "two-note",
                    };
                    println!("- {} ({} {} entries)", name, set.len(), kind);
                }
            }
            println!("- default (continuous pitch, no quantization)");
        }
        Commands::Start { config_path } => {
            let config = config::Config::load(&config_path)?;

            let source = pose::get_source(config.pose()).await?;
            let sink = midi::get_sink(config.midi())?;
            let settings = settings::shared(settings::Settings {
                chord_set: config.instrument().chord_set(),
                note_duration: config.instrument().note_duration()?,
            });

            controller::start(config.controller(), settings.clone()).await?;

            let engine = engine::Engine::new(source, sink, config.instrument(), settings);

            if let Err(e) = engine.run().await {
                error!(err = e.to_string(), "Gesture engine failed.");
                return Err(e);
            }
        }
        Commands::Systemd {} => println!("{}", SYSTEMD_SERVICE),
    }

    Ok(())
}
