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
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex,
    },
};

use midir::{MidiOutput, MidiOutputConnection, MidiOutputPort};
use midly::{
    live::LiveEvent,
    num::{u4, u7},
    MidiMessage,
};
use tracing::{debug, error, info, span, Level};

use crate::notes::{chords, Directive};

pub struct Sink {
    name: String,
    channel: u4,
    connection: Arc<Mutex<MidiOutputConnection>>,
    /// The keys currently sounding.
    sounding: Arc<Mutex<Vec<u8>>>,
    /// Bumped on every attack so a stale note-off task does not release a
    /// newer note.
    generation: Arc<AtomicU64>,
}

impl super::Sink for Sink {
    fn name(&self) -> String {
        self.name.clone()
    }

    /// Sounds the given directive through the midir connection. The continuous
    /// pitch parameter is resolved here: quantized against the named chord set
    /// (both notes of a pair sound together), or scaled onto the full MIDI
    /// range when no set is named.
    fn play(&self, directive: &Directive) -> Result<(), Box<dyn Error>> {
        if directive.is_mute() {
            return self.release_all();
        }

        let keys = match directive.chord_set.as_deref() {
            Some(name) => chords::get(name)
                .ok_or(format!("unknown chord set {}", name))?
                .quantize(directive.note)
                .keys(),
            None => vec![(directive.note.clamp(0.0, 1.0) * 127.0).round() as u8],
        };
        let velocity = (directive.volume.clamp(0.0, 1.0) * 127.0).round() as u8;

        let mut sounding = self.sounding.lock().expect("unable to get sounding lock");
        if *sounding == keys {
            // Same keys still within their note duration; let them ring.
            return Ok(());
        }

        for key in sounding.drain(..) {
            self.send_note(key, 0, false)?;
        }
        for key in keys.iter() {
            self.send_note(*key, velocity, true)?;
        }
        *sounding = keys.clone();

        let generation = self.generation.fetch_add(1, Ordering::Relaxed) + 1;
        debug!(
            keys = format!("{:?}", keys),
            velocity = velocity,
            "Note on."
        );

        // Schedule the matching note-off.
        let duration = directive.duration;
        let sink = self.clone_handles();
        tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            if sink.generation.load(Ordering::Relaxed) != generation {
                return;
            }
            let mut sounding = sink.sounding.lock().expect("unable to get sounding lock");
            for key in sounding.drain(..) {
                if let Err(e) = send_event(
                    &sink.connection,
                    note_event(sink.channel, key, 0, false),
                ) {
                    error!(err = e.to_string(), "Error sending note off.");
                }
            }
        });

        Ok(())
    }
}

/// The shared parts of the sink a note-off task needs.
struct SinkHandles {
    channel: u4,
    connection: Arc<Mutex<MidiOutputConnection>>,
    sounding: Arc<Mutex<Vec<u8>>>,
    generation: Arc<AtomicU64>,
}

impl Sink {
    /// Releases everything currently sounding.
    fn release_all(&self) -> Result<(), Box<dyn Error>> {
        let mut sounding = self.sounding.lock().expect("unable to get sounding lock");
        if sounding.is_empty() {
            return Ok(());
        }

        self.generation.fetch_add(1, Ordering::Relaxed);
        for key in sounding.drain(..) {
            self.send_note(key, 0, false)?;
        }

        Ok(())
    }

    fn send_note(&self, key: u8, velocity: u8, on: bool) -> Result<(), Box<dyn Error>> {
        send_event(&self.connection, note_event(self.channel, key, velocity, on))
    }

    fn clone_handles(&self) -> SinkHandles {
        SinkHandles {
            channel: self.channel,
            connection: self.connection.clone(),
            sounding: self.sounding.clone(),
            generation: self.generation.clone(),
        }
    }
}

impl fmt::Display for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (Output)", self.name)
    }
}

/// Builds a note on/off live event.
fn note_event(channel: u4, key: u8, velocity: u8, on: bool) -> LiveEvent<'static> {
    let key = u7::new(key.min(127));
    let vel = u7::new(velocity.min(127));
    LiveEvent::Midi {
        channel,
        message: if on {
            MidiMessage::NoteOn { key, vel }
        } else {
            MidiMessage::NoteOff { key, vel }
        },
    }
}

/// Encodes and sends a live event through the connection.
fn send_event(
    connection: &Mutex<MidiOutputConnection>,
    event: LiveEvent<'static>,
) -> Result<(), Box<dyn Error>> {
    // Choosing 8 here because that's enough for any channel voice message.
    let mut buf: Vec<u8> = Vec::with_capacity(8);
    event.write(&mut buf)?;
    connection
        .lock()
        .expect("unable to get connection lock")
        .send(&buf)?;
    Ok(())
}

/// Lists the names of midir output devices.
pub fn list() -> Result<Vec<String>, Box<dyn Error>> {
    let output = MidiOutput::new("handwave output listing")?;
    let mut names = output
        .ports()
        .iter()
        .map(|port| output.port_name(port))
        .collect::<Result<Vec<String>, _>>()?;
    names.sort();
    Ok(names)
}

/// Gets a midir sink whose port name contains the given name.
pub fn get(name: &str, channel: u8) -> Result<Sink, Box<dyn Error>> {
    let span = span!(Level::INFO, "get sink (midir)");
    let _enter = span.enter();

    let output = MidiOutput::new("handwave output")?;
    let mut matched: Option<(MidiOutputPort, String)> = None;
    for port in output.ports() {
        let port_name = output.port_name(&port)?;
        if port_name.contains(name) {
            matched = Some((port, port_name));
            break;
        }
    }

    let (port, port_name) = matched.ok_or(format!("no MIDI output device matching {}", name))?;
    let connection = output.connect(&port, "handwave player")?;
    info!(device = port_name.as_str(), "Connected MIDI output.");

    Ok(Sink {
        name: port_name,
        channel: u4::new(channel.min(15)),
        connection: Arc::new(Mutex::new(connection)),
        sounding: Arc::new(Mutex::new(Vec::new())),
        generation: Arc::new(AtomicU64::new(0)),
    })
}
