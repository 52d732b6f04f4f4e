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
    net::{Ipv4Addr, SocketAddr, SocketAddrV4},
    time::Duration,
};

use rosc::{OscMessage, OscPacket, OscType};
use tokio::net::UdpSocket;
use tracing::{debug, error, info, span, warn, Level};

use crate::config;
use crate::config::CHORD_SET_DEFAULT;
use crate::notes::chords;
use crate::settings::SharedSettings;

/// The OSC address selecting a chord set: [name].
const CHORD_SET_ADDR: &str = "/handwave/chord_set";
/// The OSC address setting the note duration: [millis].
const NOTE_DURATION_ADDR: &str = "/handwave/note_duration";

/// A settings surface driven over OSC, standing in for the control panel of
/// the original installation.
pub struct Driver;

impl Driver {
    /// Binds the settings listener and starts applying changes.
    pub async fn start(
        config: &config::OscController,
        settings: SharedSettings,
    ) -> Result<(), Box<dyn Error>> {
        let addr = SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, config.port()));
        let socket = UdpSocket::bind(addr).await?;
        info!(port = config.port(), "OSC settings controller started.");

        tokio::spawn(Self::listen(socket, settings));
        Ok(())
    }

    /// Handles UDP receiving. A bad settings message is logged and dropped,
    /// never fatal.
    async fn listen(socket: UdpSocket, settings: SharedSettings) {
        let span = span!(Level::INFO, "OSC settings controller");
        let _enter = span.enter();

        let mut buf = [0u8; rosc::decoder::MTU];
        loop {
            match socket.recv_from(&mut buf).await {
                Ok((size, _)) => match rosc::decoder::decode_udp(&buf[..size]) {
                    Ok((_, packet)) => Self::apply_packet(&settings, &packet),
                    Err(e) => error!(err = e.to_string(), "Error decoding OSC message."),
                },
                Err(e) => error!(err = e.to_string(), "Error receiving UDP."),
            }
        }
    }

    fn apply_packet(settings: &SharedSettings, packet: &OscPacket) {
        match packet {
            OscPacket::Message(message) => Self::apply_message(settings, message),
            OscPacket::Bundle(bundle) => {
                for packet in bundle.content.iter() {
                    Self::apply_packet(settings, packet);
                }
            }
        }
    }

    fn apply_message(settings: &SharedSettings, message: &OscMessage) {
        match message.addr.as_str() {
            CHORD_SET_ADDR => {
                let Some(OscType::String(name)) = message.args.first() else {
                    warn!("Chord set message without a name.");
                    return;
                };

                let chord_set = if name == CHORD_SET_DEFAULT {
                    None
                } else if chords::get(name).is_some() {
                    Some(name.clone())
                } else {
                    warn!(name = name.as_str(), "Ignoring unknown chord set.");
                    return;
                };

                info!(
                    chord_set = chord_set.as_deref().unwrap_or(CHORD_SET_DEFAULT),
                    "Chord set changed."
                );
                let mut settings = settings.write().expect("unable to get settings lock");
                settings.chord_set = chord_set;
            }
            NOTE_DURATION_ADDR => {
                let millis = match message.args.first() {
                    Some(OscType::Int(millis)) => *millis as f32,
                    Some(OscType::Float(millis)) => *millis,
                    _ => {
                        warn!("Note duration message without a duration.");
                        return;
                    }
                };
                if !(millis > 0.0) {
                    warn!(millis = millis as f64, "Ignoring non-positive note duration.");
                    return;
                }

                info!(millis = millis as f64, "Note duration changed.");
                let mut settings = settings.write().expect("unable to get settings lock");
                settings.note_duration = Duration::from_millis(millis as u64);
            }
            _ => debug!(addr = message.addr.as_str(), "Ignoring unknown OSC address."),
        }
    }
}
