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
    collections::BTreeMap,
    error::Error,
    fmt,
    sync::{Arc, Mutex},
};

use rosc::{OscMessage, OscPacket, OscType};
use tokio::net::UdpSocket;
use tracing::{debug, error, info, span, Level};

use super::{BodyPart, FrameSize, Keypoint, Pose};

/// The OSC address announcing the frame size: [width, height].
const FRAME_ADDR: &str = "/handwave/frame";
/// The OSC address carrying one keypoint: [pose, part, x, y, score].
const POSE_ADDR: &str = "/handwave/pose";
/// The OSC address publishing the pending frame: [pose count].
const COMMIT_ADDR: &str = "/handwave/commit";

/// A pose source fed over OSC by an external estimator process. Keypoint
/// messages accumulate into a pending frame; a commit message publishes the
/// pending frame wholesale as the latest snapshot.
pub struct Source {
    addr: String,
    state: Arc<Mutex<State>>,
}

#[derive(Default)]
struct State {
    frame_size: Option<FrameSize>,
    poses: Vec<Pose>,
    pending: BTreeMap<i32, Vec<Keypoint>>,
}

impl Source {
    /// Binds the pose listener and starts decoding frames.
    pub async fn bind(addr: &str) -> Result<Source, Box<dyn Error>> {
        let socket = UdpSocket::bind(addr).await?;
        info!(addr = addr, "Listening for OSC pose frames.");

        let state = Arc::new(Mutex::new(State::default()));
        {
            let state = state.clone();
            tokio::spawn(async move { Source::listen(socket, state).await });
        }

        Ok(Source {
            addr: addr.to_string(),
            state,
        })
    }

    /// Handles UDP receiving. We want to be pretty resilient here: a garbled
    /// packet should never take the instrument down.
    async fn listen(socket: UdpSocket, state: Arc<Mutex<State>>) {
        let span = span!(Level::INFO, "OSC pose source");
        let _enter = span.enter();

        let mut buf = [0u8; rosc::decoder::MTU];
        loop {
            match socket.recv_from(&mut buf).await {
                Ok((size, _)) => match rosc::decoder::decode_udp(&buf[..size]) {
                    Ok((_, packet)) => Source::apply_packet(&state, &packet),
                    Err(e) => error!(err = e.to_string(), "Error decoding OSC message."),
                },
                Err(e) => error!(err = e.to_string(), "Error receiving UDP."),
            }
        }
    }

    fn apply_packet(state: &Mutex<State>, packet: &OscPacket) {
        match packet {
            OscPacket::Message(message) => Source::apply_message(state, message),
            OscPacket::Bundle(bundle) => {
                for packet in bundle.content.iter() {
                    Source::apply_packet(state, packet);
                }
            }
        }
    }

    fn apply_message(state: &Mutex<State>, message: &OscMessage) {
        match message.addr.as_str() {
            FRAME_ADDR => {
                let (Some(width), Some(height)) =
                    (float_arg(message, 0), float_arg(message, 1))
                else {
                    error!("Malformed frame size message.");
                    return;
                };

                let mut state = state.lock().expect("unable to get pose state lock");
                let resized = state.frame_size != Some(FrameSize { width, height });
                if resized {
                    info!(width = width as f64, height = height as f64, "Frame size changed.");
                }
                state.frame_size = Some(FrameSize { width, height });
            }
            POSE_ADDR => {
                let (Some(pose_index), Some(part_id), Some(x), Some(y), Some(score)) = (
                    int_arg(message, 0),
                    int_arg(message, 1),
                    float_arg(message, 2),
                    float_arg(message, 3),
                    float_arg(message, 4),
                ) else {
                    error!("Malformed keypoint message.");
                    return;
                };

                let Some(part) = u8::try_from(part_id).ok().and_then(BodyPart::from_id) else {
                    debug!(part = part_id, "Ignoring unknown part id.");
                    return;
                };

                let mut state = state.lock().expect("unable to get pose state lock");
                state
                    .pending
                    .entry(pose_index)
                    .or_default()
                    .push(Keypoint::new(part, x, y, score));
            }
            COMMIT_ADDR => {
                let pose_count = int_arg(message, 0);

                let mut state = state.lock().expect("unable to get pose state lock");
                let pending = std::mem::take(&mut state.pending);
                let mut poses: Vec<Pose> =
                    pending.into_values().map(Pose::new).collect();
                if let Some(pose_count) = pose_count {
                    poses.truncate(pose_count.max(0) as usize);
                }
                state.poses = poses;
            }
            _ => debug!(addr = message.addr.as_str(), "Ignoring unknown OSC address."),
        }
    }
}

impl super::Source for Source {
    fn name(&self) -> String {
        self.addr.clone()
    }

    fn frame_size(&self) -> Option<FrameSize> {
        self.state
            .lock()
            .expect("unable to get pose state lock")
            .frame_size
    }

    fn poses(&self) -> Vec<Pose> {
        self.state
            .lock()
            .expect("unable to get pose state lock")
            .poses
            .clone()
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (OSC)", self.addr)
    }
}

/// Reads a float argument, accepting ints and doubles.
fn float_arg(message: &OscMessage, index: usize) -> Option<f32> {
    match message.args.get(index)? {
        OscType::Float(value) => Some(*value),
        OscType::Double(value) => Some(*value as f32),
        OscType::Int(value) => Some(*value as f32),
        _ => None,
    }
}

/// Reads an int argument, accepting floats that are whole numbers.
fn int_arg(message: &OscMessage, index: usize) -> Option<i32> {
    match message.args.get(index)? {
        OscType::Int(value) => Some(*value),
        OscType::Float(value) => Some(*value as i32),
        _ => None,
    }
}
