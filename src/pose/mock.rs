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
    collections::VecDeque,
    fmt,
    sync::{Arc, Mutex},
};

use super::{FrameSize, Pose};

/// A mock pose source. Doesn't listen to anything; serves scripted frames.
#[derive(Clone)]
pub struct Source {
    name: String,
    frame_size: Arc<Mutex<Option<FrameSize>>>,
    frames: Arc<Mutex<VecDeque<Vec<Pose>>>>,
    latest: Arc<Mutex<Vec<Pose>>>,
}

impl Source {
    /// Gets the given mock source.
    pub fn get(name: &str) -> Source {
        Source {
            name: name.to_string(),
            frame_size: Arc::new(Mutex::new(None)),
            frames: Arc::new(Mutex::new(VecDeque::new())),
            latest: Arc::new(Mutex::new(Vec::new())),
        }
    }

    #[cfg(test)]
    /// Announces the frame size.
    pub fn set_frame_size(&self, frame_size: FrameSize) {
        let mut size = self.frame_size.lock().expect("unable to get frame size lock");
        *size = Some(frame_size);
    }

    #[cfg(test)]
    /// Queues one scripted frame of poses.
    pub fn push_frame(&self, poses: Vec<Pose>) {
        let mut frames = self.frames.lock().expect("unable to get frames lock");
        frames.push_back(poses);
    }
}

impl super::Source for Source {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn frame_size(&self) -> Option<FrameSize> {
        *self.frame_size.lock().expect("unable to get frame size lock")
    }

    /// Pops the next scripted frame, or repeats the latest one once the
    /// script runs out, which matches the latest-snapshot behavior of the
    /// OSC source.
    fn poses(&self) -> Vec<Pose> {
        let mut frames = self.frames.lock().expect("unable to get frames lock");
        let mut latest = self.latest.lock().expect("unable to get latest lock");
        if let Some(frame) = frames.pop_front() {
            *latest = frame;
        }
        latest.clone()
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (mock)", self.name)
    }
}
