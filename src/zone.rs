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
use crate::pose::FrameSize;

/// The rectangular control zones of the frame. The vertical split divides the
/// frame into the left zone (volume) and the right zone (pitch); both share
/// the top and bottom bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Zones {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
    pub vertical_split: f32,
}

impl Zones {
    /// Computes the control zones for a frame. Callers must supply factors in
    /// (0, 1) and a non-negative offset smaller than half the frame's smaller
    /// dimension, otherwise left < vertical_split < right does not hold.
    pub fn compute(frame: FrameSize, width_factor: f32, height_factor: f32, offset: f32) -> Zones {
        Zones {
            left: offset,
            right: frame.width - offset,
            top: offset,
            bottom: frame.height * height_factor,
            vertical_split: frame.width * width_factor,
        }
    }
}
