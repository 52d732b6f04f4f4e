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
use std::cmp::Ordering;

use crate::pose::{BodyPart, Keypoint, Pose};
use crate::zone::Zones;

/// One normalized control axis. `pct` is the position within the zone interval
/// and `in_zone` records whether the keypoint was inside it; `value` collapses
/// out-of-zone readings to 0, which is the mapping the note mapper consumes.
/// A reading of exactly 0 at the zone boundary is therefore indistinguishable
/// from an out-of-zone reading downstream.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AxisReading {
    pub pct: f32,
    pub in_zone: bool,
}

impl AxisReading {
    fn inside(pct: f32) -> AxisReading {
        AxisReading { pct, in_zone: true }
    }

    /// The axis value with out-of-zone collapsed to 0.
    pub fn value(&self) -> f32 {
        if self.in_zone {
            self.pct
        } else {
            0.0
        }
    }
}

/// The normalized readings for one control zone.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ZoneReading {
    pub horizontal: AxisReading,
    pub vertical: AxisReading,
}

/// The per-frame normalized position of both wrists, one reading per zone.
/// Derived from exactly one selected pose and discarded after use.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NormalizedPosition {
    pub left: ZoneReading,
    pub right: ZoneReading,
}

/// Picks the pose most likely to be the player: the one whose first Nose or
/// Neck keypoint is most horizontally centered on the zone split. Selection is
/// stateless frame to frame, so the chosen subject can flip between frames
/// when two people are equidistant from the split.
pub fn select_primary<'a>(poses: &'a [Pose], zones: &Zones) -> Option<&'a Pose> {
    poses.iter().min_by(|a, b| {
        let a_head = head_keypoints(a);
        let b_head = head_keypoints(b);

        match (a_head.first(), b_head.first()) {
            (Some(ka), Some(kb)) => {
                let da = (zones.vertical_split - ka.x).abs();
                let db = (zones.vertical_split - kb.x).abs();
                da.partial_cmp(&db).unwrap_or(Ordering::Equal)
            }
            // Fallback inherited from the original comparator: when either
            // side has no head keypoint, rank by head keypoint count, more
            // first. See DESIGN.md.
            _ => b_head.len().cmp(&a_head.len()),
        }
    })
}

fn head_keypoints(pose: &Pose) -> Vec<&Keypoint> {
    pose.body_parts
        .iter()
        .filter(|kp| matches!(kp.part, BodyPart::Nose | BodyPart::Neck))
        .collect()
}

/// Normalizes the selected pose's wrists against the control zones.
///
/// The anatomical left wrist drives the right zone and vice versa: the video
/// is presented mirrored, so the keypoint called "LWrist" is the hand the
/// player sees on their right. Each axis is computed only when the keypoint
/// coordinate lies inside the closed zone interval; otherwise it reads 0.
pub fn normalize(left_wrist: &Keypoint, right_wrist: &Keypoint, zones: &Zones) -> NormalizedPosition {
    let left_zone = right_wrist;
    let right_zone = left_wrist;

    let mut position = NormalizedPosition::default();

    if right_zone.x >= zones.vertical_split && right_zone.x <= zones.right {
        position.right.horizontal =
            AxisReading::inside(percentage(right_zone.x, zones.vertical_split, zones.right));
    }
    if right_zone.y <= zones.bottom && right_zone.y >= zones.top {
        position.right.vertical =
            AxisReading::inside(percentage(right_zone.y, zones.bottom, zones.top));
    }
    if left_zone.x >= zones.left && left_zone.x <= zones.vertical_split {
        position.left.horizontal =
            AxisReading::inside(percentage(left_zone.x, zones.vertical_split, zones.left));
    }
    if left_zone.y <= zones.bottom && left_zone.y >= zones.top {
        position.left.vertical =
            AxisReading::inside(percentage(left_zone.y, zones.bottom, zones.top));
    }

    position
}

/// Computes where `value` falls in the range from `low` (0) to `high` (1).
/// NaN value or low are treated as 0; a NaN high degenerates to value + 1 so
/// the division stays defined.
pub fn percentage(value: f32, low: f32, high: f32) -> f32 {
    let dist = if value.is_nan() { 0.0 } else { value };
    let min_dist = if low.is_nan() { 0.0 } else { low };
    let max_dist = if high.is_nan() { dist + 1.0 } else { high };

    (dist - min_dist) / (max_dist - min_dist)
}
