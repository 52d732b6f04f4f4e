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

mod mock;
mod osc;

/// The dimensions of the estimator's video frame in pixels. Announced by the
/// pose source and re-read every iteration, since the source may resize.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSize {
    pub width: f32,
    pub height: f32,
}

/// The OpenPose COCO-18 body parts. The ids and names are the wire contract
/// with the external estimator and must not be reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum BodyPart {
    Nose = 0,
    Neck = 1,
    RShoulder = 2,
    RElbow = 3,
    RWrist = 4,
    LShoulder = 5,
    LElbow = 6,
    LWrist = 7,
    RHip = 8,
    RKnee = 9,
    RAnkle = 10,
    LHip = 11,
    LKnee = 12,
    LAnkle = 13,
    REye = 14,
    LEye = 15,
    REar = 16,
    LEar = 17,
}

impl BodyPart {
    pub const COUNT: usize = 18;

    /// Resolves a wire part id to a body part.
    pub fn from_id(id: u8) -> Option<BodyPart> {
        match id {
            0 => Some(BodyPart::Nose),
            1 => Some(BodyPart::Neck),
            2 => Some(BodyPart::RShoulder),
            3 => Some(BodyPart::RElbow),
            4 => Some(BodyPart::RWrist),
            5 => Some(BodyPart::LShoulder),
            6 => Some(BodyPart::LElbow),
            7 => Some(BodyPart::LWrist),
            8 => Some(BodyPart::RHip),
            9 => Some(BodyPart::RKnee),
            10 => Some(BodyPart::RAnkle),
            11 => Some(BodyPart::LHip),
            12 => Some(BodyPart::LKnee),
            13 => Some(BodyPart::LAnkle),
            14 => Some(BodyPart::REye),
            15 => Some(BodyPart::LEye),
            16 => Some(BodyPart::REar),
            17 => Some(BodyPart::LEar),
            _ => None,
        }
    }

    /// The part name as the estimator reports it.
    pub fn name(&self) -> &'static str {
        match self {
            BodyPart::Nose => "Nose",
            BodyPart::Neck => "Neck",
            BodyPart::RShoulder => "RShoulder",
            BodyPart::RElbow => "RElbow",
            BodyPart::RWrist => "RWrist",
            BodyPart::LShoulder => "LShoulder",
            BodyPart::LElbow => "LElbow",
            BodyPart::LWrist => "LWrist",
            BodyPart::RHip => "RHip",
            BodyPart::RKnee => "RKnee",
            BodyPart::RAnkle => "RAnkle",
            BodyPart::LHip => "LHip",
            BodyPart::LKnee => "LKnee",
            BodyPart::LAnkle => "LAnkle",
            BodyPart::REye => "REye",
            BodyPart::LEye => "LEye",
            BodyPart::REar => "REar",
            BodyPart::LEar => "LEar",
        }
    }
}

/// A single tracked anatomical landmark, in frame pixel coordinates. Produced
/// fresh by the estimator each frame and never mutated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keypoint {
    /// The body part this keypoint tracks.
    pub part: BodyPart,
    /// The x coordinate in frame pixels.
    pub x: f32,
    /// The y coordinate in frame pixels.
    pub y: f32,
    /// The estimator's confidence in this keypoint.
    pub score: f32,
}

impl Keypoint {
    pub fn new(part: BodyPart, x: f32, y: f32, score: f32) -> Keypoint {
        Keypoint { part, x, y, score }
    }
}

/// One detected body for one frame. A frame may contain any number of poses,
/// including none.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pose {
    /// The keypoints detected for this body. Parts the estimator could not
    /// locate are simply absent.
    pub body_parts: Vec<Keypoint>,
}

impl Pose {
    pub fn new(body_parts: Vec<Keypoint>) -> Pose {
        Pose { body_parts }
    }

    /// Finds the first keypoint tracking the given part, if any.
    pub fn keypoint(&self, part: BodyPart) -> Option<&Keypoint> {
        self.body_parts.iter().find(|kp| kp.part == part)
    }
}

/// A source of pose frames. The estimation itself happens in an external
/// process; a source only surfaces its latest complete frame.
pub trait Source: fmt::Display + Send + Sync {
    /// Returns the name of the source.
    fn name(&self) -> String;

    /// Returns the frame dimensions, once the source has announced them.
    fn frame_size(&self) -> Option<FrameSize>;

    /// Returns the poses of the latest complete frame. May be empty.
    fn poses(&self) -> Vec<Pose>;
}

/// Gets a pose source matching the given configuration.
pub async fn get_source(config: &config::Pose) -> Result<Arc<dyn Source>, Box<dyn Error>> {
    if config.source().starts_with("mock") {
        return Ok(Arc::new(mock::Source::get(config.source())));
    }

    Ok(Arc::new(osc::Source::bind(config.listen()).await?))
}

#[cfg(test)]
pub mod test {
    pub use super::mock::Source;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_part_ids_round_trip() {
        for id in 0..BodyPart::COUNT as u8 {
            let part = BodyPart::from_id(id).expect("id should resolve");
            assert_eq!(part as u8, id);
        }
        assert_eq!(BodyPart::from_id(18), None);
    }

    #[test]
    fn test_body_part_names() {
        assert_eq!(BodyPart::Nose.name(), "Nose");
        assert_eq!(BodyPart::Neck.name(), "Neck");
        assert_eq!(BodyPart::LWrist.name(), "LWrist");
        assert_eq!(BodyPart::RWrist.name(), "RWrist");
    }

    #[test]
    fn test_pose_keypoint_lookup() {
        let pose = Pose::new(vec![
            Keypoint::new(BodyPart::Nose, 100.0, 50.0, 0.9),
            Keypoint::new(BodyPart::LWrist, 300.0, 200.0, 0.8),
        ]);

        let wrist = pose.keypoint(BodyPart::LWrist).expect("wrist is present");
        assert_eq!(wrist.x, 300.0);
        assert!(pose.keypoint(BodyPart::RWrist).is_none());
    }
}
