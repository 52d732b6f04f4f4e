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
use std::{error::Error, sync::Arc, time::Duration};

use tokio::time::MissedTickBehavior;
use tracing::{info, span, Level};

use crate::config;
use crate::gesture;
use crate::midi;
use crate::notes::{self, Directive};
use crate::pose::{self, BodyPart};
use crate::settings::SharedSettings;
use crate::zone::Zones;

/// Runs the per-frame gesture-to-sound mapping loop: poses in, at most one
/// note directive out per frame.
pub struct Engine {
    /// The pose source to pull frames from.
    source: Arc<dyn pose::Source>,
    /// The sink directives are forwarded to.
    sink: Arc<dyn midi::Sink>,
    /// The live settings, re-read every frame.
    settings: SharedSettings,
    /// The fraction of the frame width where the zone split sits.
    width_factor: f32,
    /// The fraction of the frame height the zones span.
    height_factor: f32,
    /// The pixel offset applied to the zone edges.
    zone_offset: f32,
    /// The rate the loop runs at.
    frame_rate: u32,
}

impl Engine {
    /// Creates a new engine.
    pub fn new(
        source: Arc<dyn pose::Source>,
        sink: Arc<dyn midi::Sink>,
        instrument: &config::Instrument,
        settings: SharedSettings,
    ) -> Engine {
        Engine {
            source,
            sink,
            settings,
            width_factor: instrument.width_factor(),
            height_factor: instrument.height_factor(),
            zone_offset: instrument.zone_offset(),
            frame_rate: instrument.frame_rate(),
        }
    }

    /// Runs the mapping loop until an error occurs. There is no built-in stop
    /// condition: the loop re-schedules itself every tick and only ends when
    /// a collaborator fails, which is fatal to the session, or the process is
    /// torn down.
    pub async fn run(&self) -> Result<(), Box<dyn Error>> {
        info!(
            source = self.source.name(),
            sink = self.sink.name(),
            frame_rate = self.frame_rate,
            "Starting gesture engine."
        );

        let mut tick = tokio::time::interval(Duration::from_secs_f64(1.0 / self.frame_rate as f64));
        tick.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tick.tick().await;
            self.step()?;
        }
    }

    /// Runs one frame: select the primary subject, normalize its wrists, map
    /// them to a directive and forward it. Emits nothing when no pose is in
    /// frame or the source has not announced a frame size yet.
    fn step(&self) -> Result<(), Box<dyn Error>> {
        let span = span!(Level::DEBUG, "frame");
        let _enter = span.enter();

        // A fresh snapshot every frame so settings changes apply immediately.
        let settings = self
            .settings
            .read()
            .expect("unable to get settings lock")
            .clone();

        let Some(frame) = self.source.frame_size() else {
            return Ok(());
        };
        let zones = Zones::compute(frame, self.width_factor, self.height_factor, self.zone_offset);

        let poses = self.source.poses();
        let Some(primary) = gesture::select_primary(&poses, &zones) else {
            return Ok(());
        };

        let directive = match (
            primary.keypoint(BodyPart::LWrist),
            primary.keypoint(BodyPart::RWrist),
        ) {
            (Some(left_wrist), Some(right_wrist)) => {
                let position = gesture::normalize(left_wrist, right_wrist, &zones);
                notes::map_to_note(&position, &settings)
            }
            // A primary subject without both wrists tracked is silent.
            _ => Directive::mute(),
        };

        self.sink.play(&directive)
    }
}

#[cfg(test)]
mod test {
    use std::time::Duration;

    use super::*;
    use crate::config::Instrument;
    use crate::pose::{FrameSize, Keypoint, Pose};
    use crate::settings::{self, Settings};
    use crate::test::eventually;

    const FRAME: FrameSize = FrameSize {
        width: 432.0,
        height: 338.0,
    };

    fn test_settings() -> Settings {
        Settings {
            chord_set: Some("minor0".to_string()),
            note_duration: Duration::from_millis(300),
        }
    }

    fn engine(
        source: &crate::pose::test::Source,
        sink: &crate::midi::test::Sink,
        settings: SharedSettings,
    ) -> Engine {
        Engine::new(
            Arc::new(source.clone()),
            Arc::new(sink.clone()),
            &Instrument::default(),
            settings,
        )
    }

    fn playing_pose() -> Pose {
        // Anatomical left wrist in the right zone, right wrist in the left
        // zone, both inside the vertical bounds.
        Pose::new(vec![
            Keypoint::new(BodyPart::Nose, 216.0, 40.0, 0.9),
            Keypoint::new(BodyPart::LWrist, 250.0, 150.0, 0.9),
            Keypoint::new(BodyPart::RWrist, 100.0, 150.0, 0.9),
        ])
    }

    #[test]
    fn test_step_without_frame_size_emits_nothing() {
        let source = crate::pose::test::Source::get("mock:estimator");
        let sink = crate::midi::test::Sink::get("mock:out");
        let engine = engine(&source, &sink, settings::shared(test_settings()));

        source.push_frame(vec![playing_pose()]);
        engine.step().expect("step should succeed");
        assert!(sink.played().is_empty());
    }

    #[test]
    fn test_step_without_poses_emits_nothing() {
        let source = crate::pose::test::Source::get("mock:estimator");
        let sink = crate::midi::test::Sink::get("mock:out");
        let engine = engine(&source, &sink, settings::shared(test_settings()));

        source.set_frame_size(FRAME);
        engine.step().expect("step should succeed");
        assert!(sink.played().is_empty());
    }

    #[test]
    fn test_step_plays_note_for_tracked_pose() {
        let source = crate::pose::test::Source::get("mock:estimator");
        let sink = crate::midi::test::Sink::get("mock:out");
        let engine = engine(&source, &sink, settings::shared(test_settings()));

        source.set_frame_size(FRAME);
        source.push_frame(vec![playing_pose()]);
        engine.step().expect("step should succeed");

        let directive = sink.last_played().expect("a directive should be emitted");
        assert!(!directive.is_mute());
        assert!((directive.note - 0.382).abs() < 1e-2);
        assert!((directive.volume - 0.563).abs() < 1e-2);
        assert_eq!(directive.chord_set.as_deref(), Some("minor0"));
        assert_eq!(directive.duration, Duration::from_millis(300));
    }

    #[test]
    fn test_step_mutes_when_wrist_out_of_zone() {
        let source = crate::pose::test::Source::get("mock:estimator");
        let sink = crate::midi::test::Sink::get("mock:out");
        let engine = engine(&source, &sink, settings::shared(test_settings()));

        source.set_frame_size(FRAME);
        // Left wrist stays left of the split: the right zone never engages.
        source.push_frame(vec![Pose::new(vec![
            Keypoint::new(BodyPart::Nose, 216.0, 40.0, 0.9),
            Keypoint::new(BodyPart::LWrist, 100.0, 150.0, 0.9),
            Keypoint::new(BodyPart::RWrist, 300.0, 100.0, 0.9),
        ])]);
        engine.step().expect("step should succeed");

        assert_eq!(sink.last_played(), Some(Directive::mute()));
    }

    #[test]
    fn test_step_mutes_when_wrist_missing() {
        let source = crate::pose::test::Source::get("mock:estimator");
        let sink = crate::midi::test::Sink::get("mock:out");
        let engine = engine(&source, &sink, settings::shared(test_settings()));

        source.set_frame_size(FRAME);
        source.push_frame(vec![Pose::new(vec![Keypoint::new(
            BodyPart::Nose,
            216.0,
            40.0,
            0.9,
        )])]);
        engine.step().expect("step should succeed");

        assert_eq!(sink.last_played(), Some(Directive::mute()));
    }

    #[test]
    fn test_settings_change_applies_next_step() {
        let source = crate::pose::test::Source::get("mock:estimator");
        let sink = crate::midi::test::Sink::get("mock:out");
        let settings = settings::shared(test_settings());
        let engine = engine(&source, &sink, settings.clone());

        source.set_frame_size(FRAME);
        source.push_frame(vec![playing_pose()]);
        engine.step().expect("step should succeed");
        assert_eq!(
            sink.last_played().expect("directive expected").chord_set.as_deref(),
            Some("minor0")
        );

        {
            let mut settings = settings.write().expect("unable to get settings lock");
            settings.chord_set = None;
            settings.note_duration = Duration::from_millis(500);
        }

        // The mock source repeats its latest frame.
        engine.step().expect("step should succeed");
        let directive = sink.last_played().expect("directive expected");
        assert_eq!(directive.chord_set, None);
        assert_eq!(directive.duration, Duration::from_millis(500));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_run_emits_directives() {
        let source = crate::pose::test::Source::get("mock:estimator");
        let sink = crate::midi::test::Sink::get("mock:out");
        let engine = engine(&source, &sink, settings::shared(test_settings()));

        source.set_frame_size(FRAME);
        source.push_frame(vec![playing_pose()]);

        let handle = tokio::spawn(async move { engine.run().await.map_err(|e| e.to_string()) });

        let sink_handle = sink.clone();
        eventually(
            move || !sink_handle.played().is_empty(),
            "engine never emitted a directive",
        )
        .await;

        handle.abort();
        assert!(!sink.last_played().expect("directive expected").is_mute());
    }
}
