//! The per-frame render loop.
//!
//! A [`RenderSession`] owns the settings snapshot, one grading operator,
//! one bloom stage and the receiving end of the update channel. Writers hold
//! a [`SettingsHandle`]. Updates queue up in the channel and are applied
//! together at the start of [`RenderSession::render_frame`], so a frame
//! always sees one consistent snapshot.

use std::path::Path;
use std::sync::mpsc::{self, Receiver, Sender};

use lumen_core::Frame;
use lumen_ops::grading::{marshal, ColorGrade, GradeSettings, StageOrder};
use lumen_ops::{Bloom, EffectChain};
use tracing::{debug, trace};

use crate::messages::SettingsUpdate;
use crate::settings::{BloomSettings, EffectToggles, ViewerSettings};
use crate::{SessionError, SessionResult};

/// Supplies rendered frames (the scene renderer in the full viewer).
pub trait FrameSource {
    /// Returns the next rendered frame.
    fn next_frame(&mut self) -> SessionResult<Frame>;
}

/// A source that returns the same image every frame.
#[derive(Debug, Clone)]
pub struct StillFrame {
    frame: Frame,
}

impl StillFrame {
    /// Wraps an existing frame.
    pub fn new(frame: Frame) -> Self {
        Self { frame }
    }

    /// Loads the image at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> SessionResult<Self> {
        Ok(Self::new(lumen_io::read(path)?))
    }
}

impl FrameSource for StillFrame {
    fn next_frame(&mut self) -> SessionResult<Frame> {
        Ok(self.frame.clone())
    }
}

/// Sending side of a session's update channel.
#[derive(Debug, Clone)]
pub struct SettingsHandle {
    tx: Sender<SettingsUpdate>,
}

impl SettingsHandle {
    /// Queues an update for the next frame.
    ///
    /// # Errors
    ///
    /// [`SessionError::Disconnected`] if the session has been dropped.
    pub fn send(&self, update: SettingsUpdate) -> SessionResult<()> {
        self.tx.send(update).map_err(|_| SessionError::Disconnected)
    }

    /// Queues new grading sliders.
    pub fn set_grade(&self, grade: GradeSettings) -> SessionResult<()> {
        self.send(SettingsUpdate::Grade(grade))
    }

    /// Queues new effect toggles.
    pub fn set_effects(&self, effects: EffectToggles) -> SessionResult<()> {
        self.send(SettingsUpdate::Effects(effects))
    }

    /// Queues new bloom sliders.
    pub fn set_bloom(&self, bloom: BloomSettings) -> SessionResult<()> {
        self.send(SettingsUpdate::Bloom(bloom))
    }

    /// Queues a full settings replacement.
    pub fn replace(&self, settings: ViewerSettings) -> SessionResult<()> {
        self.send(SettingsUpdate::Replace(settings))
    }
}

/// Headless render loop state.
pub struct RenderSession {
    settings: ViewerSettings,
    grade: ColorGrade,
    bloom: Bloom,
    tx: Sender<SettingsUpdate>,
    rx: Receiver<SettingsUpdate>,
    frames: u64,
}

impl RenderSession {
    /// Creates a session and the first handle to its update channel.
    pub fn new(settings: ViewerSettings) -> SessionResult<(Self, SettingsHandle)> {
        let (tx, rx) = mpsc::channel();
        let marshaled = marshal(&settings.grade);
        marshaled.log_diagnostics();
        let bloom = Bloom::new(settings.bloom.to_params_logged())?;

        let session = Self {
            grade: ColorGrade::new(marshaled.params),
            bloom,
            settings,
            tx: tx.clone(),
            rx,
            frames: 0,
        };
        Ok((session, SettingsHandle { tx }))
    }

    /// Another handle to this session's update channel.
    pub fn handle(&self) -> SettingsHandle {
        SettingsHandle {
            tx: self.tx.clone(),
        }
    }

    /// Selects the grading stage order.
    pub fn set_stage_order(&mut self, order: StageOrder) {
        self.grade = self.grade.clone().with_order(order);
    }

    /// Current settings snapshot (updates not yet drained are not included).
    pub fn settings(&self) -> &ViewerSettings {
        &self.settings
    }

    /// Number of frames rendered so far.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Applies every queued update. Returns how many were applied.
    fn drain_updates(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(update) = self.rx.try_recv() {
            self.apply_update(update);
            applied += 1;
        }
        applied
    }

    fn apply_update(&mut self, update: SettingsUpdate) {
        trace!(?update, "settings update");
        match update {
            SettingsUpdate::Grade(grade) => {
                marshal(&grade).log_diagnostics();
                self.settings.grade = grade;
            }
            SettingsUpdate::Bloom(bloom) => {
                bloom.to_params_logged();
                self.settings.bloom = bloom;
            }
            SettingsUpdate::Effects(effects) => self.settings.effects = effects,
            SettingsUpdate::Replace(settings) => {
                marshal(&settings.grade).log_diagnostics();
                settings.bloom.to_params_logged();
                self.settings = settings;
            }
        }
    }

    /// Renders one frame through the enabled effects.
    ///
    /// Pending updates are applied first, then the grading parameters are
    /// rebuilt from the snapshot, then grading and bloom run in that order.
    pub fn render_frame(&mut self, frame: &Frame) -> SessionResult<Frame> {
        let applied = self.drain_updates();

        self.grade.set_parameters(marshal(&self.settings.grade).params);
        let (bloom_params, _) = self.settings.bloom.to_params();
        self.bloom.set_params(bloom_params)?;

        let effects = self.settings.effects;
        let out = {
            let mut chain = EffectChain::new();
            if effects.color_adjustment {
                chain.push(&self.grade);
            }
            if effects.bloom {
                chain.push(&self.bloom);
            }
            debug!(
                frame = self.frames,
                updates = applied,
                effects = ?chain.names(),
                "Rendering frame"
            );
            chain.run(frame)?
        };

        self.frames += 1;
        Ok(out)
    }

    /// Pulls a frame from `source` and renders it.
    pub fn render_next<S: FrameSource + ?Sized>(&mut self, source: &mut S) -> SessionResult<Frame> {
        let frame = source.next_frame()?;
        self.render_frame(&frame)
    }
}

impl std::fmt::Debug for RenderSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderSession")
            .field("settings", &self.settings)
            .field("frames", &self.frames)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use crate::settings::Preset;

    fn test_frame() -> Frame {
        let mut frame = Frame::new(8, 6);
        for y in 0..6 {
            for x in 0..8 {
                frame.set_pixel(x, y, [x as f32 / 7.0, 0.4, y as f32 / 5.0, 1.0]);
            }
        }
        frame
    }

    fn grade_only() -> ViewerSettings {
        ViewerSettings {
            effects: EffectToggles {
                bloom: false,
                color_adjustment: true,
            },
            ..ViewerSettings::default()
        }
    }

    #[test]
    fn identity_session_passes_frames_through() {
        let (mut session, _handle) = RenderSession::new(grade_only()).unwrap();
        let frame = Frame::filled(4, 4, [0.5, 0.5, 0.5, 1.0]);
        let out = session.render_frame(&frame).unwrap();
        for p in out.pixels() {
            assert_relative_eq!(p[0], 0.5, epsilon = 1e-6);
        }
        assert_eq!(session.frame_count(), 1);
    }

    #[test]
    fn update_sent_before_frame_is_visible_in_that_frame() {
        let (mut session, handle) = RenderSession::new(grade_only()).unwrap();
        handle
            .send(SettingsUpdate::Grade(GradeSettings::viewer()))
            .unwrap();

        let out = session
            .render_frame(&Frame::filled(2, 2, [0.5, 0.5, 0.5, 1.0]))
            .unwrap();
        assert_relative_eq!(out.pixel(0, 0)[0], 0.440_700_13, epsilon = 1e-5);
        assert_eq!(session.settings().grade, GradeSettings::viewer());
    }

    #[test]
    fn later_updates_win() {
        let (mut session, handle) = RenderSession::new(grade_only()).unwrap();
        let mut dark = GradeSettings::identity();
        dark.exposure = 0.0;
        handle.send(SettingsUpdate::Grade(dark)).unwrap();
        handle
            .send(SettingsUpdate::Grade(GradeSettings::identity()))
            .unwrap();

        let out = session
            .render_frame(&Frame::filled(1, 1, [0.5, 0.5, 0.5, 1.0]))
            .unwrap();
        assert_relative_eq!(out.pixel(0, 0)[0], 0.5, epsilon = 1e-6);
    }

    #[test]
    fn toggling_grade_off_and_on_is_idempotent() {
        let settings = Preset::Viewer.settings();
        let frame = test_frame();

        let (mut steady, _h) = RenderSession::new(settings.clone()).unwrap();
        let expected = steady.render_frame(&frame).unwrap();

        let (mut toggled, handle) = RenderSession::new(settings.clone()).unwrap();
        handle
            .set_effects(EffectToggles {
                color_adjustment: false,
                ..settings.effects
            })
            .unwrap();
        let ungraded = toggled.render_frame(&frame).unwrap();
        assert_ne!(ungraded, expected);

        handle.set_effects(settings.effects).unwrap();
        assert_eq!(toggled.render_frame(&frame).unwrap(), expected);
        assert_eq!(toggled.frame_count(), 2);
    }

    #[test]
    fn all_effects_off_copies_input() {
        let (mut session, handle) = RenderSession::new(Preset::Viewer.settings()).unwrap();
        handle
            .set_effects(EffectToggles {
                bloom: false,
                color_adjustment: false,
            })
            .unwrap();
        let frame = test_frame();
        assert_eq!(session.render_frame(&frame).unwrap(), frame);
    }

    #[test]
    fn invalid_bloom_update_is_repaired_not_fatal() {
        let (mut session, handle) = RenderSession::new(ViewerSettings::default()).unwrap();
        handle
            .set_bloom(BloomSettings {
                intensity: f32::NAN,
                ..Default::default()
            })
            .unwrap();
        assert!(session.render_frame(&test_frame()).is_ok());
    }

    #[test]
    fn huge_bloom_radius_is_clamped_not_fatal() {
        let (mut session, handle) = RenderSession::new(ViewerSettings::default()).unwrap();
        handle
            .set_bloom(BloomSettings {
                radius: 1.0e30,
                ..Default::default()
            })
            .unwrap();
        let frame = Frame::filled(64, 64, [0.9, 0.9, 0.9, 1.0]);
        let out = session.render_frame(&frame).unwrap();
        assert_eq!(out.dimensions(), (64, 64));
        assert!(out.pixels().all(|p| p.iter().all(|c| c.is_finite())));
    }

    #[test]
    fn still_frame_source_feeds_session() {
        let (mut session, _h) = RenderSession::new(grade_only()).unwrap();
        let mut source = StillFrame::new(test_frame());
        for _ in 0..3 {
            let out = session.render_next(&mut source).unwrap();
            assert_eq!(out.dimensions(), (8, 6));
        }
        assert_eq!(session.frame_count(), 3);
    }

    #[test]
    fn handle_reports_disconnect() {
        let (session, handle) = RenderSession::new(ViewerSettings::default()).unwrap();
        drop(session);
        assert!(matches!(
            handle.replace(ViewerSettings::default()),
            Err(SessionError::Disconnected)
        ));
    }
}
