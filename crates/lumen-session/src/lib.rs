//! # lumen-session
//!
//! Headless render loop for the Lumen viewer's post-processing.
//!
//! - [`ViewerSettings`] - grading, bloom and toggle settings, YAML on disk
//! - [`Preset`] - named settings bundles (`identity`, `viewer`)
//! - [`SettingsUpdate`] / [`SettingsHandle`] - typed updates from the UI side
//! - [`RenderSession`] - applies updates at frame boundaries and runs the
//!   enabled effects over each frame
//! - [`FrameSource`] / [`StillFrame`] - where frames come from
//!
//! # Example
//!
//! ```rust
//! use lumen_core::Frame;
//! use lumen_session::{Preset, RenderSession, SettingsUpdate};
//!
//! let (mut session, handle) = RenderSession::new(Preset::Identity.settings()).unwrap();
//! handle.send(SettingsUpdate::Replace(Preset::Viewer.settings())).unwrap();
//!
//! let frame = Frame::filled(32, 32, [0.5, 0.5, 0.5, 1.0]);
//! let graded = session.render_frame(&frame).unwrap();
//! assert_eq!(session.frame_count(), 1);
//! assert_ne!(graded, frame);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod messages;
pub mod session;
pub mod settings;

pub use error::{SessionError, SessionResult};
pub use messages::SettingsUpdate;
pub use session::{FrameSource, RenderSession, SettingsHandle, StillFrame};
pub use settings::{BloomSettings, EffectToggles, Preset, ViewerSettings};
