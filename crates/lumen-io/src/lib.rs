//! # lumen-io
//!
//! Reading and writing [`Frame`]s to disk.
//!
//! Only PNG is supported. [`read`] sniffs the file signature and falls back
//! to the extension; [`write`] picks the format from the extension.
//!
//! ```rust,ignore
//! let frame = lumen_io::read("scene.png")?;
//! lumen_io::write("scene_graded.png", &frame)?;
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod png;

pub use error::{IoError, IoResult};

use std::fs::File;
use std::io::Read;
use std::path::Path;

use lumen_core::Frame;

const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// Supported file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Portable Network Graphics.
    Png,
    /// Anything else.
    Unknown,
}

impl Format {
    /// Detects format from file extension only.
    pub fn from_extension<P: AsRef<Path>>(path: P) -> Self {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());
        match ext.as_deref() {
            Some("png") => Format::Png,
            _ => Format::Unknown,
        }
    }

    /// Detects format from leading bytes.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        if bytes.starts_with(&PNG_SIGNATURE) {
            Format::Png
        } else {
            Format::Unknown
        }
    }

    /// Detects format from the file signature, then the extension.
    pub fn detect<P: AsRef<Path>>(path: P) -> IoResult<Self> {
        let path = path.as_ref();
        let mut header = [0u8; 8];
        let read = File::open(path)?.read(&mut header)?;
        match Self::from_bytes(&header[..read]) {
            Format::Unknown => Ok(Self::from_extension(path)),
            format => Ok(format),
        }
    }
}

/// Reads a frame, detecting the format.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<Frame> {
    let path = path.as_ref();
    match Format::detect(path)? {
        Format::Png => png::read(path),
        Format::Unknown => Err(IoError::Unsupported(format!(
            "cannot read {}: unknown format",
            path.display()
        ))),
    }
}

/// Writes a frame, choosing the format from the extension.
pub fn write<P: AsRef<Path>>(path: P, frame: &Frame) -> IoResult<()> {
    let path = path.as_ref();
    match Format::from_extension(path) {
        Format::Png => png::write(path, frame),
        Format::Unknown => Err(IoError::Unsupported(format!(
            "cannot write {}: only .png is supported",
            path.display()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_detection_is_case_insensitive() {
        assert_eq!(Format::from_extension("a/b/frame.PNG"), Format::Png);
        assert_eq!(Format::from_extension("frame.exr"), Format::Unknown);
        assert_eq!(Format::from_extension("frame"), Format::Unknown);
    }

    #[test]
    fn signature_wins_over_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.bin");
        write(dir.path().join("frame.png"), &Frame::filled(2, 2, [1.0; 4])).unwrap();
        std::fs::rename(dir.path().join("frame.png"), &path).unwrap();

        assert_eq!(Format::detect(&path).unwrap(), Format::Png);
        assert_eq!(read(&path).unwrap().dimensions(), (2, 2));
    }

    #[test]
    fn unknown_formats_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = write(dir.path().join("frame.jpg"), &Frame::new(1, 1)).unwrap_err();
        assert!(matches!(err, IoError::Unsupported(_)));

        let junk = dir.path().join("junk.dat");
        std::fs::write(&junk, b"hello").unwrap();
        assert!(matches!(read(&junk), Err(IoError::Unsupported(_))));
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(read("/nonexistent/frame.png"), Err(IoError::Io(_))));
    }
}
