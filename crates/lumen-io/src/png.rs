//! PNG frames.
//!
//! Reading accepts 8- and 16-bit grayscale, gray+alpha, RGB and RGBA (and
//! palette or sub-byte images, which the decoder expands to 8 bits). Every
//! layout is widened to an RGBA [`Frame`] with values in [0, 1]; missing
//! alpha becomes 1.
//!
//! Writing always produces 8-bit RGBA, clamping to [0, 1] first.
//!
//! # Example
//!
//! ```rust,ignore
//! use lumen_io::png;
//!
//! let frame = png::read("render.png")?;
//! png::write("graded.png", &frame)?;
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Seek, Write};
use std::path::Path;

use lumen_core::{Frame, CHANNELS};
use tracing::debug;

use crate::{IoError, IoResult};

/// Reads a PNG file into a frame.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<Frame> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let frame = read_from(BufReader::new(file))?;
    debug!(path = %path.display(), width = frame.width(), height = frame.height(), "Read PNG");
    Ok(frame)
}

/// Decodes a PNG stream into a frame.
pub fn read_from<R: BufRead + Seek>(reader: R) -> IoResult<Frame> {
    let mut decoder = png::Decoder::new(reader);
    decoder.set_transformations(png::Transformations::EXPAND);
    let mut reader = decoder
        .read_info()
        .map_err(|e: png::DecodingError| IoError::Decode(e.to_string()))?;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::Decode("cannot determine output buffer size".into()))?;
    let mut buf = vec![0u8; buf_size];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e: png::DecodingError| IoError::Decode(e.to_string()))?;
    let bytes = &buf[..info.buffer_size()];

    let channels = match info.color_type {
        png::ColorType::Grayscale => 1,
        png::ColorType::GrayscaleAlpha => 2,
        png::ColorType::Rgb => 3,
        png::ColorType::Rgba => 4,
        other => {
            return Err(IoError::Unsupported(format!("PNG color type {other:?}")));
        }
    };

    let samples: Vec<f32> = match info.bit_depth {
        png::BitDepth::Eight => bytes.iter().map(|&b| b as f32 / 255.0).collect(),
        png::BitDepth::Sixteen => bytes
            .chunks_exact(2)
            .map(|be| u16::from_be_bytes([be[0], be[1]]) as f32 / 65535.0)
            .collect(),
        other => {
            return Err(IoError::Unsupported(format!("PNG bit depth {other:?}")));
        }
    };

    let data: Vec<f32> = match channels {
        1 => samples.iter().flat_map(|&g| [g, g, g, 1.0]).collect(),
        2 => samples
            .chunks_exact(2)
            .flat_map(|ga| [ga[0], ga[0], ga[0], ga[1]])
            .collect(),
        3 => samples
            .chunks_exact(3)
            .flat_map(|rgb| [rgb[0], rgb[1], rgb[2], 1.0])
            .collect(),
        _ => samples,
    };

    Ok(Frame::from_data(info.width, info.height, data)?)
}

/// Writes a frame as 8-bit RGBA PNG.
pub fn write<P: AsRef<Path>>(path: P, frame: &Frame) -> IoResult<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    write_to(BufWriter::new(file), frame)?;
    debug!(path = %path.display(), width = frame.width(), height = frame.height(), "Wrote PNG");
    Ok(())
}

/// Encodes a frame as 8-bit RGBA PNG into `writer`.
pub fn write_to<W: Write>(writer: W, frame: &Frame) -> IoResult<()> {
    if frame.is_empty() {
        return Err(IoError::Encode(format!(
            "cannot encode empty frame {}x{}",
            frame.width(),
            frame.height()
        )));
    }

    let mut encoder = png::Encoder::new(writer, frame.width(), frame.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(png::Compression::default());
    encoder.set_source_srgb(png::SrgbRenderingIntent::Perceptual);

    let mut png_writer = encoder
        .write_header()
        .map_err(|e| IoError::Encode(e.to_string()))?;

    let bytes = frame.to_rgba8();
    debug_assert_eq!(bytes.len(), frame.pixel_count() * CHANNELS);
    png_writer
        .write_image_data(&bytes)
        .map_err(|e| IoError::Encode(e.to_string()))?;
    png_writer
        .finish()
        .map_err(|e| IoError::Encode(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn encode_raw(width: u32, height: u32, color: png::ColorType, depth: png::BitDepth, data: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut out, width, height);
            encoder.set_color(color);
            encoder.set_depth(depth);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(data).unwrap();
        }
        out
    }

    #[test]
    fn test_roundtrip_rgba() {
        let (width, height) = (16, 8);
        let mut bytes = Vec::new();
        for y in 0..height {
            for x in 0..width {
                bytes.extend_from_slice(&[(x * 16) as u8, (y * 32) as u8, 64, (x * 8 + y) as u8]);
            }
        }
        let frame = Frame::from_rgba8(width, height, &bytes).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roundtrip.png");
        write(&path, &frame).unwrap();
        let loaded = read(&path).unwrap();

        assert_eq!(loaded.dimensions(), (width, height));
        assert_eq!(loaded.to_rgba8(), bytes);
    }

    #[test]
    fn gray_expands_to_opaque_rgba() {
        let encoded = encode_raw(2, 1, png::ColorType::Grayscale, png::BitDepth::Eight, &[0, 255]);
        let frame = read_from(Cursor::new(encoded)).unwrap();
        assert_eq!(frame.pixel(0, 0), [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(frame.pixel(1, 0), [1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn sixteen_bit_rgb_is_normalized() {
        let data = [0xff, 0xff, 0x00, 0x00, 0x80, 0x00];
        let encoded = encode_raw(1, 1, png::ColorType::Rgb, png::BitDepth::Sixteen, &data);
        let frame = read_from(Cursor::new(encoded)).unwrap();
        let [r, g, b, a] = frame.pixel(0, 0);
        assert_eq!((r, g, a), (1.0, 0.0, 1.0));
        assert!((b - 32768.0 / 65535.0).abs() < 1e-6);
    }

    #[test]
    fn gray_alpha_keeps_alpha() {
        let encoded = encode_raw(1, 1, png::ColorType::GrayscaleAlpha, png::BitDepth::Eight, &[51, 102]);
        let frame = read_from(Cursor::new(encoded)).unwrap();
        assert_eq!(frame.pixel(0, 0), [0.2, 0.2, 0.2, 0.4]);
    }

    #[test]
    fn garbage_is_a_decode_error() {
        let err = read_from(Cursor::new(b"not a png".to_vec())).unwrap_err();
        assert!(matches!(err, IoError::Decode(_)));
    }

    #[test]
    fn empty_frame_is_rejected() {
        let err = write_to(Vec::new(), &Frame::new(0, 4)).unwrap_err();
        assert!(matches!(err, IoError::Encode(_)));
    }
}
