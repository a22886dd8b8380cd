//! PNG output encoder.
//!
//! Pure Rust PNG encoding using the `png` crate.

use crate::error::Result;
use crate::style::Pixmap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// PNG encoder for rendered pixmaps.
pub struct PngEncoder;

impl PngEncoder {
    /// Write a pixmap to a PNG file.
    ///
    /// # Errors
    ///
    /// Returns an error if file creation or PNG encoding fails.
    pub fn write_to_file<P: AsRef<Path>>(pixmap: &Pixmap, path: P) -> Result<()> {
        let file = File::create(path)?;
        Self::encode(pixmap, BufWriter::new(file))
    }

    /// Encode a pixmap to PNG bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if PNG encoding fails.
    pub fn to_bytes(pixmap: &Pixmap) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        Self::encode(pixmap, &mut buffer)?;
        Ok(buffer)
    }

    fn encode<W: Write>(pixmap: &Pixmap, sink: W) -> Result<()> {
        let mut encoder = png::Encoder::new(sink, pixmap.width(), pixmap.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder.write_header()?;
        writer.write_image_data(pixmap.pixels())?;
        writer.finish()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;

    const PNG_MAGIC: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

    #[test]
    fn test_png_to_bytes() {
        let mut pixmap = Pixmap::new(10, 10).unwrap();
        pixmap.fill(Rgba::RED);

        let bytes = PngEncoder::to_bytes(&pixmap).unwrap();
        assert_eq!(&bytes[0..8], &PNG_MAGIC);
    }

    #[test]
    fn test_png_round_trips_through_decoder() {
        let mut pixmap = Pixmap::new(3, 2).unwrap();
        pixmap.set_pixel(2, 1, Rgba::BLUE);
        let bytes = PngEncoder::to_bytes(&pixmap).unwrap();

        let decoder = png::Decoder::new(bytes.as_slice());
        let mut reader = decoder.read_info().unwrap();
        let mut buf = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut buf).unwrap();
        assert_eq!((info.width, info.height), (3, 2));
        assert_eq!(&buf[..info.buffer_size()], pixmap.pixels());
    }

    #[test]
    fn test_png_write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        let pixmap = Pixmap::new(4, 4).unwrap();
        PngEncoder::write_to_file(&pixmap, &path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[0..8], &PNG_MAGIC);
    }
}
