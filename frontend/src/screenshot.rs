//! PNG capture of the current frame.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Encode the RGB24 frame as a PNG next to the ROM, returning the path
/// written.
pub fn save(
    rom_path: &Path,
    rgb: &[u8],
    width: u32,
    height: u32,
) -> Result<PathBuf, png::EncodingError> {
    let path = rom_path.with_extension("png");
    let file = File::create(&path)?;
    let mut encoder = png::Encoder::new(BufWriter::new(file), width, height);
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(rgb)?;
    Ok(path)
}
