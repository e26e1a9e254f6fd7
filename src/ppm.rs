//! Binary PPM (P6) output.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{Result, TracerError};
use crate::render::ImageBuffer;
use crate::vector::{clamp, Vector3};

/// Clamps each channel to [0, 1] and truncates into a byte.
pub fn color_as_bytes(color: Vector3) -> [u8; 3]
{
    [
        (clamp(color.r()) * 255.0) as u8,
        (clamp(color.g()) * 255.0) as u8,
        (clamp(color.b()) * 255.0) as u8,
    ]
}

pub fn header(width: u32, height: u32) -> String
{
    format!("P6\n{} {}\n255\n", width, height)
}

pub fn write_to<W: Write>(out: &mut W, image: &ImageBuffer) -> std::io::Result<()>
{
    out.write_all(header(image.width, image.height).as_bytes())?;
    for pixel in image.pixels.iter()
    {
        out.write_all(&color_as_bytes(*pixel))?;
    }
    Ok(())
}

pub fn encode_ppm(image: &ImageBuffer) -> Vec<u8>
{
    let mut bytes = Vec::with_capacity(image.pixels.len() * 3 + 16);
    write_to(&mut bytes, image).expect("Vec writer is infallible");
    bytes
}

pub fn write_ppm(path: &Path, image: &ImageBuffer) -> Result<()>
{
    let file = File::create(path).map_err(|e| TracerError::io(path, e))?;
    let mut buffer = BufWriter::new(file);
    write_to(&mut buffer, image).and_then(|_| buffer.flush()).map_err(|e| TracerError::io(path, e))
}
