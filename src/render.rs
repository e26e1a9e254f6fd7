use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::Utc;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TracerError};
use crate::ray::Ray;
use crate::scene::Scene;
use crate::trace::{TraceSettings, TraceStats, Tracer};
use crate::vector::Vector3;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderSettings
{
    pub width: u32,
    pub height: u32,
    pub fov_degrees: f32,
    pub output_path: PathBuf,
}

impl Default for RenderSettings
{
    fn default() -> RenderSettings
    {
        RenderSettings
        {
            width: 640,
            height: 480,
            fov_degrees: 30.0,
            output_path: PathBuf::from("./prettyTitle.ppm"),
        }
    }
}

impl RenderSettings
{
    pub fn validate(&self) -> Result<()>
    {
        if self.width == 0 || self.height == 0
        {
            return Err(TracerError::InvalidSettings("width and height must be positive".into()));
        }
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0)
        {
            return Err(TracerError::InvalidSettings(format!("field of view {} is outside (0, 180)", self.fov_degrees)));
        }
        Ok(())
    }

    pub fn info_path(&self) -> PathBuf
    {
        self.output_path.with_extension("json")
    }
}

/// Pinhole at the origin looking down -Z, +Y up.
#[derive(Copy, Clone, Debug)]
pub struct Camera
{
    inv_w_h: [f32; 2],
    angle: f32,
    aspect_ratio: f32,
}

impl Camera
{
    pub fn new(settings: &RenderSettings) -> Camera
    {
        let w = settings.width as f32;
        let h = settings.height as f32;
        Camera
        {
            inv_w_h: [1.0 / w, 1.0 / h],
            angle: (std::f32::consts::PI * 0.5 * settings.fov_degrees / 180.0).tan(),
            aspect_ratio: w / h,
        }
    }

    /// Ray through the center of pixel (`x`, `y`), row 0 at the top.
    pub fn primary_ray(&self, x: u32, y: u32) -> Ray
    {
        let xx = (2.0 * ((x as f32 + 0.5) * self.inv_w_h[0]) - 1.0) * self.angle * self.aspect_ratio;
        let yy = (1.0 - 2.0 * ((y as f32 + 0.5) * self.inv_w_h[1])) * self.angle;
        Ray::new(Vector3::BLACK, Vector3::new(xx, yy, -1.0).unit())
    }
}

/// Row-major color buffer, top row first.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageBuffer
{
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Vector3>,
}

impl ImageBuffer
{
    pub fn new(width: u32, height: u32) -> ImageBuffer
    {
        ImageBuffer
        {
            width,
            height,
            pixels: vec![Vector3::BLACK; width as usize * height as usize],
        }
    }

    pub fn get(&self, x: u32, y: u32) -> Vector3
    {
        self.pixels[y as usize * self.width as usize + x as usize]
    }
}

fn render_row(tracer: &Tracer, camera: &Camera, y: usize, row: &mut [Vector3]) -> TraceStats
{
    let mut stats = TraceStats::default();
    for (x, pixel) in row.iter_mut().enumerate()
    {
        *pixel = tracer.trace_with_stats(&camera.primary_ray(x as u32, y as u32), 0, &mut stats);
    }
    stats
}

/// Traces every pixel, rows spread across the rayon pool. Each worker owns
/// its row slices and shares the scene read-only.
pub fn render(scene: &Scene, settings: &RenderSettings, trace_settings: TraceSettings) -> Result<(ImageBuffer, TraceStats)>
{
    settings.validate()?;
    let tracer = Tracer::new(scene, trace_settings);
    let camera = Camera::new(settings);
    let mut image = ImageBuffer::new(settings.width, settings.height);

    let stats = image.pixels.
        par_chunks_mut(settings.width as usize).
        enumerate().
        map(|(y, row)| render_row(&tracer, &camera, y, row)).
        reduce(TraceStats::default, TraceStats::merge);

    tracing::debug!(rays = stats.rays, shadow_rays = stats.shadow_rays, deepest = stats.deepest, "render finished");
    Ok((image, stats))
}

/// Single-threaded reference of `render`, same pixel order and values.
pub fn render_sequential(scene: &Scene, settings: &RenderSettings, trace_settings: TraceSettings) -> Result<(ImageBuffer, TraceStats)>
{
    settings.validate()?;
    let tracer = Tracer::new(scene, trace_settings);
    let camera = Camera::new(settings);
    let mut image = ImageBuffer::new(settings.width, settings.height);

    let stats = image.pixels.
        chunks_mut(settings.width as usize).
        enumerate().
        map(|(y, row)| render_row(&tracer, &camera, y, row)).
        fold(TraceStats::default(), TraceStats::merge);

    Ok((image, stats))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RenderInfo
{
    pub date_time_string: String,

    pub w_h: [u32; 2],
    pub total_pixels: u64,

    pub total_time_ms: u128,

    pub ms_per_pixel: f64,

    pub sphere_count: usize,
    pub light_count: usize,
    pub rays_traced: u64,
}

impl RenderInfo
{
    pub fn new(scene: &Scene, w_h: [u32; 2], total_time_ms: u128, stats: TraceStats) -> RenderInfo
    {
        let total_pixels = w_h[0] as u64 * w_h[1] as u64;
        RenderInfo
        {
            date_time_string: Utc::now().format("%d_%m_%Y_%H_%M_%S").to_string(),

            w_h,
            total_pixels,

            total_time_ms,

            ms_per_pixel: total_time_ms as f64 / total_pixels.max(1) as f64,

            sphere_count: scene.len(),
            light_count: scene.lights().count(),
            rays_traced: stats.rays,
        }
    }

    pub fn write(&self, path: &Path) -> Result<()>
    {
        let file = File::create(path).map_err(|e| TracerError::io(path, e))?;
        let mut buffer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut buffer, self)?;
        buffer.flush().map_err(|e| TracerError::io(path, e))
    }
}

/// Renders `scene`, then writes the image and its JSON sidecar.
pub fn render_to_file(scene: &Scene, settings: &RenderSettings, trace_settings: TraceSettings) -> Result<RenderInfo>
{
    tracing::info!(width = settings.width, height = settings.height, spheres = scene.len(), "rendering");
    let timer = Instant::now();

    let (image, stats) = render(scene, settings, trace_settings)?;
    crate::ppm::write_ppm(&settings.output_path, &image)?;

    let info = RenderInfo::new(scene, [settings.width, settings.height], timer.elapsed().as_millis(), stats);
    let info_path = settings.info_path();
    info.write(&info_path)?;

    tracing::info!(image = %settings.output_path.display(), info = %info_path.display(), ms = info.total_time_ms, "wrote render");
    Ok(info)
}
