use crate::ray::Ray;
use crate::scene::{HitRecord, Scene};
use crate::sphere::Material;
use crate::vector::{mix, Vector3};

pub const MAX_RAY_DEPTH: u32 = 5;

/// Offset along the normal for every spawned ray, keeps it off its own surface.
pub const BIAS: f32 = 1e-4;

pub const IOR: f32 = 1.1;

/// Reflectance kept at normal incidence.
pub const FRESNEL_FLOOR: f32 = 0.1;

/// Returned for rays that leave the scene. Deliberately brighter than white.
pub const BACKGROUND: Vector3 = Vector3::splat(2.0);

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TraceSettings
{
    pub max_depth: u32,
    pub bias: f32,
    pub ior: f32,
    pub background: Vector3,
}

impl Default for TraceSettings
{
    fn default() -> TraceSettings
    {
        TraceSettings
        {
            max_depth: MAX_RAY_DEPTH,
            bias: BIAS,
            ior: IOR,
            background: BACKGROUND,
        }
    }
}

/// Counters gathered while tracing one or more primary rays.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TraceStats
{
    /// Calls into the shading core, primary and secondary.
    pub rays: u64,
    pub shadow_rays: u64,
    pub deepest: u32,
}

impl TraceStats
{
    pub fn merge(self, other: TraceStats) -> TraceStats
    {
        TraceStats
        {
            rays: self.rays + other.rays,
            shadow_rays: self.shadow_rays + other.shadow_rays,
            deepest: self.deepest.max(other.deepest),
        }
    }
}

/// Share of reflected light for a given `-dot(direction, normal)`.
/// Cubic falloff towards grazing angles, never below `FRESNEL_FLOOR`.
pub fn fresnel(facing_ratio: f32) -> f32
{
    mix((1.0 - facing_ratio).powi(3), 1.0, FRESNEL_FLOOR)
}

/// Snell refraction of `direction` through a surface with `normal` facing
/// the incoming ray. `None` on total internal reflection.
pub fn refract(direction: Vector3, normal: Vector3, eta: f32) -> Option<Vector3>
{
    let cosi = normal.dot(direction);
    let k = 1.0 - eta * eta * (1.0 - cosi * cosi);
    if k < 0.0
    {
        return None;
    }
    Some((direction * eta + normal * (eta * cosi - k.sqrt())).unit())
}

/// Surface point a ray landed on, normal already turned to face the ray.
struct Surface<'a>
{
    hit: HitRecord<'a>,
    point: Vector3,
    normal: Vector3,
    inside: bool,
}

pub struct Tracer<'a>
{
    scene: &'a Scene,
    settings: TraceSettings,
}

impl<'a> Tracer<'a>
{
    pub fn new(scene: &'a Scene, settings: TraceSettings) -> Tracer<'a>
    {
        Tracer { scene, settings }
    }

    pub fn settings(&self) -> &TraceSettings
    {
        &self.settings
    }

    /// Color arriving along `r`. `depth` counts specular bounces so far.
    pub fn trace(&self, r: &Ray, depth: u32) -> Vector3
    {
        self.trace_with_stats(r, depth, &mut TraceStats::default())
    }

    pub fn trace_with_stats(&self, r: &Ray, depth: u32, stats: &mut TraceStats) -> Vector3
    {
        stats.rays += 1;
        stats.deepest = stats.deepest.max(depth);

        let Some(hit) = self.scene.nearest_hit(r) else {
            return self.settings.background;
        };

        let point = r.point_at(hit.distance);
        let mut normal = (point - hit.sphere.center()).unit();
        let mut inside = false;
        if r.direction.dot(normal) > 0.0
        {
            normal = -normal;
            inside = true;
        }
        let surface = Surface { hit, point, normal, inside };

        // Past the depth limit every surface is lit as if it were diffuse.
        let shaded = match hit.sphere.material()
        {
            Material::Diffuse => self.shade_diffuse(&surface, stats),
            _ if depth >= self.settings.max_depth => self.shade_diffuse(&surface, stats),
            material => self.shade_specular(r, &surface, material, depth, stats),
        };

        shaded + hit.sphere.emission_color()
    }

    fn shade_specular(&self, r: &Ray, surface: &Surface, material: Material, depth: u32, stats: &mut TraceStats) -> Vector3
    {
        let sphere = surface.hit.sphere;
        let normal = surface.normal;
        let bias = normal * self.settings.bias;

        let facing_ratio = -r.direction.dot(normal);
        let mut fresnel_effect = fresnel(facing_ratio);

        let reflect_dir = r.direction.reflect_by(&normal).unit();
        let reflection = self.trace_with_stats(&Ray::new(surface.point + bias, reflect_dir), depth + 1, stats);

        let mut refraction = Vector3::BLACK;
        if material.is_transparent()
        {
            let eta = if surface.inside { self.settings.ior } else { 1.0 / self.settings.ior };
            match refract(r.direction, normal, eta)
            {
                Some(refract_dir) =>
                {
                    refraction = self.trace_with_stats(&Ray::new(surface.point - bias, refract_dir), depth + 1, stats);
                }
                // Total internal reflection: everything goes to the mirror term.
                None => fresnel_effect = 1.0,
            }
        }

        (reflection * fresnel_effect + refraction * (1.0 - fresnel_effect) * sphere.transparency()) * sphere.surface_color()
    }

    fn shade_diffuse(&self, surface: &Surface, stats: &mut TraceStats) -> Vector3
    {
        let sphere = surface.hit.sphere;
        let origin = surface.point + surface.normal * self.settings.bias;

        let mut color = Vector3::BLACK;
        for (index, light) in self.scene.lights()
        {
            let light_direction = (light.center() - surface.point).unit();

            stats.shadow_rays += 1;
            if self.scene.occluded(&Ray::new(origin, light_direction), index)
            {
                continue;
            }

            color += sphere.surface_color() * surface.normal.dot(light_direction).max(0.0) * light.emission_color();
        }
        color
    }
}
