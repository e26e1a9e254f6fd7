use float_ord::FloatOrd;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TracerError};
use crate::ray::Ray;
use crate::sphere::{Intersect, Sphere};
use crate::vector::Vector3;

/// Nearest surface struck by a ray.
#[derive(Copy, Clone, Debug)]
pub struct HitRecord<'a>
{
    pub index: usize,
    pub sphere: &'a Sphere,
    pub distance: f32
}

/// The six per-sphere fields as they appear in a scene file.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SphereRecord
{
    pub center: Vector3,
    pub radius: f32,
    pub surface_color: Vector3,
    #[serde(default)]
    pub reflection: f32,
    #[serde(default)]
    pub transparency: f32,
    #[serde(default)]
    pub emission_color: Vector3,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SceneRecord
{
    pub spheres: Vec<SphereRecord>,
}

impl SphereRecord
{
    fn validate(&self, index: usize) -> Result<()>
    {
        let invalid = |reason: &str| TracerError::InvalidSphere { index, reason: reason.to_string() };

        if !self.radius.is_finite() || self.radius <= 0.0
        {
            return Err(invalid("radius must be finite and positive"));
        }
        if !self.center.is_finite() || !self.surface_color.is_finite() || !self.emission_color.is_finite()
        {
            return Err(invalid("vector components must be finite"));
        }
        if !(0.0..=1.0).contains(&self.reflection) || !(0.0..=1.0).contains(&self.transparency)
        {
            return Err(invalid("reflection and transparency must lie in [0, 1]"));
        }
        let unit = |c: Vector3| [c.r(), c.g(), c.b()].iter().all(|v| (0.0..=1.0).contains(v));
        if !unit(self.surface_color)
        {
            return Err(invalid("surface color channels must lie in [0, 1]"));
        }
        Ok(())
    }
}

impl From<&SphereRecord> for Sphere
{
    fn from(r: &SphereRecord) -> Sphere
    {
        Sphere::new(r.center, r.radius, r.surface_color, r.reflection, r.transparency, r.emission_color)
    }
}

/// Ordered spheres. On equal hit distances the earlier sphere wins.
#[derive(Clone, Debug, Default)]
pub struct Scene
{
    inner: Vec<Sphere>
}

impl Scene
{
    pub fn new(spheres: Vec<Sphere>) -> Scene
    {
        Scene { inner: spheres }
    }

    pub fn from_records(records: &[SphereRecord]) -> Result<Scene>
    {
        for (index, record) in records.iter().enumerate()
        {
            record.validate(index)?;
        }
        Ok(Scene::new(records.iter().map(Sphere::from).collect()))
    }

    pub fn from_json(raw: &str) -> Result<Scene>
    {
        let record: SceneRecord = serde_json::from_str(raw)?;
        let scene = Scene::from_records(&record.spheres)?;
        if scene.lights().next().is_none()
        {
            tracing::warn!("scene has no emissive sphere, diffuse surfaces will render black");
        }
        Ok(scene)
    }

    /// The showcase arrangement: a sunken floor sphere, a glass ball, three
    /// mirrors and one overhead light.
    pub fn reference() -> Scene
    {
        Scene::new(vec!
        [
            // Position, radius, surface color, reflectivity, transparency, emission color
            Sphere::new(Vector3::new( 0.0, -10004.0, -20.0), 1000.0, Vector3::new(0.51, 0.00, 0.20), 0.0, 0.0, Vector3::BLACK),
            Sphere::new(Vector3::new( 0.0,      0.0, -20.0),    2.0, Vector3::new(0.40, 0.32, 0.96), 1.0, 0.5, Vector3::BLACK),
            Sphere::new(Vector3::new( 5.0,     -1.0, -15.0),    1.0, Vector3::new(0.50, 0.96, 0.16), 1.0, 0.0, Vector3::BLACK),
            Sphere::new(Vector3::new( 5.0,      0.0, -25.0),    4.0, Vector3::new(0.55, 0.57, 0.57), 1.0, 0.0, Vector3::BLACK),
            Sphere::new(Vector3::new(-5.5,      0.0, -15.0),    1.0, Vector3::new(0.50, 0.00, 0.50), 1.0, 0.0, Vector3::BLACK),

            // Light
            Sphere::light(Vector3::new(0.0, 20.0, -30.0), 3.0, Vector3::new(3.0, 3.0, 3.0)),
        ])
    }

    pub fn spheres(&self) -> &[Sphere]
    {
        &self.inner
    }

    pub fn len(&self) -> usize
    {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool
    {
        self.inner.is_empty()
    }

    pub fn lights(&self) -> impl Iterator<Item = (usize, &Sphere)>
    {
        self.inner.iter().enumerate().filter(|(_, s)| s.is_light())
    }

    pub fn nearest_hit(&self, r: &Ray) -> Option<HitRecord<'_>>
    {
        // A negative entry distance means the ray starts inside, use the exit.
        // `min_by_key` keeps the first of equal minima.
        self.inner.iter().
            enumerate().
            filter_map(|(index, sphere)| sphere.intersect(r).map(|[t0, t1]| (index, sphere, if t0 < 0.0 { t1 } else { t0 }))).
            min_by_key(|(_, _, t)| FloatOrd(*t)).
            map(|(index, sphere, distance)| HitRecord { index, sphere, distance })
    }

    /// True when any sphere other than `light_index` lies along `r`.
    pub fn occluded(&self, r: &Ray, light_index: usize) -> bool
    {
        self.inner.iter().
            enumerate().
            any(|(j, sphere)| j != light_index && sphere.intersect(r).is_some())
    }
}
