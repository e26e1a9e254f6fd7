use crate::ray::Ray;
use crate::vector::Vector3;

/// Shading class of a sphere, derived once from its reflection and
/// transparency so the tracer never re-tests the thresholds.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Material
{
    Diffuse,
    Reflective,
    Refractive,
    ReflectiveRefractive
}

impl Material
{
    pub fn classify(reflection: f32, transparency: f32) -> Material
    {
        match (reflection > 0.0, transparency > 0.0)
        {
            (false, false) => Material::Diffuse,
            (true, false) => Material::Reflective,
            (false, true) => Material::Refractive,
            (true, true) => Material::ReflectiveRefractive,
        }
    }

    pub fn is_specular(self) -> bool
    {
        self != Material::Diffuse
    }

    pub fn is_transparent(self) -> bool
    {
        matches!(self, Material::Refractive | Material::ReflectiveRefractive)
    }
}

pub trait Intersect
{
    /// Entry and exit distances along `r`, `[t0, t1]` with `t0 <= t1`.
    /// `t0` is negative when the ray starts inside.
    fn intersect(&self, r: &Ray) -> Option<[f32; 2]>;
}

#[derive(Clone, Debug)]
pub struct Sphere
{
    center: Vector3,
    radius: f32,
    radius2: f32,

    surface_color: Vector3,
    emission_color: Vector3,

    transparency: f32,
    reflection: f32,

    material: Material
}

impl Sphere
{
    /// Same argument order as the usual table literal: position, radius,
    /// surface color, reflectivity, transparency, emission color.
    pub fn new(center: Vector3, radius: f32, surface_color: Vector3, reflection: f32, transparency: f32, emission_color: Vector3) -> Sphere
    {
        Sphere
        {
            center,
            radius,
            radius2: radius * radius,
            surface_color,
            emission_color,
            transparency,
            reflection,
            material: Material::classify(reflection, transparency)
        }
    }

    pub fn diffuse(center: Vector3, radius: f32, surface_color: Vector3) -> Sphere
    {
        Sphere::new(center, radius, surface_color, 0.0, 0.0, Vector3::BLACK)
    }

    pub fn light(center: Vector3, radius: f32, emission_color: Vector3) -> Sphere
    {
        Sphere::new(center, radius, Vector3::BLACK, 0.0, 0.0, emission_color)
    }

    pub fn center(&self) -> Vector3
    {
        self.center
    }

    pub fn radius(&self) -> f32
    {
        self.radius
    }

    pub fn radius2(&self) -> f32
    {
        self.radius2
    }

    pub fn set_radius(&mut self, radius: f32)
    {
        self.radius = radius;
        self.radius2 = radius * radius;
    }

    pub fn surface_color(&self) -> Vector3
    {
        self.surface_color
    }

    pub fn emission_color(&self) -> Vector3
    {
        self.emission_color
    }

    pub fn transparency(&self) -> f32
    {
        self.transparency
    }

    pub fn reflection(&self) -> f32
    {
        self.reflection
    }

    pub fn set_surface(&mut self, reflection: f32, transparency: f32)
    {
        self.reflection = reflection;
        self.transparency = transparency;
        self.material = Material::classify(reflection, transparency);
    }

    pub fn material(&self) -> Material
    {
        self.material
    }

    /// Only the red emission channel marks a light.
    pub fn is_light(&self) -> bool
    {
        self.emission_color.x() > 0.0
    }
}

impl Intersect for Sphere
{
    fn intersect(&self, r: &Ray) -> Option<[f32; 2]>
    {
        // Geometric solution: project the origin-to-center vector onto the
        // ray, then measure how far the center sits off the ray line.
        let l = self.center - r.position;
        let tca = l.dot(r.direction);
        if tca < 0.0
        {
            return None;
        }

        let d2 = l.dot(l) - tca * tca;
        if d2 > self.radius2
        {
            return None;
        }

        let thc = (self.radius2 - d2).sqrt();
        Some([tca - thc, tca + thc])
    }
}

#[cfg(test)]
mod tests
{
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn unit_sphere_at(z: f32) -> Sphere
    {
        Sphere::diffuse(Vector3::new(0.0, 0.0, z), 1.0, Vector3::WHITE)
    }

    #[test]
    fn head_on_hit_reports_both_surfaces()
    {
        let s = unit_sphere_at(-5.0);
        let r = Ray::new(Vector3::BLACK, Vector3::new(0.0, 0.0, -1.0));
        let [t0, t1] = s.intersect(&r).unwrap();
        assert!((t0 - 4.0).abs() < 1e-5);
        assert!((t1 - 6.0).abs() < 1e-5);
    }

    #[test]
    fn sphere_behind_origin_is_rejected()
    {
        let s = unit_sphere_at(5.0);
        let r = Ray::new(Vector3::BLACK, Vector3::new(0.0, 0.0, -1.0));
        assert!(s.intersect(&r).is_none());
    }

    #[test]
    fn miss_beside_sphere()
    {
        let s = unit_sphere_at(-5.0);
        let r = Ray::new(Vector3::new(2.0, 0.0, 0.0), Vector3::new(0.0, 0.0, -1.0));
        assert!(s.intersect(&r).is_none());
    }

    #[test]
    fn tangent_ray_is_single_point_hit()
    {
        let s = unit_sphere_at(-5.0);
        let r = Ray::new(Vector3::new(1.0, 0.0, 0.0), Vector3::new(0.0, 0.0, -1.0));
        let [t0, t1] = s.intersect(&r).unwrap();
        assert_eq!(t0, t1);
        assert_eq!(t0, 5.0);
    }

    #[test]
    fn origin_inside_gives_negative_entry()
    {
        // Center ahead of the origin, origin still inside.
        let s = Sphere::diffuse(Vector3::new(0.0, 0.0, -0.5), 2.0, Vector3::WHITE);
        let r = Ray::new(Vector3::BLACK, Vector3::new(0.0, 0.0, -1.0));
        let [t0, t1] = s.intersect(&r).unwrap();
        assert!(t0 < 0.0);
        assert!((t1 - 2.5).abs() < 1e-5);
    }

    #[test]
    fn hit_points_lie_on_surface()
    {
        let mut rng = StdRng::seed_from_u64(7);
        let mut hits = 0;
        for _ in 0..2000
        {
            let center = Vector3::new(rng.gen_range(-5.0..5.0), rng.gen_range(-5.0..5.0), rng.gen_range(-20.0..-5.0));
            let s = Sphere::diffuse(center, rng.gen_range(0.5..4.0), Vector3::WHITE);
            let origin = Vector3::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0));
            let direction = (center - origin + Vector3::new(rng.gen_range(-3.0..3.0), rng.gen_range(-3.0..3.0), 0.0)).unit();
            let r = Ray::new(origin, direction);

            if let Some([t0, t1]) = s.intersect(&r)
            {
                hits += 1;
                assert!(t0 <= t1);
                for t in [t0, t1]
                {
                    let distance = (r.point_at(t) - s.center()).length();
                    assert!((distance - s.radius()).abs() < 1e-3, "distance {} radius {}", distance, s.radius());
                }
            }
        }
        assert!(hits > 100);
    }

    #[test]
    fn radius_setter_keeps_square_in_sync()
    {
        let mut s = unit_sphere_at(0.0);
        s.set_radius(3.0);
        assert_eq!(s.radius2(), 9.0);
    }

    #[test]
    fn material_classification()
    {
        assert_eq!(Material::classify(0.0, 0.0), Material::Diffuse);
        assert_eq!(Material::classify(1.0, 0.0), Material::Reflective);
        assert_eq!(Material::classify(0.0, 0.5), Material::Refractive);
        assert_eq!(Material::classify(1.0, 0.5), Material::ReflectiveRefractive);

        let mut s = unit_sphere_at(0.0);
        assert!(!s.material().is_specular());
        s.set_surface(0.0, 0.3);
        assert!(s.material().is_transparent());
    }

    #[test]
    fn only_red_emission_marks_a_light()
    {
        assert!(Sphere::light(Vector3::BLACK, 1.0, Vector3::new(3.0, 3.0, 3.0)).is_light());
        assert!(!Sphere::light(Vector3::BLACK, 1.0, Vector3::new(0.0, 3.0, 3.0)).is_light());
    }
}
