use serde::{Deserialize, Serialize};

pub fn clamp(a: f32) -> f32
{
    if a > 1.0
    {
        1.0
    } else if a < 0.0 {
        0.0
    } else {
        a
    }
}

/// Blends `a` towards `b` by `t`; `t == 0` gives `a`, `t == 1` gives `b`.
pub fn mix(a: f32, b: f32, t: f32) -> f32
{
    b * t + a * (1.0 - t)
}

#[derive(Copy, Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f32; 3]", into = "[f32; 3]")]
pub struct Vector3
{
    inner: [f32; 3]
}

impl From<[f32; 3]> for Vector3
{
    fn from(inner: [f32; 3]) -> Vector3
    {
        Vector3 { inner }
    }
}

impl From<Vector3> for [f32; 3]
{
    fn from(v: Vector3) -> [f32; 3]
    {
        v.inner
    }
}

impl Vector3
{
    pub fn x(&self) -> f32
    {
        self.inner[0]
    }

    pub fn r(&self) -> f32
    {
        self.inner[0]
    }

    pub fn y(&self) -> f32
    {
        self.inner[1]
    }

    pub fn g(&self) -> f32
    {
        self.inner[1]
    }

    pub fn z(&self) -> f32
    {
        self.inner[2]
    }

    pub fn b(&self) -> f32
    {
        self.inner[2]
    }
}

impl Vector3
{
    pub const BLACK: Vector3 = Vector3 { inner: [0.0, 0.0, 0.0] };
    pub const WHITE: Vector3 = Vector3 { inner: [1.0, 1.0, 1.0] };

    pub const fn new(x: f32, y: f32, z: f32) -> Vector3
    {
        Vector3
        {
            inner: [x, y, z]
        }
    }

    pub const fn splat(v: f32) -> Vector3
    {
        Vector3::new(v, v, v)
    }

    pub fn dot(self, other: Vector3) -> f32
    {
        let mult = self * other;
        mult.x() + mult.y() + mult.z()
    }

    pub fn length(&self) -> f32
    {
        self.length_squared().sqrt()
    }

    pub fn length_squared(&self) -> f32
    {
        self.x() * self.x() + self.y() * self.y() + self.z() * self.z()
    }

    /// Scales to unit length in place. A zero vector is left untouched.
    pub fn normalize(&mut self) -> &mut Vector3
    {
        let nor2 = self.length_squared();
        if nor2 > 0.0
        {
            let inv_nor = 1.0 / nor2.sqrt();
            self.inner.iter_mut().for_each(|c| *c *= inv_nor);
        }
        self
    }

    pub fn unit(self) -> Vector3
    {
        let mut v = self;
        v.normalize();
        v
    }

    pub fn reflect_by(&self, normal: &Vector3) -> Vector3
    {
        *self - *normal * 2.0 * self.dot(*normal)
    }

    pub fn is_finite(&self) -> bool
    {
        self.inner.iter().all(|c| c.is_finite())
    }
}

impl std::ops::Neg for Vector3
{
    type Output = Self;

    fn neg(self) -> Self::Output
    {
        Vector3{ inner: [-self.x(), -self.y(), -self.z()] }
    }
}

impl std::ops::Add for Vector3
{
    type Output = Self;

    fn add(self, other: Self) -> Self::Output
    {
        Vector3{ inner: [self.x()+other.x(), self.y()+other.y(), self.z()+other.z()] }
    }
}

impl std::ops::AddAssign for Vector3
{
    fn add_assign(&mut self, other: Self)
    {
        *self = *self + other;
    }
}

impl std::ops::Sub for Vector3
{
    type Output = Self;

    fn sub(self, other: Self) -> Self::Output
    {
        Vector3{ inner: [self.x()-other.x(), self.y()-other.y(), self.z()-other.z()] }
    }
}

impl std::ops::Mul<Vector3> for f32
{
    type Output = Vector3;

    fn mul(self, other: Vector3) -> Self::Output
    {
        Vector3{ inner: [self*other.x(), self*other.y(), self*other.z()] }
    }
}

impl std::ops::Mul<Vector3> for Vector3
{
    type Output = Self;

    fn mul(self, other: Self) -> Self::Output
    {
        Vector3{ inner: [self.x()*other.x(), self.y()*other.y(), self.z()*other.z()] }
    }
}

impl std::ops::Mul<f32> for Vector3
{
    type Output = Self;

    fn mul(self, scalar: f32) -> Self::Output
    {
        Vector3{ inner: [self.x()*scalar, self.y()*scalar, self.z()*scalar] }
    }
}

impl std::ops::Div<f32> for Vector3
{
    type Output = Self;

    fn div(self, scalar: f32) -> Self::Output
    {
        self * (1.0/scalar)
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn normalize_gives_unit_length()
    {
        let mut v = Vector3::new(3.0, 4.0, 12.0);
        v.normalize();
        assert!((v.length() - 1.0).abs() < 1e-6);
        assert!((v.x() - 3.0 / 13.0).abs() < 1e-6);
    }

    #[test]
    fn normalize_zero_vector_is_noop()
    {
        let mut v = Vector3::BLACK;
        v.normalize();
        assert_eq!(v, Vector3::BLACK);
        assert!(v.is_finite());
    }

    #[test]
    fn componentwise_and_scalar_products()
    {
        let a = Vector3::new(1.0, 2.0, 3.0);
        let b = Vector3::new(4.0, 5.0, 6.0);
        assert_eq!(a * b, Vector3::new(4.0, 10.0, 18.0));
        assert_eq!(a * 2.0, 2.0 * a);
        assert_eq!(a.dot(b), 32.0);
        assert_eq!(b - a, Vector3::splat(3.0));
        assert_eq!(-a + a, Vector3::BLACK);
        assert_eq!(a.length_squared(), 14.0);
    }

    #[test]
    fn reflect_mirrors_about_normal()
    {
        let d = Vector3::new(1.0, -1.0, 0.0);
        let n = Vector3::new(0.0, 1.0, 0.0);
        assert_eq!(d.reflect_by(&n), Vector3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn mix_endpoints()
    {
        assert_eq!(mix(0.3, 1.0, 0.0), 0.3);
        assert_eq!(mix(0.3, 1.0, 1.0), 1.0);
        assert_eq!(clamp(1.7), 1.0);
        assert_eq!(clamp(-0.2), 0.0);
    }

    #[test]
    fn deserializes_from_array()
    {
        let v: Vector3 = serde_json::from_str("[0.5, 0.25, 1.0]").unwrap();
        assert_eq!(v, Vector3::new(0.5, 0.25, 1.0));
    }
}
