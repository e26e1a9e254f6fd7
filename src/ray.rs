use crate::vector::Vector3;

/// A half-line. Every caller keeps `direction` at unit length.
#[derive(Copy, Clone, Debug)]
pub struct Ray
{
    pub position: Vector3,
    pub direction: Vector3
}

impl Ray
{
    pub fn new(position: Vector3, direction: Vector3) -> Ray
    {
        Ray { position, direction }
    }

    pub fn point_at(&self, scalar: f32) -> Vector3
    {
        let d = self.direction * scalar;
        self.position + d
    }
}
