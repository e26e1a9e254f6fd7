pub mod error;
pub mod ppm;
pub mod ray;
pub mod render;
pub mod scene;
pub mod sphere;
pub mod trace;
pub mod vector;

pub use error::TracerError;
pub use render::{render, render_to_file, ImageBuffer, RenderInfo, RenderSettings};
pub use scene::Scene;
pub use sphere::{Intersect, Material, Sphere};
pub use trace::{TraceSettings, Tracer};
pub use vector::Vector3;
