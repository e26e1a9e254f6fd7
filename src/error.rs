use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TracerError
{
    #[error("could not write {}: {source}", path.display())]
    Io
    {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed scene or settings JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid render settings: {0}")]
    InvalidSettings(String),

    #[error("sphere #{index} is invalid: {reason}")]
    InvalidSphere { index: usize, reason: String },
}

impl TracerError
{
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> TracerError
    {
        TracerError::Io { path: path.into(), source }
    }
}

pub type Result<T> = std::result::Result<T, TracerError>;

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn messages_name_the_failing_piece()
    {
        let io = TracerError::io("out/frame.ppm", std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert_eq!(io.to_string(), "could not write out/frame.ppm: gone");

        let sphere = TracerError::InvalidSphere { index: 3, reason: "radius must be finite and positive".into() };
        assert!(sphere.to_string().starts_with("sphere #3"));
    }
}
