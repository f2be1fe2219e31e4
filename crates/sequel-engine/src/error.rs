use std::fmt;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors returned by the batching renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The pending buffer would have to grow past its absolute ceiling.
    ///
    /// Fatal: the renderer cannot accept the geometry under any configuration
    /// of this session. Nothing was written.
    CapacityExceeded { requested: usize, max: usize },

    /// Automatic growth is disabled and the pending buffer has no room.
    /// Nothing was written; flushing frees the buffer.
    BufferFull { requested: usize, capacity: usize },

    /// Pixel data length does not match `width * height * 4`.
    InvalidTextureData { expected: usize, actual: usize },

    /// A texture dimension is zero.
    InvalidTextureSize { width: u32, height: u32 },

    /// Inconsistent capacity constants in [`BatchConfig`](crate::BatchConfig).
    InvalidConfig(String),
}

impl Error {
    /// Whether the host should treat this as end-of-session.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::CapacityExceeded { .. })
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::CapacityExceeded { requested, max } => write!(
                f,
                "vertex count {requested} went beyond the maximum of {max} vertices"
            ),
            Error::BufferFull { requested, capacity } => write!(
                f,
                "vertex buffer full: {requested} vertices needed, capacity is {capacity} and growth is disabled"
            ),
            Error::InvalidTextureData { expected, actual } => write!(
                f,
                "texture data is {actual} bytes, expected {expected} (RGBA8)"
            ),
            Error::InvalidTextureSize { width, height } => {
                write!(f, "texture size {width}x{height} has a zero dimension")
            }
            Error::InvalidConfig(msg) => write!(f, "invalid batch configuration: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_capacity_exceeded_is_fatal() {
        assert!(Error::CapacityExceeded { requested: 9000, max: 8192 }.is_fatal());
        assert!(!Error::BufferFull { requested: 6, capacity: 4 }.is_fatal());
        assert!(!Error::InvalidConfig("x".into()).is_fatal());
    }

    #[test]
    fn display_names_the_limit() {
        let msg = Error::CapacityExceeded { requested: 9000, max: 8192 }.to_string();
        assert!(msg.contains("9000"));
        assert!(msg.contains("8192"));
    }
}
