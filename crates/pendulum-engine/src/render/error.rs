use std::fmt;

/// Construction-time failures of geometry and GPU resources.
///
/// All variants are raised synchronously while the scene is being built;
/// none of them can occur inside the frame loop.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderError {
    /// A geometry builder received malformed input (too few segments,
    /// inverted bounds, non-finite values).
    InvalidGeometryParameter(String),

    /// A fan was given fewer than 3 vertices.
    EmptyGeometry { len: usize },

    /// The graphics context could not allocate a buffer.
    ResourceCreationFailure(String),
}

impl RenderError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidGeometryParameter(msg.into())
    }
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidGeometryParameter(msg) => {
                write!(f, "invalid geometry parameter: {msg}")
            }
            Self::EmptyGeometry { len } => {
                write!(f, "empty geometry: a fan needs at least 3 vertices, got {len}")
            }
            Self::ResourceCreationFailure(msg) => {
                write!(f, "gpu resource creation failed: {msg}")
            }
        }
    }
}

impl std::error::Error for RenderError {}
