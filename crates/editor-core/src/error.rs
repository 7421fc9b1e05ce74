use thiserror::Error;

/// Failures raised by sphere, scene and store commands.
///
/// Absence on read paths (`find_sphere`, picking) is reported as `None`, never
/// through this type. Broken invariants on deserialized data surface through
/// [`crate::ValidationReport`] instead.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("invalid {field}: {message}")]
    InvalidArgument {
        field: &'static str,
        message: String,
    },

    #[error("Sphere with ID {id} not found")]
    NotFound { id: String },

    /// A batch update stopped at `key`; the `applied` keys before it stay applied.
    #[error("update stopped at '{key}' after {applied} applied: {source}")]
    UpdateFailed {
        key: String,
        applied: usize,
        #[source]
        source: Box<SceneError>,
    },

    #[error("scene document: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SceneError {
    pub(crate) fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        SceneError::InvalidArgument {
            field,
            message: message.into(),
        }
    }

    pub(crate) fn not_found(id: impl Into<String>) -> Self {
        SceneError::NotFound { id: id.into() }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, SceneError::NotFound { .. })
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, SceneError::InvalidArgument { .. })
    }
}

pub type Result<T> = std::result::Result<T, SceneError>;
