use followtrack_core_types::RequestId;
use thiserror::Error;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that front-ends can match on
/// without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    /// Records handed to the store break a snapshot invariant
    InvalidInput,
    /// Stored or supplied text does not map onto a known enum value
    InvalidValue,
    Io,
    Persistence,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::InvalidValue => "ERR_INVALID_VALUE",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
        }
    }

    /// Whether the failure came from the storage engine rather than the caller.
    ///
    /// Front-ends show a generic failure message for these and must not
    /// assume any part of the operation completed.
    pub fn is_storage_failure(&self) -> bool {
        matches!(self, ExErrorKind::Io | ExErrorKind::Persistence)
    }
}

/// Canonical structured error type
///
/// Classification fields for programmatic handling plus context for debugging.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    request_id: Option<RequestId>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            request_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity ID context (snapshot id, username, ...)
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add request ID context
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the entity ID context, if any
    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    /// Get the request ID context, if any
    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        if let Some(request_id) = &self.request_id {
            write!(f, " (request_id: {})", request_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Domain validation errors raised by the core model
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TrackerError {
    /// A record reached persistence with an empty username
    #[error("Record at position {position} has an empty username")]
    EmptyUsername { position: usize },

    /// Two records in the same snapshot share a username
    #[error("Username appears more than once in one snapshot: {username}")]
    DuplicateUsername { username: String },

    /// Relation kind text is neither followers nor following
    #[error("Unknown relation kind: {value:?}")]
    UnknownRelationKind { value: String },

    /// Stored flag text is not YES, NO or empty
    #[error("Unknown follow flag: {value:?}")]
    UnknownFlag { value: String },

    /// Stored timestamp is out of range
    #[error("Invalid timestamp: {millis}")]
    InvalidTimestamp { millis: i64 },
}

impl From<TrackerError> for ExError {
    fn from(err: TrackerError) -> Self {
        let message = err.to_string();
        match err {
            TrackerError::EmptyUsername { position } => ExError::new(ExErrorKind::InvalidInput)
                .with_entity_id(format!("record:{}", position))
                .with_message(message),
            TrackerError::DuplicateUsername { username } => {
                ExError::new(ExErrorKind::InvalidInput)
                    .with_entity_id(username)
                    .with_message(message)
            }
            TrackerError::UnknownRelationKind { .. }
            | TrackerError::UnknownFlag { .. }
            | TrackerError::InvalidTimestamp { .. } => {
                ExError::new(ExErrorKind::InvalidValue).with_message(message)
            }
        }
    }
}
