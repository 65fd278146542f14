//! Error handling for UTMN Map
//!
//! Provides error types for all layers of the map engine:
//! - API errors (transport, HTTP status, payload decoding)
//! - Lookup errors (floors, objects, doors, graph nodes that are not present)
//! - Edit errors (editor operations requested in the wrong state)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Data access error type
///
/// Represents failures talking to the backend API.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The request never produced a response
    #[error("Transport error for {url}: {message}")]
    Transport {
        /// The requested URL.
        url: String,
        /// Description of the transport failure.
        message: String,
    },

    /// The backend answered with a non-success status
    #[error("HTTP error! status: {status} ({url})")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The requested URL.
        url: String,
    },

    /// The backend rejected the bearer credential
    #[error("Unauthorized request to {url}")]
    Unauthorized {
        /// The requested URL.
        url: String,
    },

    /// The request did not complete in time
    #[error("Request to {url} timed out after {timeout_ms}ms")]
    Timeout {
        /// The requested URL.
        url: String,
        /// The configured timeout in milliseconds.
        timeout_ms: u64,
    },

    /// The response body could not be decoded
    #[error("Failed to decode response from {url}: {message}")]
    Decode {
        /// The requested URL.
        url: String,
        /// The decoder message.
        message: String,
    },
}

/// Lookup error type
///
/// Raised only where an operation cannot continue without the entity.
/// Plain queries (hit-testing, node resolution) return `Option` instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// No floor with this id in the snapshot
    #[error("Floor not found: {floor_id}")]
    FloorNotFound {
        /// The floor id.
        floor_id: String,
    },

    /// No object with this id in the snapshot
    #[error("Object not found: {object_id}")]
    ObjectNotFound {
        /// The object id.
        object_id: String,
    },

    /// The object has no door a route could start or end at
    #[error("Object {object_id} has no door to route from")]
    NoDoor {
        /// The object id.
        object_id: String,
    },

    /// The selection does not identify a route endpoint
    #[error("Nothing selected to route from")]
    NoEndpoint,

    /// No graph node with this id
    #[error("Graph node not found: {node_id}")]
    NodeNotFound {
        /// The node id.
        node_id: String,
    },
}

/// Editor error type
///
/// Represents editor operations requested while the editor is not in a
/// state that allows them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    /// Finishing a polygon needs at least three points
    #[error("Polygon needs at least 3 points, got {count}")]
    NotEnoughPolygonPoints {
        /// The number of accumulated points.
        count: usize,
    },

    /// No floor is currently displayed
    #[error("No floor selected")]
    NoCurrentFloor,

    /// No building snapshot has been loaded
    #[error("No building loaded")]
    NoBuilding,

    /// The create form was submitted without a clicked position
    #[error("No pending object draft")]
    NoPendingDraft,

    /// A move commit was requested without a moved object
    #[error("No object move to commit")]
    NothingToCommit,
}

/// Main error type for UTMN Map
///
/// Aggregates all error types into a single type for use throughout the engine.
#[derive(Error, Debug)]
pub enum Error {
    /// Data access error
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Lookup error
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// Editor state error
    #[error(transparent)]
    Edit(#[from] EditError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this error came from the backend API
    pub fn is_api_error(&self) -> bool {
        matches!(self, Error::Api(_))
    }

    /// Check if this is a timeout error
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Api(ApiError::Timeout { .. }))
    }

    /// Check if this is a lookup error
    pub fn is_lookup_error(&self) -> bool {
        matches!(self, Error::Lookup(_))
    }

    /// Check if this is an editor state error
    pub fn is_edit_error(&self) -> bool {
        matches!(self, Error::Edit(_))
    }

    /// Message suitable for showing next to the action that failed.
    pub fn user_message(&self) -> String {
        match self {
            Error::Api(ApiError::Unauthorized { .. }) => "Session expired, please log in again".to_string(),
            Error::Api(ApiError::Timeout { .. }) => "The server did not respond in time".to_string(),
            Error::Api(_) => "Could not reach the map server".to_string(),
            Error::Lookup(LookupError::NoDoor { .. }) | Error::Lookup(LookupError::NoEndpoint) => {
                "The selected place has no entrance to route from".to_string()
            }
            other => other.to_string(),
        }
    }
}

/// Result type for UTMN Map operations
pub type Result<T> = std::result::Result<T, Error>;
