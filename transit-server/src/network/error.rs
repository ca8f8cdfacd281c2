//! Dataset error types.

use std::path::PathBuf;

use crate::domain::{RouteId, StopId};

/// Errors that can occur when loading or validating a network dataset.
#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    /// Reading or writing a dataset file failed
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A dataset file is not valid JSON of the expected shape
    #[error("JSON error in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Two stops share an id
    #[error("duplicate stop id: {0}")]
    DuplicateStop(StopId),

    /// Two routes share an id
    #[error("duplicate route id: {0}")]
    DuplicateRoute(RouteId),

    /// A route lists no stops
    #[error("route {0} has no stops")]
    EmptyRoute(RouteId),

    /// A supplied graph refers to a route that is not in the route list
    #[error("graph references unknown route {0}")]
    UnknownGraphRoute(RouteId),

    /// The background reload task did not complete
    #[error("dataset reload failed: {message}")]
    Reload { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = NetworkError::DuplicateStop(StopId::parse("kalanki").unwrap());
        assert_eq!(err.to_string(), "duplicate stop id: kalanki");

        let err = NetworkError::EmptyRoute(RouteId::parse("r1").unwrap());
        assert_eq!(err.to_string(), "route r1 has no stops");

        let err = NetworkError::Io {
            path: PathBuf::from("data/route_data.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(
            err.to_string(),
            "I/O error on data/route_data.json: missing"
        );
    }
}
