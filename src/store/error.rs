use thiserror::Error;

// StoreError is the lowest level error type, wrapping failures of the record storage. It does not
// wrap any higher level errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading, writing or removing a record failed (other than "not found")
    #[error("io error on {location}: {source}")]
    Io {
        location: String,
        #[source]
        source: std::io::Error,
    },

    /// The record exists but is not a valid profile object
    #[error("malformed record {location}: {source}")]
    Parse {
        location: String,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    pub fn is_parse(&self) -> bool {
        matches!(self, StoreError::Parse { .. })
    }
}
