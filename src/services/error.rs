use crate::store::error::StoreError;
use thiserror::Error;

/// Business-rule failures on the link set of a profile. These reflect user input and are
/// always reported back as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinkError {
    #[error("You can only have up to {max} links.")]
    CapacityExceeded { max: usize },

    #[error("A link with the name '{0}' already exists in your profile.")]
    DuplicateName(String),

    #[error("You don't have any links in your profile.")]
    NoLinks,

    #[error("No link with the name '{0}' found in your profile.")]
    NotFound(String),
}

/// ServiceError represents errors that can occur in the service layer of the application.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Link(#[from] LinkError),

    #[error("invalid user name: {0}")]
    InvalidUserName(String),

    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl ServiceError {
    /// Message that is safe to show to a player. Storage details stay in the logs.
    pub fn user_message(&self) -> String {
        match self {
            ServiceError::Link(e) => e.to_string(),
            ServiceError::InvalidUserName(name) => format!("'{name}' is not a valid player name."),
            ServiceError::Storage(_) => "Something went wrong while accessing profiles. Please try again later.".to_string(),
        }
    }
}
