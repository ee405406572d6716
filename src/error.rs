//! Error types for item bag persistence.

use thiserror::Error;

use crate::bag::ContainerSize;

/// Why a single saved bag could not be turned back into a live bag.
///
/// These are data errors: the saved record is fine, but the bag-type
/// config it refers to has drifted. Batch loads log them and skip the bag.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeFailure {
    #[error("no bag type with id '{type_id}' (instance {instance_id})")]
    UnknownType { type_id: String, instance_id: i32 },

    #[error("bag type '{type_id}' has no settings for size {size} (instance {instance_id})")]
    UnsupportedSize {
        type_id: String,
        size: ContainerSize,
        instance_id: i32,
    },
}

impl DecodeFailure {
    /// Type id of the snapshot that failed to decode.
    pub fn type_id(&self) -> &str {
        match self {
            Self::UnknownType { type_id, .. } | Self::UnsupportedSize { type_id, .. } => type_id,
        }
    }

    /// Instance id of the snapshot that failed to decode.
    pub const fn instance_id(&self) -> i32 {
        match self {
            Self::UnknownType { instance_id, .. } | Self::UnsupportedSize { instance_id, .. } => {
                *instance_id
            }
        }
    }
}

/// Primary error type for config, save-file and store operations.
#[derive(Error, Debug)]
pub enum BagsError {
    // Configuration errors
    #[error("Bag type config not found: {path}")]
    ConfigNotFound { path: String },

    #[error("Bag type config parse error: {0}")]
    ConfigParse(String),

    #[error("Invalid bag type config: {0}")]
    ConfigInvalid(String),

    // Save data errors
    #[error("Save file not found: {path}")]
    SaveNotFound { path: String },

    #[error("Save data parse error: {0}")]
    SaveParse(String),

    #[error("Bag {instance_id} not found in store")]
    BagNotFound { instance_id: i32 },

    #[error("Bag store error: {0}")]
    Store(String),

    #[error(transparent)]
    Decode(#[from] DecodeFailure),

    // General errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl BagsError {
    /// Returns true if the error is recoverable by the user.
    pub const fn is_user_recoverable(&self) -> bool {
        matches!(
            self,
            Self::ConfigNotFound { .. }
                | Self::ConfigInvalid(_)
                | Self::SaveNotFound { .. }
                | Self::BagNotFound { .. }
                | Self::Decode(_)
        )
    }

    /// Returns a suggestion for how to fix the error.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::ConfigNotFound { .. } => Some("Pass --config or set BAGS_CONFIG"),
            Self::ConfigInvalid(_) => Some("Fix the bag type definitions and retry"),
            Self::BagNotFound { .. } => Some("Run: bags list"),
            Self::Decode(DecodeFailure::UnknownType { .. }) => {
                Some("Restore the missing bag type in your bag type config")
            }
            Self::Decode(DecodeFailure::UnsupportedSize { .. }) => {
                Some("Add the missing size to the bag type's SizeSettings")
            }
            _ => None,
        }
    }
}

/// Convenience type alias for Results using BagsError.
pub type Result<T> = std::result::Result<T, BagsError>;
