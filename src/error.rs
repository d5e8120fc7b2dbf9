//! Error types for share-link conversion
//!
//! Errors fall into three groups:
//! - **Input**: [`Io`](ConvertError::Io) / [`Json`](ConvertError::Json) while loading the
//!   configuration. Fatal to the whole conversion.
//! - **Per outbound**: [`SettingsDecode`](ConvertError::SettingsDecode),
//!   [`MissingSettings`](ConvertError::MissingSettings),
//!   [`EmptyServers`](ConvertError::EmptyServers) and
//!   [`UnsupportedProtocol`](ConvertError::UnsupportedProtocol). The outbound is dropped and
//!   conversion continues.
//! - **Aggregate**: [`NoValidOutbounds`](ConvertError::NoValidOutbounds) when nothing could be
//!   converted.

use thiserror::Error;

/// Result type for conversion operations
pub type Result<T> = std::result::Result<T, ConvertError>;

/// Errors that can occur while turning outbounds into share links
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Protocol settings did not match the shape the protocol expects
    #[error("settings decode error ({protocol}): {reason}")]
    SettingsDecode {
        /// Protocol whose settings failed to decode
        protocol: String,
        /// Decoder message
        reason: String,
    },
    /// Outbound of a supported protocol carries no `settings` object
    #[error("missing settings for {0} outbound")]
    MissingSettings(String),
    /// Settings decoded but list no server to link to
    #[error("no servers configured for {0} outbound")]
    EmptyServers(String),
    /// Protocol has no share-link representation
    #[error("unsupported protocol: {0}")]
    UnsupportedProtocol(String),
    /// No outbound produced a link
    #[error("no valid outbounds")]
    NoValidOutbounds,
    /// Reading the configuration or writing the links failed
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// Configuration document is not valid JSON for the expected layout
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl ConvertError {
    /// Builds a [`SettingsDecode`](ConvertError::SettingsDecode) error from a serde failure.
    pub(crate) fn settings_decode(protocol: &str, err: serde_json::Error) -> Self {
        ConvertError::SettingsDecode {
            protocol: protocol.to_string(),
            reason: err.to_string(),
        }
    }

    /// True for errors that only disqualify a single outbound.
    pub fn is_per_outbound(&self) -> bool {
        matches!(
            self,
            ConvertError::SettingsDecode { .. }
                | ConvertError::MissingSettings(_)
                | ConvertError::EmptyServers(_)
                | ConvertError::UnsupportedProtocol(_)
        )
    }
}
