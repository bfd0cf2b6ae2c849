//! Errors from the config layer.

/// Anything that can go wrong between `config.ron` on disk and a validated [`Config`](crate::Config).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// `config.ron` exists but could not be read.
    #[error("cannot read config.ron: {0}")]
    ReadError(#[source] std::io::Error),

    /// The config directory or file could not be written.
    #[error("cannot write config.ron: {0}")]
    WriteError(#[source] std::io::Error),

    /// The file is not valid RON for [`Config`](crate::Config).
    #[error("malformed config.ron: {0}")]
    ParseError(#[source] ron::error::SpannedError),

    /// RON serialisation failed.
    #[error("cannot serialise config: {0}")]
    SerializeError(#[source] ron::Error),

    /// A value is outside the range the camera rig can work with.
    #[error("invalid config value `{field}`: {reason}")]
    Invalid {
        /// Dotted path of the offending field, e.g. `camera.max_zoom_range`.
        field: &'static str,
        /// Human-readable explanation.
        reason: String,
    },
}
