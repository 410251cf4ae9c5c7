use std::error::Error as StdError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StarterErrorKind {
    NoHardwareAddressAvailable,
    ReadJoinConfig,
    ParseJoinConfig,
    ReadTemplate,
    RenderConfig,
    WriteConfig,
    LaunchMultiplexer,
}

/// StarterError is the error returned by every step of the multiplexer startup. The `kind` tells
/// which step failed; the message is what gets logged before the process exits.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct StarterError {
    kind: StarterErrorKind,
    message: String,
    #[source]
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

impl StarterError {
    pub fn new(kind: StarterErrorKind, message: String) -> Self {
        StarterError {
            kind,
            message,
            source: None,
        }
    }

    pub fn with_source<E>(kind: StarterErrorKind, message: String, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        StarterError {
            kind,
            message,
            source: Some(Box::new(source)),
        }
    }

    pub fn kind(&self) -> StarterErrorKind {
        self.kind
    }
}
