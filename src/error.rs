use std::io;

/// The listening socket could not be set up at `addr`.
#[derive(Debug, thiserror::Error)]
#[error("failed to bind {addr}: {source}")]
pub struct BindError {
    pub addr: String,
    #[source]
    pub source: io::Error,
}

impl BindError {
    pub fn new(addr: impl Into<String>, source: io::Error) -> Self {
        Self {
            addr: addr.into(),
            source,
        }
    }

    pub fn kind(&self) -> io::ErrorKind {
        self.source.kind()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ServeError {
    #[error(transparent)]
    Bind(#[from] BindError),
    #[error("failed to register listener with the runtime: {0}")]
    Listener(#[source] io::Error),
}
