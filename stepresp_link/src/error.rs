use thiserror::Error;

#[derive(Debug, Error)]
pub enum LinkError {
    #[error("failed to open serial port {port}: {source}")]
    Open {
        port: String,
        #[source]
        source: serialport::Error,
    },
    #[error("link io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("link closed before the terminator line")]
    ChannelClosed,
}

pub type Result<T> = std::result::Result<T, LinkError>;
