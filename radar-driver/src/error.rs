use std::io;
use std::str::Utf8Error;

/// Errors that end a receiving session.
#[derive(Debug, thiserror::Error)]
pub enum RadarError {
    #[error("Framing error: {0}")]
    Framing(#[from] FramingError),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
    #[error("Serial port error: {0}")]
    SerialError(#[from] serialport::Error),
}

/// A complete message could not be decoded as text.
#[derive(Debug, thiserror::Error)]
pub enum FramingError {
    #[error("Message is not valid UTF-8 ({source}). Observed bytes = {bytes}.")]
    InvalidUtf8 {
        bytes: String,
        #[source]
        source: Utf8Error,
    },
}

/// Which field of a measurement message failed to parse.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Angle,
    Distance,
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Field::Angle => write!(f, "angle"),
            Field::Distance => write!(f, "distance"),
        }
    }
}

/// Rejection of a single measurement message. Never fatal for the session.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("No separator after the {0} marker.")]
    MissingSeparator(Field),
    #[error("Angle must be an integer. Observed = {0:?}.")]
    InvalidAngle(String),
    #[error("Distance must be a finite number. Observed = {0:?}.")]
    InvalidDistance(String),
}
