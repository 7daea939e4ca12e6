//! Error definitions for the MQTT module

use rumqttc::ConnectReturnCode;
use std::str::Utf8Error;
use thiserror::Error;

/// Reasons a payload could not be turned into a JSON value
#[derive(Debug, Error)]
pub enum PayloadError {
    /// Payload bytes are not valid UTF-8
    #[error("payload is not valid UTF-8: {0}")]
    Decode(#[from] Utf8Error),

    /// Payload text is not valid JSON
    #[error("{0}")]
    Parse(#[from] serde_json::Error),
}

/// A refused or otherwise failed connection attempt, as reported by the broker's CONNACK
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("code {code} ({reason})")]
pub struct ConnectionFailure {
    pub code: u8,
    pub reason: &'static str,
}

impl ConnectionFailure {
    pub fn from_code(code: u8) -> Self {
        let reason = match code {
            1 => "refused: unacceptable protocol version",
            2 => "refused: identifier rejected",
            3 => "refused: server unavailable",
            4 => "refused: bad user name or password",
            5 => "refused: not authorized",
            _ => "unknown reason",
        };
        Self { code, reason }
    }
}

pub fn return_code_value(code: ConnectReturnCode) -> u8 {
    match code {
        ConnectReturnCode::Success => 0,
        ConnectReturnCode::RefusedProtocolVersion => 1,
        ConnectReturnCode::BadClientId => 2,
        ConnectReturnCode::ServiceUnavailable => 3,
        ConnectReturnCode::BadUserNamePassword => 4,
        ConnectReturnCode::NotAuthorized => 5,
    }
}
