// Copyright 2026 ReductSoftware UG
// This Source Code Form is subject to the terms of the Mozilla Public
//    License, v. 2.0. If a copy of the MPL was not distributed with this
//    file, You can obtain one at https://mozilla.org/MPL/2.0/.

pub use int_enum::IntEnum;
use std::error::Error;
use std::fmt::{Debug, Display, Error as FmtError, Formatter};

/// HTTP status codes + client errors (negative).
#[repr(i16)]
#[derive(Debug, PartialEq, PartialOrd, Copy, Clone, IntEnum)]
pub enum ErrorCode {
    Unknown = -1,

    BadRequest = 400,
    NotFound = 404,
    InternalServerError = 500,
}

/// An HTTP error, we use it for error handling.
#[derive(PartialEq, Debug, Clone)]
pub struct BaladeError {
    /// The HTTP status code.
    pub status: ErrorCode,

    /// The human readable message.
    pub message: String,
}

impl Display for BaladeError {
    fn fmt(&self, f: &mut Formatter) -> Result<(), FmtError> {
        write!(f, "[{:?}] {}", self.status, self.message)
    }
}

impl Display for ErrorCode {
    fn fmt(&self, f: &mut Formatter) -> Result<(), FmtError> {
        write!(f, "{}", self.int_value())
    }
}

impl From<std::io::Error> for BaladeError {
    fn from(err: std::io::Error) -> Self {
        // An IO error is an internal store error
        BaladeError {
            status: ErrorCode::InternalServerError,
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for BaladeError {
    fn from(err: serde_json::Error) -> Self {
        // Broken snapshots and unserializable documents are internal errors.
        // Request bodies are checked by the HTTP layer before they get here.
        BaladeError {
            status: ErrorCode::InternalServerError,
            message: err.to_string(),
        }
    }
}

impl Error for BaladeError {}

impl BaladeError {
    pub fn new(status: ErrorCode, message: &str) -> Self {
        BaladeError {
            status,
            message: message.to_string(),
        }
    }

    pub fn status(&self) -> ErrorCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Create a not found error.
    pub fn not_found(msg: &str) -> BaladeError {
        BaladeError {
            status: ErrorCode::NotFound,
            message: msg.to_string(),
        }
    }

    /// Create a bad request error.
    pub fn bad_request(msg: &str) -> BaladeError {
        BaladeError {
            status: ErrorCode::BadRequest,
            message: msg.to_string(),
        }
    }

    /// Create an internal server error.
    pub fn internal_server_error(msg: &str) -> BaladeError {
        BaladeError {
            status: ErrorCode::InternalServerError,
            message: msg.to_string(),
        }
    }
}

#[macro_export]
macro_rules! not_found {
    ($msg:expr, $($arg:tt)*) => {
        BaladeError::not_found(&format!($msg, $($arg)*))
    };
    ($msg:expr) => {
        BaladeError::not_found($msg)
    };
}

#[macro_export]
macro_rules! bad_request {
    ($msg:expr, $($arg:tt)*) => {
        BaladeError::bad_request(&format!($msg, $($arg)*))
    };
    ($msg:expr) => {
        BaladeError::bad_request($msg)
    };
}

#[macro_export]
macro_rules! internal_server_error {
    ($msg:expr, $($arg:tt)*) => {
        BaladeError::internal_server_error(&format!($msg, $($arg)*))
    };
    ($msg:expr) => {
        BaladeError::internal_server_error($msg)
    };
}
