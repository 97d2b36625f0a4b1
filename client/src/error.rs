// SPDX-FileCopyrightText: 2025-2026 Atelier Developers <dev@atelier.example>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

/// Rule service client errors.
#[non_exhaustive]
#[derive(Debug)]
pub enum ApiError {
    /// HTTP layer error, including unexpected status codes.
    Http(String),

    /// Resource not found.
    NotFound(String),

    /// Response body has an unexpected shape.
    InvalidResponse(String),

    /// Configuration error.
    Config(String),

    /// JSON encoding or decoding error.
    Decode(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(e) => write!(f, "HTTP error: {e}"),
            Self::NotFound(url) => write!(f, "Resource not found: {url}"),
            Self::InvalidResponse(e) => write!(f, "Invalid server response: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
            Self::Decode(e) => write!(f, "JSON error: {e}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode(e.to_string())
    }
}
