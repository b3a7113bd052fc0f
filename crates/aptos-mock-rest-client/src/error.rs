// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

use reqwest::StatusCode;
use thiserror::Error;

/// Errors raised while talking to the REST API of a fullnode.
#[derive(Debug, Error)]
pub enum RestError {
    #[error("HTTP error! status: {status}, body: {body}")]
    Http { status: StatusCode, body: String },
    #[error("Request failed: {0}")]
    Request(#[source] reqwest::Error),
    #[error("Failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid request url: {0}")]
    Url(#[from] url::ParseError),
}

impl RestError {
    pub fn request(error: reqwest::Error) -> Self {
        RestError::Request(error)
    }

    /// The HTTP status code, if the server answered with a non-success status.
    pub fn status_code(&self) -> Option<StatusCode> {
        match self {
            RestError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
