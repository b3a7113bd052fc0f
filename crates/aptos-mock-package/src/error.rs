// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

use aptos_mock_rest_client::RestError;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to read from chain: {0}")]
    Rest(#[from] RestError),
    #[error("PackageRegistry not found at account {account}")]
    PackageRegistryNotFound { account: String },
    #[error("Package {package} not found at account {account}, published packages: {available:?}")]
    PackageNotFound {
        account: String,
        package: String,
        available: Vec<String>,
    },
    #[error("Module {account}::{module} has no ABI")]
    MissingAbi { account: String, module: String },
    #[error("{name:?} cannot be used as a file or directory name")]
    InvalidPathSegment { name: String },
    #[error("Error accessing {0}: {1}")]
    IO(String, #[source] std::io::Error),
}

impl Error {
    pub fn io(path: impl AsRef<std::path::Path>, error: std::io::Error) -> Self {
        Error::IO(path.as_ref().display().to_string(), error)
    }
}
