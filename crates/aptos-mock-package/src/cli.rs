// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

use crate::create::create_mock_package;
use anyhow::Context;
use aptos_mock_rest_client::Client;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use url::Url;

pub const DEFAULT_REST_URL: &str = "https://api.mainnet.aptoslabs.com";
pub const TOKEN_ENV_VAR: &str = "APTOS_API_TOKEN";

/// Rebuilds local Move package skeletons from packages published on chain
#[derive(Debug, Parser)]
#[clap(name = "aptos-mock-package", author, version, propagate_version = true)]
pub struct Tool {
    #[clap(subcommand)]
    command: MockTool,
}

impl Tool {
    pub async fn execute(self) -> anyhow::Result<String> {
        match self.command {
            MockTool::Create(tool) => tool
                .execute()
                .await
                .map(|path| path.display().to_string())
                .context("Command failed: create"),
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum MockTool {
    Create(CreateMockPackage),
}

/// Create a mock of a package published on chain
///
/// Every module becomes a stub with its structs and `native` function signatures, and the
/// package's non-framework dependencies are rebuilt under `deps/`.
#[derive(Debug, Parser)]
#[clap(after_help = "Examples:
  aptos-mock-package create 0x1 AptosStdlib ./output
  aptos-mock-package create 0x1 AptosStdlib --token YOUR_TOKEN")]
pub struct CreateMockPackage {
    /// Account address the package is published at
    pub account: String,

    /// Name of the package in the account's package registry
    pub package: String,

    /// Directory the package folder is created in
    #[clap(default_value = "./")]
    pub directory: PathBuf,

    /// REST endpoint of a fullnode
    #[clap(long, short, default_value = DEFAULT_REST_URL)]
    pub rpc: Url,

    /// Bearer token for API authentication
    #[clap(long, short, env = TOKEN_ENV_VAR, hide_env_values = true)]
    pub token: Option<String>,
}

impl CreateMockPackage {
    pub async fn execute(self) -> anyhow::Result<PathBuf> {
        info!(rpc = %self.rpc, "Using RPC");
        let client = Client::new(self.rpc).with_bearer_token(self.token);
        if client.has_bearer_token() {
            info!("Using Bearer token for authentication");
        }

        Ok(create_mock_package(&client, &self.account, &self.package, &self.directory).await?)
    }
}
