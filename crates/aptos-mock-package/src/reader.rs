// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

use crate::error::{Error, Result};
use aptos_mock_rest_client::{AccountResource, Client, MoveModule};
use async_trait::async_trait;

/// Read access to the two pieces of chain state a package skeleton is built from.
#[async_trait]
pub trait ChainReader: Send + Sync {
    /// All resources stored under `account`.
    async fn account_resources(&self, account: &str) -> Result<Vec<AccountResource>>;

    /// The ABI of `account::module`.
    async fn module_abi(&self, account: &str, module: &str) -> Result<MoveModule>;
}

#[async_trait]
impl ChainReader for Client {
    async fn account_resources(&self, account: &str) -> Result<Vec<AccountResource>> {
        Ok(self.get_account_resources(account).await?)
    }

    async fn module_abi(&self, account: &str, module: &str) -> Result<MoveModule> {
        self.get_account_module(account, module)
            .await?
            .abi
            .ok_or_else(|| Error::MissingAbi {
                account: account.to_string(),
                module: module.to_string(),
            })
    }
}
