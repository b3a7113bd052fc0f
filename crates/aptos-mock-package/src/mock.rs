// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! In-memory chain used by the unit tests.

use crate::{
    error::{Error, Result},
    reader::ChainReader,
};
use aptos_mock_rest_client::{
    AccountResource, ModuleMetadata, MoveModule, PackageDep, PackageMetadata, PackageRegistry,
    RestError, StatusCode, UpgradePolicy,
};
use async_trait::async_trait;
use std::{
    collections::{HashMap, HashSet},
    sync::Mutex,
};

#[derive(Default)]
pub struct MockChain {
    registries: HashMap<String, Vec<PackageMetadata>>,
    bare_accounts: HashSet<String>,
    failing_accounts: HashSet<String>,
    modules: HashMap<(String, String), MoveModule>,
    resource_fetches: Mutex<Vec<String>>,
}

impl MockChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publishes `name` at `account` with the given dependency edges and modules. Every
    /// module gets an empty ABI unless one is registered with [`MockChain::with_module`].
    pub fn publish(
        mut self,
        account: &str,
        name: &str,
        deps: &[(&str, &str)],
        modules: &[&str],
    ) -> Self {
        let package = PackageMetadata {
            name: name.to_string(),
            upgrade_policy: UpgradePolicy::compat(),
            modules: modules
                .iter()
                .map(|module| ModuleMetadata {
                    name: module.to_string(),
                    ..Default::default()
                })
                .collect(),
            deps: deps
                .iter()
                .map(|(account, package_name)| PackageDep {
                    account: account.to_string(),
                    package_name: package_name.to_string(),
                })
                .collect(),
            ..Default::default()
        };
        for module in modules {
            self.modules
                .entry((account.to_string(), module.to_string()))
                .or_insert_with(|| MoveModule {
                    address: account.to_string(),
                    name: module.to_string(),
                    friends: vec![],
                    exposed_functions: vec![],
                    structs: vec![],
                });
        }
        self.registries
            .entry(account.to_string())
            .or_default()
            .push(package);
        self
    }

    pub fn with_module(mut self, account: &str, module: MoveModule) -> Self {
        self.modules
            .insert((account.to_string(), module.name.clone()), module);
        self
    }

    /// Drops the ABI of a module while keeping it listed in its package.
    pub fn without_module(mut self, account: &str, module: &str) -> Self {
        self.modules
            .remove(&(account.to_string(), module.to_string()));
        self
    }

    /// An account that exists but never published code.
    pub fn with_bare_account(mut self, account: &str) -> Self {
        self.bare_accounts.insert(account.to_string());
        self
    }

    /// An account whose resource endpoint answers with a server error.
    pub fn with_failing_account(mut self, account: &str) -> Self {
        self.failing_accounts.insert(account.to_string());
        self
    }

    pub fn resource_fetches(&self) -> Vec<String> {
        self.resource_fetches.lock().unwrap().clone()
    }
}

fn http_error(status: StatusCode, body: &str) -> Error {
    Error::Rest(RestError::Http {
        status,
        body: body.to_string(),
    })
}

fn account_resource() -> AccountResource {
    AccountResource::Other {
        resource_type: "0x1::account::Account".to_string(),
        data: serde_json::json!({ "sequence_number": "0" }),
    }
}

#[async_trait]
impl ChainReader for MockChain {
    async fn account_resources(&self, account: &str) -> Result<Vec<AccountResource>> {
        self.resource_fetches
            .lock()
            .unwrap()
            .push(account.to_string());

        if self.failing_accounts.contains(account) {
            return Err(http_error(StatusCode::INTERNAL_SERVER_ERROR, "boom"));
        }
        if let Some(packages) = self.registries.get(account) {
            return Ok(vec![
                account_resource(),
                AccountResource::PackageRegistry(PackageRegistry {
                    packages: packages.clone(),
                }),
            ]);
        }
        if self.bare_accounts.contains(account) {
            return Ok(vec![account_resource()]);
        }
        Err(http_error(StatusCode::NOT_FOUND, "Account not found"))
    }

    async fn module_abi(&self, account: &str, module: &str) -> Result<MoveModule> {
        self.modules
            .get(&(account.to_string(), module.to_string()))
            .cloned()
            .ok_or_else(|| http_error(StatusCode::NOT_FOUND, "Module not found"))
    }
}
