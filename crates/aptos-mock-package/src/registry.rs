// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

use crate::{
    error::{Error, Result},
    reader::ChainReader,
};
use aptos_mock_rest_client::{AccountResource, PackageMetadata, PackageRegistry};

/// Represents the package registry at a given account.
#[derive(Clone, Debug)]
pub struct CachedPackageRegistry {
    account: String,
    inner: PackageRegistry,
}

impl CachedPackageRegistry {
    /// Picks the registry out of an account's resources, `None` if the account never
    /// published a package.
    pub fn from_resources(account: &str, resources: Vec<AccountResource>) -> Option<Self> {
        resources.into_iter().find_map(|resource| match resource {
            AccountResource::PackageRegistry(inner) => Some(Self {
                account: account.to_string(),
                inner,
            }),
            AccountResource::Other { .. } => None,
        })
    }

    /// Fetches the registry of `account`.
    pub async fn fetch<R: ChainReader + ?Sized>(reader: &R, account: &str) -> Result<Self> {
        let resources = reader.account_resources(account).await?;
        Self::from_resources(account, resources).ok_or_else(|| Error::PackageRegistryNotFound {
            account: account.to_string(),
        })
    }

    /// Returns the list of packages in this registry by name.
    pub fn package_names(&self) -> Vec<String> {
        self.inner.packages.iter().map(|p| p.name.clone()).collect()
    }

    /// Finds the metadata for the given package in the registry by its unique name.
    pub fn get_package(&self, name: impl AsRef<str>) -> Result<&PackageMetadata> {
        let name = name.as_ref();
        self.inner
            .packages
            .iter()
            .find(|package| package.name == name)
            .ok_or_else(|| Error::PackageNotFound {
                account: self.account.clone(),
                package: name.to_string(),
                available: self.package_names(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockChain;
    use claims::{assert_err, assert_ok, assert_some};

    #[tokio::test]
    async fn test_fetch_and_find_package() {
        let chain = MockChain::new()
            .publish("0xa", "Core", &[], &["math"])
            .publish("0xa", "Swap", &[("0xa", "Core")], &["pool", "router"]);

        let registry = assert_ok!(CachedPackageRegistry::fetch(&chain, "0xa").await);
        assert_eq!(registry.package_names(), vec!["Core", "Swap"]);

        let package = assert_ok!(registry.get_package("Swap"));
        assert_eq!(package.module_names(), vec!["pool", "router"]);
        assert_eq!(package.deps.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_package_lists_published_packages() {
        let chain = MockChain::new().publish("0xa", "Core", &[], &[]);
        let registry = assert_ok!(CachedPackageRegistry::fetch(&chain, "0xa").await);

        match assert_err!(registry.get_package("Nope")) {
            Error::PackageNotFound {
                account,
                package,
                available,
            } => {
                assert_eq!(account, "0xa");
                assert_eq!(package, "Nope");
                assert_eq!(available, vec!["Core"]);
            },
            other => panic!("unexpected error: {}", other),
        }
    }

    #[tokio::test]
    async fn test_account_without_registry() {
        let chain = MockChain::new().with_bare_account("0xb");
        let error = assert_err!(CachedPackageRegistry::fetch(&chain, "0xb").await);
        assert!(matches!(error, Error::PackageRegistryNotFound { .. }));

        let resources = assert_ok!(chain.account_resources("0xb").await);
        assert!(CachedPackageRegistry::from_resources("0xb", resources).is_none());
    }

    #[tokio::test]
    async fn test_from_resources_skips_other_resources() {
        let chain = MockChain::new().publish("0xa", "Core", &[], &[]);
        let resources = assert_ok!(chain.account_resources("0xa").await);
        assert_eq!(resources.len(), 2);
        let registry = assert_some!(CachedPackageRegistry::from_resources("0xa", resources));
        assert_eq!(registry.package_names(), vec!["Core"]);
    }
}
