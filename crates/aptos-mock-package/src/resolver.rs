// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! Flattens the on-chain package dependency graph of a package into a deduplicated set.

use crate::{reader::ChainReader, registry::CachedPackageRegistry};
use aptos_mock_rest_client::PackageDep;
use indexmap::IndexMap;
use std::fmt;
use tracing::{debug, warn};

/// Accounts holding the Aptos framework. Their packages are pinned to the framework git
/// repository instead of being rebuilt locally.
pub const FRAMEWORK_ADDRESSES: [&str; 3] = ["0x1", "0x3", "0x4"];

pub fn is_framework_address(account: &str) -> bool {
    FRAMEWORK_ADDRESSES.contains(&account)
}

/// On-disk folder name of a package, `<packageName>_<account without 0x>`. Two accounts
/// publishing the same package name never share a folder.
pub fn qualified_name(package_name: &str, account: &str) -> String {
    format!(
        "{}_{}",
        package_name,
        account.strip_prefix("0x").unwrap_or(account)
    )
}

/// Identity of a package, displayed as `account::packageName`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PackageId {
    pub account: String,
    pub package_name: String,
}

impl PackageId {
    pub fn new(account: impl Into<String>, package_name: impl Into<String>) -> Self {
        Self {
            account: account.into(),
            package_name: package_name.into(),
        }
    }

    pub fn qualified_name(&self) -> String {
        qualified_name(&self.package_name, &self.account)
    }
}

impl From<&PackageDep> for PackageId {
    fn from(dep: &PackageDep) -> Self {
        Self::new(dep.account.clone(), dep.package_name.clone())
    }
}

impl fmt::Display for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.account, self.package_name)
    }
}

/// The transitive dependencies of a package, in first-discovered order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DependencySet {
    deps: IndexMap<PackageId, PackageDep>,
}

impl DependencySet {
    pub fn len(&self) -> usize {
        self.deps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deps.is_empty()
    }

    pub fn contains(&self, id: &PackageId) -> bool {
        self.deps.contains_key(id)
    }

    /// Inserts `dep` unless its identity is already present. Returns whether it was new.
    pub fn insert(&mut self, dep: PackageDep) -> bool {
        let id = PackageId::from(&dep);
        if self.deps.contains_key(&id) {
            return false;
        }
        self.deps.insert(id, dep);
        true
    }

    pub fn ids(&self) -> impl Iterator<Item = &PackageId> {
        self.deps.keys()
    }
}

impl<'a> IntoIterator for &'a DependencySet {
    type IntoIter = indexmap::map::Iter<'a, PackageId, PackageDep>;
    type Item = (&'a PackageId, &'a PackageDep);

    fn into_iter(self) -> Self::IntoIter {
        self.deps.iter()
    }
}

/// Walks the dependency edges recorded in package registries.
///
/// Lookup failures are not fatal here: an account that cannot be read, has no registry or
/// does not publish the requested package contributes no edges, and the walk continues.
pub struct DependencyResolver<'a, R: ?Sized> {
    reader: &'a R,
}

impl<'a, R: ChainReader + ?Sized> DependencyResolver<'a, R> {
    pub fn new(reader: &'a R) -> Self {
        Self { reader }
    }

    /// Resolves every non-framework package reachable from `account::package_name`.
    pub async fn resolve(&self, account: &str, package_name: &str) -> DependencySet {
        let mut deps = DependencySet::default();
        self.resolve_into(account, package_name, &mut deps).await;
        deps
    }

    /// Adds the dependencies reachable from `account::package_name` to `deps`.
    ///
    /// Edges are visited depth first in declaration order and a package is inserted before
    /// its own edges are expanded, so cycles terminate and `deps` ends up in the same order
    /// a recursive walk would produce. The root itself is never added.
    pub async fn resolve_into(&self, account: &str, package_name: &str, deps: &mut DependencySet) {
        let root = PackageId::new(account, package_name);
        let mut stack = vec![self.declared_deps(&root).await.into_iter()];

        loop {
            let next = match stack.last_mut() {
                Some(edges) => edges.next(),
                None => break,
            };
            let Some(dep) = next else {
                stack.pop();
                continue;
            };

            if is_framework_address(&dep.account) {
                continue;
            }
            let id = PackageId::from(&dep);
            if id == root || !deps.insert(dep) {
                continue;
            }

            debug!(dependency = %id, "Discovered dependency");
            stack.push(self.declared_deps(&id).await.into_iter());
        }
    }

    /// The dependency edges of one package as recorded on chain, empty if they cannot be read.
    async fn declared_deps(&self, id: &PackageId) -> Vec<PackageDep> {
        let registry = match CachedPackageRegistry::fetch(self.reader, &id.account).await {
            Ok(registry) => registry,
            Err(error) => {
                warn!(
                    account = %id.account,
                    package = %id.package_name,
                    error = %error,
                    "Error collecting dependencies"
                );
                return vec![];
            },
        };

        match registry.get_package(&id.package_name) {
            Ok(package) => package.deps.clone(),
            Err(error) => {
                warn!(
                    account = %id.account,
                    package = %id.package_name,
                    error = %error,
                    "Error collecting dependencies"
                );
                vec![]
            },
        }
    }
}
