// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

use crate::{
    error::{Error, Result},
    manifest::render_manifest,
    reader::ChainReader,
    registry::CachedPackageRegistry,
    render::render_module,
    resolver::PackageId,
};
use std::path::{Component, Path};
use tracing::{debug, error, info};

pub const SOURCES_DIR: &str = "sources";
pub const DEPS_DIR: &str = "deps";
pub const MANIFEST_FILE: &str = "Move.toml";
pub const MOVE_EXTENSION: &str = "move";

/// Writes one package to disk:
///
/// ```text
/// <output_dir>/
///   sources/<module>.move
///   Move.toml
/// ```
///
/// Unlike dependency resolution, every failure here is fatal for the package. The output
/// directory is not cleared first, so files from an earlier run that no longer correspond
/// to a module are left in place.
pub struct PackageMaterializer<'a, R: ?Sized> {
    reader: &'a R,
}

impl<'a, R: ChainReader + ?Sized> PackageMaterializer<'a, R> {
    pub fn new(reader: &'a R) -> Self {
        Self { reader }
    }

    pub async fn materialize(
        &self,
        account: &str,
        package_name: &str,
        output_dir: &Path,
        is_root: bool,
    ) -> Result<()> {
        let package = PackageId::new(account, package_name);
        info!(
            package = %package.qualified_name(),
            account = %account,
            "Downloading package"
        );

        self.write_package(&package, output_dir, is_root)
            .await
            .inspect_err(|err| {
                error!(
                    package = %package.package_name,
                    account = %package.account,
                    error = %err,
                    "Error downloading package"
                )
            })
    }

    async fn write_package(&self, package: &PackageId, output_dir: &Path, is_root: bool) -> Result<()> {
        let registry = CachedPackageRegistry::fetch(self.reader, &package.account).await?;
        let metadata = registry.get_package(&package.package_name)?;
        info!(
            package = %package,
            upgrade_policy = %metadata.upgrade_policy,
            upgrade_number = %metadata.upgrade_number,
            modules = metadata.modules.len(),
            "Found package"
        );

        for module in &metadata.modules {
            path_segment(&module.name)?;
        }

        create_dir_all(output_dir).await?;
        let sources_dir = output_dir.join(SOURCES_DIR);
        create_dir_all(&sources_dir).await?;

        for module in &metadata.modules {
            let abi = self.reader.module_abi(&package.account, &module.name).await?;
            let path = sources_dir.join(format!("{}.{}", module.name, MOVE_EXTENSION));
            write_file(&path, render_module(&abi)).await?;
            debug!(path = %path.display(), "Created module");
        }

        let manifest_path = output_dir.join(MANIFEST_FILE);
        write_file(&manifest_path, render_manifest(package, metadata, is_root)).await?;
        debug!(path = %manifest_path.display(), "Created manifest");
        Ok(())
    }
}

/// Checks that a name read from chain is a single plain path component, so joining it
/// onto a directory can never leave that directory.
pub(crate) fn path_segment(name: &str) -> Result<&str> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(segment)), None) if segment == name => Ok(name),
        _ => Err(Error::InvalidPathSegment {
            name: name.to_string(),
        }),
    }
}

pub(crate) async fn create_dir_all(path: &Path) -> Result<()> {
    tokio::fs::create_dir_all(path)
        .await
        .map_err(|err| Error::io(path, err))
}

async fn write_file(path: &Path, contents: String) -> Result<()> {
    tokio::fs::write(path, contents)
        .await
        .map_err(|err| Error::io(path, err))
}
