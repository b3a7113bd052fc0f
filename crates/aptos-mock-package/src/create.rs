// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

use crate::{
    error::{Error, Result},
    materialize::{create_dir_all, path_segment, PackageMaterializer, DEPS_DIR},
    reader::ChainReader,
    registry::CachedPackageRegistry,
    resolver::DependencyResolver,
};
use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};
use tracing::info;

/// Rebuilds `account::package_name` and all of its non-framework dependencies under
/// `<target_dir>/<package_name>`, returning that directory.
///
/// Once the package is known to exist, the root directory is removed. Dependencies are
/// written flat into `<root>/deps/<package>_<account>`, one after the other; the first
/// failure aborts the run and whatever was already written stays on disk.
pub async fn create_mock_package<R: ChainReader + ?Sized>(
    reader: &R,
    account: &str,
    package_name: &str,
    target_dir: &Path,
) -> Result<PathBuf> {
    let root_dir = target_dir.join(path_segment(package_name)?);
    info!(
        account = %account,
        package = %package_name,
        output = %root_dir.display(),
        "Creating mock package"
    );

    // Nothing is deleted for a package that is not published
    CachedPackageRegistry::fetch(reader, account)
        .await?
        .get_package(package_name)?;

    match tokio::fs::remove_dir_all(&root_dir).await {
        Ok(()) => info!(output = %root_dir.display(), "Removed previous output"),
        Err(err) if err.kind() == ErrorKind::NotFound => {},
        Err(err) => return Err(Error::io(&root_dir, err)),
    }

    let deps = DependencyResolver::new(reader)
        .resolve(account, package_name)
        .await;
    info!("Collected {} unique dependencies", deps.len());

    let materializer = PackageMaterializer::new(reader);
    materializer
        .materialize(account, package_name, &root_dir, true)
        .await?;

    let deps_dir = root_dir.join(DEPS_DIR);
    create_dir_all(&deps_dir).await?;
    for (id, dep) in &deps {
        let folder = id.qualified_name();
        materializer
            .materialize(
                &dep.account,
                &dep.package_name,
                &deps_dir.join(path_segment(&folder)?),
                false,
            )
            .await?;
    }

    info!("All operations completed successfully!");
    Ok(root_dir)
}
