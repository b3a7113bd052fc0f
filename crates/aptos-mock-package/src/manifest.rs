// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! Renders `Move.toml` for a rebuilt package.

use crate::{
    materialize::DEPS_DIR,
    resolver::{is_framework_address, qualified_name, PackageId},
};
use aptos_mock_rest_client::{PackageDep, PackageMetadata};

pub const FRAMEWORK_GIT_URL: &str = "https://github.com/aptos-labs/aptos-framework.git";
pub const FRAMEWORK_REV: &str = "mainnet";
pub const DEFAULT_FRAMEWORK_SUBDIR: &str = "aptos-framework";

/// Subdirectory of the framework repository holding a framework package.
///
/// Unknown framework package names fall back to [`DEFAULT_FRAMEWORK_SUBDIR`].
pub fn framework_subdir(package_name: &str) -> &'static str {
    match package_name {
        "AptosStdlib" => "aptos-stdlib",
        "AptosFramework" => "aptos-framework",
        "AptosTokenObjects" => "aptos-token-objects",
        "AptosToken" => "aptos-token",
        "MoveStdlib" => "move-stdlib",
        _ => DEFAULT_FRAMEWORK_SUBDIR,
    }
}

/// One line of the `[dependencies]` section.
///
/// Framework packages point at the framework repository. Everything else is a local path:
/// the root package finds its dependencies under `deps/`, and a dependency finds its
/// siblings one directory up.
pub fn render_dependency(dep: &PackageDep, is_root: bool) -> String {
    if is_framework_address(&dep.account) {
        return format!(
            "{} = {{ git = \"{}\", rev = \"{}\", subdir = \"{}\"}}",
            dep.package_name,
            FRAMEWORK_GIT_URL,
            FRAMEWORK_REV,
            framework_subdir(&dep.package_name)
        );
    }

    let folder = qualified_name(&dep.package_name, &dep.account);
    if is_root {
        format!("{} = {{ local = \"{}/{}\" }}", dep.package_name, DEPS_DIR, folder)
    } else {
        format!("{} = {{ local = \"../{}\" }}", dep.package_name, folder)
    }
}

pub fn render_manifest(package: &PackageId, metadata: &PackageMetadata, is_root: bool) -> String {
    let deps: Vec<String> = metadata
        .deps
        .iter()
        .map(|dep| render_dependency(dep, is_root))
        .collect();

    format!(
        "[package]\nname = \"{}\"\nversion = \"1.0.0\"\nauthors = []\n\n[dev-addresses]\n\n[dependencies]\n{}\n\n[dev-dependencies]",
        package.package_name,
        deps.join("\n")
    )
}
