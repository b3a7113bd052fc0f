// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! Rebuilds a Move package skeleton from the on-chain package registry and module ABIs of
//! an account.
//!
//! The dependency graph recorded in the registry is flattened first, then the root package
//! and every dependency are written with stub sources and a `Move.toml` that points at the
//! rebuilt dependencies, or at the framework repository for framework packages.

#![forbid(unsafe_code)]

pub mod cli;
pub mod create;
pub mod error;
pub mod manifest;
pub mod materialize;
pub mod reader;
pub mod registry;
pub mod render;
pub mod resolver;

#[cfg(test)]
mod mock;

pub use cli::Tool;
pub use create::create_mock_package;
pub use error::{Error, Result};
pub use reader::ChainReader;
pub use resolver::{DependencyResolver, DependencySet, PackageId};
