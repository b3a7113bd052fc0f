// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! JSON shapes served by `/v1/accounts/{account}/resources` and
//! `/v1/accounts/{account}/module/{module}`.

use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};

/// Type tag of the resource holding every package published at an account.
pub const PACKAGE_REGISTRY_TYPE: &str = "0x1::code::PackageRegistry";

/// A u64 which the API encodes as a JSON string. Plain numbers are accepted as well.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct U64(pub u64);

impl From<u64> for U64 {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for U64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for U64 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.to_string().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for U64 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            String(String),
            Number(u64),
        }

        match Repr::deserialize(deserializer)? {
            Repr::String(s) => u64::from_str(&s).map(U64).map_err(D::Error::custom),
            Repr::Number(n) => Ok(U64(n)),
        }
    }
}

/// One resource stored under an account.
///
/// Only the package registry is decoded; every other resource is kept as raw JSON.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(try_from = "RawResource")]
pub enum AccountResource {
    PackageRegistry(PackageRegistry),
    Other {
        resource_type: String,
        data: serde_json::Value,
    },
}

impl AccountResource {
    pub fn resource_type(&self) -> &str {
        match self {
            AccountResource::PackageRegistry(_) => PACKAGE_REGISTRY_TYPE,
            AccountResource::Other { resource_type, .. } => resource_type,
        }
    }

    pub fn as_package_registry(&self) -> Option<&PackageRegistry> {
        match self {
            AccountResource::PackageRegistry(registry) => Some(registry),
            AccountResource::Other { .. } => None,
        }
    }
}

#[derive(Deserialize)]
struct RawResource {
    #[serde(rename = "type")]
    resource_type: String,
    #[serde(default)]
    data: serde_json::Value,
}

impl TryFrom<RawResource> for AccountResource {
    type Error = serde_json::Error;

    fn try_from(raw: RawResource) -> Result<Self, Self::Error> {
        if raw.resource_type == PACKAGE_REGISTRY_TYPE {
            serde_json::from_value(raw.data).map(AccountResource::PackageRegistry)
        } else {
            Ok(AccountResource::Other {
                resource_type: raw.resource_type,
                data: raw.data,
            })
        }
    }
}

/// The package registry at the given address.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageRegistry {
    /// Packages installed at this address.
    #[serde(default)]
    pub packages: Vec<PackageMetadata>,
}

/// Metadata of a published package.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageMetadata {
    pub name: String,
    #[serde(default)]
    pub upgrade_policy: UpgradePolicy,
    #[serde(default)]
    pub upgrade_number: U64,
    #[serde(default)]
    pub source_digest: String,
    /// Hex encoded, gzipped manifest. Empty for packages published without metadata.
    #[serde(default)]
    pub manifest: String,
    #[serde(default)]
    pub modules: Vec<ModuleMetadata>,
    #[serde(default)]
    pub deps: Vec<PackageDep>,
}

impl PackageMetadata {
    pub fn module_names(&self) -> Vec<String> {
        self.modules.iter().map(|m| m.name.clone()).collect()
    }
}

/// A dependency edge as recorded on chain.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PackageDep {
    pub account: String,
    pub package_name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleMetadata {
    pub name: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub source_map: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradePolicy {
    pub policy: u8,
}

impl UpgradePolicy {
    pub fn arbitrary() -> Self {
        UpgradePolicy { policy: 0 }
    }

    pub fn compat() -> Self {
        UpgradePolicy { policy: 1 }
    }

    pub fn immutable() -> Self {
        UpgradePolicy { policy: 2 }
    }
}

impl fmt::Display for UpgradePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self.policy {
            0 => "arbitrary",
            1 => "compatible",
            _ => "immutable",
        })
    }
}

/// Response of the module endpoint. The ABI is absent for modules the node cannot describe.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveModuleBytecode {
    pub bytecode: String,
    #[serde(default)]
    pub abi: Option<MoveModule>,
}

/// Interface of a published module.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveModule {
    pub address: String,
    pub name: String,
    #[serde(default)]
    pub friends: Vec<String>,
    #[serde(default)]
    pub exposed_functions: Vec<MoveFunction>,
    #[serde(default)]
    pub structs: Vec<MoveStruct>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveFunctionVisibility {
    Private,
    Public,
    Friend,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveFunctionGenericTypeParam {
    #[serde(default)]
    pub constraints: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveFunction {
    pub name: String,
    pub visibility: MoveFunctionVisibility,
    pub is_entry: bool,
    #[serde(default)]
    pub is_view: bool,
    #[serde(default)]
    pub generic_type_params: Vec<MoveFunctionGenericTypeParam>,
    /// Fully qualified parameter types, e.g. `&signer` or `0x1::string::String`.
    #[serde(default)]
    pub params: Vec<String>,
    #[serde(rename = "return", default)]
    pub return_: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveStructGenericTypeParam {
    #[serde(default)]
    pub constraints: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveStructField {
    pub name: String,
    #[serde(rename = "type")]
    pub typ: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveStruct {
    pub name: String,
    #[serde(default)]
    pub is_native: bool,
    #[serde(default)]
    pub is_event: bool,
    #[serde(default)]
    pub abilities: Vec<String>,
    #[serde(default)]
    pub generic_type_params: Vec<MoveStructGenericTypeParam>,
    #[serde(default)]
    pub fields: Vec<MoveStructField>,
}
