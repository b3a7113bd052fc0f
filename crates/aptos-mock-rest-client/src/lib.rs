// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! A minimal, read-only client for the Aptos node REST API, covering what is needed to
//! rebuild a package skeleton from chain: the resources of an account and the ABI of a
//! single module.

#![forbid(unsafe_code)]

pub mod error;
pub mod types;

pub use error::RestError;
pub use reqwest::StatusCode;
pub use types::{
    AccountResource, ModuleMetadata, MoveFunction, MoveFunctionGenericTypeParam,
    MoveFunctionVisibility, MoveModule, MoveModuleBytecode, MoveStruct, MoveStructField,
    MoveStructGenericTypeParam, PackageDep, PackageMetadata, PackageRegistry, UpgradePolicy,
    PACKAGE_REGISTRY_TYPE, U64,
};

use reqwest::{header, Client as ReqwestClient, Response};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

pub type Result<T, E = RestError> = std::result::Result<T, E>;

const USER_AGENT: &str = concat!("aptos-mock-package / ", env!("CARGO_PKG_VERSION"));

#[derive(Clone, Debug)]
pub struct Client {
    inner: ReqwestClient,
    base_url: Url,
    bearer_token: Option<String>,
}

impl Client {
    pub fn new(mut base_url: Url) -> Self {
        // Url::join replaces the last segment unless the path ends with a slash
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Self {
            inner: ReqwestClient::new(),
            base_url,
            bearer_token: None,
        }
    }

    /// Attaches `Authorization: Bearer <token>` to every request. Empty tokens are ignored.
    pub fn with_bearer_token(mut self, token: Option<String>) -> Self {
        self.bearer_token = token.filter(|token| !token.is_empty());
        self
    }

    pub fn has_bearer_token(&self) -> bool {
        self.bearer_token.is_some()
    }

    pub async fn get_account_resources(&self, account: &str) -> Result<Vec<AccountResource>> {
        let url = self
            .base_url
            .join(&format!("v1/accounts/{}/resources", account))?;
        self.get(url).await
    }

    pub async fn get_account_module(
        &self,
        account: &str,
        module_name: &str,
    ) -> Result<MoveModuleBytecode> {
        let url = self
            .base_url
            .join(&format!("v1/accounts/{}/module/{}", account, module_name))?;
        self.get(url).await
    }

    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        debug!(url = %url, "GET");
        let mut request = self
            .inner
            .get(url.clone())
            .header(header::USER_AGENT, USER_AGENT);
        if let Some(token) = &self.bearer_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(RestError::request)?;
        self.json(url, response).await
    }

    async fn json<T: DeserializeOwned>(&self, url: Url, response: Response) -> Result<T> {
        let status = response.status();
        let body = response.text().await.map_err(RestError::request)?;
        if !status.is_success() {
            return Err(RestError::Http { status, body });
        }

        serde_json::from_str(&body).map_err(|source| RestError::Decode {
            url: url.to_string(),
            source,
        })
    }
}
