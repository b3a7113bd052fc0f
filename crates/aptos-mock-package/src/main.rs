// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

use aptos_mock_package::Tool;
use clap::Parser;
use std::process::exit;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match Tool::parse().execute().await {
        Ok(inner) => println!("{}", inner),
        Err(inner) => {
            eprintln!("{:#}", inner);
            exit(1);
        },
    }
}
