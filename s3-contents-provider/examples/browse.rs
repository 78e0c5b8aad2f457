/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */
use std::error::Error;

use clap::Parser;
use s3_contents_provider::{Config, CredentialSet, SessionController, SessionView};

type BoxError = Box<dyn Error + Send + Sync>;

#[derive(Debug, Clone, clap::Parser)]
#[command(name = "browse")]
#[command(about = "Authenticates against a store and lists a directory path.")]
pub struct Args {
    /// Base URL of the credential service
    #[arg(long)]
    auth_endpoint: String,

    /// Bucket presented as the tree root
    #[arg(long)]
    bucket: String,

    /// Store endpoint URL (submitted with the credentials)
    #[arg(long)]
    endpoint_url: String,

    /// Access key id
    #[arg(long)]
    access_key: String,

    /// Secret access key
    #[arg(long)]
    secret_key: String,

    /// Directory path to list (defaults to the root)
    #[arg(default_value = "")]
    path: String,
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let config = Config::builder()
        .bucket(&args.bucket)
        .auth_endpoint(&args.auth_endpoint)
        .build();
    let controller = SessionController::new(config)?;

    if !controller.check_authenticated().await? {
        let credentials =
            CredentialSet::new(&args.endpoint_url, &args.access_key, &args.secret_key);
        controller.submit_credentials(credentials).await?;
    }
    if controller.view() != SessionView::FileBrowser {
        return Err("authentication did not complete".into());
    }

    let client = controller.contents();
    let listing = client.list().path(&args.path).send().await?;
    for entry in listing.entries() {
        let marker = if entry.is_dir() { "/" } else { "" };
        match entry.size() {
            Some(size) => println!("{}{marker}\t{size}", entry.path()),
            None => println!("{}{marker}", entry.path()),
        }
    }

    Ok(())
}
