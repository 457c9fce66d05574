//! Decode an HTTP error response into its structured form and print it as JSON.
//!
//! Usage:
//!   decode-error <path>             GET <path> from PROBE_ADDRESS and decode the reply
//!   decode-error --stdin <status>   decode a body read from stdin
//!   decode-error --schema           print the OpenAPI schemas of the error body

use anyhow::{bail, Context, Result};
use serde_json::json;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use service_kit::config::Config;
use service_kit::errors::{
    build_response_entity, from_response, read_api_exception, read_body, ApiException,
    ErrorApiDoc, ReceivedResponse,
};
use utoipa::OpenApi;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,service_kit=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env().context("Failed to load configuration")?;
    let args: Vec<String> = std::env::args().skip(1).collect();

    let exception = match args.as_slice() {
        [flag] if flag == "--schema" => {
            println!("{}", ErrorApiDoc::openapi().to_pretty_json()?);
            return Ok(());
        }
        [flag, status] if flag == "--stdin" => {
            let status: u16 = status.parse().context("status must be a number")?;
            decode_stdin(status, config.body_limit_bytes)
        }
        [path] => match probe(&config, path).await? {
            Some(exception) => exception,
            None => return Ok(()),
        },
        _ => bail!("usage: decode-error <path> | --stdin <status> | --schema"),
    };

    let output = json!({
        "status": exception.status_code(),
        "entity": build_response_entity(&exception),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

fn decode_stdin(status: u16, body_limit: usize) -> ApiException {
    let body = read_body(std::io::stdin().lock(), body_limit);
    from_response(ReceivedResponse::new(status, body))
}

async fn probe(config: &Config, path: &str) -> Result<Option<ApiException>> {
    let url = config.probe_url(path);
    info!("Probing {}", url);

    let response = reqwest::get(&url)
        .await
        .with_context(|| format!("Failed to send request to {}", url))?;

    if response.status().is_success() {
        info!(status = response.status().as_u16(), "Request succeeded, nothing to decode");
        return Ok(None);
    }

    Ok(Some(
        read_api_exception(response, config.body_limit_bytes).await,
    ))
}
