use anyhow::{Context, Result};
use std::io::Read;

use amateur_postman::code_formatter::validate_json;
use amateur_postman::request_builder;
use amateur_postman::response_formatter::status_summary;
use amateur_postman::{send_request, ClientConfig, HttpClient, RequestDescription};

/// Read a request description from the file named on the command line, or
/// from stdin when no file (or `-`) is given.
fn read_description() -> Result<RequestDescription> {
    let raw = match std::env::args().nth(1).as_deref() {
        None | Some("-") => {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .context("Failed to read request from stdin")?;
            raw
        }
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read request file {}", path))?,
    };

    serde_json::from_str(&raw).context("Invalid request description")
}

/// Syntax error in a body that is declared as JSON, checked against the
/// content type the request will actually carry.
fn json_body_problem(description: &RequestDescription) -> Option<String> {
    let request = request_builder::build(description);
    let is_json = request
        .content_type
        .as_deref()
        .is_some_and(|ct| ct.to_ascii_lowercase().contains("json"));
    if !is_json {
        return None;
    }
    let body = String::from_utf8_lossy(request.body.as_deref()?);
    validate_json(&body).err()
}

fn main() -> Result<()> {
    env_logger::init();

    let mut description = read_description()?;
    description.url = description.url.trim().to_string();
    if description.url.is_empty() {
        anyhow::bail!("URL cannot be empty");
    }

    if let Some(e) = json_body_problem(&description) {
        log::warn!("Sending body anyway: {}", e);
    }

    let config = ClientConfig::load()?;
    let client = HttpClient::new(&config)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .context("Failed to initialize tokio runtime")?;

    let round_trip = runtime.block_on(send_request(&client, &description));

    eprintln!("{}", status_summary(&round_trip.response));
    print!("{}", round_trip.rendered);

    if round_trip.response.is_transport_failure() {
        std::process::exit(1);
    }
    Ok(())
}
