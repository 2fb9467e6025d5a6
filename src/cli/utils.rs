use std::io::{BufRead, Write};

use anyhow::anyhow;
use serde_json::{json, Value};

use crate::cli::config::{load_credentials, Credentials};
use crate::cli::OutputFormat;

/// Output a success message in the appropriate format
pub fn output_success(
    output_format: &OutputFormat,
    message: &str,
    data: Option<Value>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let Some(Value::Object(extra)) = data {
                response.as_object_mut().unwrap().extend(extra);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Require stored credentials before a protected call. Mirrors the page
/// redirect for unauthenticated visitors.
pub fn require_credentials() -> anyhow::Result<Credentials> {
    load_credentials()?
        .ok_or_else(|| anyhow!("Not logged in. Run `gudang auth login` first."))
}

/// Turn a failed API response into an error carrying the server's own
/// message, surfaced verbatim.
pub async fn api_error(response: reqwest::Response) -> anyhow::Error {
    let status = response.status();
    let message = response
        .json::<Value>()
        .await
        .ok()
        .and_then(|body| {
            body.get("message")
                .and_then(Value::as_str)
                .map(String::from)
        })
        .unwrap_or_else(|| format!("Request failed with status {}", status));

    anyhow!(message)
}

/// Prompt for a line of input on stderr, reading from stdin
pub fn prompt(label: &str) -> anyhow::Result<String> {
    eprint!("{}: ", label);
    std::io::stderr().flush()?;

    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Ask for explicit confirmation. Anything other than y/yes declines.
pub fn confirm(question: &str) -> anyhow::Result<bool> {
    let answer = prompt(&format!("{} [y/N]", question))?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
