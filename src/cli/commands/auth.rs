use anyhow::bail;
use clap::Subcommand;
use serde_json::{json, Value};

use crate::cli::config::{api_url, delete_credentials, load_credentials, save_credentials, Credentials};
use crate::cli::utils::{api_error, output_success, prompt, require_credentials};
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Register a new user account")]
    Register {
        #[arg(help = "Display name")]
        nama: String,
        #[arg(help = "Email address")]
        email: String,
        #[arg(long, help = "Password (will prompt if not provided)")]
        password: Option<String>,
    },

    #[command(about = "Login and store the session token")]
    Login {
        #[arg(help = "Email address")]
        email: String,
        #[arg(long, help = "Password (will prompt if not provided)")]
        password: Option<String>,
    },

    #[command(about = "Logout and discard the stored session token")]
    Logout,

    #[command(about = "Show current authentication status")]
    Status,

    #[command(about = "List registered users")]
    Users,
}

pub async fn handle(cmd: AuthCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        AuthCommands::Register { nama, email, password } => {
            register(nama, email, password, output_format).await
        }
        AuthCommands::Login { email, password } => login(email, password, output_format).await,
        AuthCommands::Logout => logout(output_format),
        AuthCommands::Status => status(output_format),
        AuthCommands::Users => users(output_format).await,
    }
}

async fn register(
    nama: String,
    email: String,
    password: Option<String>,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    // A stored session means we are "logged in"; mirror the page redirect
    // away from the auth forms.
    if let Some(credentials) = load_credentials()? {
        bail!(
            "Already logged in as {}. Run `gudang auth logout` first.",
            credentials.email
        );
    }

    let password = match password {
        Some(p) => p,
        None => prompt("Password")?,
    };

    let client = reqwest::Client::new();
    let response = client
        .post(format!("{}/auth/register", api_url()))
        .json(&json!({ "nama": nama, "email": email, "password": password }))
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(api_error(response).await);
    }

    let body: Value = response.json().await?;
    let message = body
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or("User registered successfully");

    output_success(&output_format, message, Some(json!({ "email": email })))
}

async fn login(
    email: String,
    password: Option<String>,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    if let Some(credentials) = load_credentials()? {
        bail!(
            "Already logged in as {}. Run `gudang auth logout` first.",
            credentials.email
        );
    }

    let password = match password {
        Some(p) => p,
        None => prompt("Password")?,
    };

    let client = reqwest::Client::new();
    let response = client
        .post(format!("{}/auth/login", api_url()))
        .json(&json!({ "email": email, "password": password }))
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(api_error(response).await);
    }

    let body: Value = response.json().await?;
    let token = body
        .get("token")
        .and_then(Value::as_str)
        .ok_or_else(|| anyhow::anyhow!("Login response did not include a token"))?;

    save_credentials(&Credentials::new(token.to_string(), email.clone()))?;

    output_success(
        &output_format,
        &format!("Logged in as {}", email),
        Some(json!({ "email": email })),
    )
}

fn logout(output_format: OutputFormat) -> anyhow::Result<()> {
    if delete_credentials()? {
        output_success(&output_format, "Logged out", None)
    } else {
        output_success(&output_format, "No active session", None)
    }
}

fn status(output_format: OutputFormat) -> anyhow::Result<()> {
    // Derived purely from local token presence, never revalidated against
    // the server.
    match load_credentials()? {
        Some(credentials) => output_success(
            &output_format,
            &format!("Logged in as {}", credentials.email),
            Some(json!({
                "email": credentials.email,
                "saved_at": credentials.saved_at,
            })),
        ),
        None => output_success(&output_format, "Not logged in", None),
    }
}

async fn users(output_format: OutputFormat) -> anyhow::Result<()> {
    let credentials = require_credentials()?;

    let client = reqwest::Client::new();
    let response = client
        .get(format!("{}/auth/users", api_url()))
        .bearer_auth(&credentials.token)
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(api_error(response).await);
    }

    let users: Vec<Value> = response.json().await?;

    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&users)?);
        }
        OutputFormat::Text => {
            if users.is_empty() {
                println!("No users registered");
                return Ok(());
            }
            for user in &users {
                println!(
                    "{:>4}  {}  <{}>",
                    user.get("id").and_then(Value::as_i64).unwrap_or_default(),
                    user.get("nama").and_then(Value::as_str).unwrap_or("-"),
                    user.get("email").and_then(Value::as_str).unwrap_or("-"),
                );
            }
        }
    }
    Ok(())
}
