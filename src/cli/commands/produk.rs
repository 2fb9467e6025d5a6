use clap::Subcommand;
use serde_json::{json, Map, Value};

use crate::cli::config::api_url;
use crate::cli::utils::{api_error, confirm, output_success, require_credentials};
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum ProdukCommands {
    #[command(about = "List all products")]
    List,

    #[command(about = "Show a single product")]
    Show {
        #[arg(help = "Product id")]
        id: i32,
    },

    #[command(about = "Add a product")]
    Add {
        #[arg(help = "Product name")]
        nama: String,
        #[arg(long, help = "Stock count")]
        stok: i32,
        #[arg(long, help = "Image URL")]
        link_gambar: Option<String>,
    },

    #[command(about = "Update a product")]
    Update {
        #[arg(help = "Product id")]
        id: i32,
        #[arg(long, help = "Product name")]
        nama: String,
        #[arg(long, help = "Stock count")]
        stok: i32,
        #[arg(long, help = "Image URL")]
        link_gambar: Option<String>,
    },

    #[command(about = "Delete a product")]
    Delete {
        #[arg(help = "Product id")]
        id: i32,
        #[arg(long, help = "Skip the confirmation prompt")]
        yes: bool,
    },
}

pub async fn handle(cmd: ProdukCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        ProdukCommands::List => list(output_format).await,
        ProdukCommands::Show { id } => show(id, output_format).await,
        ProdukCommands::Add { nama, stok, link_gambar } => {
            add(nama, stok, link_gambar, output_format).await
        }
        ProdukCommands::Update { id, nama, stok, link_gambar } => {
            update(id, nama, stok, link_gambar, output_format).await
        }
        ProdukCommands::Delete { id, yes } => delete(id, yes, output_format).await,
    }
}

fn payload(nama: &str, stok: i32, link_gambar: Option<&str>) -> Value {
    let mut body = Map::new();
    body.insert("nama".to_string(), json!(nama));
    body.insert("stok".to_string(), json!(stok));
    if let Some(url) = link_gambar {
        body.insert("link_gambar".to_string(), json!(url));
    }
    Value::Object(body)
}

fn print_produk_line(produk: &Value) {
    println!(
        "{:>4}  {}  (stok: {}){}",
        produk.get("id_barang").and_then(Value::as_i64).unwrap_or_default(),
        produk.get("nama").and_then(Value::as_str).unwrap_or("-"),
        produk.get("stok").and_then(Value::as_i64).unwrap_or_default(),
        produk
            .get("link_gambar")
            .and_then(Value::as_str)
            .map(|url| format!("  {}", url))
            .unwrap_or_default(),
    );
}

async fn list(output_format: OutputFormat) -> anyhow::Result<()> {
    let credentials = require_credentials()?;

    let client = reqwest::Client::new();
    let response = client
        .get(format!("{}/produk", api_url()))
        .bearer_auth(&credentials.token)
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(api_error(response).await);
    }

    let produk: Vec<Value> = response.json().await?;

    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&produk)?);
        }
        OutputFormat::Text => {
            if produk.is_empty() {
                println!("No products");
                return Ok(());
            }
            for item in &produk {
                print_produk_line(item);
            }
        }
    }
    Ok(())
}

async fn show(id: i32, output_format: OutputFormat) -> anyhow::Result<()> {
    let credentials = require_credentials()?;

    let client = reqwest::Client::new();
    let response = client
        .get(format!("{}/produk/{}", api_url(), id))
        .bearer_auth(&credentials.token)
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(api_error(response).await);
    }

    let produk: Value = response.json().await?;

    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&produk)?),
        OutputFormat::Text => print_produk_line(&produk),
    }
    Ok(())
}

async fn add(
    nama: String,
    stok: i32,
    link_gambar: Option<String>,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let credentials = require_credentials()?;

    let client = reqwest::Client::new();
    let response = client
        .post(format!("{}/produk", api_url()))
        .bearer_auth(&credentials.token)
        .json(&payload(&nama, stok, link_gambar.as_deref()))
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(api_error(response).await);
    }

    let body: Value = response.json().await?;
    let message = body
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or("Product added successfully");
    let product_id = body.get("productId").cloned().unwrap_or(Value::Null);

    output_success(&output_format, message, Some(json!({ "productId": product_id })))
}

async fn update(
    id: i32,
    nama: String,
    stok: i32,
    link_gambar: Option<String>,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let credentials = require_credentials()?;

    let client = reqwest::Client::new();
    let response = client
        .put(format!("{}/produk/{}", api_url(), id))
        .bearer_auth(&credentials.token)
        .json(&payload(&nama, stok, link_gambar.as_deref()))
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(api_error(response).await);
    }

    let body: Value = response.json().await?;
    let message = body
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or("Product updated successfully");

    output_success(&output_format, message, None)
}

async fn delete(id: i32, yes: bool, output_format: OutputFormat) -> anyhow::Result<()> {
    let credentials = require_credentials()?;

    // Deletion always asks first unless --yes was given
    if !yes && !confirm(&format!("Delete produk {}? This cannot be undone.", id))? {
        output_success(&output_format, "Cancelled", None)?;
        return Ok(());
    }

    let client = reqwest::Client::new();
    let response = client
        .delete(format!("{}/produk/{}", api_url(), id))
        .bearer_auth(&credentials.token)
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(api_error(response).await);
    }

    let body: Value = response.json().await?;
    let message = body
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or("Product deleted successfully");

    output_success(&output_format, message, None)
}
