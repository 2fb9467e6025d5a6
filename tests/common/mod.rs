use std::process::{Child, Command, Stdio};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::json;

static SERVER: OnceLock<TestServer> = OnceLock::new();

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    #[allow(dead_code)]
    child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        // Spawn the already-built binary to keep start fast during tests
        // Assumes debug profile; adjust if you run tests with --release
        let mut cmd = Command::new("target/debug/gudang-api");
        cmd.env("GUDANG_API_PORT", port.to_string())
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        // Inherit environment so the server sees DATABASE_URL and JWT_SECRET
        // from .env (loaded by the server)
        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self { port, base_url, child })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                // Consider server ready on any non-404 response
                if resp.status() == StatusCode::OK
                    || resp.status() == StatusCode::SERVICE_UNAVAILABLE
                {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!(
            "server did not become ready on {} within {:?}",
            self.base_url,
            timeout
        )
    }
}

pub async fn ensure_server() -> Result<&'static TestServer> {
    let server = SERVER.get_or_init(|| TestServer::spawn().expect("failed to spawn server binary"));
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}

/// Database-backed tests are skipped when no database is configured
pub fn db_available() -> bool {
    std::env::var("DATABASE_URL").is_ok()
}

/// Generate a unique email so repeated runs never collide on the unique
/// index
#[allow(dead_code)]
pub fn unique_email(prefix: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("clock before epoch")
        .as_nanos();
    format!("{}-{}@example.com", prefix, nanos)
}

/// Register a fresh user and log in, returning the session token
#[allow(dead_code)]
pub async fn register_and_login(base_url: &str, prefix: &str) -> Result<String> {
    let client = reqwest::Client::new();
    let email = unique_email(prefix);

    let resp = client
        .post(format!("{}/auth/register", base_url))
        .json(&json!({ "nama": "Test User", "email": email, "password": "rahasia123" }))
        .send()
        .await?;
    anyhow::ensure!(
        resp.status() == StatusCode::CREATED,
        "registration failed with status {}",
        resp.status()
    );

    let resp = client
        .post(format!("{}/auth/login", base_url))
        .json(&json!({ "email": email, "password": "rahasia123" }))
        .send()
        .await?;
    anyhow::ensure!(
        resp.status() == StatusCode::OK,
        "login failed with status {}",
        resp.status()
    );

    let body: serde_json::Value = resp.json().await?;
    let token = body
        .get("token")
        .and_then(serde_json::Value::as_str)
        .context("login response missing token")?;

    Ok(token.to_string())
}
