//! gateway-probe: open one authenticated channel to a gateway and report it
//!
//! Loads `gateway-client.toml` (or defaults), applies CLI/env overrides,
//! connects once and closes. Useful for checking credentials and TLS setup.

use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use gateway_client::{Client, ClientConfig};

#[derive(Parser)]
#[command(name = "gateway-probe")]
#[command(about = "Check connectivity and credentials against a data platform gateway")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "gateway-client.toml")]
    config: String,

    /// `host` or `host:port` (overrides config file)
    #[arg(long, env = "GATEWAY_CONNECTION_STRING")]
    connection_string: Option<String>,

    /// Username (overrides config file)
    #[arg(short, long, env = "GATEWAY_USERNAME")]
    username: Option<String>,

    /// Password (overrides config file)
    #[arg(long, env = "GATEWAY_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// CA bundle used to verify the gateway (enables TLS)
    #[arg(long, env = "GATEWAY_CA_CERT")]
    ca_cert: Option<PathBuf>,

    /// Server name checked against the gateway certificate
    #[arg(long, env = "GATEWAY_TLS_SERVER_NAME")]
    tls_server_name: Option<String>,

    /// Bucket to reference once connected
    #[arg(long)]
    bucket: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("gateway_client=info".parse()?)
                .add_directive("gateway_probe=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    let mut config = if std::path::Path::new(&cli.config).exists() {
        info!("Loading config from {}", cli.config);
        ClientConfig::load(&cli.config)?
    } else {
        info!("Config file not found, using defaults");
        ClientConfig::default()
    };

    if let Some(connection_string) = cli.connection_string {
        config.connection_string = connection_string;
    }
    if let Some(username) = cli.username {
        config.username = username;
    }
    if let Some(password) = cli.password {
        config.password = password;
    }
    if let Some(ca_cert) = cli.ca_cert {
        config.ca_cert_path = Some(ca_cert);
    }
    if let Some(tls_server_name) = cli.tls_server_name {
        config.tls_server_name = tls_server_name;
    }

    let options = config.connect_options()?;
    let client = Client::connect(&config.connection_string, options).await?;

    for service in client.service_names() {
        info!(service, "Service stub bound");
    }
    if let Some(name) = cli.bucket {
        let bucket = client.bucket(name);
        info!(bucket = bucket.name(), "Bucket referenced");
    }

    client.close().await?;
    info!("Probe complete");
    Ok(())
}
