use anyhow::Result;
use clap::{Parser, Subcommand};
use etims_client::{EtimsClient, Operation};
use etims_config::Config;
use etims_schema::{SchemaName, Validator};
use etims_types::EtimsError;
use serde_json::Value;
use std::io::Read as _;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "etims", about = "etims — KRA eTIMS OSCU API client")]
struct Cli {
    /// Path to a YAML or JSON configuration file.
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Obtain an access token (served from cache when still valid).
    Token {
        /// Always request a new token.
        #[arg(long)]
        force: bool,
    },
    /// Drop the cached access token.
    Forget,
    /// Show the cached token state for the configured environment.
    Status,
    /// List the supported operations and the schema each one uses.
    Operations,
    /// Validate a JSON payload without sending it.
    Validate {
        /// Schema name (e.g. saveItem, saveTrnsSalesOsdc).
        schema: String,
        /// JSON payload file, or `-` for stdin.
        #[arg(default_value = "-")]
        payload: PathBuf,
    },
    /// Validate and send a JSON payload.
    Call {
        /// Operation name (e.g. selectCodeList, saveItem).
        operation: String,
        /// JSON payload file, or `-` for stdin.
        #[arg(default_value = "-")]
        payload: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("etims=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Token { force } => cmd_token(config_path, force).await,
        Commands::Forget => cmd_forget(config_path).await,
        Commands::Status => cmd_status(config_path).await,
        Commands::Operations => {
            cmd_operations();
            Ok(())
        }
        Commands::Validate { schema, payload } => cmd_validate(&schema, &payload),
        Commands::Call { operation, payload } => cmd_call(config_path, &operation, &payload).await,
    }
}

async fn cmd_token(config_path: Option<&Path>, force: bool) -> Result<()> {
    let client = open_client(config_path)?;
    client
        .auth()
        .token(force)
        .await
        .map_err(|e| anyhow::anyhow!("token request failed: {e}"))?;
    let remaining = client
        .auth()
        .cached()
        .await
        .map_or(0, |t| t.remaining_secs());
    eprintln!(
        "{}: token ready, valid for {remaining}s",
        client.auth().environment()
    );
    Ok(())
}

async fn cmd_forget(config_path: Option<&Path>) -> Result<()> {
    let client = open_client(config_path)?;
    client.auth().forget().await;
    eprintln!("{}: cached token removed", client.auth().environment());
    Ok(())
}

async fn cmd_status(config_path: Option<&Path>) -> Result<()> {
    let client = open_client(config_path)?;
    let env = client.auth().environment();
    let status = match client.auth().cached().await {
        Some(t) if !t.is_expired() => format!("token valid for {}s", t.remaining_secs()),
        Some(_) => "token expired".to_string(),
        None => "no cached token".to_string(),
    };
    println!("{env}: {status}");
    Ok(())
}

fn cmd_operations() {
    for op in Operation::all() {
        println!("{:<30} {}", op.name(), op.schema());
    }
}

fn cmd_validate(schema: &str, payload: &Path) -> Result<()> {
    let name: SchemaName = schema.parse()?;
    let data = read_payload(payload)?;
    match Validator::new().validate(data, name) {
        Ok(_) => {
            eprintln!("payload is valid for {name}");
            Ok(())
        }
        Err(EtimsError::Validation(errors)) => {
            for (path, message) in errors.iter() {
                println!("{path}: {message}");
            }
            anyhow::bail!("{} field(s) failed validation", errors.len())
        }
        Err(e) => Err(e.into()),
    }
}

async fn cmd_call(config_path: Option<&Path>, operation: &str, payload: &Path) -> Result<()> {
    let client = open_client(config_path)?;
    let data = read_payload(payload)?;
    let resp = client
        .call_named(operation, data)
        .await
        .map_err(|e| anyhow::anyhow!("{operation} failed: {e}"))?;
    if resp.has_warning() {
        tracing::warn!(operation, "accepted with warning");
    }
    println!("{}", serde_json::to_string_pretty(&resp.body)?);
    Ok(())
}

fn open_client(config_path: Option<&Path>) -> Result<EtimsClient> {
    let config = Config::load(config_path).map_err(|e| anyhow::anyhow!("config error: {e}"))?;
    Ok(EtimsClient::from_config(&config)?)
}

fn read_payload(path: &Path) -> Result<Value> {
    let text = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("cannot read {}: {e}", path.display()))?
    };
    Ok(serde_json::from_str(&text)?)
}
