use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tokio::sync::broadcast;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use pnl_dashboard::api;
use pnl_dashboard::config::Settings;
use pnl_dashboard::exchange;
use pnl_dashboard::keystore::{self, Credentials};
use pnl_dashboard::service::{new_dashboard_state, PollService};
use pnl_dashboard::stats::{self, PnlReport};

#[derive(Parser)]
#[command(name = "pnl-dashboard")]
#[command(about = "Daily PnL dashboard for a BingX trading account")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the poller and the web dashboard (default)
    Serve {
        /// Serve the built-in sample dataset instead of calling the exchange
        #[arg(long)]
        synthetic: bool,

        /// Override the configured HTTP port
        #[arg(long)]
        port: Option<u16>,

        /// Override the configured poll interval
        #[arg(long)]
        interval_secs: Option<u64>,
    },
    /// Fetch once and print a summary table
    Report {
        /// Use the built-in sample dataset
        #[arg(long)]
        synthetic: bool,
    },
    /// Manage stored API credentials
    Keys {
        #[command(subcommand)]
        command: KeyCommands,
    },
}

#[derive(Subcommand)]
enum KeyCommands {
    /// Store the API key pair in the key file, prompting for missing values
    Set {
        #[arg(long)]
        api_key: Option<String>,

        #[arg(long)]
        secret_key: Option<String>,
    },
    /// Print the stored API key with the secret masked
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_application();

    let cli = Cli::parse();
    match cli.command.unwrap_or(Commands::Serve {
        synthetic: false,
        port: None,
        interval_secs: None,
    }) {
        Commands::Serve {
            synthetic,
            port,
            interval_secs,
        } => run_serve(synthetic, port, interval_secs).await,
        Commands::Report { synthetic } => run_report(synthetic).await,
        Commands::Keys { command } => run_keys(command),
    }
}

fn init_application() {
    // Load environment variables before the filter is read
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("pnl_dashboard=info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();

    info!("🔧 Application environment initialized");
}

async fn run_serve(
    synthetic: bool,
    port: Option<u16>,
    interval_secs: Option<u64>,
) -> Result<()> {
    info!("🚀 Starting PnL dashboard");

    let mut settings = Settings::new().context("Failed to load configuration")?;
    if let Some(port) = port {
        settings.server.port = port;
    }
    if let Some(secs) = interval_secs {
        settings.poll.interval_secs = secs;
    }
    info!("📋 Configuration loaded successfully");

    let source = exchange::create_source(synthetic, &settings.exchange)
        .context("Failed to create trade source")?;
    info!("📡 Trade source: {}", source.name());

    let state = new_dashboard_state(source.name());
    let service = Arc::new(
        PollService::new(
            source,
            state.clone(),
            Duration::from_secs(settings.poll.interval_secs),
        )
        .context("Invalid poll configuration")?,
    );

    // Setup signal forwarding to service
    let service_shutdown_tx = service.get_shutdown_tx();
    tokio::spawn(async move {
        signal::ctrl_c().await.expect("Failed to listen for ctrl-c");
        println!("\nReceived Ctrl+C signal, forwarding to service...");
        info!("Received Ctrl+C signal, forwarding to service");
        let _ = service_shutdown_tx.send(());
    });

    let poller = service.clone();
    let poll_handle = tokio::spawn(async move { poller.start().await });

    let app = api::create_router(state).layer(
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    );

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("🌐 Dashboard listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown(service.get_shutdown_tx()))
        .await
        .context("Server error")?;

    poll_handle.await?;
    info!("✅ Application stopped gracefully");
    Ok(())
}

async fn wait_for_shutdown(shutdown_tx: broadcast::Sender<()>) {
    let mut rx = shutdown_tx.subscribe();
    let _ = rx.recv().await;
}

async fn run_report(synthetic: bool) -> Result<()> {
    let settings = Settings::new().context("Failed to load configuration")?;
    let source = exchange::create_source(synthetic, &settings.exchange)
        .context("Failed to create trade source")?;

    let fills = source
        .fetch_fills()
        .await
        .with_context(|| format!("Failed to fetch trade history from '{}'", source.name()))?;
    let report = stats::aggregate(&fills);
    display_report(&report, source.name());
    Ok(())
}

fn display_report(report: &PnlReport, source: &str) {
    let summary = &report.summary;

    println!("\n{}", "=".repeat(60));
    println!("📊 DAILY PNL SUMMARY ({})", source);
    println!("{}", "=".repeat(60));

    if summary.total_trades == 0 {
        println!("No trade data.");
        return;
    }

    println!("Total Profit: {:.2} USD", summary.total_profit);
    println!("Total Fees: {:.2} USD", summary.total_fees);
    println!("Total Trades: {}", summary.total_trades);
    match summary.win_rate_percent() {
        Some(rate) => println!(
            "Win Rate: {:.2}% ({} of {})",
            rate, summary.winning_trades, summary.total_trades
        ),
        None => println!("Win Rate: no data"),
    }
    match summary.projected_monthly_profit {
        Some(projected) => println!(
            "Projected Monthly Profit: {:.2} USD (avg of last {} trading days x 30)",
            projected, summary.projection_window_days
        ),
        None => println!("Projected Monthly Profit: no data"),
    }

    println!("\n{}", "-".repeat(60));
    println!("LAST {} TRADING DAYS", summary.recent_days.len());
    println!("{}", "-".repeat(60));
    println!("{:<12} {:>12} {:>10}", "Date", "Profit", "Fees");
    for day in summary.recent_days.iter().rev() {
        println!(
            "{:<12} {:>12} {:>10}",
            day.date.to_string(),
            format!("{:.2}", day.profit),
            format!("{:.2}", day.fees)
        );
    }
}

fn run_keys(command: KeyCommands) -> Result<()> {
    let settings = Settings::new().context("Failed to load configuration")?;
    let key_path = Path::new(&settings.exchange.key_file);

    match command {
        KeyCommands::Set {
            api_key,
            secret_key,
        } => {
            let api_key = match api_key {
                Some(key) => key,
                None => prompt("API key: ")?,
            };
            let secret_key = match secret_key {
                Some(key) => key,
                None => prompt("Secret key: ")?,
            };
            if api_key.is_empty() || secret_key.is_empty() {
                anyhow::bail!("API key and secret key must not be empty");
            }

            keystore::save(
                key_path,
                &Credentials {
                    api_key,
                    secret_key,
                },
            )?;
            println!("✅ Credentials stored in {}", key_path.display());
        }
        KeyCommands::Show => {
            let creds = keystore::load_file(key_path)?;
            println!("api_key: {}", creds.api_key);
            println!("secret_key: {}", mask(&creds.secret_key));
        }
    }
    Ok(())
}

fn prompt(label: &str) -> Result<String> {
    print!("{}", label);
    io::stdout().flush()?;
    let mut value = String::new();
    io::stdin().read_line(&mut value)?;
    Ok(value.trim().to_string())
}

fn mask(secret: &str) -> String {
    if secret.chars().count() <= 4 {
        return "****".to_string();
    }
    let prefix: String = secret.chars().take(4).collect();
    format!("{}****", prefix)
}
