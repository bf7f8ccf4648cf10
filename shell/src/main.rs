//! SADL demo shell
//!
//! Drives the activation and decode workflow from a terminal, using the
//! in-process stand-in SDK.
//!
//! Usage:
//!   sadl-shell --latency-ms 800
//!   echo "import TOKEN" | sadl-shell --json

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use sadl_license::mock::MockLicensing;
use sadl_license::{DeviceFingerprint, LicensingClient};
use sadl_shell::{Command, Flow, Session, load_config};
use sadl_workflow::WorkflowCoordinator;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{Level, info, warn};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "sadl-shell")]
#[command(about = "SADL activation and licence decoding demo shell")]
struct Args {
    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Maximum audit log entries kept
    #[arg(long)]
    log_capacity: Option<usize>,

    /// Online activation timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Simulated activation latency of the stand-in SDK
    #[arg(long)]
    latency_ms: Option<u64>,

    /// Print snapshots as JSON
    #[arg(long)]
    json: bool,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::WARN };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let mut config = load_config(args.config.as_deref())?;
    if let Some(capacity) = args.log_capacity {
        config.workflow.log_capacity = capacity;
    }
    if let Some(secs) = args.timeout_secs {
        config.workflow.activation_timeout_ms = secs.saturating_mul(1000);
    }
    if let Some(latency) = args.latency_ms {
        config.simulated_latency_ms = latency;
    }

    let client: Arc<dyn LicensingClient> = Arc::new(
        MockLicensing::new()
            .requiring_init()
            .with_activation_delay(Duration::from_millis(config.simulated_latency_ms)),
    );
    let coordinator =
        WorkflowCoordinator::with_config(client, &DeviceFingerprint::generate(), config.workflow);
    info!("Workflow coordinator ready");

    println!("SADL demo shell (type `help`)");
    println!("Fingerprint: {}", coordinator.fingerprint());
    coordinator.check_status();

    let mut session = Session::new(coordinator).with_json(args.json);
    println!("{}", sadl_shell::render_snapshot(&session.coordinator().take_snapshot()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                warn!("Rejected input: {}", e);
                println!("{e}");
                continue;
            }
        };
        match session.execute(command).await {
            Flow::Continue(text) => {
                if !text.is_empty() {
                    println!("{text}");
                }
            }
            Flow::Quit(text) => {
                println!("{text}");
                return Ok(());
            }
        }
    }

    // stdin closed: let a running activation finish before exiting.
    let last = session.wait_pending().await;
    if !last.is_empty() {
        println!("{last}");
    }
    Ok(())
}
