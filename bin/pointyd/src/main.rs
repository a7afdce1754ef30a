//! ---
//! pointy_section: "01-core-functionality"
//! pointy_subsection: "binary"
//! pointy_type: "source"
//! pointy_scope: "code"
//! pointy_description: "Binary entrypoint for the pointy daemon."
//! pointy_version: "v0.1.0"
//! pointy_owner: "tbd"
//! ---
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::{ArgAction, Parser, Subcommand};
use pointy_common::{init_cli_tracing, init_tracing, AppConfig, VersionInfo};
use pointy_core::{PageKind, PageSession, ViewRequest};
use pointy_rt::{ManualClock, RateLimiter, RuntimeClock};
use pointy_views::{SortField, SortState};
use tokio::signal;
use tracing::info;

#[derive(Debug, Parser)]
#[command(
    author,
    disable_version_flag = true,
    about = "pointy workforce presence daemon",
    long_about = None
)]
struct Cli {
    #[arg(long, value_name = "FILE", help = "Path to configuration file")]
    config: Option<PathBuf>,

    #[arg(
        short = 'V',
        long = "version",
        action = ArgAction::SetTrue,
        help = "Print extended version information and exit"
    )]
    version: bool,

    #[arg(long, default_value = "dashboard", help = "Page whose simulators to run")]
    page: PageKind,

    #[arg(long, help = "Override simulation.random_seed")]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Run the page simulators until interrupted")]
    Run {
        #[arg(long, help = "Stop after this many seconds instead of waiting for ctrl-c")]
        duration_secs: Option<u64>,
        #[arg(long, default_value_t = 15, help = "Seconds between logged summaries")]
        summary_secs: u64,
    },
    #[command(about = "Print one page's derived view as JSON")]
    Snapshot {
        #[arg(long, default_value_t = 0, help = "Employee ticks to replay before rendering")]
        ticks: u32,
        #[arg(long, help = "Search text applied to employee tables")]
        search: Option<String>,
        #[arg(long, help = "Sort employee tables by this field")]
        sort: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let version = VersionInfo::current();
    if cli.version {
        println!("{}", version.extended());
        return Ok(());
    }

    let mut candidates = Vec::new();
    if let Some(path) = &cli.config {
        if !path.exists() {
            bail!("configuration file {} does not exist", path.display());
        }
        candidates.push(path.clone());
    }
    candidates.push(PathBuf::from("configs/pointy.toml"));
    candidates.push(PathBuf::from("configs/example.dev.toml"));

    let loaded = AppConfig::load_with_source(&candidates)?;
    let mut config = loaded.config;
    if let Some(seed) = cli.seed {
        config.simulation.random_seed = Some(seed);
    }

    match cli.command.unwrap_or(Commands::Run {
        duration_secs: None,
        summary_secs: 15,
    }) {
        Commands::Run {
            duration_secs,
            summary_secs,
        } => {
            init_tracing("pointyd", &config.logging)?;
            info!(
                version = %version.cli_string(),
                config = %loaded
                    .source
                    .as_ref()
                    .map_or_else(|| "defaults".to_owned(), |path| path.display().to_string()),
                "configuration loaded"
            );
            run_daemon(
                config,
                cli.page,
                duration_secs.map(Duration::from_secs),
                Duration::from_secs(summary_secs.max(1)),
            )
            .await?
        }
        Commands::Snapshot {
            ticks,
            search,
            sort,
        } => {
            init_cli_tracing();
            let request = build_request(search, sort.as_deref())?;
            let json = render_snapshot(config, cli.page, ticks, &request)?;
            println!("{json}");
        }
    }

    Ok(())
}

async fn run_daemon(
    config: AppConfig,
    page: PageKind,
    duration: Option<Duration>,
    summary_every: Duration,
) -> Result<()> {
    let clock = Arc::new(RuntimeClock::new());
    let mut session = PageSession::open(page, Arc::new(config), clock)?;
    session.start()?;

    let deadline = async {
        match duration {
            Some(duration) => tokio::time::sleep(duration).await,
            None => std::future::pending::<()>().await,
        }
    };
    tokio::pin!(deadline);
    let mut summaries = RateLimiter::new(summary_every);

    info!(page = %page, "daemon running; waiting for termination signal");
    loop {
        tokio::select! {
            result = signal::ctrl_c() => {
                result.context("failed to listen for ctrl-c")?;
                info!("ctrl-c received; shutting down");
                break;
            }
            _ = &mut deadline => {
                info!("run duration elapsed; shutting down");
                break;
            }
            _ = summaries.tick() => {
                let summary = session.summary();
                info!(
                    page = %summary.page,
                    employees = summary.employees,
                    on_site = summary.on_site,
                    checked_in = summary.checked_in_today,
                    alerts = summary.alerts,
                    unread_alerts = summary.unread_alerts,
                    employee_generation = summary.employee_generation,
                    alert_generation = summary.alert_generation,
                    "presence summary"
                );
            }
        }
    }

    let ticks = session.stop().await;
    info!(
        employee_ticks = ticks.employee_ticks,
        alert_ticks = ticks.alert_ticks,
        "simulators stopped"
    );
    Ok(())
}

fn build_request(search: Option<String>, sort: Option<&str>) -> Result<ViewRequest> {
    let mut request = ViewRequest::default();
    if let Some(search) = search {
        request.employees.search = search;
    }
    if let Some(field) = sort {
        let field = SortField::from_str(field)
            .with_context(|| format!("unknown sort field {field}"))?;
        request.sort = SortState::default().select(field);
    }
    Ok(request)
}

fn render_snapshot(
    config: AppConfig,
    page: PageKind,
    ticks: u32,
    request: &ViewRequest,
) -> Result<String> {
    let clock = ManualClock::new(Utc::now());
    let mut session = PageSession::open_manual(page, Arc::new(config), clock)?;
    if ticks > 0 {
        let done = session.replay(ticks)?;
        info!(
            employee_ticks = done.employee_ticks,
            alert_ticks = done.alert_ticks,
            "replayed ticks"
        );
    }
    let view = session.view(request);
    serde_json::to_string_pretty(&view).context("failed to serialise page view")
}
