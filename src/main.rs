use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use org_chart::{api, app::OrgChart, config::AppConfig, db, document};

#[derive(Parser)]
#[command(name = "orgchart")]
#[command(about = "Org-chart hierarchy editor with undo/redo history")]
struct Cli {
    /// SQLite file holding the chart (overrides config and ORG_CHART_DB)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Port for HTTP API
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Print the chart as an ASCII tree
    Show,
    /// Print headcount statistics as JSON
    Stats,
    /// Write the chart to a JSON file
    Export {
        /// Output path
        #[arg(short, long, default_value = document::EXPORT_FILE_NAME)]
        output: PathBuf,
    },
    /// Replace the chart with a JSON document (admin only)
    Import {
        /// Document to import
        file: PathBuf,
        /// Admin password
        #[arg(long)]
        password: String,
    },
    /// Replace the chart with the built-in seed (admin only)
    Reset {
        /// Admin password
        #[arg(long)]
        password: String,
    },
}

/// Initialize tracing with output to stderr (for text-output commands) or stdout
fn init_tracing(use_stderr: bool) {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "org_chart=debug,tower_http=debug".into()),
    );

    if use_stderr {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

fn open_chart(config: &AppConfig) -> anyhow::Result<OrgChart> {
    let database = match &config.database_path {
        Some(path) => db::Database::open(path.clone())?,
        None => db::Database::open_default()?,
    };
    database.migrate()?;
    OrgChart::load(Box::new(database), config.admin_password.clone())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let use_stderr = !matches!(cli.command, None | Some(Commands::Serve { .. }));
    init_tracing(use_stderr);

    let mut config = AppConfig::load();
    if let Some(path) = cli.db {
        config.database_path = Some(path);
    }

    match cli.command {
        Some(Commands::Serve { port }) => {
            let port = port.unwrap_or(config.port);
            serve(&config, port).await?;
        }
        None => {
            serve(&config, config.port).await?;
        }
        Some(Commands::Show) => {
            let chart = open_chart(&config)?;
            print!("{}", chart.render());
        }
        Some(Commands::Stats) => {
            let chart = open_chart(&config)?;
            println!("{}", serde_json::to_string_pretty(&chart.stats())?);
        }
        Some(Commands::Export { output }) => {
            let chart = open_chart(&config)?;
            std::fs::write(&output, chart.export()?)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            println!("Exported chart to {}", output.display());
        }
        Some(Commands::Import { file, password }) => {
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let mut chart = open_chart(&config)?;
            chart.login(&password)?;
            chart.import(&text)?;
            report_persistence(&chart)?;
            println!("Imported chart from {}", file.display());
        }
        Some(Commands::Reset { password }) => {
            let mut chart = open_chart(&config)?;
            chart.login(&password)?;
            chart.reset()?;
            report_persistence(&chart)?;
            println!("Chart reset to the default seed");
        }
    }

    Ok(())
}

async fn serve(config: &AppConfig, port: u16) -> anyhow::Result<()> {
    tracing::info!("Starting org chart server on port {}", port);

    let chart = open_chart(config)?;
    let app = api::create_router(chart);

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;
    tracing::info!("Org chart server listening on http://127.0.0.1:{}", port);

    axum::serve(listener, app).await?;
    Ok(())
}

/// One-shot commands exit right after editing, so a failed write would lose
/// the change entirely. Treat it as an error here.
fn report_persistence(chart: &OrgChart) -> anyhow::Result<()> {
    match chart.persistence_warning() {
        Some(warning) => anyhow::bail!("{}", warning),
        None => Ok(()),
    }
}
