// src/main.rs
// cable-assist: cable finder and order status assistant

use anyhow::{Context, Result, bail};
use cable_assist::agent::{Agent, AgentDependencies};
use cable_assist::config::EnvConfig;
use cable_assist::web;
use clap::{Parser, Subcommand};
use tracing::{Level, info, warn};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "cable-assist")]
#[command(about = "Cable finder and order status assistant backed by an LLM agent")]
#[command(version)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server (default)
    Serve {
        /// Address to bind (overrides HOST)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Run one query and print the JSON result
    Ask {
        query: String,

        #[arg(long, default_value = "")]
        customer_id: String,

        #[arg(long, default_value = "en")]
        language: String,

        #[arg(long, default_value_t = 9)]
        erp_business_entity_id: i64,
    },

    /// Validate configuration and exit
    CheckConfig,
}

/// Validate the environment; errors abort, warnings are logged
fn load_config() -> Result<EnvConfig> {
    let config = EnvConfig::load();
    let validation = config.validate();

    for warning in &validation.warnings {
        warn!("{}", warning);
    }
    if !validation.is_valid() {
        bail!("invalid configuration:\n{}", validation.report());
    }

    Ok(config)
}

async fn run_server(mut config: EnvConfig, host: Option<String>, port: Option<u16>) -> Result<()> {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    let agent = Agent::from_config(&config)?;
    info!(model = %agent.model_name(), "Agent ready");

    let app = web::create_router(web::state::AppState::new(agent));

    let addr = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    info!("cable-assist listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

async fn run_ask(config: EnvConfig, query: String, deps: AgentDependencies) -> Result<()> {
    let agent = Agent::from_config(&config)?;
    let response = agent.run(&query, &deps).await?;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv(); // Load .env from current directory

    let cli = Cli::parse();

    let log_level: Level = cli
        .log_level
        .parse()
        .with_context(|| format!("invalid log level '{}'", cli.log_level))?;

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        None => run_server(load_config()?, None, None).await?,
        Some(Commands::Serve { host, port }) => run_server(load_config()?, host, port).await?,
        Some(Commands::Ask {
            query,
            customer_id,
            language,
            erp_business_entity_id,
        }) => {
            let deps = AgentDependencies::new(customer_id, language, erp_business_entity_id);
            run_ask(load_config()?, query, deps).await?;
        }
        Some(Commands::CheckConfig) => {
            let validation = EnvConfig::load().validate();
            println!("{}", validation.report());
            if !validation.is_valid() {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
