//! Research Dash CLI - Research Overview Dashboard
//!
//! Usage:
//!   research-dash serve [OPTIONS]    Start the dashboard server
//!   research-dash tui [OPTIONS]      Show the dashboard in the terminal
//!
//! Examples:
//!   research-dash serve --port 8501
//!   research-dash serve --config dashboard.yaml
//!   research-dash serve --data Data/h-index.csv --tick-ms 10
//!   research-dash serve --tui              # Serve and show the terminal dashboard
//!   research-dash tui --server-url http://127.0.0.1:8501

use clap::{Parser, Subcommand};
use research_dash::cli::{Config, ConfigError};
use research_dash::tui::{run_dashboard, DashboardConfig};
use research_dash::AnimationConfig;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "research-dash")]
#[command(author, version, about = "Research Overview Dashboard", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the dashboard HTTP server
    Serve {
        /// Configuration file path (YAML)
        #[arg(short, long, env = "RESEARCH_DASH_CONFIG")]
        config: Option<String>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Metrics CSV (Category, Publications, Citations, h-index)
        #[arg(short, long)]
        data: Option<PathBuf>,

        /// Delay between card animation frames in milliseconds
        #[arg(long)]
        tick_ms: Option<u64>,

        /// Show the terminal dashboard alongside the server
        #[arg(long)]
        tui: bool,
    },
    /// Show the dashboard of a running server in the terminal
    Tui {
        /// Server to fetch the dashboard from
        #[arg(long, default_value = "http://127.0.0.1:8501")]
        server_url: String,

        /// Snapshot refresh interval in milliseconds
        #[arg(long, default_value = "5000")]
        refresh_ms: u64,

        /// Delay between card animation frames in milliseconds
        #[arg(long, default_value = "20")]
        tick_ms: u64,

        /// Step divisor for card animation (match the server's animation.steps)
        #[arg(long, default_value = "50", value_parser = clap::value_parser!(u64).range(1..))]
        steps: u64,
    },
}

fn build_config(
    config_file: Option<String>,
    port: Option<u16>,
    host: Option<String>,
    data: Option<PathBuf>,
    tick_ms: Option<u64>,
) -> Result<Config, ConfigError> {
    let mut config = if let Some(path) = config_file {
        Config::from_file(&path)?
    } else {
        Config::default()
    };

    // Override with CLI arguments
    if let Some(port) = port {
        config.server.port = port;
    }
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(data) = data {
        config.data.path = data;
    }
    if let Some(tick_ms) = tick_ms {
        config.animation.tick_ms = tick_ms;
    }

    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            config,
            port,
            host,
            data,
            tick_ms,
            tui,
        } => {
            let config = build_config(config, port, host, data, tick_ms)?;

            if tui {
                let dashboard_config = DashboardConfig {
                    server_url: format!("http://127.0.0.1:{}", config.server.port),
                    refresh_ms: 5000,
                    animation: config.animation_config(),
                };

                // Run both concurrently - TUI exit will shut down the app
                tokio::select! {
                    result = research_dash::cli::run_server(config) => {
                        result?;
                    }
                    result = run_dashboard(dashboard_config) => {
                        result?;
                    }
                }
            } else {
                // Initialize tracing for server-only mode
                tracing_subscriber::fmt()
                    .with_env_filter(
                        tracing_subscriber::EnvFilter::try_from_default_env()
                            .unwrap_or_else(|_| "research_dash=info,tower_http=debug".into()),
                    )
                    .init();

                research_dash::cli::run_server(config).await?;
            }
        }
        Commands::Tui {
            server_url,
            refresh_ms,
            tick_ms,
            steps,
        } => {
            let dashboard_config = DashboardConfig {
                server_url,
                refresh_ms,
                animation: AnimationConfig::new(tick_ms, steps),
            };
            run_dashboard(dashboard_config).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tui_steps(args: &[&str]) -> u64 {
        match Cli::try_parse_from(args).unwrap().command {
            Commands::Tui { steps, .. } => steps,
            Commands::Serve { .. } => panic!("expected tui command"),
        }
    }

    #[test]
    fn test_tui_steps_default() {
        assert_eq!(tui_steps(&["research-dash", "tui"]), 50);
    }

    #[test]
    fn test_tui_steps_flag() {
        assert_eq!(tui_steps(&["research-dash", "tui", "--steps", "10"]), 10);
    }

    #[test]
    fn test_tui_steps_zero_rejected() {
        assert!(Cli::try_parse_from(["research-dash", "tui", "--steps", "0"]).is_err());
    }
}
