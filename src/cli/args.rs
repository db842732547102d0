//! CLI argument definitions.

use clap::{Parser, Subcommand};

use crate::config::Config;

/// Daily Food - restaurant picker API
#[derive(Parser, Debug)]
#[command(name = "daily-food")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server
    Serve(ServeArgs),

    /// Run database migrations
    Migrate(MigrateArgs),
}

/// Flags override `SERVER_HOST` / `SERVER_PORT` from the configuration
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Host to bind to
    #[arg(short = 'H', long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,
}

impl ServeArgs {
    /// `host:port` to bind, falling back to the configured address
    pub fn bind_addr(&self, config: &Config) -> String {
        let host = self.host.as_deref().unwrap_or(&config.server_host);
        let port = self.port.unwrap_or(config.server_port);
        format!("{}:{}", host, port)
    }
}

#[derive(Parser, Debug)]
pub struct MigrateArgs {
    #[command(subcommand)]
    pub action: MigrateAction,
}

#[derive(Subcommand, Debug)]
pub enum MigrateAction {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset and re-run all migrations
    Fresh,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn serve_args(argv: &[&str]) -> ServeArgs {
        match Cli::try_parse_from(argv).unwrap().command {
            Commands::Serve(args) => args,
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_serve_falls_back_to_config() {
        let config = Config::for_testing("x".repeat(32));

        assert_eq!(
            serve_args(&["daily-food", "serve"]).bind_addr(&config),
            config.server_addr()
        );
        assert_eq!(
            serve_args(&["daily-food", "serve", "--port", "9000"]).bind_addr(&config),
            format!("{}:9000", config.server_host)
        );
    }

    #[test]
    fn test_migrate_requires_action() {
        assert!(Cli::try_parse_from(["daily-food", "migrate"]).is_err());

        let cli = Cli::try_parse_from(["daily-food", "-v", "migrate", "status"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::Migrate(MigrateArgs {
                action: MigrateAction::Status
            })
        ));
    }
}
