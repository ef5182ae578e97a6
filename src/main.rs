use clap::{Parser, Subcommand};

use gemara_mcp_server::config::ServerConfig;
use gemara_mcp_server::server::{AppState, McpServer};

#[derive(Parser, Debug)]
#[command(name = "gemara-mcp")]
#[command(version, about = "Gemara MCP server", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the Gemara MCP server on stdio
    Serve,
    /// Print version information
    Version,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Version => {
            println!("Gemara MCP Server {}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Serve => {
            let config = match ServerConfig::from_env() {
                Ok(c) => c,
                Err(e) => {
                    eprintln!("gemara-mcp: configuration error: {e}");
                    std::process::exit(1);
                }
            };

            let state = match AppState::new(config) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("gemara-mcp: startup error: {e}");
                    std::process::exit(1);
                }
            };

            let mut server = McpServer::new(state);
            if let Err(e) = server.run().await {
                eprintln!("gemara-mcp: fatal error: {e}");
                std::process::exit(1);
            }
        }
    }
}
