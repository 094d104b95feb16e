//! igmcp — Instagram MCP server CLI.
//!
//! With no subcommand the binary speaks MCP over stdio, the default
//! transport MCP clients spawn. `serve` starts the Streamable HTTP
//! server instead.

mod commands;

use clap::{Parser, Subcommand};

/// Instagram MCP server — Graph API tools for LLM agents
#[derive(Parser)]
#[command(
    name = "igmcp",
    version,
    about = "Instagram MCP server — Graph API tools for LLM agents"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the Streamable HTTP server
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "0.0.0.0")]
        host: String,
        /// Port to listen on
        #[arg(long, env = "PORT", default_value_t = 3000)]
        port: u16,
        /// Serve every request as its own session, with no session
        /// identifier required (one-shot deployments)
        #[arg(long)]
        stateless: bool,
    },

    /// Serve MCP over stdio (the default when no subcommand is given)
    Stdio,

    /// Print the tool catalog as JSON
    Tools,

    /// Invoke a single tool and print its result
    Call {
        /// Tool name (e.g. "ig_get_account")
        #[arg(long)]
        tool: String,
        /// Tool arguments as a JSON object
        #[arg(long, default_value = "{}")]
        args: String,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Serve {
            host,
            port,
            stateless,
        }) => commands::serve::run(host, port, stateless).await,
        Some(Commands::Stdio) | None => commands::stdio::run().await,
        Some(Commands::Tools) => commands::tools::run(),
        Some(Commands::Call { tool, args }) => commands::call::run(&tool, &args).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
