//! `igmcp serve` — Start the Streamable HTTP server.

pub async fn run(host: String, port: u16, stateless: bool) -> Result<(), String> {
    let config = igmcp_server::ServerConfig {
        host: host.clone(),
        port,
        stateless,
    };

    println!("Starting Instagram MCP server on {}:{}...", host, port);

    let addr = igmcp_server::start_server(config).await?;
    println!("MCP endpoint: http://{}/mcp", addr);

    // Keep the process running until interrupted
    tokio::signal::ctrl_c()
        .await
        .map_err(|e| format!("Failed to listen for Ctrl+C: {}", e))?;

    println!("\nShutting down...");
    Ok(())
}
