//! Recipe Share
//!
//! An MCP server for a recipe-sharing site.

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

use recipeshare::api::ApiClient;
use recipeshare::build_info;
use recipeshare::config::Config;
use recipeshare::mcp::RecipeShareService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (output to stderr to not interfere with MCP stdio)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("recipeshare=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;

    // Print startup banner to stderr
    build_info::print_startup_banner(&config.api_url);
    eprintln!("Starting MCP server on stdio...");

    let api = ApiClient::new(&config)?;
    tracing::info!(
        "API client ready (timeout {}s)",
        config.http_timeout.as_secs()
    );

    // Create the Recipe Share service
    let service = RecipeShareService::new(api);

    // Create stdio transport
    let transport = (stdin(), stdout());

    // Start the MCP server
    let server = service.serve(transport).await?;

    // Wait for the server to complete
    server.waiting().await?;

    Ok(())
}
