//! Servings
//!
//! An MCP server for recipe scaling and newsletter sign-ups.

use std::sync::Arc;

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

use servings::build_info;
use servings::config::AppConfig;
use servings::db;
use servings::mcp::ServingsService;
use servings::scaling::Catalog;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Log to stderr so stdout stays free for the MCP stdio transport
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("servings=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    // The catalog is parsed once and shared read-only for the process lifetime
    let catalog = Arc::new(Catalog::embedded()?);
    build_info::print_startup_banner(catalog.len(), catalog.recipes().len());
    eprintln!("Starting MCP server on stdio...");

    let config = AppConfig::from_env();
    eprintln!("Database path: {}", config.database_path.display());
    eprintln!(
        "Mode: {} | Mailing list: {}",
        config.mode.as_str(),
        if config.mailing_list.is_some() { "configured" } else { "not configured" }
    );

    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    eprintln!("Initializing database...");
    let database = db::Database::new(&config.database_path)?;
    database.with_conn(|conn| {
        if db::migrations::needs_migration(conn)? {
            eprintln!("Applying database migrations...");
            db::migrations::run_migrations(conn)?;
        }
        let version = db::migrations::get_schema_version(conn)?;
        eprintln!("Database schema version: {}", version);
        Ok(())
    })?;

    let service = ServingsService::new(config, catalog, database);

    let transport = (stdin(), stdout());
    let server = service.serve(transport).await?;
    server.waiting().await?;

    Ok(())
}
