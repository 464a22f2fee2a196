//! KitchenSense — nutrition tracking service for the smart-home dashboard.

use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod routes;
mod state;

use kitchensense_core::ServiceConfig;
use state::AppState;

fn print_help() {
    println!("KitchenSense — nutrition tracking service");
    println!();
    println!("Usage: kitchensense [command]");
    println!();
    println!("Commands:");
    println!("  (none)                   Start the server");
    println!("  nutrition <meal text>    Resolve nutrition for a meal and print it");
    println!("  help                     Show this help message");
    println!();
    println!("Environment:");
    println!("  PORT, SPOONACULAR_API_KEY, SPOONACULAR_BASE_URL, NUTRITION_PACING_MS,");
    println!("  NUTRITION_LOOKUP_TIMEOUT_SECS, NUTRITION_BULK_TIMEOUT_SECS, RUST_LOG");
}

/// One-shot resolution from the command line.
async fn run_nutrition(state: &AppState, meal: &str) -> anyhow::Result<()> {
    let resolution = state
        .pipeline
        .resolve_detailed(meal)
        .await
        .map_err(|e| anyhow::anyhow!("Nutrition lookup failed: {}", e))?;
    println!("{}", serde_json::to_string_pretty(&resolution)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    let config = ServiceConfig::from_env();

    // Handle CLI subcommands
    if args.len() > 1 {
        match args[1].as_str() {
            "--nutrition" | "nutrition" => {
                if args.len() < 3 {
                    eprintln!("Usage: kitchensense nutrition <meal text>");
                    std::process::exit(1);
                }
                let meal = args[2..].join(" ");
                let state = AppState::new(config);
                return run_nutrition(&state, &meal).await;
            }
            "--help" | "-h" | "help" => {
                print_help();
                return Ok(());
            }
            _ => {
                eprintln!("Unknown command: {}. Use 'kitchensense help' for usage.", args[1]);
                std::process::exit(1);
            }
        }
    }

    let port = config.port;
    let state = Arc::new(AppState::new(config));
    if !state.provider_configured() {
        warn!("SPOONACULAR_API_KEY is not set; /nutrition will return 500 until it is");
    }

    // Build router
    let app = routes::build_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("KitchenSense server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
