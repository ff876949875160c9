//! Demo run against a live optimization service.
//!
//! Fills a small cart, reports the budget band, asks the service for the best
//! selection and prints the stored history. Configuration comes from the file named
//! by `CART_OPTIMIZER_CONFIG` (optional) and the `CART_*` environment variables.

use cart_optimizer::config::Settings;
use cart_optimizer::lifecycle::{setup_tracing, CartSystem};
use std::path::PathBuf;
use tracing::{error, info, Instrument};

const BUDGET: f64 = 20.0;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    setup_tracing();

    let config_path = std::env::var_os("CART_OPTIMIZER_CONFIG").map(PathBuf::from);
    let settings = Settings::load(config_path.as_deref())?;
    info!(service_url = %settings.service_url, "Starting cart optimizer demo");

    let system = CartSystem::new(&settings)?;
    let cart = &system.cart_client;

    let span = tracing::info_span!("cart_setup");
    async {
        for (name, price, value) in [("Headphones", 10.0, 5.0), ("Keyboard", 20.0, 15.0), ("Cable", 4.0, 3.0)] {
            cart.add_item(name, price, value).await?;
        }
        Ok::<_, cart_optimizer::cart_actor::CartError>(())
    }
    .instrument(span)
    .await?;

    for item in cart.items().await? {
        println!("{item}");
    }
    let status = cart.budget_status(BUDGET).await?;
    println!("Budget used: {:.0}% ({:?})", status.ratio_percent, status.band);

    let span = tracing::info_span!("optimization");
    match cart.optimize(BUDGET).instrument(span).await {
        Ok(report) => println!("{report}"),
        Err(e) => error!(error = %e, "Optimization failed"),
    }

    let history = cart.history().await?;
    println!("History ({} entries):", history.len());
    for entry in &history {
        println!("{entry}");
    }

    system.shutdown().await?;
    info!("Demo completed");
    Ok(())
}
