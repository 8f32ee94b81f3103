// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Zone-Resolver command line
//!
//! Usage:
//!   zone-resolver              print zones currently accepting orders
//!   zone-resolver LON LAT      print the shipping quote for a point
//!   zone-resolver --geojson    print visible zone boundaries as GeoJSON
//!   zone-resolver --geojson-admin
//!                              print every zone boundary, hidden ones tagged

use anyhow::{bail, Context};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use zone_resolver::{config::Config, GeoPoint, JsonFileZoneStore, ZoneResolver};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(
        zones_file = %config.zones_file.display(),
        cache_ttl_secs = config.cache_ttl.as_secs(),
        "Starting zone resolver"
    );

    let store = JsonFileZoneStore::new(&config.zones_file);
    let resolver = ZoneResolver::new(store, &config);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let output = match args.as_slice() {
        [] => serde_json::to_string_pretty(&resolver.zone_options().await?)?,
        [flag] if flag == "--geojson" => {
            serde_json::to_string_pretty(&resolver.export_geojson().await?)?
        }
        [flag] if flag == "--geojson-admin" => {
            serde_json::to_string_pretty(&resolver.export_admin_geojson().await?)?
        }
        [lon, lat] => {
            let point: GeoPoint = format!("{},{}", lon, lat)
                .parse()
                .with_context(|| format!("Invalid point: {} {}", lon, lat))?;
            serde_json::to_string_pretty(&resolver.quote(point).await?)?
        }
        _ => bail!("usage: zone-resolver [LON LAT | --geojson | --geojson-admin]"),
    };

    println!("{}", output);
    Ok(())
}

/// Initialize structured JSON logging on stderr.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("zone_resolver=debug,info")),
        )
        .with(format)
        .init();
}
