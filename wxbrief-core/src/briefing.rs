//! Assembly of the combined briefing for one request.

use std::collections::HashMap;

use anyhow::Result;

use crate::config::Config;
use crate::forecast::derive_entry;
use crate::model::{Briefing, ForecastEntry, ReportMap};
use crate::source::{ForecastSource, ReportSource};
use crate::window::TimeWindow;

/// Fetch reports and forecasts and assemble them into a [`Briefing`].
///
/// `locations` is the raw comma-separated request parameter; when absent
/// the registry's default location is used. Identifiers not present in
/// the registry are silently ignored. Report fetch failures are logged
/// and degrade to empty maps; a forecast fetch answered with a
/// non-success status leaves that location out of the result entirely.
/// Derivation and time parse failures abort the whole request.
pub async fn assemble(
    config: &Config,
    forecasts: &dyn ForecastSource,
    reports: &dyn ReportSource,
    window: &TimeWindow,
    locations: Option<&str>,
) -> Result<Briefing> {
    let metar = reports.metar().await.unwrap_or_else(|e| {
        log::error!("Failed to fetch METAR data: {e:#}");
        ReportMap::new()
    });
    let taf = reports.taf().await.unwrap_or_else(|e| {
        log::error!("Failed to fetch TAF data: {e:#}");
        ReportMap::new()
    });

    let requested: Vec<&str> = match locations {
        Some(list) => list.split(',').collect(),
        None => vec![config.default_location.as_str()],
    };

    let mut collected: HashMap<String, Vec<ForecastEntry>> = HashMap::new();
    for id in requested {
        let Some(location) = config.location(id) else {
            continue;
        };

        let Some(entries) = forecasts.point_forecast(location.lon, location.lat).await? else {
            continue;
        };

        let mut derived = Vec::with_capacity(entries.len());
        for entry in &entries {
            if !window.contains(&entry.valid_time)? {
                continue;
            }
            derived.push(derive_entry(entry, location)?);
        }

        collected.insert(id.to_string(), derived);
    }

    Ok(Briefing {
        forecasts: collected,
        metar,
        taf,
    })
}
