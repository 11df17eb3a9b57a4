//! Client for the SMHI open data point forecast API.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use reqwest::header;
use serde::Deserialize;

use super::ForecastSource;

const POINT_FORECAST_BASE: &str =
    "https://opendata-download-metfcst.smhi.se/api/category/pmp3g/version/2/geotype/point";

// The open data endpoint blocks unadorned client user agents, so requests
// present a plain browser one.
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36";

#[derive(Debug, Deserialize)]
struct PointForecast {
    #[serde(rename = "timeSeries")]
    time_series: Vec<TimeSeriesEntry>,
}

/// One raw forecast entry, verbatim from upstream.
#[derive(Debug, Clone, Deserialize)]
pub struct TimeSeriesEntry {
    #[serde(rename = "validTime")]
    pub valid_time: String,
    pub parameters: Vec<Parameter>,
}

/// A named parameter with its value list; only the first value is read.
#[derive(Debug, Clone, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, Default)]
pub struct SmhiForecasts {
    http: Client,
}

impl SmhiForecasts {
    pub fn new() -> Self {
        Self {
            http: Client::new(),
        }
    }
}

#[async_trait]
impl ForecastSource for SmhiForecasts {
    async fn point_forecast(
        &self,
        lon: f64,
        lat: f64,
    ) -> Result<Option<Vec<TimeSeriesEntry>>> {
        let url = format!("{POINT_FORECAST_BASE}/lon/{lon}/lat/{lat}/data.json");

        let res = self
            .http
            .get(&url)
            .header(header::ACCEPT, "application/json")
            .header(header::USER_AGENT, BROWSER_USER_AGENT)
            .send()
            .await
            .context("Failed to send request to the SMHI point forecast API")?;

        let status = res.status();
        if !status.is_success() {
            log::warn!("Point forecast for lon {lon} lat {lat} answered {status}, skipping");
            return Ok(None);
        }

        let body = res
            .text()
            .await
            .context("Failed to read SMHI point forecast response body")?;

        let parsed: PointForecast = serde_json::from_str(&body).with_context(|| {
            format!(
                "Failed to parse SMHI point forecast JSON: {}",
                truncate_body(&body)
            )
        })?;

        Ok(Some(parsed.time_series))
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        format!("{}...", &body[..MAX])
    } else {
        body.to_string()
    }
}
