use std::fmt::Debug;

use async_trait::async_trait;

use crate::model::ReportMap;
use crate::source::smhi::TimeSeriesEntry;

pub mod lfv;
pub mod smhi;

/// Source of the scraped METAR/TAF text report pages.
///
/// Implementations are error-transparent: a fetch or parse failure is an
/// `Err`, and the decision to degrade to an empty report map belongs to
/// the caller.
#[async_trait]
pub trait ReportSource: Send + Sync + Debug {
    async fn metar(&self) -> anyhow::Result<ReportMap>;
    async fn taf(&self) -> anyhow::Result<ReportMap>;
}

/// Source of raw point forecasts for a coordinate.
#[async_trait]
pub trait ForecastSource: Send + Sync + Debug {
    /// Fetch the time series for a coordinate. `Ok(None)` means upstream
    /// answered with a non-success status and the location is to be
    /// skipped; transport and decode failures are real errors.
    async fn point_forecast(&self, lon: f64, lat: f64)
    -> anyhow::Result<Option<Vec<TimeSeriesEntry>>>;
}
