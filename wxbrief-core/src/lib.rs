//! Core library for the `wxbrief` aerodrome weather service.
//!
//! This crate defines:
//! - The airfield registry and configuration handling
//! - Clients for the outbound sources (LFV text reports, SMHI point forecasts)
//! - Forecast derivation, time-window filtering and briefing assembly
//!
//! It is used by `wxbrief-server`, but can also be reused by other binaries or services.

pub mod briefing;
pub mod config;
pub mod error;
pub mod forecast;
pub mod model;
pub mod source;
pub mod window;

pub use briefing::assemble;
pub use config::Config;
pub use error::BriefingError;
pub use model::{Briefing, ForecastEntry, Location, ReportMap};
pub use source::lfv::LfvReports;
pub use source::smhi::SmhiForecasts;
pub use source::{ForecastSource, ReportSource};
pub use window::TimeWindow;

#[cfg(test)]
mod tests {
    // use super::*;

    #[test]
    fn it_works() {}
}
