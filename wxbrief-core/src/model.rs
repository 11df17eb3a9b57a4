use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A named airfield in the registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub lon: f64,
    pub lat: f64,
    /// Runway headings in degrees. Empty when the field has none on record.
    #[serde(default)]
    pub runways: Vec<u32>,
}

/// Label -> report text, as scraped from one of the briefing pages.
pub type ReportMap = HashMap<String, String>;

/// One derived forecast entry for a location.
///
/// Field names on the wire match the rendered view of the service:
/// `validTime`, `dewPoint` and `cloudBase` stay camelCase, the rest are
/// snake_case or upstream parameter names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastEntry {
    #[serde(rename = "validTime")]
    pub valid_time: String,
    /// Air temperature, degrees Celsius.
    pub temperature: f64,
    /// Relative humidity, percent.
    pub humidity: f64,
    /// Sea-level pressure rounded to whole hPa.
    pub qnh: i32,
    /// Cloud coverage category (NC/FEW/SCT/BKN/OVC).
    pub clouds: String,
    pub wind_speed_knots: i32,
    pub wind_gust_knots: i32,
    /// Wind direction, degrees.
    pub wind_direction: f64,
    pub visibility_meters: i32,
    /// Dew point, degrees Celsius, one decimal.
    #[serde(rename = "dewPoint")]
    pub dew_point: f64,
    /// Estimated cloud base above ground, feet.
    #[serde(rename = "cloudBase")]
    pub cloud_base: i32,
    /// Precipitation category as a readable label.
    pub pcat: String,
    pub pmin: f64,
    pub pmax: f64,
    pub pmean: f64,
    pub pmedian: f64,
    /// Snow precipitation probability, percent.
    pub spp: i32,
    /// Runway headings of the location; never absent, empty when unknown.
    pub runways: Vec<u32>,
}

/// The combined result of one briefing request.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Briefing {
    /// Location identifier -> derived entries in upstream time order.
    /// Locations whose forecast fetch failed are simply absent.
    pub forecasts: HashMap<String, Vec<ForecastEntry>>,
    pub metar: ReportMap,
    pub taf: ReportMap,
}
