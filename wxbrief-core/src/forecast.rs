//! Turns raw point-forecast entries into the derived fields of a briefing.
//!
//! Everything here is pure and deterministic. The conversion formulas are
//! deliberate approximations used for quick airfield briefings:
//! the dew point follows the (100 - RH) / 5 rule of thumb and the cloud
//! base the 400 ft/°C spread rule. Do not swap them for the exact
//! psychrometric forms; downstream consumers expect these numbers.

use std::collections::HashMap;

use crate::error::BriefingError;
use crate::model::{ForecastEntry, Location};
use crate::source::smhi::TimeSeriesEntry;

const KNOTS_PER_METER_PER_SECOND: f64 = 1.94384;

/// Wind speed in whole knots, truncated toward zero.
pub fn meters_per_second_to_knots(mps: f64) -> i32 {
    (mps * KNOTS_PER_METER_PER_SECOND) as i32
}

/// Dew point in °C from temperature and relative humidity, unrounded.
pub fn dew_point_from_relative_humidity(temperature: f64, rel_humidity: f64) -> f64 {
    temperature - ((100.0 - rel_humidity) / 5.0)
}

/// Estimated cloud base in whole feet above ground, truncated toward zero.
pub fn calculate_cloud_base(temperature: f64, rel_humidity: f64) -> i32 {
    let spread = temperature - dew_point_from_relative_humidity(temperature, rel_humidity);
    (400.0 * spread) as i32
}

/// Cloud coverage category from an oktas (eighths of sky) value.
pub fn clouds_coverage(oktas: i64) -> &'static str {
    match oktas {
        0 => "NC",
        1..=2 => "FEW",
        3..=4 => "SCT",
        5..=7 => "BKN",
        _ => "OVC",
    }
}

/// Readable label for the upstream precipitation category code.
pub fn precipitation_category(pcat: i64) -> &'static str {
    match pcat {
        0 => "None",
        1 => "Snow",
        2 => "Snow and rain",
        3 => "Rain",
        4 => "Drizzle",
        5 => "Freezing rain",
        6 => "Freezing drizzle",
        _ => "Unknown",
    }
}

// Rounding is pinned to half-away-from-zero (f64::round) for qnh and the
// one-decimal dew point; see the tests below.
fn round_to_whole(value: f64) -> i32 {
    value.round() as i32
}

fn round_to_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Derive a [`ForecastEntry`] from one raw time-series entry.
///
/// Each upstream parameter carries a list of values of which only the
/// first is meaningful here. A parameter that is absent (or has an empty
/// value list) is a hard error: one malformed entry fails the request
/// rather than producing a silently incomplete briefing.
pub fn derive_entry(
    entry: &TimeSeriesEntry,
    location: &Location,
) -> Result<ForecastEntry, BriefingError> {
    let params: HashMap<&str, f64> = entry
        .parameters
        .iter()
        .filter_map(|p| p.values.first().map(|v| (p.name.as_str(), *v)))
        .collect();

    let param = |name: &'static str| -> Result<f64, BriefingError> {
        params
            .get(name)
            .copied()
            .ok_or_else(|| BriefingError::MissingParameter {
                name,
                valid_time: entry.valid_time.clone(),
            })
    };

    let temperature = param("t")?;
    let humidity = param("r")?;

    Ok(ForecastEntry {
        valid_time: entry.valid_time.clone(),
        temperature,
        humidity,
        qnh: round_to_whole(param("msl")?),
        clouds: clouds_coverage(param("lcc_mean")? as i64).to_string(),
        wind_speed_knots: meters_per_second_to_knots(param("ws")?),
        wind_gust_knots: meters_per_second_to_knots(param("gust")?),
        wind_direction: param("wd")?,
        // Upstream visibility is in km.
        visibility_meters: (param("vis")? * 1000.0) as i32,
        dew_point: round_to_one_decimal(dew_point_from_relative_humidity(temperature, humidity)),
        // The cloud base uses the unrounded dew point, so the two derived
        // fields can disagree in the last decimal.
        cloud_base: calculate_cloud_base(temperature, humidity),
        pcat: precipitation_category(param("pcat")? as i64).to_string(),
        pmin: param("pmin")?,
        pmax: param("pmax")?,
        pmean: param("pmean")?,
        pmedian: param("pmedian")?,
        spp: param("spp")? as i32,
        runways: location.runways.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::smhi::Parameter;

    fn entry_with(params: &[(&str, f64)]) -> TimeSeriesEntry {
        TimeSeriesEntry {
            valid_time: "2024-01-01T12:00:00Z".to_string(),
            parameters: params
                .iter()
                .map(|(name, value)| Parameter {
                    name: name.to_string(),
                    values: vec![*value],
                })
                .collect(),
        }
    }

    fn arlanda() -> Location {
        Location {
            lon: 17.916,
            lat: 59.652,
            runways: vec![190, 260],
        }
    }

    #[test]
    fn clouds_coverage_oktas_table() {
        assert_eq!(clouds_coverage(0), "NC");
        assert_eq!(clouds_coverage(1), "FEW");
        assert_eq!(clouds_coverage(2), "FEW");
        assert_eq!(clouds_coverage(3), "SCT");
        assert_eq!(clouds_coverage(4), "SCT");
        assert_eq!(clouds_coverage(5), "BKN");
        assert_eq!(clouds_coverage(6), "BKN");
        assert_eq!(clouds_coverage(7), "BKN");
        assert_eq!(clouds_coverage(8), "OVC");
        assert_eq!(clouds_coverage(100), "OVC");
    }

    #[test]
    fn precipitation_category_table() {
        assert_eq!(precipitation_category(0), "None");
        assert_eq!(precipitation_category(1), "Snow");
        assert_eq!(precipitation_category(2), "Snow and rain");
        assert_eq!(precipitation_category(3), "Rain");
        assert_eq!(precipitation_category(4), "Drizzle");
        assert_eq!(precipitation_category(5), "Freezing rain");
        assert_eq!(precipitation_category(6), "Freezing drizzle");
        assert_eq!(precipitation_category(7), "Unknown");
        assert_eq!(precipitation_category(99), "Unknown");
    }

    #[test]
    fn knots_are_truncated_not_rounded() {
        // 10 m/s = 19.4384 kt
        assert_eq!(meters_per_second_to_knots(10.0), 19);
        // 5 m/s = 9.7192 kt: rounding would give 10
        assert_eq!(meters_per_second_to_knots(5.0), 9);
        assert_eq!(meters_per_second_to_knots(0.0), 0);
    }

    #[test]
    fn dew_point_rule_of_thumb() {
        assert_eq!(dew_point_from_relative_humidity(20.0, 50.0), 10.0);
        assert_eq!(dew_point_from_relative_humidity(20.0, 100.0), 20.0);
    }

    #[test]
    fn cloud_base_from_spread() {
        assert_eq!(calculate_cloud_base(20.0, 50.0), 4000);
        // Saturated air: no spread, base on the deck.
        assert_eq!(calculate_cloud_base(20.0, 100.0), 0);
    }

    #[test]
    fn rounding_is_half_away_from_zero() {
        // qnh
        assert_eq!(round_to_whole(1013.2), 1013);
        assert_eq!(round_to_whole(1013.5), 1014);
        assert_eq!(round_to_whole(1012.5), 1013);
        // dew point, one decimal
        assert_eq!(round_to_one_decimal(1.25), 1.3);
        assert_eq!(round_to_one_decimal(-1.25), -1.3);
        assert_eq!(round_to_one_decimal(4.04), 4.0);
    }

    #[test]
    fn derives_all_fields_from_one_entry() {
        let entry = entry_with(&[
            ("t", 5.0),
            ("r", 80.0),
            ("msl", 1013.2),
            ("lcc_mean", 3.0),
            ("ws", 5.0),
            ("gust", 8.0),
            ("wd", 270.0),
            ("vis", 10.0),
            ("pcat", 0.0),
            ("pmin", 0.0),
            ("pmax", 0.0),
            ("pmean", 0.0),
            ("pmedian", 0.0),
            ("spp", 0.0),
        ]);

        let forecast = derive_entry(&entry, &arlanda()).expect("entry must derive");

        assert_eq!(forecast.valid_time, "2024-01-01T12:00:00Z");
        assert_eq!(forecast.temperature, 5.0);
        assert_eq!(forecast.humidity, 80.0);
        assert_eq!(forecast.qnh, 1013);
        assert_eq!(forecast.clouds, "SCT");
        assert_eq!(forecast.wind_speed_knots, 9);
        assert_eq!(forecast.wind_gust_knots, 15);
        assert_eq!(forecast.wind_direction, 270.0);
        assert_eq!(forecast.visibility_meters, 10_000);
        assert_eq!(forecast.dew_point, 1.0);
        assert_eq!(forecast.cloud_base, 1600);
        assert_eq!(forecast.pcat, "None");
        assert_eq!(forecast.pmin, 0.0);
        assert_eq!(forecast.pmax, 0.0);
        assert_eq!(forecast.pmean, 0.0);
        assert_eq!(forecast.pmedian, 0.0);
        assert_eq!(forecast.spp, 0);
        assert_eq!(forecast.runways, vec![190, 260]);
    }

    #[test]
    fn missing_parameter_is_a_hard_error() {
        // No "msl" in the entry.
        let entry = entry_with(&[("t", 5.0), ("r", 80.0)]);

        let err = derive_entry(&entry, &arlanda()).unwrap_err();
        assert!(err.to_string().contains("'msl'"));
    }

    #[test]
    fn empty_value_list_counts_as_missing() {
        let mut entry = entry_with(&[("t", 5.0)]);
        entry.parameters.push(Parameter {
            name: "r".to_string(),
            values: vec![],
        });

        let err = derive_entry(&entry, &arlanda()).unwrap_err();
        assert!(err.to_string().contains("'r'"));
    }

    #[test]
    fn runways_default_to_empty_for_bare_fields() {
        let entry = entry_with(&[
            ("t", 5.0),
            ("r", 80.0),
            ("msl", 1013.2),
            ("lcc_mean", 0.0),
            ("ws", 0.0),
            ("gust", 0.0),
            ("wd", 0.0),
            ("vis", 10.0),
            ("pcat", 0.0),
            ("pmin", 0.0),
            ("pmax", 0.0),
            ("pmean", 0.0),
            ("pmedian", 0.0),
            ("spp", 0.0),
        ]);
        let bare = Location {
            lon: 18.251,
            lat: 59.48,
            runways: vec![],
        };

        let forecast = derive_entry(&entry, &bare).expect("entry must derive");
        assert!(forecast.runways.is_empty());
    }
}
