//! Parsed weather payload
//!
//! Mirrors the relevant slice of the OpenWeatherMap current-weather
//! response. Sections are optional; derived readings return `None` when
//! the section is absent so callers can substitute their own sentinels.

use serde::Deserialize;

/// Temperature/humidity block (`"main"` section)
#[derive(Debug, Clone, Deserialize)]
pub struct MainSection {
    /// Kelvin
    pub temp: Option<f64>,
    pub humidity: Option<f64>,
}

/// One condition descriptor from the `"weather"` list
#[derive(Debug, Clone, Deserialize)]
pub struct ConditionEntry {
    #[serde(default)]
    pub description: String,
}

/// Wind block (`"wind"` section)
#[derive(Debug, Clone, Deserialize)]
pub struct WindSection {
    /// Meters per second
    pub speed: Option<f64>,
}

/// Last good weather report, replaced wholesale on each successful fetch
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WeatherReport {
    pub main: Option<MainSection>,
    #[serde(default)]
    pub weather: Vec<ConditionEntry>,
    pub wind: Option<WindSection>,
}

impl WeatherReport {
    /// Temperature in whole degrees Celsius (Kelvin − 273.15, truncated)
    pub fn temperature_celsius(&self) -> Option<i32> {
        let kelvin = self.main.as_ref()?.temp?;
        Some((kelvin - 273.15) as i32)
    }

    pub fn humidity_percent(&self) -> Option<i64> {
        Some(self.main.as_ref()?.humidity? as i64)
    }

    /// Human-readable condition from the first descriptor
    pub fn condition(&self) -> Option<&str> {
        self.weather.first().map(|entry| entry.description.as_str())
    }

    /// Wind speed converted from m/s to km/h
    pub fn wind_speed_kmh(&self) -> Option<f64> {
        Some(self.wind.as_ref()?.speed? * 3.6)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{"main":{"temp":295.15,"humidity":65},"weather":[{"description":"light rain"}],"wind":{"speed":5.0}}"#;

    #[test]
    fn test_derived_readings() {
        let report: WeatherReport = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(report.temperature_celsius(), Some(22));
        assert_eq!(report.humidity_percent(), Some(65));
        assert_eq!(report.condition(), Some("light rain"));
        assert!((report.wind_speed_kmh().unwrap() - 18.0).abs() < 1e-9);
    }

    #[test]
    fn test_missing_sections() {
        let report: WeatherReport = serde_json::from_str("{}").unwrap();
        assert_eq!(report.temperature_celsius(), None);
        assert_eq!(report.humidity_percent(), None);
        assert_eq!(report.condition(), None);
        assert_eq!(report.wind_speed_kmh(), None);
    }

    #[test]
    fn test_truncation_toward_zero() {
        let report: WeatherReport =
            serde_json::from_str(r#"{"main":{"temp":294.9,"humidity":50}}"#).unwrap();
        assert_eq!(report.temperature_celsius(), Some(21));
    }
}
