//! The input parameter record and its defaults.

use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

/// Radius used when the record has none, in Earth radii.
pub const DEFAULT_RADIUS: f64 = 1.0;
/// Equilibrium temperature used when the record has none, in Kelvin.
pub const DEFAULT_EQUILIBRIUM_TEMPERATURE: f64 = 300.0;
/// Insolation flux used when the record has none, in Earth-flux units.
pub const DEFAULT_INSOLATION_FLUX: f64 = 1.0;
/// Host star temperature used when the record has none (the Sun), in Kelvin.
pub const DEFAULT_STELLAR_TEMPERATURE: f64 = 5778.0;
/// Orbital period shown when the record has none, in days.
pub const DEFAULT_ORBITAL_PERIOD: f64 = 365.0;

/// Errors from reading a parameter record off disk.
#[derive(Debug, thiserror::Error)]
pub enum ParamsError {
    /// The record file could not be read.
    #[error("failed to read parameter record {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The record is not a JSON object of the expected shape.
    #[error("failed to parse parameter record: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Snapshot of the measured properties of one body.
///
/// Every field is independently optional. The accessor methods resolve a
/// field to its default when it is absent or unusable; a measurement is
/// usable when it is finite and strictly positive, since the upstream tables
/// write `0` or `-1` for "not measured".
///
/// Deserializes from camelCase keys or from the data service's column names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CelestialBodyParameters {
    /// Display name, if the record has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Radius in Earth radii.
    #[serde(alias = "Planet_Radius_(Earth_radii)", deserialize_with = "lenient_number")]
    pub radius: Option<f64>,

    /// Equilibrium temperature in Kelvin.
    #[serde(alias = "Equilibrium_Temperature_(K)", deserialize_with = "lenient_number")]
    pub equilibrium_temperature: Option<f64>,

    /// Stellar flux received, relative to Earth.
    #[serde(alias = "Insolation_Flux_(Earth_flux)", deserialize_with = "lenient_number")]
    pub insolation_flux: Option<f64>,

    /// Effective temperature of the host star in Kelvin.
    #[serde(
        alias = "Stellar_Effective_Temperature_(K)",
        deserialize_with = "lenient_number"
    )]
    pub stellar_effective_temperature: Option<f64>,

    /// Orbital period in days. Display only.
    #[serde(alias = "Orbital_Period_(days)", deserialize_with = "lenient_number")]
    pub orbital_period: Option<f64>,
}

impl CelestialBodyParameters {
    /// Parse a record from a JSON object.
    pub fn from_json_str(json: &str) -> Result<Self, ParamsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a record from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self, ParamsError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ParamsError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let params = Self::from_json_str(&contents)?;
        log::info!("Loaded parameter record from {}", path.display());
        Ok(params)
    }

    /// Radius in Earth radii, or [`DEFAULT_RADIUS`].
    #[must_use]
    pub fn radius(&self) -> f64 {
        usable(self.radius).unwrap_or(DEFAULT_RADIUS)
    }

    /// Equilibrium temperature in Kelvin, or [`DEFAULT_EQUILIBRIUM_TEMPERATURE`].
    #[must_use]
    pub fn equilibrium_temperature(&self) -> f64 {
        usable(self.equilibrium_temperature).unwrap_or(DEFAULT_EQUILIBRIUM_TEMPERATURE)
    }

    /// Insolation flux, or [`DEFAULT_INSOLATION_FLUX`].
    #[must_use]
    pub fn insolation_flux(&self) -> f64 {
        usable(self.insolation_flux).unwrap_or(DEFAULT_INSOLATION_FLUX)
    }

    /// Host star temperature in Kelvin, or [`DEFAULT_STELLAR_TEMPERATURE`].
    #[must_use]
    pub fn stellar_effective_temperature(&self) -> f64 {
        usable(self.stellar_effective_temperature).unwrap_or(DEFAULT_STELLAR_TEMPERATURE)
    }

    /// Orbital period in days, or [`DEFAULT_ORBITAL_PERIOD`].
    #[must_use]
    pub fn orbital_period(&self) -> f64 {
        usable(self.orbital_period).unwrap_or(DEFAULT_ORBITAL_PERIOD)
    }
}

fn usable(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LenientNumber {
    Number(f64),
    Text(String),
    Other(serde::de::IgnoredAny),
}

/// Accept numbers and numeric strings; anything else reads as missing.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<LenientNumber>::deserialize(deserializer)?;
    Ok(match value {
        Some(LenientNumber::Number(v)) => Some(v),
        Some(LenientNumber::Text(s)) => s.trim().parse().ok(),
        Some(LenientNumber::Other(_)) | None => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_empty() {
        let params = CelestialBodyParameters::default();
        assert_eq!(params.radius(), 1.0);
        assert_eq!(params.equilibrium_temperature(), 300.0);
        assert_eq!(params.insolation_flux(), 1.0);
        assert_eq!(params.stellar_effective_temperature(), 5778.0);
        assert_eq!(params.orbital_period(), 365.0);
    }

    #[test]
    fn test_sentinels_resolve_to_defaults() {
        let params = CelestialBodyParameters {
            radius: Some(-1.0),
            equilibrium_temperature: Some(0.0),
            insolation_flux: Some(f64::NAN),
            stellar_effective_temperature: Some(f64::INFINITY),
            orbital_period: Some(-1.0),
            ..Default::default()
        };
        assert_eq!(params.radius(), DEFAULT_RADIUS);
        assert_eq!(params.equilibrium_temperature(), DEFAULT_EQUILIBRIUM_TEMPERATURE);
        assert_eq!(params.insolation_flux(), DEFAULT_INSOLATION_FLUX);
        assert_eq!(params.stellar_effective_temperature(), DEFAULT_STELLAR_TEMPERATURE);
        assert_eq!(params.orbital_period(), DEFAULT_ORBITAL_PERIOD);
    }

    #[test]
    fn test_parse_camel_case() {
        let params = CelestialBodyParameters::from_json_str(
            r#"{"name": "Kepler-22 b", "radius": 2.4, "equilibriumTemperature": 262}"#,
        )
        .unwrap();
        assert_eq!(params.name.as_deref(), Some("Kepler-22 b"));
        assert_eq!(params.radius, Some(2.4));
        assert_eq!(params.equilibrium_temperature, Some(262.0));
        assert_eq!(params.insolation_flux, None);
    }

    #[test]
    fn test_parse_service_column_names() {
        let json = r#"{
            "Planet_Radius_(Earth_radii)": 5.0,
            "Equilibrium_Temperature_(K)": 150,
            "Insolation_Flux_(Earth_flux)": 0.3,
            "Stellar_Effective_Temperature_(K)": 3400,
            "Orbital_Period_(days)": 289.86,
            "Stellar_Radius_(Solar_radii)": 0.9
        }"#;
        let params = CelestialBodyParameters::from_json_str(json).unwrap();
        assert_eq!(params.radius(), 5.0);
        assert_eq!(params.equilibrium_temperature(), 150.0);
        assert_eq!(params.insolation_flux(), 0.3);
        assert_eq!(params.stellar_effective_temperature(), 3400.0);
        assert_eq!(params.orbital_period(), 289.86);
    }

    #[test]
    fn test_non_numeric_fields_read_as_missing() {
        let json = r#"{"radius": "N/A", "equilibriumTemperature": "412.5", "insolationFlux": null, "orbitalPeriod": true}"#;
        let params = CelestialBodyParameters::from_json_str(json).unwrap();
        assert_eq!(params.radius, None);
        assert_eq!(params.equilibrium_temperature, Some(412.5));
        assert_eq!(params.insolation_flux, None);
        assert_eq!(params.orbital_period, None);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        let result = CelestialBodyParameters::from_json_str("[1, 2");
        assert!(matches!(result, Err(ParamsError::Parse(_))));
    }

    #[test]
    fn test_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("body.json");
        std::fs::write(&path, r#"{"radius": 0.18}"#).unwrap();
        let params = CelestialBodyParameters::from_json_file(&path).unwrap();
        assert_eq!(params.radius(), 0.18);
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = CelestialBodyParameters::from_json_file(&dir.path().join("absent.json"));
        assert!(matches!(result, Err(ParamsError::Read { .. })));
    }
}
