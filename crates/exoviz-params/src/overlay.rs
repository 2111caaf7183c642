//! Descriptive text shown next to the rendered body.

use crate::color::Rgb;
use crate::mapper::{TemperatureBand, VisualAttributes};
use crate::params::CelestialBodyParameters;

/// Read-only facts about the body, formatted for display.
#[derive(Clone, Debug, PartialEq)]
pub struct InfoOverlay {
    pub name: Option<String>,
    /// e.g. `"2.4× Earth"`
    pub size: String,
    /// e.g. `"262K"`
    pub temperature: String,
    /// e.g. `"289.9 days"`
    pub year: String,
    /// Classification label.
    pub kind: &'static str,
}

impl InfoOverlay {
    #[must_use]
    pub fn new(params: &CelestialBodyParameters, attrs: &VisualAttributes) -> Self {
        Self {
            name: params.name.clone(),
            size: format!("{:.1}× Earth", params.radius()),
            temperature: format!("{:.0}K", params.equilibrium_temperature()),
            year: format!("{:.1} days", params.orbital_period()),
            kind: attrs.classification.label(),
        }
    }

    /// `"Label: value"` lines in display order.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(5);
        if let Some(name) = &self.name {
            lines.push(format!("Name: {name}"));
        }
        lines.push(format!("Size: {}", self.size));
        lines.push(format!("Temperature: {}", self.temperature));
        lines.push(format!("Year: {}", self.year));
        lines.push(format!("Type: {}", self.kind));
        lines
    }

    /// One-line summary suitable for a window title.
    #[must_use]
    pub fn title(&self) -> String {
        let facts = format!(
            "{} | {} | {} | {}",
            self.size, self.temperature, self.year, self.kind
        );
        match &self.name {
            Some(name) => format!("{name} | {facts}"),
            None => facts,
        }
    }
}

/// One row of the color legend.
#[derive(Clone, Debug, PartialEq)]
pub struct LegendEntry {
    pub band: TemperatureBand,
    pub color: Rgb,
    /// e.g. `"Cold (200-300K)"`
    pub text: String,
}

/// The temperature color legend, coldest band first.
#[must_use]
pub fn color_legend() -> Vec<LegendEntry> {
    TemperatureBand::ALL
        .iter()
        .map(|&band| {
            let range = match band.bounds() {
                (None, Some(upper)) => format!("< {upper}K"),
                (Some(lower), Some(upper)) => format!("{lower}-{upper}K"),
                (Some(lower), None) => format!("> {lower}K"),
                (None, None) => String::from("any"),
            };
            LegendEntry {
                band,
                color: band.color(),
                text: format!("{} ({range})", band.label()),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapper::map_to_visual_attributes;

    #[test]
    fn test_overlay_formatting() {
        let params = CelestialBodyParameters {
            name: Some("Kepler-22 b".to_string()),
            radius: Some(2.38),
            equilibrium_temperature: Some(262.0),
            orbital_period: Some(289.8623),
            ..Default::default()
        };
        let overlay = InfoOverlay::new(&params, &map_to_visual_attributes(&params));
        assert_eq!(overlay.size, "2.4× Earth");
        assert_eq!(overlay.temperature, "262K");
        assert_eq!(overlay.year, "289.9 days");
        assert_eq!(overlay.kind, "Sub-Neptune");
        assert_eq!(
            overlay.lines(),
            vec![
                "Name: Kepler-22 b",
                "Size: 2.4× Earth",
                "Temperature: 262K",
                "Year: 289.9 days",
                "Type: Sub-Neptune",
            ]
        );
        assert!(overlay.title().starts_with("Kepler-22 b | 2.4× Earth"));
    }

    #[test]
    fn test_overlay_defaults() {
        let params = CelestialBodyParameters::default();
        let overlay = InfoOverlay::new(&params, &map_to_visual_attributes(&params));
        assert_eq!(overlay.size, "1.0× Earth");
        assert_eq!(overlay.temperature, "300K");
        assert_eq!(overlay.year, "365.0 days");
        assert_eq!(overlay.kind, "Rocky Planet");
        assert_eq!(overlay.lines().len(), 4);
        assert_eq!(overlay.title(), "1.0× Earth | 300K | 365.0 days | Rocky Planet");
    }

    #[test]
    fn test_legend_rows() {
        let legend = color_legend();
        let texts: Vec<&str> = legend.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(
            texts,
            vec![
                "Frozen (< 200K)",
                "Cold (200-300K)",
                "Cool (300-400K)",
                "Warm (400-600K)",
                "Hot (600-1000K)",
                "Extreme (> 1000K)",
            ]
        );
        assert_eq!(legend[0].color, Rgb::from_hex(0x4169E1));
        assert_eq!(legend[5].color, Rgb::from_hex(0xFF0000));
    }
}
