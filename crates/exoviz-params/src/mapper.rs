//! Physical measurements to visual attributes.
//!
//! All bucket tables are inclusive at the lower bound and exclusive at the
//! upper bound: a body at exactly 200 K is `Cold`, not `Frozen`.

use crate::color::Rgb;
use crate::params::CelestialBodyParameters;

/// Scale from Earth radii to on-screen sphere radius before clamping.
pub const RADIUS_SCALE: f64 = 0.8;
/// Smallest sphere radius drawn.
pub const MIN_VISUAL_RADIUS: f64 = 1.0;
/// Largest sphere radius drawn.
pub const MAX_VISUAL_RADIUS: f64 = 7.0;
/// Bodies with a visual radius above this get an atmosphere shell.
pub const ATMOSPHERE_VISUAL_RADIUS: f64 = 2.0;
/// Bodies with a raw radius (Earth radii) above this get a ring.
pub const RING_RADIUS: f64 = 3.0;

/// Ambient fill light color shared by every variant.
pub const AMBIENT_COLOR: Rgb = Rgb::from_hex(0x404040);

/// Surface temperature class of the body, which picks its tint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TemperatureBand {
    Frozen,
    Cold,
    Cool,
    Warm,
    Hot,
    Extreme,
}

impl TemperatureBand {
    /// Every band, coldest first.
    pub const ALL: [TemperatureBand; 6] = [
        TemperatureBand::Frozen,
        TemperatureBand::Cold,
        TemperatureBand::Cool,
        TemperatureBand::Warm,
        TemperatureBand::Hot,
        TemperatureBand::Extreme,
    ];

    /// Bucket an equilibrium temperature in Kelvin.
    #[must_use]
    pub fn from_kelvin(kelvin: f64) -> Self {
        match kelvin {
            t if t < 200.0 => TemperatureBand::Frozen,
            t if t < 300.0 => TemperatureBand::Cold,
            t if t < 400.0 => TemperatureBand::Cool,
            t if t < 600.0 => TemperatureBand::Warm,
            t if t < 1000.0 => TemperatureBand::Hot,
            _ => TemperatureBand::Extreme,
        }
    }

    /// Body tint for this band.
    #[must_use]
    pub const fn color(self) -> Rgb {
        match self {
            TemperatureBand::Frozen => Rgb::from_hex(0x4169E1),
            TemperatureBand::Cold => Rgb::from_hex(0x87CEEB),
            TemperatureBand::Cool => Rgb::from_hex(0x90EE90),
            TemperatureBand::Warm => Rgb::from_hex(0xFFD700),
            TemperatureBand::Hot => Rgb::from_hex(0xFF4500),
            TemperatureBand::Extreme => Rgb::from_hex(0xFF0000),
        }
    }

    /// Plain-language name of [`Self::color`].
    #[must_use]
    pub const fn color_name(self) -> &'static str {
        match self {
            TemperatureBand::Frozen => "frozen blue",
            TemperatureBand::Cold => "light blue",
            TemperatureBand::Cool => "light green",
            TemperatureBand::Warm => "gold",
            TemperatureBand::Hot => "orange-red",
            TemperatureBand::Extreme => "red",
        }
    }

    /// Legend label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            TemperatureBand::Frozen => "Frozen",
            TemperatureBand::Cold => "Cold",
            TemperatureBand::Cool => "Cool",
            TemperatureBand::Warm => "Warm",
            TemperatureBand::Hot => "Hot",
            TemperatureBand::Extreme => "Extreme",
        }
    }

    /// `(lower, upper)` bounds in Kelvin; `None` means unbounded.
    #[must_use]
    pub const fn bounds(self) -> (Option<u32>, Option<u32>) {
        match self {
            TemperatureBand::Frozen => (None, Some(200)),
            TemperatureBand::Cold => (Some(200), Some(300)),
            TemperatureBand::Cool => (Some(300), Some(400)),
            TemperatureBand::Warm => (Some(400), Some(600)),
            TemperatureBand::Hot => (Some(600), Some(1000)),
            TemperatureBand::Extreme => (Some(1000), None),
        }
    }
}

/// Host star class by effective temperature, which picks the key light color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StellarClass {
    RedDwarf,
    Orange,
    White,
    BlueWhite,
}

impl StellarClass {
    /// Bucket a stellar effective temperature in Kelvin.
    #[must_use]
    pub fn from_kelvin(kelvin: f64) -> Self {
        match kelvin {
            t if t < 3500.0 => StellarClass::RedDwarf,
            t if t < 5000.0 => StellarClass::Orange,
            t if t < 6000.0 => StellarClass::White,
            _ => StellarClass::BlueWhite,
        }
    }

    /// Directional light color for this class.
    #[must_use]
    pub const fn light_color(self) -> Rgb {
        match self {
            StellarClass::RedDwarf => Rgb::from_hex(0xFF4500),
            StellarClass::Orange => Rgb::from_hex(0xFFA500),
            StellarClass::White => Rgb::WHITE,
            StellarClass::BlueWhite => Rgb::from_hex(0x87CEEB),
        }
    }

    #[must_use]
    pub const fn color_name(self) -> &'static str {
        match self {
            StellarClass::RedDwarf => "red-dwarf red",
            StellarClass::Orange => "orange",
            StellarClass::White => "white",
            StellarClass::BlueWhite => "blue-white",
        }
    }
}

/// Display classification of the body by its visual radius.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlanetClass {
    Rocky,
    SubNeptune,
    GasGiant,
    SuperGiant,
}

impl PlanetClass {
    /// Classify by visual radius: `< 1.5`, `< 4`, `< 10`, else the largest class.
    #[must_use]
    pub fn from_visual_radius(visual_radius: f32) -> Self {
        match visual_radius {
            r if r < 1.5 => PlanetClass::Rocky,
            r if r < 4.0 => PlanetClass::SubNeptune,
            r if r < 10.0 => PlanetClass::GasGiant,
            _ => PlanetClass::SuperGiant,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            PlanetClass::Rocky => "Rocky Planet",
            PlanetClass::SubNeptune => "Sub-Neptune",
            PlanetClass::GasGiant => "Gas Giant",
            PlanetClass::SuperGiant => "Super Giant",
        }
    }
}

/// Everything the scene builder needs to know about a body's appearance.
#[derive(Clone, Debug, PartialEq)]
pub struct VisualAttributes {
    /// Sphere radius in scene units.
    pub visual_radius: f32,
    /// Surface tint.
    pub body_color: Rgb,
    /// Band that produced `body_color`.
    pub temperature_band: TemperatureBand,
    /// Whether a translucent atmosphere shell is drawn.
    pub has_atmosphere: bool,
    /// Whether a ring is drawn. Decided on the raw radius.
    pub has_rings: bool,
    /// Key light color.
    pub light_color: Rgb,
    /// Class that produced `light_color`.
    pub stellar_class: StellarClass,
    /// Key light intensity, the insolation flux taken as-is.
    pub light_intensity: f32,
    /// Display classification; never used for scene construction.
    pub classification: PlanetClass,
}

/// `clamp(radius * 0.8, 1.0, 7.0)` for a radius in Earth radii.
#[must_use]
pub fn visual_radius(radius: f64) -> f32 {
    scaled_radius(radius) as f32
}

fn scaled_radius(radius: f64) -> f64 {
    (radius * RADIUS_SCALE).clamp(MIN_VISUAL_RADIUS, MAX_VISUAL_RADIUS)
}

/// Derive the visual attributes of a body. Never fails.
#[must_use]
pub fn map_to_visual_attributes(params: &CelestialBodyParameters) -> VisualAttributes {
    let radius = params.radius();
    let scaled = scaled_radius(radius);
    let visual_radius = scaled as f32;
    let temperature_band = TemperatureBand::from_kelvin(params.equilibrium_temperature());
    let stellar_class = StellarClass::from_kelvin(params.stellar_effective_temperature());

    VisualAttributes {
        visual_radius,
        body_color: temperature_band.color(),
        temperature_band,
        has_atmosphere: scaled > ATMOSPHERE_VISUAL_RADIUS,
        has_rings: radius > RING_RADIUS,
        light_color: stellar_class.light_color(),
        stellar_class,
        light_intensity: params.insolation_flux() as f32,
        classification: PlanetClass::from_visual_radius(visual_radius),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(radius: Option<f64>, temperature: Option<f64>) -> CelestialBodyParameters {
        CelestialBodyParameters {
            radius,
            equilibrium_temperature: temperature,
            ..Default::default()
        }
    }

    #[test]
    fn test_scenario_small_cold_planet() {
        let attrs = map_to_visual_attributes(&params(Some(1.2), Some(250.0)));
        assert_eq!(attrs.visual_radius, 1.0);
        assert_eq!(attrs.temperature_band.color_name(), "light blue");
        assert!(!attrs.has_rings);
        assert!(!attrs.has_atmosphere);
    }

    #[test]
    fn test_scenario_ringed_frozen_giant() {
        let attrs = map_to_visual_attributes(&params(Some(5.0), Some(150.0)));
        assert_eq!(attrs.visual_radius, 4.0);
        assert_eq!(attrs.temperature_band.color_name(), "frozen blue");
        assert_eq!(attrs.body_color, Rgb::from_hex(0x4169E1));
        assert!(attrs.has_rings);
        assert!(attrs.has_atmosphere);
    }

    #[test]
    fn test_scenario_all_fields_missing() {
        let attrs = map_to_visual_attributes(&CelestialBodyParameters::default());
        assert_eq!(attrs.visual_radius, 1.0);
        assert_eq!(attrs.temperature_band.color_name(), "light green");
        assert!(!attrs.has_rings);
        assert!(!attrs.has_atmosphere);
        assert_eq!(attrs.stellar_class, StellarClass::White);
        assert_eq!(attrs.light_intensity, 1.0);
    }

    #[test]
    fn test_visual_radius_clamps_and_is_monotonic() {
        assert_eq!(visual_radius(0.1), 1.0);
        assert_eq!(visual_radius(100.0), 7.0);
        let mut previous = 0.0;
        for step in 1..=120 {
            let radius = f64::from(step) * 0.1;
            let r = visual_radius(radius);
            let expected = (radius * 0.8).clamp(1.0, 7.0) as f32;
            assert_eq!(r, expected);
            assert!(r >= previous, "not monotonic at radius {radius}");
            previous = r;
        }
    }

    #[test]
    fn test_rings_use_raw_radius() {
        // 3.1 Earth radii is only 2.48 visual, yet ringed.
        let attrs = map_to_visual_attributes(&params(Some(3.1), None));
        assert!(attrs.has_rings);
        assert!(attrs.visual_radius < 3.0);

        // Exactly 3 is not above the threshold.
        assert!(!map_to_visual_attributes(&params(Some(3.0), None)).has_rings);

        // 20 Earth radii clamps to 7 visual and stays ringed.
        let attrs = map_to_visual_attributes(&params(Some(20.0), None));
        assert_eq!(attrs.visual_radius, 7.0);
        assert!(attrs.has_rings);
    }

    #[test]
    fn test_atmosphere_uses_visual_radius() {
        // 2.5 * 0.8 = 2.0, not above 2.
        assert!(!map_to_visual_attributes(&params(Some(2.5), None)).has_atmosphere);
        // 2.6 * 0.8 = 2.08.
        let attrs = map_to_visual_attributes(&params(Some(2.6), None));
        assert!(attrs.has_atmosphere);
        assert!(!attrs.has_rings);
    }

    #[test]
    fn test_atmosphere_threshold_before_narrowing() {
        // 2.00000008 rounds to 2.0 as f32 but is still above the threshold.
        let attrs = map_to_visual_attributes(&params(Some(2.500_000_1), None));
        assert_eq!(attrs.visual_radius, 2.0);
        assert!(attrs.has_atmosphere);
    }

    #[test]
    fn test_temperature_boundaries_inclusive_lower() {
        let cases = [
            (199.9, TemperatureBand::Frozen),
            (200.0, TemperatureBand::Cold),
            (299.0, TemperatureBand::Cold),
            (300.0, TemperatureBand::Cool),
            (400.0, TemperatureBand::Warm),
            (599.9, TemperatureBand::Warm),
            (600.0, TemperatureBand::Hot),
            (999.0, TemperatureBand::Hot),
            (1000.0, TemperatureBand::Extreme),
        ];
        for (kelvin, band) in cases {
            assert_eq!(TemperatureBand::from_kelvin(kelvin), band, "{kelvin} K");
        }
        assert_eq!(TemperatureBand::from_kelvin(1000.0).color_name(), "red");
    }

    #[test]
    fn test_band_bounds_agree_with_bucketing() {
        for band in TemperatureBand::ALL {
            if let (Some(lower), _) = band.bounds() {
                assert_eq!(TemperatureBand::from_kelvin(f64::from(lower)), band);
            }
            if let (_, Some(upper)) = band.bounds() {
                assert_ne!(TemperatureBand::from_kelvin(f64::from(upper)), band);
            }
        }
    }

    #[test]
    fn test_stellar_boundaries() {
        let cases = [
            (3499.0, StellarClass::RedDwarf),
            (3500.0, StellarClass::Orange),
            (4999.0, StellarClass::Orange),
            (5000.0, StellarClass::White),
            (5778.0, StellarClass::White),
            (6000.0, StellarClass::BlueWhite),
        ];
        for (kelvin, class) in cases {
            assert_eq!(StellarClass::from_kelvin(kelvin), class, "{kelvin} K");
        }
        assert_eq!(StellarClass::RedDwarf.light_color(), Rgb::from_hex(0xFF4500));
        assert_eq!(StellarClass::BlueWhite.light_color(), Rgb::from_hex(0x87CEEB));
    }

    #[test]
    fn test_light_intensity_is_insolation() {
        let p = CelestialBodyParameters {
            insolation_flux: Some(2.5),
            ..Default::default()
        };
        assert_eq!(map_to_visual_attributes(&p).light_intensity, 2.5);
    }

    #[test]
    fn test_classification_bands() {
        assert_eq!(PlanetClass::from_visual_radius(1.0), PlanetClass::Rocky);
        assert_eq!(PlanetClass::from_visual_radius(1.5), PlanetClass::SubNeptune);
        assert_eq!(PlanetClass::from_visual_radius(4.0), PlanetClass::GasGiant);
        assert_eq!(PlanetClass::from_visual_radius(10.0), PlanetClass::SuperGiant);
        assert_eq!(PlanetClass::SubNeptune.label(), "Sub-Neptune");
    }
}
