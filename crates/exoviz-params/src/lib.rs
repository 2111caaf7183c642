//! Physical parameters of a celestial body and their mapping to visual attributes.
//!
//! [`CelestialBodyParameters`] is the immutable input snapshot, usually a
//! record from the exoplanet data service. [`map_to_visual_attributes`] turns
//! it into [`VisualAttributes`]: the sphere size, tint, ring and atmosphere
//! eligibility, and the color and intensity of the host star's light. The
//! mapping is total. Missing or unusable measurements fall back to defaults.

mod color;
mod mapper;
mod overlay;
mod params;

pub use color::Rgb;
pub use mapper::{
    AMBIENT_COLOR, PlanetClass, StellarClass, TemperatureBand, VisualAttributes,
    map_to_visual_attributes, visual_radius,
};
pub use overlay::{InfoOverlay, LegendEntry, color_legend};
pub use params::{
    CelestialBodyParameters, DEFAULT_EQUILIBRIUM_TEMPERATURE, DEFAULT_INSOLATION_FLUX,
    DEFAULT_ORBITAL_PERIOD, DEFAULT_RADIUS, DEFAULT_STELLAR_TEMPERATURE, ParamsError,
};
