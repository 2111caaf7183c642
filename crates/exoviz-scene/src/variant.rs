//! The two renderer configurations and what distinguishes them.

use exoviz_input::{DEFAULT_RESUME_DELAY, InteractionProfile, Orientation};
use glam::Vec3;

/// Renderer configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    /// Flat-colored sphere driven by the parameter record, with optional
    /// atmosphere shell and ring.
    Exoplanet,
    /// Textured sphere against a starfield.
    DwarfPlanet,
}

/// How the body surface is shaded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MaterialStrategy {
    /// Flat `body_color` from the mapped attributes.
    ProceduralColor,
    /// Surface and bump maps.
    Textured { bump_scale: f32 },
}

/// Where the key light color and intensity come from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightingStrategy {
    /// Host-star color and insolation from the mapped attributes.
    Mapped,
    /// Fixed white light.
    Fixed { intensity: f32 },
}

/// Everything that differs between the variants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VariantDescriptor {
    pub variant: Variant,
    pub material: MaterialStrategy,
    pub lighting: LightingStrategy,
    /// Key light position. The light points from here at the origin.
    pub light_position: Vec3,
    pub ambient_intensity: f32,
    /// Whether an atmosphere shell may be added.
    pub allows_atmosphere: bool,
    /// Whether a ring may be added.
    pub allows_rings: bool,
    pub has_starfield: bool,
    /// Drag sensitivity, auto-rotate axes and resume delay.
    pub interaction: InteractionProfile,
}

impl Variant {
    pub const ALL: [Variant; 2] = [Variant::Exoplanet, Variant::DwarfPlanet];

    #[must_use]
    pub fn descriptor(self) -> VariantDescriptor {
        match self {
            Variant::Exoplanet => VariantDescriptor {
                variant: self,
                material: MaterialStrategy::ProceduralColor,
                lighting: LightingStrategy::Mapped,
                light_position: Vec3::new(5.0, 5.0, 5.0),
                ambient_intensity: 0.4,
                allows_atmosphere: true,
                allows_rings: true,
                has_starfield: false,
                interaction: InteractionProfile {
                    drag_sensitivity: 0.01,
                    auto_rotate: Orientation::new(0.003, 0.0, 0.0),
                    resume_delay: DEFAULT_RESUME_DELAY,
                },
            },
            Variant::DwarfPlanet => VariantDescriptor {
                variant: self,
                material: MaterialStrategy::Textured { bump_scale: 0.02 },
                lighting: LightingStrategy::Fixed { intensity: 0.8 },
                light_position: Vec3::new(5.0, 3.0, 5.0),
                ambient_intensity: 0.6,
                allows_atmosphere: false,
                allows_rings: false,
                has_starfield: true,
                interaction: InteractionProfile {
                    drag_sensitivity: 0.005,
                    auto_rotate: Orientation::new(0.008, 0.008 * 0.3, 0.008 * 0.2),
                    resume_delay: DEFAULT_RESUME_DELAY,
                },
            },
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Variant::Exoplanet => "exoplanet",
            Variant::DwarfPlanet => "dwarf planet",
        }
    }
}

impl VariantDescriptor {
    /// Same descriptor with a different resume delay.
    #[must_use]
    pub fn with_resume_delay(mut self, delay: std::time::Duration) -> Self {
        self.interaction.resume_delay = delay;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exoplanet_descriptor() {
        let d = Variant::Exoplanet.descriptor();
        assert_eq!(d.material, MaterialStrategy::ProceduralColor);
        assert_eq!(d.interaction.drag_sensitivity, 0.01);
        assert_eq!(d.interaction.auto_rotate, Orientation::new(0.003, 0.0, 0.0));
        assert!(!d.has_starfield);
        assert!(d.allows_rings && d.allows_atmosphere);
    }

    #[test]
    fn test_dwarf_descriptor_rotates_three_axes() {
        let d = Variant::DwarfPlanet.descriptor();
        assert_eq!(d.interaction.drag_sensitivity, 0.005);
        let r = d.interaction.auto_rotate;
        assert!((r.yaw - 0.008).abs() < 1e-7);
        assert!((r.pitch - 0.0024).abs() < 1e-7);
        assert!((r.roll - 0.0016).abs() < 1e-7);
        assert_eq!(d.lighting, LightingStrategy::Fixed { intensity: 0.8 });
        assert!(d.has_starfield);
    }

    #[test]
    fn test_resume_delay_override() {
        let d = Variant::Exoplanet
            .descriptor()
            .with_resume_delay(std::time::Duration::from_millis(10));
        assert_eq!(d.interaction.resume_delay.as_millis(), 10);
    }
}
