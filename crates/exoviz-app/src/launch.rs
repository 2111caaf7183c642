//! Turning command-line arguments into what the app mounts.

use exoviz_config::{CliArgs, VariantChoice};
use exoviz_params::{CelestialBodyParameters, ParamsError};
use exoviz_scene::Variant;

/// Variants to open, one window each.
#[must_use]
pub fn variants_for(choice: VariantChoice) -> Vec<Variant> {
    match choice {
        VariantChoice::Exoplanet => vec![Variant::Exoplanet],
        VariantChoice::DwarfPlanet => vec![Variant::DwarfPlanet],
        VariantChoice::Both => Variant::ALL.to_vec(),
    }
}

/// The record to visualize.
///
/// Starts from the `--params` file when given, then lets the individual
/// body flags override single fields.
pub fn params_from_args(args: &CliArgs) -> Result<CelestialBodyParameters, ParamsError> {
    let mut params = match &args.params {
        Some(path) => CelestialBodyParameters::from_json_file(path)?,
        None => CelestialBodyParameters::default(),
    };

    if let Some(name) = &args.name {
        params.name = Some(name.clone());
    }
    let overrides = [
        (&mut params.radius, args.radius),
        (&mut params.equilibrium_temperature, args.temperature),
        (&mut params.insolation_flux, args.insolation),
        (&mut params.stellar_effective_temperature, args.stellar_temperature),
        (&mut params.orbital_period, args.period),
    ];
    for (field, value) in overrides {
        if value.is_some() {
            *field = value;
        }
    }
    Ok(params)
}
