//! Command line front-end over `vincenty-core`.
//!
//! Run with:
//!   cargo run -p vincenty -- --from "48.8566, 2.3522" --to "51.5074, -0.1278" --azimuths

mod logger;

use anyhow::{Context as _, Result};
use clap::Parser;
use vincenty_core::{
    Azimuths, Ellipsoid, GeoPoint, InverseSolver, LengthUnit, SolverConfig,
    defaults::{DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE},
};

/// Ellipsoidal distance and azimuths between two points (Vincenty inverse).
#[derive(Parser, Debug)]
#[command(version)]
struct Command {
    /// start point, `<latitude>, <longitude>` in decimal degrees
    #[arg(long, allow_hyphen_values = true)]
    from: GeoPoint,

    /// end point, `<latitude>, <longitude>` in decimal degrees
    #[arg(long, allow_hyphen_values = true)]
    to: GeoPoint,

    /// convergence threshold on λ, in radians
    #[arg(long, default_value_t = DEFAULT_TOLERANCE)]
    tolerance: f64,

    #[arg(long, default_value_t = DEFAULT_MAX_ITERATIONS)]
    max_iterations: u32,

    /// `wgs84` or `grs80`
    #[arg(long, default_value = "wgs84")]
    ellipsoid: Ellipsoid,

    /// `m`, `km` or `nmi`
    #[arg(long, default_value = "m")]
    unit: LengthUnit,

    /// also print the initial and final azimuths
    #[arg(long)]
    azimuths: bool,

    /// increase logging verbosity (repeatable)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Command {
    fn solver(&self) -> Result<InverseSolver> {
        let config = SolverConfig::new(self.tolerance, self.max_iterations);
        config.validate().context("Invalid solver configuration")?;

        Ok(InverseSolver::new(self.ellipsoid, config))
    }
}

fn main() -> Result<()> {
    let cmd = Command::parse();
    logger::init(cmd.verbose)?;

    let solver = cmd.solver()?;
    log::info!(
        "solving {} -> {} on {} (tolerance {:e}, max {} iterations)",
        cmd.from,
        cmd.to,
        solver.ellipsoid(),
        solver.config().tolerance,
        solver.config().max_iterations,
    );

    let report = if cmd.azimuths {
        let (distance, azimuths) = solver
            .solve(cmd.from, cmd.to)
            .with_context(|| format!("Failed to solve {} -> {}", cmd.from, cmd.to))?;
        format_report(distance, Some(azimuths), cmd.unit)
    } else {
        let distance = solver
            .distance(cmd.from, cmd.to)
            .with_context(|| format!("Failed to solve {} -> {}", cmd.from, cmd.to))?;
        format_report(distance, None, cmd.unit)
    };

    println!("{report}");

    Ok(())
}

fn format_report(distance: f64, azimuths: Option<Azimuths>, unit: LengthUnit) -> String {
    let mut report = format!("distance: {:.3} {unit}", unit.from_meters(distance));

    if let Some(azimuths) = azimuths {
        report.push_str(&format!(
            "\ninitial azimuth: {}\nfinal azimuth: {}",
            format_azimuth(azimuths.initial_azimuth),
            format_azimuth(azimuths.final_azimuth),
        ));
    }

    report
}

fn format_azimuth(radians: f64) -> String {
    if radians.is_nan() {
        "undefined".to_string()
    } else {
        format!("{:.6}º", radians.to_degrees())
    }
}
