//! Sidereal Chart Information Tool
//!
//! This binary computes a chart over the built-in synthetic ephemeris and
//! prints planetary positions, lunar mansions, aspects, and divisional
//! charts for a given instant and ayanamsa system.
//!
//! Usage:
//!   cargo run --bin chart_info -- --date 2024-03-21T06:30:00 --system lahiri
//!   cargo run --bin chart_info -- --system kp --divisions D1,D9,D12 --json

use chrono::NaiveDateTime;
use clap::{ArgAction, Parser};
use siderea::{
    compute_chart, AyanamsaEngine, AyanamsaSystem, Body, Chart, SyntheticEphemeris,
};

/// Type alias for the error type used throughout this module
type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Sidereal Chart Information Tool
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Computes sidereal chart data over the built-in synthetic ephemeris",
    long_about = None
)]
struct Args {
    /// Chart instant in ISO format (YYYY-MM-DDTHH:MM:SS), UTC
    #[arg(short, long, default_value = "2024-01-01T00:00:00")]
    date: String,

    /// Ayanamsa system (lahiri, raman, krishnamurti/kp, yukteshwar, ...)
    #[arg(short, long, default_value = "lahiri")]
    system: String,

    /// Comma-separated divisional chart ids, e.g. D1,D9,D12 (default: all)
    #[arg(long)]
    divisions: Option<String>,

    /// Also list the ayanamsa under every supported system
    #[arg(long, action = ArgAction::SetTrue)]
    compare: bool,

    /// Emit the chart as JSON instead of tables
    #[arg(long, action = ArgAction::SetTrue)]
    json: bool,
}

/// Prints a section header with a title and separator line
fn print_section_header(title: &str) {
    println!("\n{}:", title);
    println!("-------------------------------------------------------");
}

fn display_positions(chart: &Chart) {
    print_section_header("Planetary Positions (sidereal)");
    println!(
        "{:<9} {:>12} {:>10} {:>10}  {:<2} {:<18} {:<4}",
        "Body", "Longitude", "Latitude", "Speed", "", "Nakshatra", "Pada"
    );

    for (body, position) in chart.positions.iter() {
        let retro = if position.speed.is_retrograde { "R" } else { "" };
        let mansion = chart
            .nakshatras
            .iter()
            .find(|(b, _)| b == body)
            .map(|(_, placement)| (placement.name, placement.pada));

        let (name, pada) = mansion.unwrap_or(("", 0));
        println!(
            "{:<9} {:>12.6} {:>10.6} {:>10.4}  {:<2} {:<18} {:<4}",
            body.name(),
            position.longitude,
            position.latitude,
            position.speed.degrees_per_day,
            retro,
            name,
            pada
        );
    }
}

fn display_aspects(chart: &Chart) {
    print_section_header(format!("Aspects ({} found)", chart.aspects.len()).as_str());
    for aspect in &chart.aspects {
        let motion = if aspect.is_applying {
            "applying"
        } else {
            "separating"
        };
        let weight = if aspect.is_major { "major" } else { "minor" };
        println!(
            "{:<9} {:<14} {:<9} orb {:>5.2}  {} ({})",
            aspect.body1.name(),
            aspect.kind.name(),
            aspect.body2.name(),
            aspect.orb,
            motion,
            weight
        );
    }
}

fn display_divisional(chart: &Chart) {
    print_section_header("Divisional Charts");
    for (body, charts) in &chart.divisional {
        let row: Vec<String> = charts
            .iter()
            .map(|c| format!("{}={:.2}", c.division, c.longitude))
            .collect();
        println!("{:<9} {}", body.name(), row.join("  "));
    }
}

fn display_comparison(eph: &SyntheticEphemeris, when: &NaiveDateTime) {
    print_section_header("Ayanamsa by System");
    for (system, degrees) in AyanamsaEngine::new().compare_systems(eph, when) {
        println!("{:<16} {:>10.6}  {}", system.name(), degrees, system.description());
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let when = NaiveDateTime::parse_from_str(&args.date, "%Y-%m-%dT%H:%M:%S")?;
    let system: AyanamsaSystem = args.system.parse()?;
    let division_list: Option<Vec<&str>> = args
        .divisions
        .as_deref()
        .map(|raw| raw.split(',').map(str::trim).collect());

    let eph = SyntheticEphemeris::new();
    let chart = compute_chart(&eph, &when, system, division_list.as_deref(), None)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&chart)?);
        return Ok(());
    }

    println!("Sidereal chart for {} (JD {:.5})", args.date, chart.julian_day);
    println!("-------------------------------------------------------");
    println!(
        "Ayanamsa: {:.6} deg ({}, {})",
        chart.ayanamsa.degrees,
        system.name(),
        system.description()
    );

    if args.compare {
        display_comparison(&eph, &when);
    }

    display_positions(&chart);
    display_aspects(&chart);
    display_divisional(&chart);

    println!("\nBodies covered: {}", Body::ALL.len());
    Ok(())
}
