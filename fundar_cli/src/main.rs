//! # Fundar CLI
//!
//! Terminal demo for the soil-profile query surface. Runs the aggregate
//! queries of `fundar_core` against a built-in layered column; the full
//! design search needs a physics oracle and runs through the library API.

use std::io::{self, BufRead, Write};

use fundar_core::site::{Site, TowerRecord};
use fundar_core::soil::{Profile, Stratum};
use fundar_core::tower::Tower;

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return default;
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default;
    }

    input.trim().parse().unwrap_or(default)
}

fn demo_profile() -> Profile {
    Profile::new(
        vec![
            Stratum::granular(2.0, 18.0, 20_000.0, 30.0),
            Stratum::cohesive(3.0, 17.5, 4_500.0, 35.0, 110.0),
            Stratum::granular(2.0, 19.0, 30_000.0, 34.0),
            Stratum::rock(5.0, 24.0, 900_000.0, 75.0, 28_000.0),
        ],
        Some(2.0),
        18.0,
    )
    .expect("demo profile is well-formed")
}

fn main() {
    println!("Fundar CLI - Soil Profile Explorer");
    println!("==================================");
    println!();

    let mut site = Site::new("Demo line section", "Fundar");
    let tower = Tower::new("T-1", 0.4, 1.8).with_stub_tilt(6.8);
    let id = site.add_tower(TowerRecord::new(tower, demo_profile()));
    let record = &site.towers[&id];
    let profile = &record.profile;

    println!(
        "Site '{}', tower {} (TP = {:.1} m)",
        site.meta.name,
        record.tower.name,
        record.tower.pedestal_side_m(0.05)
    );
    println!("Demo profile ({} m deep):", profile.total_depth_m());
    print!("{}", profile.describe());
    match profile.water_table_m() {
        Some(wt) => println!("Water table at {:.2} m", wt),
        None => println!("No water table"),
    }
    match profile.rock_depth_m() {
        Some(rd) => println!("Rock contact at {:.2} m", rd),
        None => println!("No rock in the column"),
    }
    println!();

    let d1 = prompt_f64("Query window start (m) [0.0]: ", 0.0);
    let d2 = prompt_f64("Query window end (m) [7.0]: ", 7.0);
    println!();

    match profile.material_percentages(d1, d2) {
        Ok(pct) => {
            println!("Composition over [{:.1}, {:.1}] m:", d1, d2);
            println!("  cohesive {:6.1} %", pct.cohesive);
            println!("  granular {:6.1} %", pct.granular);
            println!("  rock     {:6.1} %", pct.rock);
        }
        Err(e) => {
            println!("Composition query failed: {}", e);
            return;
        }
    }
    if let Ok(predominant) = profile.predominant_material(d1, d2) {
        println!("Predominant material: {}", predominant.display_name());
    }
    println!();

    let depth = prompt_f64("Footing depth for backfill derivation (m) [4.0]: ", 4.0);
    match profile.backfill_material(depth) {
        Ok(fill) => {
            println!();
            println!("Backfill above a base at {:.1} m:", depth);
            println!("  class        {}", fill.material.display_name());
            if let Some(phi) = fill.friction_angle_deg {
                println!("  φ            {:.1}°", phi);
            }
            if let Some(cu) = fill.undrained_cohesion_kpa {
                println!("  c_u          {:.1} kPa", cu);
            }
            println!("  unit weight  {:.2} kN/m³", fill.unit_weight_kn_m3);
        }
        Err(e) => println!("Backfill derivation failed: {}", e),
    }
}
