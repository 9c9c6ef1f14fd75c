use std::env;

use heliorbit::params::EvaluationParams;
use heliorbit::planets::planets;
use heliorbit::scene::Scene;
use heliorbit::time::{now, parse_epoch};
use heliorbit::HeliorbitError;

/// Print the planets' positions at an epoch, then the full scene as JSON on stdout.
///
/// Usage:
///   planet_positions [<ISO epoch>] [--json]
fn main() -> Result<(), HeliorbitError> {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let json = args.iter().any(|a| a == "--json");
    let epoch = match args.iter().find(|a| !a.starts_with("--")) {
        Some(iso) => parse_epoch(iso)?,
        None => now()?,
    };
    let params = EvaluationParams::default();

    if json {
        let mut scene = Scene::new();
        scene.add_planets(epoch, &params)?;
        scene.add_sun();
        println!("{}", scene.to_json()?);
        return Ok(());
    }

    println!("Planet positions at {epoch} (ecliptic J2000, AU)");
    for planet in planets() {
        let state = planet.position_at(epoch, &params)?;
        let (x, y, z, r) = state.xyzr();
        println!(
            "{:<8} X = {x:>9.4}  Y = {y:>9.4}  Z = {z:>8.4}  r = {r:>8.4}",
            planet.name
        );
    }
    Ok(())
}
