/// Headless scenario tracer
///
/// Loads visibility scenarios from JSON and prints the swept fan wedge by
/// wedge, with probe outcomes, for inspecting a scene without the viewer

use sightline::scenario::{fan_coverage, Scenario};
use std::env;
use std::path::Path;
use std::process;

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <scenario.json> [more.json ...]", args[0]);
        eprintln!("Traces each scenario and prints its visibility fan");
        process::exit(1);
    }

    let mut failures = 0;
    for arg in &args[1..] {
        if let Err(e) = trace(Path::new(arg)) {
            eprintln!("{}: {}", arg, e);
            failures += 1;
        }
    }

    if failures > 0 {
        process::exit(1);
    }
}

fn trace(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let scenario = Scenario::load(path)?;
    let mut vis = scenario.build()?;
    vis.sweep_full()?;

    println!("=== Scenario: {} ===", scenario.name);
    println!(
        "map {}x{} margin {}, {} blocks, {} walls, {} segments",
        scenario.size,
        scenario.size,
        scenario.margin,
        scenario.blocks.len(),
        scenario.walls.len(),
        vis.segments().len()
    );
    println!("light at ({}, {})\n", scenario.light.x, scenario.light.y);

    let center = vis.center();
    for (i, (a, b)) in vis.triangles().enumerate() {
        let a1 = (a.y - center.y).atan2(a.x - center.x);
        let a2 = (b.y - center.y).atan2(b.x - center.x);
        println!(
            "wedge {:3}: [{:+.4} rad -> {:+.4} rad] corners ({:.2}, {:.2}) ({:.2}, {:.2})",
            i, a1, a2, a.x, a.y, b.x, b.y
        );
    }

    println!("\nwedges: {}", vis.output().len() / 2);
    println!("coverage: {:.6} rad", fan_coverage(&vis));

    let mut probe_failures = 0;
    for probe in &scenario.probes {
        let actual = vis.is_visible(probe.x, probe.y);
        let mark = if actual == probe.visible { "✓" } else { "✗" };
        println!(
            "{} probe ({}, {}) expected {} got {}",
            mark,
            probe.x,
            probe.y,
            if probe.visible { "visible" } else { "hidden" },
            if actual { "visible" } else { "hidden" }
        );
        if actual != probe.visible {
            probe_failures += 1;
        }
    }

    if probe_failures > 0 {
        return Err(format!("{} probe(s) failed", probe_failures).into());
    }

    Ok(())
}
