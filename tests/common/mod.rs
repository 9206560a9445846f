use sightline::scenario::{LightPos, Probe, Scenario};
use sightline::{Block, Wall};

/// Mirror a scenario left-right about the map's vertical midline.
/// Visibility is mirror invariant, so probe expectations carry over.
pub fn flip_scenario_horizontal(s: &Scenario) -> Scenario {
    let size = s.size;
    Scenario {
        name: format!("{}_h_flip", s.name),
        size,
        margin: s.margin,
        blocks: s
            .blocks
            .iter()
            .map(|b| Block::new(size - b.x, b.y, b.r))
            .collect(),
        walls: s
            .walls
            .iter()
            .map(|w| Wall::new(size - w.x1, w.y1, size - w.x2, w.y2))
            .collect(),
        light: LightPos {
            x: size - s.light.x,
            y: s.light.y,
        },
        probes: s
            .probes
            .iter()
            .map(|p| Probe {
                x: size - p.x,
                y: p.y,
                visible: p.visible,
            })
            .collect(),
    }
}

/// Mirror a scenario top-bottom about the map's horizontal midline.
pub fn flip_scenario_vertical(s: &Scenario) -> Scenario {
    let size = s.size;
    Scenario {
        name: format!("{}_v_flip", s.name),
        size,
        margin: s.margin,
        blocks: s
            .blocks
            .iter()
            .map(|b| Block::new(b.x, size - b.y, b.r))
            .collect(),
        walls: s
            .walls
            .iter()
            .map(|w| Wall::new(w.x1, size - w.y1, w.x2, size - w.y2))
            .collect(),
        light: LightPos {
            x: s.light.x,
            y: size - s.light.y,
        },
        probes: s
            .probes
            .iter()
            .map(|p| Probe {
                x: p.x,
                y: size - p.y,
                visible: p.visible,
            })
            .collect(),
    }
}

/// Mirror a scenario both ways (180 degree rotation about the center).
pub fn flip_scenario_both(s: &Scenario) -> Scenario {
    let mut flipped = flip_scenario_vertical(&flip_scenario_horizontal(s));
    flipped.name = format!("{}_hv_flip", s.name);
    flipped
}

/// Check a scenario in all four mirror orientations.
/// Returns (all_passed, failing variant and reasons if any).
pub fn check_all_variants(s: &Scenario) -> (bool, Option<String>) {
    let variants = vec![
        ("unflipped", s.clone()),
        ("h_flip", flip_scenario_horizontal(s)),
        ("v_flip", flip_scenario_vertical(s)),
        ("hv_flip", flip_scenario_both(s)),
    ];

    for (variant_name, variant) in variants {
        let report = variant.check();
        if !report.passed() {
            return (
                false,
                Some(format!("[{}] {}", variant_name, report.failures.join("; "))),
            );
        }
    }

    (true, None)
}
