use crate::geometry::{Block, Wall};
use crate::visibility::{MapError, Visibility};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::f64::consts::PI;
use std::fs;
use std::path::Path;

/// Light placement inside a scenario file
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LightPos {
    pub x: f64,
    pub y: f64,
}

/// A point whose visibility the scenario asserts
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Probe {
    pub x: f64,
    pub y: f64,
    pub visible: bool,
}

/// A scene plus its expectations, loaded from a JSON fixture
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub size: f64,
    #[serde(default)]
    pub margin: f64,
    #[serde(default)]
    pub blocks: Vec<Block>,
    #[serde(default)]
    pub walls: Vec<Wall>,
    pub light: LightPos,
    #[serde(default)]
    pub probes: Vec<Probe>,
}

/// Outcome of checking one scenario
#[derive(Debug)]
pub struct CheckReport {
    pub wedges: usize,
    pub failures: Vec<String>,
}

impl CheckReport {
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }
}

impl Scenario {
    /// Load a scenario from a JSON file
    pub fn load(path: &Path) -> Result<Scenario, Box<dyn Error>> {
        let contents = fs::read_to_string(path)?;
        let scenario: Scenario = serde_json::from_str(&contents)?;
        Ok(scenario)
    }

    /// Build the visibility map this scenario describes
    pub fn build(&self) -> Result<Visibility, MapError> {
        let mut vis = Visibility::new();
        vis.load_map(self.size, self.margin, &self.blocks, &self.walls)?;
        vis.set_light_location(self.light.x, self.light.y);
        Ok(vis)
    }

    /// Sweep and validate: even fan pairing, full-circle coverage, and
    /// every probe. Failures come back as plain strings for the caller
    /// to print.
    pub fn check(&self) -> CheckReport {
        let mut failures = Vec::new();

        let mut vis = match self.build() {
            Ok(vis) => vis,
            Err(e) => {
                failures.push(format!("map: {}", e));
                return CheckReport {
                    wedges: 0,
                    failures,
                };
            }
        };
        if let Err(e) = vis.sweep_full() {
            failures.push(format!("sweep: {}", e));
            return CheckReport {
                wedges: 0,
                failures,
            };
        }

        if vis.output().len() % 2 != 0 {
            failures.push(format!("odd fan length {}", vis.output().len()));
        }

        let coverage = fan_coverage(&vis);
        if (coverage - 2.0 * PI).abs() > 1e-6 {
            failures.push(format!(
                "fan covers {:.6} rad instead of the full circle",
                coverage
            ));
        }

        for probe in &self.probes {
            let actual = vis.is_visible(probe.x, probe.y);
            if actual != probe.visible {
                failures.push(format!(
                    "probe ({}, {}): expected {}, got {}",
                    probe.x,
                    probe.y,
                    visibility_word(probe.visible),
                    visibility_word(actual)
                ));
            }
        }

        CheckReport {
            wedges: vis.output().len() / 2,
            failures,
        }
    }
}

fn visibility_word(visible: bool) -> &'static str {
    if visible {
        "visible"
    } else {
        "hidden"
    }
}

/// Total angular span of the fan's wedges around the light, in radians.
/// A complete sweep of a bounded map covers the full circle.
pub fn fan_coverage(vis: &Visibility) -> f64 {
    let center = vis.center();
    vis.triangles()
        .map(|(a, b)| {
            let a1 = (a.y - center.y).atan2(a.x - center.x);
            let a2 = (b.y - center.y).atan2(b.x - center.x);
            let mut span = a2 - a1;
            if span < 0.0 {
                span += 2.0 * PI;
            }
            span
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_check_inline_scenario() {
        let json = r#"{
            "name": "inline",
            "size": 10.0,
            "light": {"x": 5.0, "y": 5.0},
            "probes": [{"x": 2.0, "y": 5.0, "visible": true}]
        }"#;
        let scenario: Scenario = serde_json::from_str(json).unwrap();
        assert_eq!(scenario.margin, 0.0);
        assert!(scenario.blocks.is_empty());

        let report = scenario.check();
        assert!(report.passed(), "failures: {:?}", report.failures);
        assert_eq!(report.wedges, 4);
    }

    #[test]
    fn test_check_reports_wrong_probe() {
        let scenario = Scenario {
            name: "wrong probe".to_string(),
            size: 10.0,
            margin: 0.0,
            blocks: Vec::new(),
            walls: Vec::new(),
            light: LightPos { x: 5.0, y: 5.0 },
            probes: vec![Probe {
                x: 2.0,
                y: 5.0,
                visible: false,
            }],
        };
        let report = scenario.check();
        assert!(!report.passed());
        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].starts_with("probe"));
    }

    #[test]
    fn test_check_reports_bad_map() {
        let scenario = Scenario {
            name: "bad map".to_string(),
            size: 10.0,
            margin: 6.0,
            blocks: Vec::new(),
            walls: Vec::new(),
            light: LightPos { x: 5.0, y: 5.0 },
            probes: Vec::new(),
        };
        let report = scenario.check();
        assert!(!report.passed());
        assert!(report.failures[0].starts_with("map:"));
    }
}
