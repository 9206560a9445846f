use sightline::scenario::fan_coverage;
use sightline::{Block, Visibility, Wall};
use std::f64::consts::PI;

#[test]
fn empty_room_wedges_have_positive_area() {
    let mut vis = Visibility::new();
    vis.load_map(10.0, 0.0, &[], &[]).unwrap();
    vis.set_light_location(5.0, 5.0);
    vis.sweep_full().unwrap();

    assert_eq!(vis.output().len(), 8);
    let center = vis.center();
    for (a, b) in vis.triangles() {
        let area =
            0.5 * ((a.x - center.x) * (b.y - center.y) - (b.x - center.x) * (a.y - center.y));
        println!("wedge ({:?}, {:?}) area {:.3}", a, b, area);
        assert!(area > 0.0);
    }
}

#[test]
fn fan_covers_full_circle_around_a_block() {
    let mut vis = Visibility::new();
    vis.load_map(800.0, 0.0, &[Block::new(400.0, 400.0, 50.0)], &[])
        .unwrap();
    vis.set_light_location(400.0, 100.0);
    vis.sweep_full().unwrap();

    let coverage = fan_coverage(&vis);
    println!(
        "{} wedges cover {:.9} rad",
        vis.output().len() / 2,
        coverage
    );
    assert_eq!(vis.output().len() % 2, 0);
    assert!((coverage - 2.0 * PI).abs() < 1e-6);
}

#[test]
fn centered_block_shadow_matches_hand_trace() {
    let mut vis = Visibility::new();
    vis.load_map(800.0, 0.0, &[Block::new(400.0, 400.0, 50.0)], &[])
        .unwrap();
    vis.set_light_location(400.0, 100.0);
    vis.sweep_full().unwrap();

    println!("fan: {:?}", vis.output());
    assert_eq!(vis.output().len(), 14);

    // The near silhouette corner shows up in three wedges: the zero-width
    // pair at its own angle plus the start of the face wedge.
    let near_corner_hits = vis
        .output()
        .iter()
        .filter(|p| (p.x - 450.0).abs() < 1e-6 && (p.y - 350.0).abs() < 1e-6)
        .count();
    assert_eq!(near_corner_hits, 3);
    assert!(vis
        .output()
        .iter()
        .any(|p| (p.x - 350.0).abs() < 1e-6 && (p.y - 350.0).abs() < 1e-6));

    assert!(!vis.is_visible(400.0, 500.0));
    assert!(vis.is_visible(400.0, 300.0));
    assert!(vis.is_visible(100.0, 700.0));
    assert!(!vis.is_visible(390.0, 460.0));
}

#[test]
fn moving_the_light_back_restores_the_fan() {
    let mut vis = Visibility::new();
    vis.load_map(100.0, 0.0, &[], &[Wall::new(30.0, 40.0, 70.0, 40.0)])
        .unwrap();

    vis.set_light_location(50.0, 80.0);
    vis.sweep_full().unwrap();
    let first = vis.output().to_vec();

    vis.set_light_location(20.0, 30.0);
    vis.sweep_full().unwrap();
    assert_ne!(first, vis.output());

    vis.set_light_location(50.0, 80.0);
    vis.sweep_full().unwrap();
    assert_eq!(first, vis.output());
}

#[test]
fn overlapping_collinear_walls_still_close_the_fan() {
    let mut vis = Visibility::new();
    vis.load_map(
        10.0,
        0.0,
        &[],
        &[Wall::new(2.0, 4.0, 8.0, 4.0), Wall::new(3.0, 4.0, 7.0, 4.0)],
    )
    .unwrap();
    vis.set_light_location(5.0, 8.0);
    vis.sweep_full().unwrap();

    let coverage = fan_coverage(&vis);
    println!(
        "{} wedges cover {:.9} rad",
        vis.output().len() / 2,
        coverage
    );
    assert_eq!(vis.output().len() % 2, 0);
    assert!((coverage - 2.0 * PI).abs() < 1e-6);
    assert!(vis.is_visible(5.0, 5.0));
    assert!(!vis.is_visible(5.0, 2.0));
}

#[test]
fn margin_insets_the_outer_walls() {
    let mut vis = Visibility::new();
    vis.load_map(10.0, 2.0, &[], &[]).unwrap();
    vis.set_light_location(5.0, 5.0);
    vis.sweep_full().unwrap();

    assert_eq!(vis.output().len(), 8);
    for p in vis.output() {
        assert!(p.x >= 2.0 - 1e-9 && p.x <= 8.0 + 1e-9);
        assert!(p.y >= 2.0 - 1e-9 && p.y <= 8.0 + 1e-9);
    }
    assert!(vis.is_visible(5.0, 7.0));
    assert!(!vis.is_visible(5.0, 9.0));
}

#[test]
fn failed_sweep_keeps_the_previous_fan() {
    let mut vis = Visibility::new();
    vis.load_map(10.0, 0.0, &[], &[]).unwrap();
    vis.set_light_location(5.0, 5.0);
    vis.sweep_full().unwrap();
    let saved = vis.output().to_vec();
    assert_eq!(saved.len(), 8);

    // A wall aimed straight at the light shares its line with the wedge
    // boundary ray at its own angle, so the corner intersection degenerates.
    vis.load_map(10.0, 0.0, &[], &[Wall::new(1.0, 5.0, 3.0, 5.0)])
        .unwrap();
    vis.set_light_location(5.0, 5.0);
    let result = vis.sweep_full();
    println!("sweep result: {:?}", result);
    assert!(result.is_err());
    assert_eq!(saved, vis.output());
}
