mod config;
mod geometry;
mod predicates;
mod scenario;
mod sweep;
mod visibility;

use arboard::Clipboard;
use config::{Config, LightConfig, MapConfig, SceneSnapshot};
use geometry::{Block, Wall};
use macroquad::prelude::*;
use scenario::Scenario;
use std::fs;
use visibility::{MapError, Visibility};

/// Run every scenario fixture under ./test_data
fn run_scenario_suite() {
    let test_dir = "./test_data";
    let mut passed = 0;
    let mut failed = 0;
    let mut failures = Vec::new();

    println!("Running visibility scenarios from {}\n", test_dir);

    if let Ok(entries) = fs::read_dir(test_dir) {
        let mut entries: Vec<_> = entries.filter_map(Result::ok).collect();
        entries.sort_by_key(|e| e.file_name());

        for entry in entries {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) == Some("json") {
                match Scenario::load(&path) {
                    Ok(scenario) => {
                        let report = scenario.check();
                        if report.passed() {
                            passed += 1;
                            println!("✓ {} ({} wedges)", scenario.name, report.wedges);
                        } else {
                            failed += 1;
                            println!("✗ {}", scenario.name);
                            for failure in &report.failures {
                                println!("    {}", failure);
                            }
                            failures.push(scenario.name.clone());
                        }
                    }
                    Err(e) => {
                        failed += 1;
                        let name = path
                            .file_name()
                            .and_then(|n| n.to_str())
                            .unwrap_or("unknown");
                        println!("✗ {} (load error: {})", name, e);
                        failures.push(name.to_string());
                    }
                }
            }
        }
    }

    println!("\n========================================");
    println!("Scenario Results: {} passed, {} failed", passed, failed);
    println!("========================================");

    if !failures.is_empty() {
        println!("\nFailed scenarios:");
        for name in failures {
            println!("  - {}", name);
        }
    }
}

/// Interactive viewer state
struct VisState {
    vis: Visibility,
    map_size: f64,
    margin: f64,
    blocks: Vec<Block>,
    walls: Vec<Wall>,
    light_x: f64,
    light_y: f64,
    block_half_extent: f64,
    /// Raw mouse position last frame; the light follows actual movement
    /// only, so it stays at the configured spot until the mouse stirs
    last_mouse: Option<(f32, f32)>,
    /// Sweep again before the next draw
    dirty: bool,
    background: Color,
    show_rays: bool,
    show_outline: bool,
    show_endpoints: bool,
}

impl VisState {
    fn from_config(config: &Config) -> Result<Self, MapError> {
        let mut vis = Visibility::new();
        vis.load_map(
            config.map.size,
            config.map.margin,
            &config.blocks,
            &config.walls,
        )?;
        vis.set_light_location(config.light.x, config.light.y);

        Ok(VisState {
            vis,
            map_size: config.map.size,
            margin: config.map.margin,
            blocks: config.blocks.clone(),
            walls: config.walls.clone(),
            light_x: config.light.x,
            light_y: config.light.y,
            block_half_extent: config.editor.block_half_extent,
            last_mouse: None,
            dirty: true,
            background: Color::from_rgba(
                config.visual.background_r,
                config.visual.background_g,
                config.visual.background_b,
                255,
            ),
            show_rays: config.visual.show_rays,
            show_outline: config.visual.show_outline,
            show_endpoints: config.visual.show_endpoints,
        })
    }

    /// Pixels per map unit, fitting the square map to the window's short side
    fn scale(&self) -> f32 {
        screen_width().min(screen_height()) / self.map_size as f32
    }

    /// Mouse position in map coordinates, snapped to whole units
    fn mouse_map_position(&self) -> (f64, f64) {
        let (mouse_x, mouse_y) = mouse_position();
        let scale = self.scale();
        (
            (mouse_x / scale) as f64,
            (mouse_y / scale) as f64,
        )
    }

    fn handle_mouse_move(&mut self) {
        let mouse = mouse_position();
        if self.last_mouse == Some(mouse) {
            return;
        }
        let first = self.last_mouse.is_none();
        self.last_mouse = Some(mouse);
        if first {
            return;
        }

        let (x, y) = self.mouse_map_position();
        let x = x.round();
        let y = y.round();
        if x != self.light_x || y != self.light_y {
            self.light_x = x;
            self.light_y = y;
            self.vis.set_light_location(x, y);
            self.dirty = true;
        }
    }

    fn handle_click(&mut self) {
        let (x, y) = self.mouse_map_position();
        let x = x.round();
        let y = y.round();
        self.blocks.push(Block::new(x, y, self.block_half_extent));
        if let Err(e) = self.reload_map() {
            warn!("could not add block at ({}, {}): {}", x, y, e);
            self.blocks.pop();
            if let Err(e) = self.reload_map() {
                error!("map rebuild failed after revert: {}", e);
            }
        } else {
            info!("added block at ({}, {})", x, y);
        }
    }

    fn reload_map(&mut self) -> Result<(), MapError> {
        self.vis
            .load_map(self.map_size, self.margin, &self.blocks, &self.walls)?;
        self.vis.set_light_location(self.light_x, self.light_y);
        self.dirty = true;
        Ok(())
    }

    /// Sweep if anything changed; on failure keep the previous fan
    fn update(&mut self) {
        if !self.dirty {
            return;
        }
        self.dirty = false;
        if let Err(e) = self.vis.sweep_full() {
            warn!("sweep failed: {}; keeping previous fan", e);
        }
    }

    fn snapshot_toml(&self) -> Result<String, toml::ser::Error> {
        SceneSnapshot {
            map: MapConfig {
                size: self.map_size,
                margin: self.margin,
            },
            light: LightConfig {
                x: self.light_x,
                y: self.light_y,
            },
            blocks: &self.blocks,
            walls: &self.walls,
        }
        .to_toml()
    }

    fn copy_to_clipboard(&self) {
        let scene = match self.snapshot_toml() {
            Ok(scene) => scene,
            Err(e) => {
                println!("Failed to serialize scene: {}", e);
                return;
            }
        };
        match Clipboard::new() {
            Ok(mut clipboard) => {
                if let Err(e) = clipboard.set_text(&scene) {
                    println!("Failed to copy to clipboard: {}", e);
                } else {
                    println!("Scene copied to clipboard as a config.toml fragment!");
                    // Keep clipboard alive for a moment to ensure clipboard managers can capture it
                    std::thread::sleep(std::time::Duration::from_millis(100));
                }
            }
            Err(e) => {
                println!("Failed to access clipboard: {}", e);
            }
        }
    }

    fn draw(&self) {
        clear_background(self.background);
        let scale = self.scale();
        let center = self.vis.center();
        let cx = center.x as f32 * scale;
        let cy = center.y as f32 * scale;

        // Visibility fan
        for (a, b) in self.vis.triangles() {
            let ax = a.x as f32 * scale;
            let ay = a.y as f32 * scale;
            let bx = b.x as f32 * scale;
            let by = b.y as f32 * scale;
            draw_triangle(
                vec2(cx, cy),
                vec2(ax, ay),
                vec2(bx, by),
                Color::from_rgba(120, 180, 255, 70),
            );
            if self.show_outline {
                draw_line(ax, ay, bx, by, 2.0, YELLOW);
            }
            if self.show_rays {
                draw_line(cx, cy, ax, ay, 1.0, Color::from_rgba(255, 80, 80, 160));
                draw_line(cx, cy, bx, by, 1.0, Color::from_rgba(255, 80, 80, 160));
            }
        }

        // Obstacles
        for (i, block) in self.blocks.iter().enumerate() {
            let px = (block.x - block.r) as f32 * scale;
            let py = (block.y - block.r) as f32 * scale;
            let side = (2.0 * block.r) as f32 * scale;
            draw_rectangle(px, py, side, side, Color::from_rgba(200, 60, 60, 255));
            draw_text(
                &format!("{}", i + 1),
                px + side * 0.5 - 4.0,
                py + side * 0.5 + 4.0,
                16.0,
                WHITE,
            );
        }
        for wall in &self.walls {
            draw_line(
                wall.x1 as f32 * scale,
                wall.y1 as f32 * scale,
                wall.x2 as f32 * scale,
                wall.y2 as f32 * scale,
                3.0,
                BLUE,
            );
        }

        // First endpoint of each segment, for eyeballing the angle field
        if self.show_endpoints {
            for endpoint in self.vis.endpoints() {
                if endpoint.visualize {
                    draw_circle(
                        endpoint.x as f32 * scale,
                        endpoint.y as f32 * scale,
                        3.0,
                        GREEN,
                    );
                }
            }
        }

        // Light
        draw_circle(cx, cy, 5.0, YELLOW);

        let info = format!(
            "Light: ({}, {})\nWedges: {}\nBlocks: {}  Walls: {}\nMove mouse: move light\nLeft click: add block ({} wide)\n[ / ]: block size\nC: copy scene to clipboard\nEsc: close window",
            self.light_x,
            self.light_y,
            self.vis.output().len() / 2,
            self.blocks.len(),
            self.walls.len(),
            2.0 * self.block_half_extent
        );
        draw_text(&info, 10.0, 20.0, 20.0, WHITE);
    }
}

#[macroquad::main("Sightline - Visibility Sweep")]
async fn main() {
    // Check command line arguments
    let args: Vec<String> = std::env::args().collect();
    if args.len() > 1 && args[1] == "--test" {
        run_scenario_suite();
        return;
    }

    let config = Config::load();
    let mut state = match VisState::from_config(&config) {
        Ok(state) => state,
        Err(e) => {
            eprintln!("Invalid scene in configuration: {}", e);
            return;
        }
    };

    loop {
        // Handle input
        state.handle_mouse_move();

        if is_mouse_button_pressed(MouseButton::Left) {
            state.handle_click();
        }

        if is_key_pressed(KeyCode::LeftBracket) {
            state.block_half_extent = (state.block_half_extent - 5.0).max(5.0);
        }
        if is_key_pressed(KeyCode::RightBracket) {
            state.block_half_extent = (state.block_half_extent + 5.0).min(200.0);
        }

        // Copy scene to clipboard on C key
        if is_key_pressed(KeyCode::C) {
            state.copy_to_clipboard();
        }

        // Close window on Escape
        if is_key_pressed(KeyCode::Escape) {
            break;
        }

        state.update();
        state.draw();

        next_frame().await
    }
}
