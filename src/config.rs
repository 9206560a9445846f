use crate::geometry::{Block, Wall};
use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub map: MapConfig,
    #[serde(default)]
    pub light: LightConfig,
    #[serde(default)]
    pub visual: VisualConfig,
    #[serde(default)]
    pub editor: EditorConfig,
    #[serde(default = "default_blocks")]
    pub blocks: Vec<Block>,
    #[serde(default = "default_walls")]
    pub walls: Vec<Wall>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MapConfig {
    #[serde(default = "default_map_size")]
    pub size: f64,
    #[serde(default = "default_map_margin")]
    pub margin: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LightConfig {
    #[serde(default = "default_light_x")]
    pub x: f64,
    #[serde(default = "default_light_y")]
    pub y: f64,
}

#[derive(Debug, Deserialize)]
pub struct VisualConfig {
    #[serde(default = "default_bg_r")]
    pub background_r: u8,
    #[serde(default = "default_bg_g")]
    pub background_g: u8,
    #[serde(default = "default_bg_b")]
    pub background_b: u8,
    #[serde(default = "default_show_rays")]
    pub show_rays: bool,
    #[serde(default = "default_show_outline")]
    pub show_outline: bool,
    #[serde(default)]
    pub show_endpoints: bool,
}

#[derive(Debug, Deserialize)]
pub struct EditorConfig {
    #[serde(default = "default_block_half_extent")]
    pub block_half_extent: f64,
}

// Default values
fn default_map_size() -> f64 { 800.0 }
fn default_map_margin() -> f64 { 0.0 }
fn default_light_x() -> f64 { 400.0 }
fn default_light_y() -> f64 { 400.0 }
fn default_bg_r() -> u8 { 30 }
fn default_bg_g() -> u8 { 30 }
fn default_bg_b() -> u8 { 30 }
fn default_show_rays() -> bool { true }
fn default_show_outline() -> bool { true }
fn default_block_half_extent() -> f64 { 40.0 }

/// Demo scene: five blocks and a wall triangle near one corner
fn default_blocks() -> Vec<Block> {
    vec![
        Block::new(200.0, 300.0, 50.0),
        Block::new(100.0, 200.0, 30.0),
        Block::new(400.0, 300.0, 70.0),
        Block::new(600.0, 200.0, 50.0),
        Block::new(300.0, 550.0, 50.0),
    ]
}

fn default_walls() -> Vec<Wall> {
    vec![
        Wall::new(700.0, 700.0, 750.0, 750.0),
        Wall::new(550.0, 700.0, 750.0, 750.0),
        Wall::new(700.0, 700.0, 550.0, 700.0),
    ]
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            size: default_map_size(),
            margin: default_map_margin(),
        }
    }
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            x: default_light_x(),
            y: default_light_y(),
        }
    }
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            background_r: default_bg_r(),
            background_g: default_bg_g(),
            background_b: default_bg_b(),
            show_rays: default_show_rays(),
            show_outline: default_show_outline(),
            show_endpoints: false,
        }
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            block_half_extent: default_block_half_extent(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            map: MapConfig::default(),
            light: LightConfig::default(),
            visual: VisualConfig::default(),
            editor: EditorConfig::default(),
            blocks: default_blocks(),
            walls: default_walls(),
        }
    }
}

impl Config {
    /// Load configuration from file, or use defaults if file doesn't exist
    pub fn load() -> Self {
        match fs::read_to_string("config.toml") {
            Ok(contents) => {
                match toml::from_str(&contents) {
                    Ok(config) => {
                        println!("Loaded configuration from config.toml");
                        config
                    }
                    Err(e) => {
                        eprintln!("Warning: Failed to parse config.toml: {}", e);
                        eprintln!("Using default configuration");
                        Config::default()
                    }
                }
            }
            Err(_) => {
                println!("No config.toml found, using default configuration");
                Config::default()
            }
        }
    }
}

/// Paste-ready `config.toml` fragment describing a scene; this is what the
/// viewer puts on the clipboard
#[derive(Debug, Serialize)]
pub struct SceneSnapshot<'a> {
    pub map: MapConfig,
    pub light: LightConfig,
    pub blocks: &'a [Block],
    pub walls: &'a [Wall],
}

impl SceneSnapshot<'_> {
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_pastes_back_as_config() {
        let blocks = default_blocks();
        let walls = default_walls();
        let snapshot = SceneSnapshot {
            map: MapConfig {
                size: 640.0,
                margin: 10.0,
            },
            light: LightConfig { x: 320.0, y: 200.0 },
            blocks: &blocks,
            walls: &walls,
        };

        let text = snapshot.to_toml().unwrap();
        let config: Config = toml::from_str(&text).unwrap();
        assert_eq!(config.map.size, 640.0);
        assert_eq!(config.map.margin, 10.0);
        assert_eq!(config.light.x, 320.0);
        assert_eq!(config.blocks.as_slice(), snapshot.blocks);
        assert_eq!(config.walls.as_slice(), snapshot.walls);
    }
}
