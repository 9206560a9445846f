use serde::{Deserialize, Serialize};

/// A position in map coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

/// One end of an occluder segment, annotated per light position
#[derive(Debug, Clone, Copy)]
pub struct EndPoint {
    pub x: f64,
    pub y: f64,
    /// Polar angle around the current light, radians in (-pi, pi]
    pub angle: f64,
    /// True if the counterclockwise sweep enters the segment here
    pub begin: bool,
    /// Index of the owning segment in the map's segment list
    pub segment: usize,
    /// Marks the first endpoint of each segment for debug drawing
    pub visualize: bool,
}

/// An occluding wall segment
#[derive(Debug, Clone, Copy)]
pub struct Segment {
    pub p1: Point,
    pub p2: Point,
    /// Squared distance from the light to the segment midpoint.
    /// Recomputed by `set_light_location`; diagnostic only.
    pub d: f64,
}

/// Axis-aligned square obstacle: center plus half-extent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub x: f64,
    pub y: f64,
    pub r: f64,
}

impl Block {
    pub fn new(x: f64, y: f64, r: f64) -> Self {
        Block { x, y, r }
    }
}

/// Free-standing wall given by its two endpoints
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl Wall {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Wall { x1, y1, x2, y2 }
    }
}
