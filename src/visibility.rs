use crate::geometry::{Block, EndPoint, Point, Segment, Wall};
use std::error::Error;
use std::f64::consts::PI;
use std::fmt;

/// Scene input rejected while building the occluder map
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MapError {
    /// The margin leaves no interior: `size - margin` must exceed `margin`
    DegenerateBounds { size: f64, margin: f64 },
    /// Both endpoints coincide, so the segment cannot be oriented
    ZeroLengthSegment { x: f64, y: f64 },
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapError::DegenerateBounds { size, margin } => write!(
                f,
                "map size {} with margin {} leaves no interior",
                size, margin
            ),
            MapError::ZeroLengthSegment { x, y } => {
                write!(f, "zero-length segment at ({}, {})", x, y)
            }
        }
    }
}

impl Error for MapError {}

/// Occluder map, the light-dependent endpoint annotations, and the fan
/// produced by the last successful sweep.
///
/// Endpoints live at indices `2k` and `2k + 1` for segment `k` and are
/// never reordered; the sweep sorts an index buffer instead.
#[derive(Clone)]
pub struct Visibility {
    pub(crate) segments: Vec<Segment>,
    pub(crate) endpoints: Vec<EndPoint>,
    pub(crate) center: Point,
    pub(crate) output: Vec<Point>,
}

impl Visibility {
    /// Create an empty map with the light at the origin
    pub fn new() -> Self {
        Visibility {
            segments: Vec::new(),
            endpoints: Vec::new(),
            center: Point::new(0.0, 0.0),
            output: Vec::new(),
        }
    }

    /// Add one occluder segment and its two endpoints. The first endpoint
    /// carries the debug-draw marker. Angles and begin flags stay unset
    /// until the next `set_light_location`.
    pub fn add_segment(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> Result<(), MapError> {
        if x1 == x2 && y1 == y2 {
            return Err(MapError::ZeroLengthSegment { x: x1, y: y1 });
        }
        let segment = self.segments.len();
        self.segments.push(Segment {
            p1: Point::new(x1, y1),
            p2: Point::new(x2, y2),
            d: 0.0,
        });
        self.endpoints.push(EndPoint {
            x: x1,
            y: y1,
            angle: 0.0,
            begin: false,
            segment,
            visualize: true,
        });
        self.endpoints.push(EndPoint {
            x: x2,
            y: y2,
            angle: 0.0,
            begin: false,
            segment,
            visualize: false,
        });
        Ok(())
    }

    /// Rebuild the map: the bounding rectangle inset by `margin`, then four
    /// faces per block, then the walls. Segment insertion order is
    /// observable, since equal-angle endpoint ties resolve by list position.
    ///
    /// The light is untouched; call `set_light_location` before sweeping.
    /// On error the map may be partially rebuilt and should not be swept
    /// until a later `load_map` succeeds.
    pub fn load_map(
        &mut self,
        size: f64,
        margin: f64,
        blocks: &[Block],
        walls: &[Wall],
    ) -> Result<(), MapError> {
        if size - margin <= margin {
            return Err(MapError::DegenerateBounds { size, margin });
        }
        self.segments.clear();
        self.endpoints.clear();
        self.load_edge_of_map(size, margin)?;
        for block in blocks {
            let (x, y, r) = (block.x, block.y, block.r);
            // Four faces, walked corner to corner around the square
            self.add_segment(x - r, y - r, x - r, y + r)?;
            self.add_segment(x - r, y + r, x + r, y + r)?;
            self.add_segment(x + r, y + r, x + r, y - r)?;
            self.add_segment(x + r, y - r, x - r, y - r)?;
        }
        for wall in walls {
            self.add_segment(wall.x1, wall.y1, wall.x2, wall.y2)?;
        }
        Ok(())
    }

    fn load_edge_of_map(&mut self, size: f64, margin: f64) -> Result<(), MapError> {
        let near = margin;
        let far = size - margin;
        self.add_segment(near, near, near, far)?;
        self.add_segment(near, far, far, far)?;
        self.add_segment(far, far, far, near)?;
        self.add_segment(far, near, near, near)?;
        Ok(())
    }

    /// Move the light and refresh every endpoint's polar angle and
    /// begin/end flag. A segment begins at the endpoint from which the
    /// signed angular extent, normalized into (-pi, pi], runs positive.
    /// Does not sweep.
    pub fn set_light_location(&mut self, x: f64, y: f64) {
        self.center = Point::new(x, y);
        for (k, segment) in self.segments.iter_mut().enumerate() {
            let mid_dx = 0.5 * (segment.p1.x + segment.p2.x) - x;
            let mid_dy = 0.5 * (segment.p1.y + segment.p2.y) - y;
            segment.d = mid_dx * mid_dx + mid_dy * mid_dy;

            let a1 = (segment.p1.y - y).atan2(segment.p1.x - x);
            let a2 = (segment.p2.y - y).atan2(segment.p2.x - x);
            let mut d_angle = a2 - a1;
            if d_angle <= -PI {
                d_angle += 2.0 * PI;
            }
            if d_angle > PI {
                d_angle -= 2.0 * PI;
            }
            let begin = d_angle > 0.0;

            self.endpoints[2 * k].angle = a1;
            self.endpoints[2 * k].begin = begin;
            self.endpoints[2 * k + 1].angle = a2;
            self.endpoints[2 * k + 1].begin = !begin;
        }
    }

    /// Fan from the last successful sweep: wedge corner pairs, laid flat
    pub fn output(&self) -> &[Point] {
        &self.output
    }

    /// Current light position
    pub fn center(&self) -> Point {
        self.center
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn endpoints(&self) -> &[EndPoint] {
        &self.endpoints
    }

    /// Wedge corner pairs; each pair plus the center is one fan triangle
    pub fn triangles(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.output.chunks_exact(2).map(|pair| (pair[0], pair[1]))
    }

    /// True if the point lies inside the last computed fan
    pub fn is_visible(&self, x: f64, y: f64) -> bool {
        let p = Point::new(x, y);
        self.triangles()
            .any(|(a, b)| point_in_triangle(p, self.center, a, b))
    }
}

impl Default for Visibility {
    fn default() -> Self {
        Self::new()
    }
}

// Sign-based containment test; points on the boundary count as inside.
fn point_in_triangle(p: Point, a: Point, b: Point, c: Point) -> bool {
    const EPS: f64 = 1e-9;
    let d1 = edge_sign(p, a, b);
    let d2 = edge_sign(p, b, c);
    let d3 = edge_sign(p, c, a);
    let has_neg = d1 < -EPS || d2 < -EPS || d3 < -EPS;
    let has_pos = d1 > EPS || d2 > EPS || d3 > EPS;
    !(has_neg && has_pos)
}

fn edge_sign(p: Point, a: Point, b: Point) -> f64 {
    (p.x - b.x) * (a.y - b.y) - (a.x - b.x) * (p.y - b.y)
}
