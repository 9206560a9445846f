use crate::geometry::Point;
use crate::predicates::{line_intersection, segment_in_front_of};
use crate::visibility::Visibility;
use std::cmp::Ordering;
use std::error::Error;
use std::fmt;

/// Default sweep cutoff. Endpoint angles are radians in (-pi, pi] and the
/// cutoff is compared against them directly, so at this value the emitting
/// pass never stops early and the fan always covers the full circle. Pass a
/// radian value to actually cut the sweep short.
pub const FULL_SWEEP: f64 = 360.0;

/// Failure of a single sweep; the previously computed fan stays in place
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SweepError {
    /// A wedge ray ran parallel to its far boundary, so the corner has no
    /// finite position. Segments collinear with the light cause this.
    DegenerateIntersection { angle: f64 },
}

impl fmt::Display for SweepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SweepError::DegenerateIntersection { angle } => {
                write!(f, "no finite wedge corner on the ray at {} rad", angle)
            }
        }
    }
}

impl Error for SweepError {}

impl Visibility {
    /// Sweep the full circle; see [`Visibility::sweep`]
    pub fn sweep_full(&mut self) -> Result<(), SweepError> {
        self.sweep(FULL_SWEEP)
    }

    /// Recompute the visibility fan for the current map and light.
    ///
    /// Two passes over the endpoints in angular order: the first primes the
    /// open list with the segments straddling the sweep start, the second
    /// emits one wedge per change of the front segment. All working state
    /// is per call, so a repeated sweep over an unchanged map reproduces
    /// its output exactly. On success `output()` holds the new fan; on
    /// error the previous fan is kept.
    pub fn sweep(&mut self, max_angle: f64) -> Result<(), SweepError> {
        // Angular order with begin endpoints ahead of end endpoints on
        // ties. The sort is stable, so remaining ties keep endpoint list
        // order, which follows segment insertion order.
        let mut order: Vec<usize> = (0..self.endpoints.len()).collect();
        order.sort_by(|&i, &j| {
            let a = &self.endpoints[i];
            let b = &self.endpoints[j];
            a.angle
                .partial_cmp(&b.angle)
                .unwrap_or(Ordering::Equal)
                .then((!a.begin).cmp(&(!b.begin)))
        });

        // Open segments, front first
        let mut open: Vec<usize> = Vec::new();
        let mut fan: Vec<Point> = Vec::new();
        let mut begin_angle = 0.0_f64;

        for pass in 0..2 {
            for &index in &order {
                let endpoint = self.endpoints[index];
                if pass == 1 && endpoint.angle > max_angle {
                    break;
                }

                let front_before = open.first().copied();

                if endpoint.begin {
                    // Walk past every open segment that shields this one,
                    // insert in front of the first that does not
                    let mut at = open.len();
                    for (i, &other) in open.iter().enumerate() {
                        if !segment_in_front_of(
                            &self.segments[endpoint.segment],
                            &self.segments[other],
                            self.center,
                        ) {
                            at = i;
                            break;
                        }
                    }
                    open.insert(at, endpoint.segment);
                } else if let Some(at) = open.iter().position(|&s| s == endpoint.segment) {
                    open.remove(at);
                }

                let front_after = open.first().copied();
                if front_before != front_after {
                    if pass == 1 {
                        let (first, second) =
                            self.wedge_corners(begin_angle, endpoint.angle, front_before)?;
                        fan.push(first);
                        fan.push(second);
                    }
                    begin_angle = endpoint.angle;
                }
            }
        }

        self.output = fan;
        Ok(())
    }

    /// Far corners of one wedge: the wedge rays clipped against the line of
    /// the segment that was in front, or against the chord between the unit
    /// ray points when nothing was open.
    fn wedge_corners(
        &self,
        angle1: f64,
        angle2: f64,
        front: Option<usize>,
    ) -> Result<(Point, Point), SweepError> {
        let center = self.center;
        let ray1 = Point::new(center.x + angle1.cos(), center.y + angle1.sin());
        let ray2 = Point::new(center.x + angle2.cos(), center.y + angle2.sin());
        let (p3, p4) = match front {
            Some(index) => {
                let segment = &self.segments[index];
                (segment.p1, segment.p2)
            }
            None => (ray1, ray2),
        };

        let first = line_intersection(p3, p4, center, ray1);
        if !first.x.is_finite() || !first.y.is_finite() {
            return Err(SweepError::DegenerateIntersection { angle: angle1 });
        }
        let second = line_intersection(p3, p4, center, ray2);
        if !second.x.is_finite() || !second.y.is_finite() {
            return Err(SweepError::DegenerateIntersection { angle: angle2 });
        }
        Ok((first, second))
    }
}
