use crate::geometry::{Point, Segment};

/// True if `p` lies on the negative-cross side of the directed line
/// through `s.p1 -> s.p2`. Collinear points count as not-left.
pub fn left_of(s: &Segment, p: Point) -> bool {
    let cross = (s.p2.x - s.p1.x) * (p.y - s.p1.y) - (s.p2.y - s.p1.y) * (p.x - s.p1.x);
    cross < 0.0
}

/// Linear interpolation between two points; `f = 0` gives `p`, `f = 1` gives `q`
pub fn interpolate(p: Point, q: Point, f: f64) -> Point {
    Point::new(p.x * (1.0 - f) + q.x * f, p.y * (1.0 - f) + q.y * f)
}

/// Occlusion heuristic between two non-crossing segments as seen from
/// `relative_to`: true when `b` shields `a`, so `a` belongs behind `b` in
/// the sweep's open list.
///
/// Samples each segment's endpoints nudged 1% toward the other end, so
/// segments sharing an endpoint still order cleanly. Pairwise only; the
/// result is not transitive, which is fine for insertion into an already
/// ordered list but not for a full sort.
pub fn segment_in_front_of(a: &Segment, b: &Segment, relative_to: Point) -> bool {
    const NUDGE: f64 = 0.01;
    let a1 = left_of(a, interpolate(b.p1, b.p2, NUDGE));
    let a2 = left_of(a, interpolate(b.p2, b.p1, NUDGE));
    let a3 = left_of(a, relative_to);
    let b1 = left_of(b, interpolate(a.p1, a.p2, NUDGE));
    let b2 = left_of(b, interpolate(a.p2, a.p1, NUDGE));
    let b3 = left_of(b, relative_to);

    // a's endpoints on one side of b, the viewpoint on the other
    if b1 == b2 && b2 != b3 {
        return true;
    }
    // b's endpoints and the viewpoint all on one side of a
    if a1 == a2 && a2 == a3 {
        return true;
    }
    if a1 == a2 && a2 != a3 {
        return false;
    }
    if b1 == b2 && b2 == b3 {
        return false;
    }
    false
}

/// Intersection of the infinite lines through `p1 -> p2` and `p3 -> p4`,
/// parameterized along `p1 -> p2`. Parallel lines divide by zero and give
/// non-finite coordinates; callers must check.
pub fn line_intersection(p1: Point, p2: Point, p3: Point, p4: Point) -> Point {
    let n1 = (p4.x - p3.x) * (p1.y - p3.y) - (p4.y - p3.y) * (p1.x - p3.x);
    let n2 = (p4.y - p3.y) * (p2.x - p1.x) - (p4.x - p3.x) * (p2.y - p1.y);
    let s = n1 / n2;
    Point::new(p1.x + s * (p2.x - p1.x), p1.y + s * (p2.y - p1.y))
}
