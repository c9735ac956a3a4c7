use crate::mesh::BoundaryShape;

/// Point-in-solid test used by the containment filter.
///
/// Implementations must handle closed, possibly non-convex triangulated
/// solids. Points exactly on the surface may resolve either way.
pub trait ContainmentOracle: Send + Sync {
    fn contains(&self, shape: &BoundaryShape, point: [f64; 3]) -> bool;
}

/// Rays below this parameter, or nearly parallel to a triangle, do not count.
const RAY_EPSILON: f64 = 1e-12;

/// Three directions that avoid the axes and the diagonals of
/// axis-aligned faces.
const DIRECTIONS: [[f64; 3]; 3] = [
    [1.0, 0.3713, 0.1931],
    [-0.2917, 1.0, 0.4523],
    [0.2113, -0.3571, 1.0],
];

/// Default oracle: bounding-box rejection followed by ray casting.
///
/// ```text
///   point ──▶ outside bounds? ──yes──▶ outside
///                  │ no
///                  ▼
///   for each of 3 skewed rays: count triangle crossings (Möller–Trumbore)
///   odd count = one vote for inside;  ≥ 2 votes ──▶ inside
/// ```
///
/// The vote makes a single ray that grazes an edge or vertex harmless.
#[derive(Clone, Copy, Debug, Default)]
pub struct RayCastOracle;

impl ContainmentOracle for RayCastOracle {
    fn contains(&self, shape: &BoundaryShape, point: [f64; 3]) -> bool {
        if !shape.bounds_contain(point) {
            return false;
        }
        let votes = DIRECTIONS
            .iter()
            .filter(|dir| {
                let crossings = shape
                    .triangle_points()
                    .filter(|[a, b, c]| ray_hits_triangle(point, **dir, *a, *b, *c))
                    .count();
                crossings % 2 == 1
            })
            .count();
        votes >= 2
    }
}

/// Möller–Trumbore ray/triangle intersection, forward hits only.
fn ray_hits_triangle(origin: [f64; 3], dir: [f64; 3], v0: [f64; 3], v1: [f64; 3], v2: [f64; 3]) -> bool {
    let edge1 = sub(v1, v0);
    let edge2 = sub(v2, v0);
    let h = cross(dir, edge2);
    let a = dot(edge1, h);
    if a.abs() < RAY_EPSILON {
        return false;
    }

    let f = 1.0 / a;
    let s = sub(origin, v0);
    let u = f * dot(s, h);
    if !(0.0..=1.0).contains(&u) {
        return false;
    }

    let q = cross(s, edge1);
    let v = f * dot(dir, q);
    if v < 0.0 || u + v > 1.0 {
        return false;
    }

    f * dot(edge2, q) > RAY_EPSILON
}

fn sub(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn dot(a: [f64; 3], b: [f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn cross(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}
