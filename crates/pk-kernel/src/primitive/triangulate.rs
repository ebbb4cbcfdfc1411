//! Ear-clipping triangulation of simple 2D polygons

use glam::DVec2;

/// Signed area of a closed polygon, positive when counter-clockwise
pub fn signed_area(points: &[DVec2]) -> f64 {
    let n = points.len();
    (0..n)
        .map(|i| points[i].perp_dot(points[(i + 1) % n]))
        .sum::<f64>()
        / 2.0
}

/// Triangulate a counter-clockwise simple polygon
///
/// Returns index triples into `points`, counter-clockwise. Falls back to a
/// fan over the remaining vertices when no ear can be found (self-intersecting
/// or heavily degenerate input).
pub fn triangulate_polygon(points: &[DVec2]) -> Vec<[u32; 3]> {
    let n = points.len();
    if n < 3 {
        return Vec::new();
    }

    let mut remaining: Vec<usize> = (0..n).collect();
    let mut triangles = Vec::with_capacity(n - 2);

    while remaining.len() > 3 {
        let m = remaining.len();
        let ear = (0..m).find(|&i| {
            let prev = remaining[(i + m - 1) % m];
            let cur = remaining[i];
            let next = remaining[(i + 1) % m];
            is_ear(points, &remaining, prev, cur, next)
        });

        match ear {
            Some(i) => {
                let prev = remaining[(i + m - 1) % m];
                let next = remaining[(i + 1) % m];
                triangles.push([prev as u32, remaining[i] as u32, next as u32]);
                remaining.remove(i);
            }
            None => {
                for k in 1..m - 1 {
                    triangles.push([
                        remaining[0] as u32,
                        remaining[k] as u32,
                        remaining[k + 1] as u32,
                    ]);
                }
                return triangles;
            }
        }
    }

    triangles.push([
        remaining[0] as u32,
        remaining[1] as u32,
        remaining[2] as u32,
    ]);
    triangles
}

fn is_ear(points: &[DVec2], remaining: &[usize], prev: usize, cur: usize, next: usize) -> bool {
    let (a, b, c) = (points[prev], points[cur], points[next]);
    if (b - a).perp_dot(c - a) <= 0.0 {
        return false;
    }
    !remaining
        .iter()
        .filter(|&&k| k != prev && k != cur && k != next)
        .any(|&k| point_in_triangle(points[k], a, b, c))
}

fn point_in_triangle(p: DVec2, a: DVec2, b: DVec2, c: DVec2) -> bool {
    let d1 = (b - a).perp_dot(p - a);
    let d2 = (c - b).perp_dot(p - b);
    let d3 = (a - c).perp_dot(p - c);
    d1 >= 0.0 && d2 >= 0.0 && d3 >= 0.0
}
