use glam::Vec2;

use crate::api::NarrowphaseApi;

/// Stateless geometric primitives shared by the shape variants.
pub struct Narrowphase;

/// Min/max of `verts` projected onto `axis`.
fn project(verts: &[Vec2], axis: Vec2) -> (f32, f32) {
    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;
    for v in verts {
        let p = v.dot(axis);
        min = min.min(p);
        max = max.max(p);
    }
    (min, max)
}

/// Unit normals of every edge `v[i] -> v[i+1]`, wrapping around.
fn edge_normals(verts: &[Vec2]) -> impl Iterator<Item = Vec2> + '_ {
    let n = verts.len();
    (0..n).map(move |i| (verts[(i + 1) % n] - verts[i]).perp().normalize_or_zero())
}

impl NarrowphaseApi for Narrowphase {
    fn to_local(p: Vec2, center: Vec2, rotation: f32) -> Vec2 {
        Vec2::from_angle(-rotation).rotate(p - center)
    }

    fn to_world(p: Vec2, center: Vec2, rotation: f32) -> Vec2 {
        center + Vec2::from_angle(rotation).rotate(p)
    }

    fn rect_vertices(center: Vec2, half: Vec2, rotation: f32) -> [Vec2; 4] {
        let r = Vec2::from_angle(rotation);
        [
            center + r.rotate(Vec2::new(half.x, half.y)),
            center + r.rotate(Vec2::new(-half.x, half.y)),
            center + r.rotate(Vec2::new(-half.x, -half.y)),
            center + r.rotate(Vec2::new(half.x, -half.y)),
        ]
    }

    fn closest_point_on_rect(p: Vec2, center: Vec2, half: Vec2, rotation: f32) -> Vec2 {
        let local = Self::to_local(p, center, rotation);
        let clamped = Vec2::new(
            local.x.max(-half.x).min(half.x),
            local.y.max(-half.y).min(half.y),
        );
        Self::to_world(clamped, center, rotation)
    }

    fn closest_point_on_segment(a: Vec2, b: Vec2, p: Vec2) -> Vec2 {
        let edge = b - a;
        let len = edge.length();
        if len <= f32::EPSILON {
            return a;
        }
        let dir = edge / len;
        let t = (p - a).dot(dir);
        if t <= 0.0 {
            a
        } else if t >= len {
            b
        } else {
            a + dir * t
        }
    }

    fn overlap_disc_disc(c0: Vec2, r0: f32, c1: Vec2, r1: f32) -> bool {
        (c0 - c1).length() < r0 + r1
    }

    fn overlap_disc_rect(c: Vec2, r: f32, box_c: Vec2, box_h: Vec2, rotation: f32) -> bool {
        // Compared in the box's local frame so rotation round-trips add no error.
        let local = Self::to_local(c, box_c, rotation);
        let closest = Vec2::new(
            local.x.max(-box_h.x).min(box_h.x),
            local.y.max(-box_h.y).min(box_h.y),
        );
        (local - closest).length_squared() <= r * r
    }

    fn overlap_disc_polygon(c: Vec2, r: f32, verts: &[Vec2]) -> bool {
        let n = verts.len();
        (0..n).any(|i| {
            let closest = Self::closest_point_on_segment(verts[i], verts[(i + 1) % n], c);
            (c - closest).length_squared() <= r * r
        })
    }

    fn sat_overlap(a: &[Vec2], b: &[Vec2]) -> bool {
        edge_normals(a).chain(edge_normals(b)).all(|axis| {
            let (min_a, max_a) = project(a, axis);
            let (min_b, max_b) = project(b, axis);
            !(max_a < min_b || max_b < min_a)
        })
    }

    fn sat_min_overlap(a: &[Vec2], b: &[Vec2]) -> Option<(Vec2, f32)> {
        let mut best: Option<(Vec2, f32)> = None;
        for axis in edge_normals(a).chain(edge_normals(b)) {
            let (min_a, max_a) = project(a, axis);
            let (min_b, max_b) = project(b, axis);
            let overlap = (max_a - min_b).min(max_b - min_a);
            if overlap < 0.0 {
                return None;
            }
            // Strict compare: earlier axes win ties.
            match best {
                Some((_, d)) if overlap >= d => {}
                _ => best = Some((axis, overlap)),
            }
        }
        best
    }

    fn overlap_point_disc(p: Vec2, c: Vec2, r: f32) -> bool {
        (p - c).length_squared() <= r * r
    }

    fn overlap_point_rect(p: Vec2, c: Vec2, h: Vec2, rotation: f32) -> bool {
        let local = Self::to_local(p, c, rotation);
        local.x.abs() <= h.x && local.y.abs() <= h.y
    }

    fn overlap_point_polygon(p: Vec2, verts: &[Vec2]) -> bool {
        let n = verts.len();
        if n < 3 {
            return false;
        }
        // Inside a convex polygon iff p is on the same side of every edge.
        let mut sign = 0.0f32;
        for i in 0..n {
            let a = verts[i];
            let b = verts[(i + 1) % n];
            let cross = (b - a).perp_dot(p - a);
            if cross == 0.0 {
                continue;
            }
            if sign == 0.0 {
                sign = cross.signum();
            } else if cross.signum() != sign {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_4;

    fn square(center: Vec2, half: f32) -> [Vec2; 4] {
        Narrowphase::rect_vertices(center, Vec2::splat(half), 0.0)
    }

    #[test]
    fn test_local_world_round_trip() {
        let c = Vec2::new(1.0, -2.0);
        let p = Vec2::new(3.0, 0.5);
        let back = Narrowphase::to_world(Narrowphase::to_local(p, c, 0.7), c, 0.7);
        assert_relative_eq!(back.x, p.x, epsilon = 1e-5);
        assert_relative_eq!(back.y, p.y, epsilon = 1e-5);
    }

    #[test]
    fn test_rect_vertices_winding() {
        let v = Narrowphase::rect_vertices(Vec2::ZERO, Vec2::new(2.0, 1.0), 0.0);
        assert_eq!(v[0], Vec2::new(2.0, 1.0));
        assert_eq!(v[1], Vec2::new(-2.0, 1.0));
        assert_eq!(v[2], Vec2::new(-2.0, -1.0));
        assert_eq!(v[3], Vec2::new(2.0, -1.0));
    }

    #[test]
    fn test_closest_point_on_rotated_rect() {
        // Diamond: square of half 1 rotated 45 degrees; its right corner sits at x = sqrt(2).
        let p = Narrowphase::closest_point_on_rect(
            Vec2::new(5.0, 0.0),
            Vec2::ZERO,
            Vec2::ONE,
            FRAC_PI_4,
        );
        assert_relative_eq!(p.x, 2f32.sqrt(), epsilon = 1e-5);
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_closest_point_on_segment_clamps() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(2.0, 0.0);
        assert_eq!(Narrowphase::closest_point_on_segment(a, b, Vec2::new(-1.0, 1.0)), a);
        assert_eq!(Narrowphase::closest_point_on_segment(a, b, Vec2::new(3.0, 1.0)), b);
        assert_eq!(
            Narrowphase::closest_point_on_segment(a, b, Vec2::new(1.0, 4.0)),
            Vec2::new(1.0, 0.0)
        );
        // Degenerate edge collapses to its start.
        assert_eq!(Narrowphase::closest_point_on_segment(a, a, Vec2::ONE), a);
    }

    #[test]
    fn test_disc_disc_strict() {
        assert!(Narrowphase::overlap_disc_disc(Vec2::ZERO, 1.0, Vec2::new(1.5, 0.0), 1.0));
        // Touching is not overlapping.
        assert!(!Narrowphase::overlap_disc_disc(Vec2::ZERO, 1.0, Vec2::new(2.0, 0.0), 1.0));
    }

    #[test]
    fn test_disc_rect_inclusive() {
        let h = Vec2::new(1.0, 0.5);
        assert!(Narrowphase::overlap_disc_rect(Vec2::new(1.5, 0.0), 0.5, Vec2::ZERO, h, 0.0));
        assert!(!Narrowphase::overlap_disc_rect(Vec2::new(1.6, 0.0), 0.5, Vec2::ZERO, h, 0.0));
        // Corner region uses true distance, not the box.
        assert!(!Narrowphase::overlap_disc_rect(Vec2::new(1.4, 0.9), 0.5, Vec2::ZERO, h, 0.0));
    }

    #[test]
    fn test_disc_polygon_edges() {
        let tri = [Vec2::new(-1.0, -1.0), Vec2::new(1.0, -1.0), Vec2::new(0.0, 1.0)];
        assert!(Narrowphase::overlap_disc_polygon(Vec2::new(0.0, -1.2), 0.25, &tri));
        assert!(!Narrowphase::overlap_disc_polygon(Vec2::new(0.0, -1.5), 0.25, &tri));
    }

    #[test]
    fn test_sat_overlap_and_separation() {
        let a = square(Vec2::ZERO, 1.0);
        assert!(Narrowphase::sat_overlap(&a, &square(Vec2::new(1.5, 0.0), 1.0)));
        // Touching edges still count.
        assert!(Narrowphase::sat_overlap(&a, &square(Vec2::new(2.0, 0.0), 1.0)));
        assert!(!Narrowphase::sat_overlap(&a, &square(Vec2::new(2.1, 0.0), 1.0)));
        // Rotated square whose AABB overlaps but whose edges do not.
        let diamond = Narrowphase::rect_vertices(Vec2::new(2.3, 2.3), Vec2::ONE, FRAC_PI_4);
        assert!(!Narrowphase::sat_overlap(&a, &diamond));
    }

    #[test]
    fn test_sat_min_overlap_picks_shallowest_axis() {
        let a = square(Vec2::ZERO, 1.0);
        let b = square(Vec2::new(1.5, 0.2), 1.0);
        let (axis, depth) = Narrowphase::sat_min_overlap(&a, &b).unwrap();
        assert_relative_eq!(depth, 0.5, epsilon = 1e-5);
        assert_relative_eq!(axis.x.abs(), 1.0, epsilon = 1e-5);
        assert!(Narrowphase::sat_min_overlap(&a, &square(Vec2::new(3.0, 0.0), 1.0)).is_none());
    }

    #[test]
    fn test_point_queries() {
        assert!(Narrowphase::overlap_point_disc(Vec2::new(1.0, 0.0), Vec2::ZERO, 1.0));
        assert!(!Narrowphase::overlap_point_disc(Vec2::new(1.1, 0.0), Vec2::ZERO, 1.0));
        let h = Vec2::new(1.0, 0.1);
        assert!(Narrowphase::overlap_point_rect(Vec2::new(0.9, 0.0), Vec2::ZERO, h, 0.0));
        // Rotated a quarter turn, the long axis is vertical.
        assert!(!Narrowphase::overlap_point_rect(
            Vec2::new(0.9, 0.0),
            Vec2::ZERO,
            h,
            std::f32::consts::FRAC_PI_2
        ));
        let ccw = [Vec2::new(-1.0, -1.0), Vec2::new(1.0, -1.0), Vec2::new(0.0, 1.0)];
        let cw = [ccw[2], ccw[1], ccw[0]];
        for tri in [&ccw[..], &cw[..]] {
            assert!(Narrowphase::overlap_point_polygon(Vec2::new(0.0, 0.0), tri));
            assert!(!Narrowphase::overlap_point_polygon(Vec2::new(0.9, 0.9), tri));
        }
    }
}
