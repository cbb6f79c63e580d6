//! Triangle-fan geometry builders.
//!
//! Every builder returns an ordered vertex sequence whose first element is the
//! fan hub and whose last element repeats the first perimeter vertex, so the
//! fan closes without a gap.

use std::f32::consts::TAU;

use glam::{Vec2, Vec3};

use crate::paint::Color;

use super::RenderError;

/// Smallest segment count that still approximates a closed disc.
pub const MIN_CIRCLE_SEGMENTS: u32 = 3;

/// Vertex data plus color for one fan, ready to become a `Renderable`.
#[derive(Debug, Clone, PartialEq)]
pub struct FanDescriptor {
    pub vertices: Vec<Vec3>,
    pub color: Color,
}

/// Builds a disc fan in the plane `z = depth`.
///
/// Returns `segments + 2` vertices: the center, then `segments + 1` rim points
/// at angles `i / segments * 2π` for `i` in `0..=segments`. Angle 0 lies at
/// `(cx + radius, cy)` and angles grow counter-clockwise.
pub fn circle_fan(
    center: Vec2,
    depth: f32,
    radius: f32,
    segments: u32,
) -> Result<Vec<Vec3>, RenderError> {
    if segments < MIN_CIRCLE_SEGMENTS {
        return Err(RenderError::invalid(format!(
            "circle fan needs at least {MIN_CIRCLE_SEGMENTS} segments, got {segments}"
        )));
    }
    if !(radius > 0.0 && radius.is_finite()) {
        return Err(RenderError::invalid(format!(
            "circle radius must be positive and finite, got {radius}"
        )));
    }
    ensure_finite(&[center.x, center.y, depth])?;

    let mut pts = Vec::with_capacity(segments as usize + 2);
    pts.push(center.extend(depth));
    for i in 0..=segments {
        // Exact endpoint for i == segments keeps the last rim point equal to the first.
        let a = if i == segments { 0.0 } else { i as f32 / segments as f32 * TAU };
        pts.push(Vec3::new(
            center.x + a.cos() * radius,
            center.y + a.sin() * radius,
            depth,
        ));
    }
    Ok(pts)
}

/// Builds an axis-aligned rectangle fan in the plane `z = depth`.
///
/// Returns 6 vertices: the center, the corners
/// `(min,min) → (max,min) → (max,max) → (min,max)`, then `(min,min)` again.
pub fn quad_fan(
    xmin: f32,
    xmax: f32,
    ymin: f32,
    ymax: f32,
    depth: f32,
) -> Result<Vec<Vec3>, RenderError> {
    ensure_finite(&[xmin, xmax, ymin, ymax, depth])?;
    ensure_ordered("x", xmin, xmax)?;
    ensure_ordered("y", ymin, ymax)?;

    let center = Vec3::new((xmin + xmax) * 0.5, (ymin + ymax) * 0.5, depth);
    Ok(vec![
        center,
        Vec3::new(xmin, ymin, depth),
        Vec3::new(xmax, ymin, depth),
        Vec3::new(xmax, ymax, depth),
        Vec3::new(xmin, ymax, depth),
        Vec3::new(xmin, ymin, depth),
    ])
}

/// Decomposes an axis-aligned box into 6 independent quad fans.
///
/// Order: front (`z = max`), back (`z = min`), left (`x = min`),
/// right (`x = max`), top (`y = max`), bottom (`y = min`). Each face has its own
/// hub at the face center and its own closing vertex.
pub fn box_faces(min: Vec3, max: Vec3, color: Color) -> Result<Vec<FanDescriptor>, RenderError> {
    ensure_finite(&min.to_array())?;
    ensure_finite(&max.to_array())?;
    ensure_ordered("x", min.x, max.x)?;
    ensure_ordered("y", min.y, max.y)?;
    ensure_ordered("z", min.z, max.z)?;

    let c = (min + max) * 0.5;

    let side = |x: f32| {
        vec![
            Vec3::new(x, c.y, c.z),
            Vec3::new(x, min.y, min.z),
            Vec3::new(x, min.y, max.z),
            Vec3::new(x, max.y, max.z),
            Vec3::new(x, max.y, min.z),
            Vec3::new(x, min.y, min.z),
        ]
    };
    let cap = |y: f32| {
        vec![
            Vec3::new(c.x, y, c.z),
            Vec3::new(min.x, y, min.z),
            Vec3::new(max.x, y, min.z),
            Vec3::new(max.x, y, max.z),
            Vec3::new(min.x, y, max.z),
            Vec3::new(min.x, y, min.z),
        ]
    };

    let faces = [
        quad_fan(min.x, max.x, min.y, max.y, max.z)?,
        quad_fan(min.x, max.x, min.y, max.y, min.z)?,
        side(min.x),
        side(max.x),
        cap(max.y),
        cap(min.y),
    ];

    Ok(faces
        .into_iter()
        .map(|vertices| FanDescriptor { vertices, color })
        .collect())
}

/// Index list expanding a fan of `vertex_count` vertices into triangles
/// `(0, i, i + 1)`, for backends without native fan topology.
pub fn fan_triangle_indices(vertex_count: u32) -> Vec<u32> {
    if vertex_count < 3 {
        return Vec::new();
    }
    (1..vertex_count - 1).flat_map(|i| [0, i, i + 1]).collect()
}

fn ensure_finite(values: &[f32]) -> Result<(), RenderError> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(RenderError::invalid(format!("non-finite coordinate in {values:?}")))
    }
}

fn ensure_ordered(axis: &str, min: f32, max: f32) -> Result<(), RenderError> {
    if min < max {
        Ok(())
    } else {
        Err(RenderError::invalid(format!(
            "{axis} bounds must satisfy min < max, got {min}..{max}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    // ── circle_fan ────────────────────────────────────────────────────────

    #[test]
    fn circle_fan_vertex_count_and_closure() {
        for segments in [3, 4, 7, 64, 255] {
            let pts = circle_fan(Vec2::new(0.5, -1.0), 0.3, 2.0, segments).unwrap();
            assert_eq!(pts.len(), segments as usize + 2);
            assert_eq!(pts[0], Vec3::new(0.5, -1.0, 0.3));
            assert_eq!(pts[pts.len() - 1], pts[1]);
        }
    }

    #[test]
    fn circle_fan_angle_zero_is_on_positive_x() {
        let pts = circle_fan(Vec2::new(1.0, 2.0), 0.0, 0.5, 8).unwrap();
        assert!(pts[1].abs_diff_eq(Vec3::new(1.5, 2.0, 0.0), EPS));
    }

    #[test]
    fn circle_fan_winds_counter_clockwise() {
        let pts = circle_fan(Vec2::ZERO, 0.0, 1.0, 4).unwrap();
        // Quarter turn from +x lands on +y.
        assert!(pts[2].abs_diff_eq(Vec3::new(0.0, 1.0, 0.0), EPS));
        assert!(pts[3].abs_diff_eq(Vec3::new(-1.0, 0.0, 0.0), EPS));
    }

    #[test]
    fn circle_fan_rim_points_lie_on_radius_and_plane() {
        let center = Vec2::new(0.0, 1.27);
        let pts = circle_fan(center, 0.26, 1.215, 64).unwrap();
        for p in &pts[1..] {
            assert!((p.truncate().distance(center) - 1.215).abs() < EPS);
            assert_eq!(p.z, 0.26);
        }
    }

    #[test]
    fn circle_fan_rejects_too_few_segments() {
        for segments in [0, 1, 2] {
            let err = circle_fan(Vec2::ZERO, 0.0, 1.0, segments).unwrap_err();
            assert!(matches!(err, RenderError::InvalidGeometryParameter(_)));
        }
    }

    #[test]
    fn circle_fan_rejects_bad_radius() {
        assert!(circle_fan(Vec2::ZERO, 0.0, 0.0, 8).is_err());
        assert!(circle_fan(Vec2::ZERO, 0.0, -1.0, 8).is_err());
        assert!(circle_fan(Vec2::ZERO, 0.0, f32::NAN, 8).is_err());
    }

    // ── quad_fan ──────────────────────────────────────────────────────────

    #[test]
    fn quad_fan_layout() {
        let pts = quad_fan(-1.0, 3.0, 0.0, 2.0, 0.5).unwrap();
        assert_eq!(
            pts,
            vec![
                Vec3::new(1.0, 1.0, 0.5),
                Vec3::new(-1.0, 0.0, 0.5),
                Vec3::new(3.0, 0.0, 0.5),
                Vec3::new(3.0, 2.0, 0.5),
                Vec3::new(-1.0, 2.0, 0.5),
                Vec3::new(-1.0, 0.0, 0.5),
            ]
        );
    }

    #[test]
    fn quad_fan_rejects_inverted_extents() {
        assert!(quad_fan(1.0, -1.0, 0.0, 1.0, 0.0).is_err());
        assert!(quad_fan(0.0, 1.0, 1.0, 1.0, 0.0).is_err());
    }

    // ── box_faces ─────────────────────────────────────────────────────────

    #[test]
    fn box_faces_produces_six_closed_fans() {
        let color = Color::from_rgb_u8(110, 70, 40);
        let faces = box_faces(Vec3::new(-4.8, -6.2, -1.2), Vec3::new(4.8, 6.2, -0.6), color).unwrap();

        assert_eq!(faces.len(), 6);
        for face in &faces {
            assert_eq!(face.vertices.len(), 6);
            assert_eq!(face.vertices[5], face.vertices[1]);
            assert_eq!(face.color, color);
        }
    }

    #[test]
    fn box_face_vertices_lie_on_their_planes() {
        let min = Vec3::new(-1.25, -4.0, -0.35);
        let max = Vec3::new(1.25, 1.22, 0.02);
        let faces = box_faces(min, max, Color::WHITE).unwrap();

        // (axis, plane value) per face, in builder order.
        let planes = [(2, max.z), (2, min.z), (0, min.x), (0, max.x), (1, max.y), (1, min.y)];

        for (face, (axis, value)) in faces.iter().zip(planes) {
            for v in &face.vertices {
                assert_eq!(v[axis], value);
            }
        }
    }

    #[test]
    fn box_face_hubs_are_face_centers() {
        let faces = box_faces(Vec3::ZERO, Vec3::new(2.0, 4.0, 6.0), Color::BLACK).unwrap();
        assert_eq!(faces[0].vertices[0], Vec3::new(1.0, 2.0, 6.0));
        assert_eq!(faces[2].vertices[0], Vec3::new(0.0, 2.0, 3.0));
        assert_eq!(faces[5].vertices[0], Vec3::new(1.0, 0.0, 3.0));
    }

    #[test]
    fn box_faces_rejects_flat_box() {
        let err = box_faces(Vec3::ZERO, Vec3::new(1.0, 1.0, 0.0), Color::BLACK).unwrap_err();
        assert!(matches!(err, RenderError::InvalidGeometryParameter(_)));
    }

    // ── fan_triangle_indices ──────────────────────────────────────────────

    #[test]
    fn fan_indices_share_the_hub() {
        assert_eq!(fan_triangle_indices(6), vec![0, 1, 2, 0, 2, 3, 0, 3, 4, 0, 4, 5]);
    }

    #[test]
    fn fan_indices_degenerate_input() {
        assert!(fan_triangle_indices(2).is_empty());
        assert_eq!(fan_triangle_indices(3), vec![0, 1, 2]);
    }
}
