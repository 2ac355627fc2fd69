//! # Primitive Shape Generation
//!
//! Unit-sized shapes for the gizmo pools. Everything here is generated once
//! per pool at construction and cloned per handle; per-use sizing happens
//! through the handle's scale, so all shapes are unit radius or unit extent
//! and centered at the origin.
//!
//! Gizmo rendering is unlit, so no normals or texture coordinates are
//! generated.

use std::collections::BTreeSet;
use std::f32::consts::{PI, TAU};

use super::Geometry;

/// Plane a unit circle lies in; the three together form an axis-ring wire
/// sphere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingPlane {
    XY,
    YZ,
    XZ,
}

/// Generates a unit-radius UV sphere centered at the origin.
///
/// # Arguments
/// * `longitude_segments` - Number of vertical segments (minimum 3)
/// * `latitude_segments` - Number of horizontal segments (minimum 2)
pub fn generate_sphere(longitude_segments: u32, latitude_segments: u32) -> Geometry {
    let long_segs = longitude_segments.max(3);
    let lat_segs = latitude_segments.max(2);

    let mut positions = Vec::new();
    let mut indices = Vec::new();

    for lat in 0..=lat_segs {
        let theta = lat as f32 * PI / lat_segs as f32;
        let sin_theta = theta.sin();
        let cos_theta = theta.cos();

        for long in 0..=long_segs {
            let phi = long as f32 * TAU / long_segs as f32;
            positions.push([sin_theta * phi.cos(), cos_theta, sin_theta * phi.sin()]);
        }
    }

    for lat in 0..lat_segs {
        for long in 0..long_segs {
            let first = lat * (long_segs + 1) + long;
            let second = first + long_segs + 1;

            indices.push(first);
            indices.push(second);
            indices.push(first + 1);

            indices.push(second);
            indices.push(second + 1);
            indices.push(first + 1);
        }
    }

    Geometry::with_indices(positions, indices)
}

/// Generates a unit cube centered at the origin, vertices at ±0.5.
///
/// Corner vertices are shared between faces: with no lighting there is no
/// need for per-face normals, so 8 vertices and 12 triangles suffice.
pub fn generate_cube() -> Geometry {
    let positions = vec![
        [-0.5, -0.5, -0.5],
        [0.5, -0.5, -0.5],
        [0.5, 0.5, -0.5],
        [-0.5, 0.5, -0.5],
        [-0.5, -0.5, 0.5],
        [0.5, -0.5, 0.5],
        [0.5, 0.5, 0.5],
        [-0.5, 0.5, 0.5],
    ];

    #[rustfmt::skip]
    let indices = vec![
        // -Z / +Z
        0, 2, 1,  0, 3, 2,
        4, 5, 6,  4, 6, 7,
        // -X / +X
        0, 4, 7,  0, 7, 3,
        1, 2, 6,  1, 6, 5,
        // -Y / +Y
        0, 1, 5,  0, 5, 4,
        3, 7, 6,  3, 6, 2,
    ];

    Geometry::with_indices(positions, indices)
}

/// Generates a closed unit circle as a line strip in the given plane.
///
/// Produces `resolution + 1` points; the last point repeats the first so the
/// strip closes. The plane rotation is baked into the positions rather than
/// carried as a per-part transform.
pub fn generate_circle(resolution: u32, plane: RingPlane) -> Geometry {
    let resolution = resolution.max(3);
    let mut points = Vec::with_capacity(resolution as usize + 1);

    for i in 0..=resolution {
        let angle = i as f32 * TAU / resolution as f32;
        let (sin, cos) = angle.sin_cos();
        points.push(match plane {
            RingPlane::XY => [cos, sin, 0.0],
            RingPlane::YZ => [0.0, cos, sin],
            RingPlane::XZ => [cos, 0.0, sin],
        });
    }

    Geometry::from_points(&points)
}

/// Extracts the unique undirected edges of an indexed triangle mesh as
/// line-list indices.
///
/// Shared edges are emitted once. Diagonal edges introduced by triangulation
/// are kept, matching how a wireframe material rasterizes triangle meshes.
pub fn wireframe_edges(indices: &[u32]) -> Vec<u32> {
    let mut seen = BTreeSet::new();
    let mut edges = Vec::new();

    for triangle in indices.chunks(3) {
        if triangle.len() < 3 {
            break;
        }
        for (a, b) in [
            (triangle[0], triangle[1]),
            (triangle[1], triangle[2]),
            (triangle[2], triangle[0]),
        ] {
            let edge = (a.min(b), a.max(b));
            if seen.insert(edge) {
                edges.push(edge.0);
                edges.push(edge.1);
            }
        }
    }

    edges
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere_generation() {
        let sphere = generate_sphere(12, 6);
        assert_eq!(sphere.positions.len(), 13 * 7); // (long+1) * (lat+1)
        assert_eq!(sphere.indices.len(), (12 * 6 * 6) as usize);

        // Every vertex sits on the unit sphere.
        for p in &sphere.positions {
            let length = (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt();
            assert!((length - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_cube_generation() {
        let cube = generate_cube();
        assert_eq!(cube.positions.len(), 8);
        assert_eq!(cube.indices.len(), 36); // 12 triangles

        for p in &cube.positions {
            assert!(p.iter().all(|c| c.abs() == 0.5));
        }
    }

    #[test]
    fn test_circle_is_closed() {
        let circle = generate_circle(24, RingPlane::XY);
        assert_eq!(circle.positions.len(), 25);
        let first = circle.positions[0];
        let last = circle.positions[24];
        assert!((first[0] - last[0]).abs() < 1e-5);
        assert!((first[1] - last[1]).abs() < 1e-5);
        assert!(circle.positions.iter().all(|p| p[2] == 0.0));
    }

    #[test]
    fn test_circle_planes() {
        let yz = generate_circle(8, RingPlane::YZ);
        assert!(yz.positions.iter().all(|p| p[0] == 0.0));
        let xz = generate_circle(8, RingPlane::XZ);
        assert!(xz.positions.iter().all(|p| p[1] == 0.0));
    }

    #[test]
    fn test_wireframe_edges_deduplicate() {
        let cube = generate_cube();
        let edges = wireframe_edges(&cube.indices);
        // 12 cube edges + 6 face diagonals, two indices each.
        assert_eq!(edges.len(), 18 * 2);

        // No duplicate undirected pairs.
        let mut pairs: Vec<(u32, u32)> = edges
            .chunks(2)
            .map(|e| (e[0].min(e[1]), e[0].max(e[1])))
            .collect();
        pairs.sort_unstable();
        pairs.dedup();
        assert_eq!(pairs.len(), 18);
    }
}
