//! # Gizmo Geometry
//!
//! CPU-side geometry for pooled gizmo handles: vertex positions, an optional
//! per-vertex color buffer, optional indices, and axis-aligned bounds.
//!
//! The buffers here are built once when a pool populates itself and then
//! mutated in place every time a handle is reused. Nothing in this module is
//! reallocated per frame: color fills overwrite the existing buffer, and line
//! endpoint edits rewrite two positions and recompute bounds. A dirty flag
//! records that the GPU copy is stale.

pub mod primitives;

pub use primitives::{generate_circle, generate_cube, generate_sphere, wireframe_edges, RingPlane};

use crate::gizmos::color::Color;

/// How a part's vertex stream is interpreted by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topology {
    /// Independent segments: every pair of vertices (or indices) is one line.
    LineList,
    /// A connected polyline through the vertices in order.
    LineStrip,
    /// Indexed triangles.
    TriangleList,
}

/// Axis-aligned bounds of a geometry in local space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: [f32; 3],
    pub max: [f32; 3],
}

/// Geometry owned by one handle part.
///
/// `colors` is empty until [`Geometry::attach_color_buffer`] is called; once
/// attached it always has one entry per vertex and is only ever overwritten,
/// never resized.
#[derive(Debug, Clone)]
pub struct Geometry {
    /// Vertex positions [x, y, z].
    pub positions: Vec<[f32; 3]>,
    /// Per-vertex colors [r, g, b]; empty when the part is colored through
    /// its handle's material color instead.
    pub colors: Vec<[f32; 3]>,
    /// Indices into `positions`; empty for unindexed streams.
    pub indices: Vec<u32>,
    /// Local-space bounds, kept current across in-place edits.
    pub bounds: Option<Bounds>,
    dirty: bool,
}

impl Geometry {
    /// Creates unindexed geometry from a list of points.
    pub fn from_points(points: &[[f32; 3]]) -> Self {
        let mut geometry = Self {
            positions: points.to_vec(),
            colors: Vec::new(),
            indices: Vec::new(),
            bounds: None,
            dirty: true,
        };
        geometry.compute_bounds();
        geometry
    }

    /// Creates indexed geometry.
    pub fn with_indices(positions: Vec<[f32; 3]>, indices: Vec<u32>) -> Self {
        let mut geometry = Self {
            positions,
            colors: Vec::new(),
            indices,
            bounds: None,
            dirty: true,
        };
        geometry.compute_bounds();
        geometry
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Whether a per-vertex color buffer has been attached.
    pub fn has_color_buffer(&self) -> bool {
        !self.colors.is_empty()
    }

    /// Attaches a per-vertex color buffer sized to the vertex count and
    /// initialized to white. Called once per handle at construction.
    pub fn attach_color_buffer(&mut self) {
        self.colors = vec![Color::WHITE.to_array(); self.positions.len()];
        self.dirty = true;
    }

    /// Overwrites every entry of the color buffer with `color`. No-op for
    /// geometry without a color buffer, or when the buffer already holds
    /// `color` — handles redrawn with the same color frame after frame must
    /// not re-upload.
    pub fn fill_color(&mut self, color: Color) {
        let rgb = color.to_array();
        // Fills are always uniform, so one entry tells whether anything
        // changes.
        if self.colors.first().map_or(true, |c| *c == rgb) {
            return;
        }
        for entry in &mut self.colors {
            *entry = rgb;
        }
        self.dirty = true;
    }

    /// Rewrites one vertex position in place.
    pub fn set_point(&mut self, index: usize, point: [f32; 3]) {
        self.positions[index] = point;
        self.dirty = true;
    }

    /// Recomputes axis-aligned bounds from the current positions.
    pub fn compute_bounds(&mut self) {
        if self.positions.is_empty() {
            self.bounds = None;
            return;
        }
        let mut min = self.positions[0];
        let mut max = self.positions[0];
        for position in &self.positions[1..] {
            for axis in 0..3 {
                min[axis] = min[axis].min(position[axis]);
                max[axis] = max[axis].max(position[axis]);
            }
        }
        self.bounds = Some(Bounds { min, max });
    }

    /// Whether the GPU copy of this geometry is stale.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clears the dirty flag after the renderer has uploaded the geometry.
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_buffer_attach_and_fill() {
        let mut geometry = Geometry::from_points(&[[0.0; 3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
        assert!(!geometry.has_color_buffer());

        geometry.attach_color_buffer();
        assert_eq!(geometry.colors.len(), 3);
        assert!(geometry.colors.iter().all(|c| *c == [1.0, 1.0, 1.0]));

        geometry.fill_color(Color::RED);
        assert_eq!(geometry.colors.len(), 3);
        assert!(geometry.colors.iter().all(|c| *c == [1.0, 0.0, 0.0]));
    }

    #[test]
    fn test_bounds_follow_point_edits() {
        let mut geometry = Geometry::from_points(&[[0.0; 3], [0.0, 0.0, 1.0]]);
        assert_eq!(
            geometry.bounds,
            Some(Bounds {
                min: [0.0, 0.0, 0.0],
                max: [0.0, 0.0, 1.0]
            })
        );

        geometry.set_point(1, [-2.0, 3.0, 0.5]);
        geometry.compute_bounds();
        assert_eq!(
            geometry.bounds,
            Some(Bounds {
                min: [-2.0, 0.0, 0.0],
                max: [0.0, 3.0, 0.5]
            })
        );
    }

    #[test]
    fn test_unchanged_fill_stays_clean() {
        let mut geometry = Geometry::from_points(&[[0.0; 3], [1.0; 3]]);
        geometry.attach_color_buffer();
        geometry.fill_color(Color::RED);
        geometry.mark_clean();

        geometry.fill_color(Color::RED);
        assert!(!geometry.is_dirty());
        assert!(geometry.colors.iter().all(|c| *c == [1.0, 0.0, 0.0]));

        geometry.fill_color(Color::BLUE);
        assert!(geometry.is_dirty());
    }

    #[test]
    fn test_dirty_flag_lifecycle() {
        let mut geometry = Geometry::from_points(&[[0.0; 3], [1.0; 3]]);
        assert!(geometry.is_dirty());

        geometry.mark_clean();
        assert!(!geometry.is_dirty());

        geometry.set_point(0, [5.0, 0.0, 0.0]);
        assert!(geometry.is_dirty());
    }
}
