//! # Object Pools
//!
//! Growable recycling pools of renderable handles, one pool per primitive
//! kind. A pool pre-populates itself with a default capacity of handles and
//! hands them out through a monotonic cursor; once every pre-built handle has
//! been used in a frame, the pool grows permanently by building new ones.
//! Resetting the cursor at frame end makes every handle available again —
//! there is no per-handle release and nothing is ever destroyed.
//!
//! What differs between primitive kinds is construction and coloring, not the
//! recycling policy, so pools are generic over a [`HandleFactory`].

use crate::gfx::geometry::{
    generate_circle, wireframe_edges, Geometry, RingPlane, Topology,
};

use super::color::Color;
use super::handle::{Handle, Part};

/// Handles built per pool at construction time.
pub const DEFAULT_POOL_CAPACITY: usize = 100;

/// Construction and coloring strategy for one primitive kind.
pub trait HandleFactory {
    /// Builds one fresh handle. Called while populating the pool and again
    /// on every permanent growth step.
    fn create(&self) -> Handle;

    /// Writes `color` into the handle. The default fills every part's
    /// per-vertex color buffer; factories for material-colored kinds
    /// override this.
    fn apply_color(&self, handle: &mut Handle, color: Color) {
        for part in &mut handle.parts {
            part.geometry.fill_color(color);
        }
    }
}

/// Factory for two-point line segments.
///
/// Lines start degenerate, (0,0,0)-(0,0,1), and are repositioned in place on
/// every use. They carry no color buffer; color goes through the handle's
/// material color.
pub struct LineFactory;

impl HandleFactory for LineFactory {
    fn create(&self) -> Handle {
        let geometry = Geometry::from_points(&[[0.0, 0.0, 0.0], [0.0, 0.0, 1.0]]);
        Handle::single(Part::new(geometry, Topology::LineList))
    }

    fn apply_color(&self, handle: &mut Handle, color: Color) {
        handle.material_color = color;
    }
}

/// Factory for solid or wireframe mesh handles built from a shared prototype
/// geometry (unit sphere or unit cube).
///
/// Each handle clones the prototype and attaches its own per-vertex color
/// buffer. The wire variant converts the prototype's triangles to unique
/// edges once, at factory construction, and renders them as a line list.
pub struct MeshFactory {
    prototype: Geometry,
    topology: Topology,
    overlay: bool,
}

impl MeshFactory {
    /// Depth-tested triangle mesh factory.
    pub fn solid(prototype: Geometry) -> Self {
        Self {
            prototype,
            topology: Topology::TriangleList,
            overlay: false,
        }
    }

    /// Overlay wireframe factory for the same prototype.
    pub fn wire(mut prototype: Geometry) -> Self {
        prototype.indices = wireframe_edges(&prototype.indices);
        Self {
            prototype,
            topology: Topology::LineList,
            overlay: true,
        }
    }
}

impl HandleFactory for MeshFactory {
    fn create(&self) -> Handle {
        let mut geometry = self.prototype.clone();
        geometry.attach_color_buffer();
        let part = if self.overlay {
            Part::overlay(geometry, self.topology)
        } else {
            Part::new(geometry, self.topology)
        };
        Handle::single(part)
    }
}

/// Factory for axis-ring wire spheres: three orthogonal unit circles grouped
/// as one composite handle. Coloring iterates all three rings.
pub struct AxisRingFactory {
    pub resolution: u32,
}

impl Default for AxisRingFactory {
    fn default() -> Self {
        Self { resolution: 24 }
    }
}

impl HandleFactory for AxisRingFactory {
    fn create(&self) -> Handle {
        let parts = [RingPlane::XY, RingPlane::YZ, RingPlane::XZ]
            .into_iter()
            .map(|plane| {
                let mut geometry = generate_circle(self.resolution, plane);
                geometry.attach_color_buffer();
                Part::overlay(geometry, Topology::LineStrip)
            })
            .collect();
        Handle::group(parts)
    }
}

/// Wire-sphere representation switch: axis rings read better for debug
/// markers; the wire mesh shows the full tessellation.
pub enum WireSphereFactory {
    AxisRings(AxisRingFactory),
    Mesh(MeshFactory),
}

impl HandleFactory for WireSphereFactory {
    fn create(&self) -> Handle {
        match self {
            Self::AxisRings(factory) => factory.create(),
            Self::Mesh(factory) => factory.create(),
        }
    }

    fn apply_color(&self, handle: &mut Handle, color: Color) {
        match self {
            Self::AxisRings(factory) => factory.apply_color(handle, color),
            Self::Mesh(factory) => factory.apply_color(handle, color),
        }
    }
}

/// Position of a handle within its pool. Stable for the life of the pool:
/// handles are only ever appended, never removed or reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandleId(usize);

impl HandleId {
    /// Index of the handle in its pool.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A growable recycling pool of handles of one primitive kind.
///
/// Invariants: `index <= handles.len()` always holds, and `capacity` is the
/// historical high-water mark — it only grows, never shrinks.
pub struct Pool<F: HandleFactory> {
    factory: F,
    handles: Vec<Handle>,
    index: usize,
    capacity: usize,
}

impl<F: HandleFactory> Pool<F> {
    /// Creates a pool pre-populated with [`DEFAULT_POOL_CAPACITY`] handles.
    pub fn new(factory: F) -> Self {
        Self::with_capacity(factory, DEFAULT_POOL_CAPACITY)
    }

    /// Creates a pool pre-populated with `capacity` handles.
    pub fn with_capacity(factory: F, capacity: usize) -> Self {
        let mut pool = Self {
            factory,
            handles: Vec::with_capacity(capacity),
            index: 0,
            capacity,
        };
        pool.populate();
        pool
    }

    fn populate(&mut self) {
        for _ in 0..self.capacity {
            let handle = self.factory.create();
            self.handles.push(handle);
        }
    }

    /// Returns the next free handle for this frame, growing the pool
    /// permanently when every existing handle is already in use.
    ///
    /// Never fails; amortized O(1). The cursor is monotonic, so no handle is
    /// returned twice between resets.
    pub fn get(&mut self) -> HandleId {
        if self.index == self.handles.len() {
            self.capacity += 1;
            let handle = self.factory.create();
            self.handles.push(handle);
            log::trace!("gizmo pool grew to capacity {}", self.capacity);
        }
        let id = HandleId(self.index);
        self.index += 1;
        id
    }

    /// Borrows a handle by id.
    pub fn handle(&self, id: HandleId) -> &Handle {
        &self.handles[id.index()]
    }

    /// Mutably borrows a handle by id.
    pub fn handle_mut(&mut self, id: HandleId) -> &mut Handle {
        &mut self.handles[id.index()]
    }

    /// Colors a handle through the pool's factory.
    pub fn apply_color(&mut self, id: HandleId, color: Color) {
        self.factory
            .apply_color(&mut self.handles[id.index()], color);
    }

    /// Resets the cursor so every handle becomes available again. Called by
    /// the drawer at frame end; this is the only recycling mechanism.
    pub fn reset(&mut self) {
        self.index = 0;
    }

    /// Historical high-water mark of handles ever needed in one frame.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Handles handed out since the last reset.
    pub fn in_use(&self) -> usize {
        self.index
    }

    /// Number of handles currently built.
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Whether the pool holds no handles at all.
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::generate_cube;

    #[test]
    fn test_populate_builds_capacity_handles() {
        let pool = Pool::with_capacity(LineFactory, 10);
        assert_eq!(pool.len(), 10);
        assert_eq!(pool.capacity(), 10);
        assert_eq!(pool.in_use(), 0);
    }

    #[test]
    fn test_get_is_unique_until_reset() {
        let mut pool = Pool::with_capacity(LineFactory, 5);
        let mut ids = Vec::new();
        for _ in 0..5 {
            ids.push(pool.get());
        }
        ids.sort_by_key(|id| id.index());
        ids.dedup();
        assert_eq!(ids.len(), 5);
    }

    #[test]
    fn test_exhaustion_grows_capacity_by_one() {
        let mut pool = Pool::with_capacity(LineFactory, 3);
        for _ in 0..3 {
            let _ = pool.get();
        }
        assert_eq!(pool.capacity(), 3);

        let id = pool.get();
        assert_eq!(pool.capacity(), 4);
        assert_eq!(pool.len(), 4);
        assert_eq!(id.index(), 3);
    }

    #[test]
    fn test_growth_persists_across_resets() {
        let mut pool = Pool::with_capacity(LineFactory, 2);
        for _ in 0..7 {
            let _ = pool.get();
        }
        assert_eq!(pool.capacity(), 7);

        pool.reset();
        assert_eq!(pool.capacity(), 7);
        assert_eq!(pool.len(), 7);
    }

    #[test]
    fn test_reset_returns_first_handle_again() {
        let mut pool = Pool::with_capacity(LineFactory, 4);
        let first = pool.get();
        let first_ptr = pool.handle(first) as *const Handle;

        let _ = pool.get();
        pool.reset();

        let again = pool.get();
        assert_eq!(again, first);
        assert_eq!(pool.handle(again) as *const Handle, first_ptr);
    }

    #[test]
    fn test_line_factory_starts_degenerate() {
        let handle = LineFactory.create();
        assert_eq!(handle.parts.len(), 1);
        let geometry = &handle.parts[0].geometry;
        assert_eq!(geometry.positions, vec![[0.0, 0.0, 0.0], [0.0, 0.0, 1.0]]);
        assert!(!geometry.has_color_buffer());
    }

    #[test]
    fn test_line_factory_colors_material() {
        let mut pool = Pool::with_capacity(LineFactory, 1);
        let id = pool.get();
        pool.apply_color(id, Color::GREEN);
        assert_eq!(pool.handle(id).material_color, Color::GREEN);
    }

    #[test]
    fn test_mesh_factory_uniform_fill() {
        let mut pool = Pool::with_capacity(MeshFactory::solid(generate_cube()), 1);
        let id = pool.get();
        pool.apply_color(id, Color::BLUE);

        let geometry = &pool.handle(id).parts[0].geometry;
        assert_eq!(geometry.colors.len(), geometry.vertex_count());
        assert!(geometry.colors.iter().all(|c| *c == [0.0, 0.0, 1.0]));
    }

    #[test]
    fn test_wire_factory_emits_line_list() {
        let handle = MeshFactory::wire(generate_cube()).create();
        let part = &handle.parts[0];
        assert_eq!(part.topology, Topology::LineList);
        assert!(part.overlay);
        assert_eq!(part.geometry.indices.len(), 18 * 2);
    }

    #[test]
    fn test_axis_rings_color_every_part() {
        let mut pool = Pool::with_capacity(AxisRingFactory::default(), 1);
        let id = pool.get();
        let handle = pool.handle(id);
        assert_eq!(handle.parts.len(), 3);

        pool.apply_color(id, Color::RED);
        for part in &pool.handle(id).parts {
            assert!(part.geometry.colors.iter().all(|c| *c == [1.0, 0.0, 0.0]));
        }
    }
}
