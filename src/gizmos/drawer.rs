//! # Immediate-Mode Gizmo Drawer
//!
//! The per-frame drawing API. Calling code brackets each frame with
//! [`Gizmos::begin`] and [`Gizmos::end`] and issues draw calls in between;
//! every call pulls a recycled handle from the matching pool, overwrites its
//! transform and color in place, and attaches it to the frame container.
//! `end()` resets every pool's cursor, which is the only recycling step —
//! handles must not be retained across the frame boundary, since the next
//! frame will silently overwrite them.
//!
//! Draw calls outside an open frame fail fast with [`GizmoError`]; the state
//! machine is `Idle -> begin -> Drawing -> end -> Idle` with no other valid
//! transitions.

use cgmath::{Array, Vector3};
use thiserror::Error;

use crate::gfx::geometry::{generate_cube, generate_sphere};

use super::color::Color;
use super::handle::Handle;
use super::pool::{
    AxisRingFactory, HandleFactory, HandleId, LineFactory, MeshFactory, Pool, WireSphereFactory,
    DEFAULT_POOL_CAPACITY,
};

/// Errors from misusing the begin/end frame bracket.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GizmoError {
    #[error("begin() called while a frame is already open")]
    FrameAlreadyOpen,
    #[error("end() called without a matching begin()")]
    FrameNotOpen,
    #[error("draw call issued outside a begin()/end() window")]
    DrawOutsideFrame,
}

/// The primitive kinds the drawer pools separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Line,
    WireSphere,
    WireCube,
    Sphere,
    Cube,
}

/// One handle attached to the current frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attachment {
    pub kind: PrimitiveKind,
    pub handle: HandleId,
}

/// The frame-scoped container: holds exactly the handles drawn since the
/// last `begin()`. Clearing it detaches the handles without destroying them —
/// they stay alive in their pools.
#[derive(Debug, Default)]
pub struct FrameContainer {
    children: Vec<Attachment>,
}

impl FrameContainer {
    fn clear(&mut self) {
        self.children.clear();
    }

    fn attach(&mut self, kind: PrimitiveKind, handle: HandleId) {
        self.children.push(Attachment { kind, handle });
    }

    /// Handles attached this frame, in draw order.
    pub fn children(&self) -> &[Attachment] {
        &self.children
    }

    /// Number of attached handles.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Whether nothing has been drawn this frame.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

/// Which wire-sphere representation the drawer pools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WireSphereStyle {
    /// Three orthogonal circles, Unity-style.
    #[default]
    AxisRings,
    /// Wireframe of the tessellated sphere mesh.
    WireMesh,
}

/// Construction-time tuning for [`Gizmos`].
#[derive(Debug, Clone, Copy)]
pub struct GizmosConfig {
    /// Handles pre-built per pool.
    pub pool_capacity: usize,
    pub wire_sphere_style: WireSphereStyle,
    /// Sphere tessellation as (longitude, latitude) segments.
    pub sphere_segments: (u32, u32),
    /// Points per axis ring.
    pub ring_resolution: u32,
}

impl Default for GizmosConfig {
    fn default() -> Self {
        Self {
            pool_capacity: DEFAULT_POOL_CAPACITY,
            wire_sphere_style: WireSphereStyle::default(),
            sphere_segments: (12, 6),
            ring_resolution: 24,
        }
    }
}

/// Capacity and usage counters for one pool, for UI display.
#[derive(Debug, Clone, Copy)]
pub struct PoolStatistics {
    pub kind: PrimitiveKind,
    pub capacity: usize,
    pub in_use: usize,
}

/// Snapshot of drawer state, taken while a frame is open.
#[derive(Debug, Clone, Copy)]
pub struct GizmoStatistics {
    /// Handles attached to the frame container.
    pub attached: usize,
    pub pools: [PoolStatistics; 5],
}

impl Default for GizmoStatistics {
    fn default() -> Self {
        Self {
            attached: 0,
            pools: [
                PrimitiveKind::Line,
                PrimitiveKind::WireSphere,
                PrimitiveKind::WireCube,
                PrimitiveKind::Sphere,
                PrimitiveKind::Cube,
            ]
            .map(|kind| PoolStatistics {
                kind,
                capacity: 0,
                in_use: 0,
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DrawState {
    Idle,
    Drawing,
}

/// The immediate-mode gizmo drawer: five recycling pools, a frame container,
/// and the current draw color.
///
/// ```
/// use cgmath::Vector3;
/// use etch::gizmos::{Color, GizmoError, Gizmos};
///
/// fn frame(gizmos: &mut Gizmos) -> Result<(), GizmoError> {
///     gizmos.begin()?;
///     gizmos.set_color(Color::RED);
///     gizmos.line(Vector3::new(0.0, 0.0, 0.0), Vector3::new(1.0, 1.0, 1.0))?;
///     gizmos.wire_sphere(Vector3::new(0.0, 0.0, 0.0), 2.0)?;
///     gizmos.end()
/// }
///
/// let mut gizmos = Gizmos::new();
/// frame(&mut gizmos).unwrap();
/// ```
pub struct Gizmos {
    lines: Pool<LineFactory>,
    wire_spheres: Pool<WireSphereFactory>,
    wire_cubes: Pool<MeshFactory>,
    spheres: Pool<MeshFactory>,
    cubes: Pool<MeshFactory>,
    frame: FrameContainer,
    color: Color,
    state: DrawState,
}

impl Default for Gizmos {
    fn default() -> Self {
        Self::new()
    }
}

impl Gizmos {
    /// Creates a drawer with default pools.
    pub fn new() -> Self {
        Self::with_config(GizmosConfig::default())
    }

    /// Creates a drawer with explicit tuning.
    pub fn with_config(config: GizmosConfig) -> Self {
        let (longitude, latitude) = config.sphere_segments;
        let sphere = generate_sphere(longitude, latitude);
        let cube = generate_cube();

        let wire_sphere_factory = match config.wire_sphere_style {
            WireSphereStyle::AxisRings => WireSphereFactory::AxisRings(AxisRingFactory {
                resolution: config.ring_resolution,
            }),
            WireSphereStyle::WireMesh => WireSphereFactory::Mesh(MeshFactory::wire(sphere.clone())),
        };

        Self {
            lines: Pool::with_capacity(LineFactory, config.pool_capacity),
            wire_spheres: Pool::with_capacity(wire_sphere_factory, config.pool_capacity),
            wire_cubes: Pool::with_capacity(MeshFactory::wire(cube.clone()), config.pool_capacity),
            spheres: Pool::with_capacity(MeshFactory::solid(sphere), config.pool_capacity),
            cubes: Pool::with_capacity(MeshFactory::solid(cube), config.pool_capacity),
            frame: FrameContainer::default(),
            color: Color::WHITE,
            state: DrawState::Idle,
        }
    }

    /// Opens a frame: resets the current color to white and detaches all of
    /// last frame's handles from the frame container.
    pub fn begin(&mut self) -> Result<(), GizmoError> {
        if self.state == DrawState::Drawing {
            return Err(GizmoError::FrameAlreadyOpen);
        }
        self.color = Color::WHITE;
        self.frame.clear();
        self.state = DrawState::Drawing;
        Ok(())
    }

    /// Closes the frame: resets every pool's cursor so all handles become
    /// available to the next frame.
    pub fn end(&mut self) -> Result<(), GizmoError> {
        if self.state != DrawState::Drawing {
            return Err(GizmoError::FrameNotOpen);
        }
        self.lines.reset();
        self.wire_spheres.reset();
        self.wire_cubes.reset();
        self.spheres.reset();
        self.cubes.reset();
        self.state = DrawState::Idle;
        Ok(())
    }

    /// Sets the color applied to everything drawn until the next change.
    pub fn set_color(&mut self, color: impl Into<Color>) {
        self.color = color.into();
    }

    /// The current draw color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Draws a line segment from `from` to `to`.
    pub fn line(&mut self, from: Vector3<f32>, to: Vector3<f32>) -> Result<(), GizmoError> {
        self.ensure_open()?;
        let id = self.lines.get();
        let color = self.color;

        let handle = self.lines.handle_mut(id);
        let geometry = &mut handle.parts[0].geometry;
        geometry.set_point(0, from.into());
        geometry.set_point(1, to.into());
        geometry.compute_bounds();
        handle.material_color = color;

        self.frame.attach(PrimitiveKind::Line, id);
        Ok(())
    }

    /// Draws a wire sphere of the given radius centered at `center`.
    pub fn wire_sphere(&mut self, center: Vector3<f32>, radius: f32) -> Result<(), GizmoError> {
        self.ensure_open()?;
        let id = place(
            &mut self.wire_spheres,
            center,
            Vector3::from_value(radius),
            self.color,
        );
        self.frame.attach(PrimitiveKind::WireSphere, id);
        Ok(())
    }

    /// Draws a wire cube with per-axis extents `size` centered at `center`.
    pub fn wire_cube(&mut self, center: Vector3<f32>, size: Vector3<f32>) -> Result<(), GizmoError> {
        self.ensure_open()?;
        let id = place(&mut self.wire_cubes, center, size, self.color);
        self.frame.attach(PrimitiveKind::WireCube, id);
        Ok(())
    }

    /// Draws a solid sphere of the given radius centered at `center`.
    pub fn sphere(&mut self, center: Vector3<f32>, radius: f32) -> Result<(), GizmoError> {
        self.ensure_open()?;
        let id = place(
            &mut self.spheres,
            center,
            Vector3::from_value(radius),
            self.color,
        );
        self.frame.attach(PrimitiveKind::Sphere, id);
        Ok(())
    }

    /// Draws a solid cube with per-axis extents `size` centered at `center`.
    pub fn cube(&mut self, center: Vector3<f32>, size: Vector3<f32>) -> Result<(), GizmoError> {
        self.ensure_open()?;
        let id = place(&mut self.cubes, center, size, self.color);
        self.frame.attach(PrimitiveKind::Cube, id);
        Ok(())
    }

    fn ensure_open(&self) -> Result<(), GizmoError> {
        if self.state == DrawState::Drawing {
            Ok(())
        } else {
            Err(GizmoError::DrawOutsideFrame)
        }
    }

    /// The frame container.
    pub fn frame(&self) -> &FrameContainer {
        &self.frame
    }

    /// Number of handles attached this frame.
    pub fn frame_len(&self) -> usize {
        self.frame.len()
    }

    /// One attachment by draw order, or `None` past the end of the frame.
    pub fn attachment(&self, index: usize) -> Option<Attachment> {
        self.frame.children().get(index).copied()
    }

    /// Resolves an attachment to its handle.
    pub fn handle(&self, attachment: Attachment) -> &Handle {
        match attachment.kind {
            PrimitiveKind::Line => self.lines.handle(attachment.handle),
            PrimitiveKind::WireSphere => self.wire_spheres.handle(attachment.handle),
            PrimitiveKind::WireCube => self.wire_cubes.handle(attachment.handle),
            PrimitiveKind::Sphere => self.spheres.handle(attachment.handle),
            PrimitiveKind::Cube => self.cubes.handle(attachment.handle),
        }
    }

    /// Mutably resolves an attachment to its handle (used by the renderer to
    /// install GPU resources).
    pub fn handle_mut(&mut self, attachment: Attachment) -> &mut Handle {
        match attachment.kind {
            PrimitiveKind::Line => self.lines.handle_mut(attachment.handle),
            PrimitiveKind::WireSphere => self.wire_spheres.handle_mut(attachment.handle),
            PrimitiveKind::WireCube => self.wire_cubes.handle_mut(attachment.handle),
            PrimitiveKind::Sphere => self.spheres.handle_mut(attachment.handle),
            PrimitiveKind::Cube => self.cubes.handle_mut(attachment.handle),
        }
    }

    /// Iterates this frame's handles in draw order.
    pub fn drawn(&self) -> impl Iterator<Item = &Handle> {
        self.frame.children().iter().map(|a| self.handle(*a))
    }

    /// Snapshot of pool usage and frame size for UI display.
    pub fn statistics(&self) -> GizmoStatistics {
        GizmoStatistics {
            attached: self.frame.len(),
            pools: [
                PoolStatistics {
                    kind: PrimitiveKind::Line,
                    capacity: self.lines.capacity(),
                    in_use: self.lines.in_use(),
                },
                PoolStatistics {
                    kind: PrimitiveKind::WireSphere,
                    capacity: self.wire_spheres.capacity(),
                    in_use: self.wire_spheres.in_use(),
                },
                PoolStatistics {
                    kind: PrimitiveKind::WireCube,
                    capacity: self.wire_cubes.capacity(),
                    in_use: self.wire_cubes.in_use(),
                },
                PoolStatistics {
                    kind: PrimitiveKind::Sphere,
                    capacity: self.spheres.capacity(),
                    in_use: self.spheres.in_use(),
                },
                PoolStatistics {
                    kind: PrimitiveKind::Cube,
                    capacity: self.cubes.capacity(),
                    in_use: self.cubes.in_use(),
                },
            ],
        }
    }
}

/// Positions, scales, and colors a pooled handle. Shared by every draw call
/// except lines, which rewrite geometry instead of scaling a unit shape.
fn place<F: HandleFactory>(
    pool: &mut Pool<F>,
    center: Vector3<f32>,
    scale: Vector3<f32>,
    color: Color,
) -> HandleId {
    let id = pool.get();
    let handle = pool.handle_mut(id);
    handle.set_position(center);
    handle.set_scale(scale);
    pool.apply_color(id, color);
    id
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> Gizmos {
        Gizmos::with_config(GizmosConfig {
            pool_capacity: 8,
            ..GizmosConfig::default()
        })
    }

    #[test]
    fn test_begin_end_must_alternate() {
        let mut gizmos = small();
        assert_eq!(gizmos.end(), Err(GizmoError::FrameNotOpen));

        gizmos.begin().unwrap();
        assert_eq!(gizmos.begin(), Err(GizmoError::FrameAlreadyOpen));

        gizmos.end().unwrap();
        assert_eq!(gizmos.end(), Err(GizmoError::FrameNotOpen));
    }

    #[test]
    fn test_draw_outside_frame_fails() {
        let mut gizmos = small();
        let origin = Vector3::new(0.0, 0.0, 0.0);
        assert_eq!(
            gizmos.line(origin, Vector3::new(1.0, 0.0, 0.0)),
            Err(GizmoError::DrawOutsideFrame)
        );
        assert_eq!(
            gizmos.sphere(origin, 1.0),
            Err(GizmoError::DrawOutsideFrame)
        );

        gizmos.begin().unwrap();
        gizmos.end().unwrap();
        assert_eq!(
            gizmos.cube(origin, Vector3::new(1.0, 1.0, 1.0)),
            Err(GizmoError::DrawOutsideFrame)
        );
    }

    #[test]
    fn test_line_round_trip() {
        let mut gizmos = small();
        gizmos.begin().unwrap();
        gizmos
            .line(Vector3::new(1.0, 2.0, 3.0), Vector3::new(4.0, 5.0, 6.0))
            .unwrap();

        let handle = gizmos.handle(gizmos.attachment(0).unwrap());
        assert_eq!(
            handle.parts[0].geometry.positions,
            vec![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]
        );
        let bounds = handle.parts[0].geometry.bounds.unwrap();
        assert_eq!(bounds.min, [1.0, 2.0, 3.0]);
        assert_eq!(bounds.max, [4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_attachment_out_of_range_is_none() {
        let mut gizmos = small();
        gizmos.begin().unwrap();
        gizmos.sphere(Vector3::new(0.0, 0.0, 0.0), 1.0).unwrap();

        assert!(gizmos.attachment(0).is_some());
        assert_eq!(gizmos.attachment(1), None);
    }

    #[test]
    fn test_red_line_and_wire_sphere_scenario() {
        let mut gizmos = small();
        gizmos.begin().unwrap();
        gizmos.set_color(Color::RED);
        gizmos
            .line(Vector3::new(0.0, 0.0, 0.0), Vector3::new(1.0, 1.0, 1.0))
            .unwrap();
        gizmos.wire_sphere(Vector3::new(0.0, 0.0, 0.0), 2.0).unwrap();
        gizmos.end().unwrap();

        assert_eq!(gizmos.frame_len(), 2);

        let line = gizmos.handle(gizmos.attachment(0).unwrap());
        assert_eq!(line.material_color, Color::RED);

        let sphere = gizmos.handle(gizmos.attachment(1).unwrap());
        assert_eq!(sphere.scale, Vector3::new(2.0, 2.0, 2.0));
        for part in &sphere.parts {
            assert!(part.geometry.colors.iter().all(|c| *c == [1.0, 0.0, 0.0]));
        }
    }

    #[test]
    fn test_begin_resets_color_to_white() {
        let mut gizmos = small();
        gizmos.begin().unwrap();
        gizmos.set_color(Color::CYAN);
        gizmos.end().unwrap();

        gizmos.begin().unwrap();
        assert_eq!(gizmos.color(), Color::WHITE);
    }

    #[test]
    fn test_set_color_affects_only_subsequent_draws() {
        let mut gizmos = small();
        let origin = Vector3::new(0.0, 0.0, 0.0);
        gizmos.begin().unwrap();
        gizmos.sphere(origin, 1.0).unwrap();
        gizmos.set_color(Color::YELLOW);
        gizmos.sphere(origin, 1.0).unwrap();

        let first = gizmos.handle(gizmos.attachment(0).unwrap());
        assert!(first.parts[0]
            .geometry
            .colors
            .iter()
            .all(|c| *c == [1.0, 1.0, 1.0]));
        let second = gizmos.handle(gizmos.attachment(1).unwrap());
        assert!(second.parts[0]
            .geometry
            .colors
            .iter()
            .all(|c| *c == [1.0, 1.0, 0.0]));
    }

    #[test]
    fn test_overflow_grows_pool_permanently() {
        let mut gizmos = Gizmos::with_config(GizmosConfig {
            pool_capacity: 100,
            ..GizmosConfig::default()
        });
        let origin = Vector3::new(0.0, 0.0, 0.0);

        gizmos.begin().unwrap();
        for i in 0..150 {
            gizmos.line(origin, Vector3::new(i as f32, 0.0, 0.0)).unwrap();
        }
        gizmos.end().unwrap();

        assert_eq!(gizmos.frame_len(), 150);
        let stats = gizmos.statistics();
        assert_eq!(stats.pools[0].capacity, 150);

        // All 150 attachments reference distinct handles.
        let mut ids: Vec<usize> = gizmos
            .frame()
            .children()
            .iter()
            .map(|a| a.handle.index())
            .collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 150);
    }

    #[test]
    fn test_consecutive_frames_reuse_handles_by_identity() {
        let mut gizmos = small();
        let origin = Vector3::new(0.0, 0.0, 0.0);

        gizmos.begin().unwrap();
        for _ in 0..5 {
            gizmos.sphere(origin, 1.0).unwrap();
        }
        let first_frame: Vec<*const Handle> =
            gizmos.drawn().map(|h| h as *const Handle).collect();
        gizmos.end().unwrap();

        gizmos.begin().unwrap();
        for _ in 0..5 {
            gizmos.sphere(origin, 3.0).unwrap();
        }
        let second_frame: Vec<*const Handle> =
            gizmos.drawn().map(|h| h as *const Handle).collect();
        gizmos.end().unwrap();

        assert_eq!(first_frame, second_frame);
    }

    #[test]
    fn test_end_resets_solid_pools_too() {
        let mut gizmos = small();
        let origin = Vector3::new(0.0, 0.0, 0.0);
        let unit = Vector3::new(1.0, 1.0, 1.0);

        gizmos.begin().unwrap();
        gizmos.sphere(origin, 1.0).unwrap();
        gizmos.cube(origin, unit).unwrap();
        gizmos.wire_cube(origin, unit).unwrap();
        gizmos.end().unwrap();

        let stats = gizmos.statistics();
        for pool in stats.pools {
            assert_eq!(pool.in_use, 0, "{:?} cursor not reset", pool.kind);
        }
    }

    #[test]
    fn test_begin_detaches_previous_frame() {
        let mut gizmos = small();
        let origin = Vector3::new(0.0, 0.0, 0.0);

        gizmos.begin().unwrap();
        gizmos.sphere(origin, 1.0).unwrap();
        gizmos.end().unwrap();
        assert_eq!(gizmos.frame_len(), 1);

        gizmos.begin().unwrap();
        assert!(gizmos.frame().is_empty());
    }

    #[test]
    fn test_wire_cube_scales_per_axis() {
        let mut gizmos = small();
        gizmos.begin().unwrap();
        gizmos
            .wire_cube(Vector3::new(1.0, 0.0, -1.0), Vector3::new(2.0, 0.5, 4.0))
            .unwrap();

        let handle = gizmos.handle(gizmos.attachment(0).unwrap());
        assert_eq!(handle.position, Vector3::new(1.0, 0.0, -1.0));
        assert_eq!(handle.scale, Vector3::new(2.0, 0.5, 4.0));
    }
}
