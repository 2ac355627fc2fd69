//! # Gizmo System
//!
//! Pooled immediate-mode debug drawing. [`Gizmos`] is the per-frame API:
//! bracket a frame with `begin()`/`end()`, set a color, and call the draw
//! methods; handles are recycled from growable pools so steady-state frames
//! allocate nothing.
//!
//! The submodules split along the data flow: [`color`] is the RGB value type,
//! [`handle`] the pooled renderable instances, [`pool`] the recycling pools
//! and their per-kind factories, and [`drawer`] the frame-scoped API tying
//! them together.

pub mod color;
pub mod drawer;
pub mod handle;
pub mod pool;

pub use color::Color;
pub use drawer::{
    Attachment, FrameContainer, GizmoError, GizmoStatistics, Gizmos, GizmosConfig, PoolStatistics,
    PrimitiveKind, WireSphereStyle,
};
pub use handle::{Handle, Part};
pub use pool::{HandleFactory, HandleId, Pool, DEFAULT_POOL_CAPACITY};
