//! Watch face rendering.
//!
//! [`render`] turns a [`RenderContext`] into a [`Frame`] of [`DrawCommand`]s.
//! [`WatchFaceEngine`] wraps it with the face lifecycle: visibility, ambient
//! mode, system events and the redraw cadence.

pub mod context;
pub mod engine;
pub mod layers;
pub mod primitives;
pub mod system_events;
pub mod ticker;

pub use context::{BatteryLevel, DisplayMode, FacePaints, Language, RenderContext};
pub use engine::{EngineConfig, InterruptionFilter, WatchFaceEngine};
pub use layers::render;
pub use primitives::{DrawCommand, Frame, Paint, PaintStyle, Rect, StrokeCap, TextAlign, Typeface};
pub use system_events::{Subscription, SystemEvent, SystemEventBus};
pub use ticker::{AMBIENT_UPDATE, INTERACTIVE_UPDATE, TickMode, aligned_delay};
