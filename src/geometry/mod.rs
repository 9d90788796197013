//! Interactive annotation geometry: image/view mapping, shape editing and
//! pointer interaction.
//!
//! All points handed in and out of [`ShapeEditor`] are image-space pixels;
//! pointer positions are view-space pixels and go through [`ViewTransform`].

pub mod interaction;
pub mod shape;
pub mod text;
pub mod transform;

pub use interaction::{
    Action, AnnotationViewer, EventOutcome, InteractionState, PointerButton, PointerEvent,
    PressHits,
};
pub use shape::{RectanglePhase, ShapeEditor, ShapeMode};
pub use text::{format_points, parse_points};
pub use transform::ViewTransform;

/// A point in image pixel space.
pub type ImagePoint = glam::DVec2;
