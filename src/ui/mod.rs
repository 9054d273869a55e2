//! Retained-mode UI: scene graph, layout and pointer interaction

pub mod button;
pub mod input;
pub mod layout;
pub mod node;
pub mod text;

pub use button::{Button, ButtonPalette};
pub use input::{Dispatch, Event, EventKind, Fired, HandlerKind, InputState, detoggle};
pub use layout::{CrossAxis, Layout};
pub use node::{BodyRef, Node, NodeId, NodeKind, Scene, TextItem};
pub use text::{TextMeasure, TextMetrics};
