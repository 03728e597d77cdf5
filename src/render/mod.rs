//! Rendering pipeline: cell canvas, typed frames, and the walkthrough surface renderer.

pub mod canvas;
pub mod frame;
pub mod pointer;
pub mod theme;
pub mod walkthrough;

pub use canvas::{Canvas, Tone};
pub use frame::{Frame, Line, Span};
pub use pointer::{PointerEasing, PointerFrame};
pub use theme::WalkthroughTheme;
pub use walkthrough::{render_surface, SurfaceSize};
