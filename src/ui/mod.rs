pub mod span;
pub mod style;
pub mod theme;
pub mod view;

pub use view::{RenderFrame, Renderer};
