//! Terminal UI rendering layer.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI Output
//! ```
//!
//! - [`viewmodel`]: localized, truncated render snapshot
//! - [`renderer`]: entry point
//! - [`components`]: per-region renderers
//! - [`helpers`]: cursor movement, width-aware text fitting, highlighting
//! - [`theme`]: color schemes and ANSI escape sequences

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{Body, UIViewModel};
