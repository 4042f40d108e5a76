//! HTML templates and styling for the editor.
//!
//! ## Module Structure
//!
//! - `styles` - CSS constants
//! - `components` - base page template and escaping
//! - `editor` - the editor page and its WebSocket client script

mod components;
mod editor;
mod styles;

pub use editor::render_editor;
