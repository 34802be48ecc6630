//! Command-line display surface.

mod render;

pub use render::{render_field_errors, render_outcome, render_state, OutputFormat, DISCLAIMER};
