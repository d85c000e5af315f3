//! Generation infrastructure implementations

pub mod template_renderer;

pub use template_renderer::{API_TEMPLATE_NAME, TeraTemplateRenderer};
