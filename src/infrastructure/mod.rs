//! Infrastructure layer - concrete implementations of domain ports

pub mod generation;
pub mod openapi;
pub mod output;
pub mod templates;
pub mod typescript;

pub use templates::TemplateSet;
pub use typescript::TypeScriptTranspiler;
