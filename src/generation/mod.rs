//! Generation domain module - orchestrates code generation workflow
//!
//! This module implements the core code generation logic: it indexes the
//! document's named schemas, turns every operation into a render-ready
//! descriptor, hands both to a renderer together with the registry-bound
//! helpers and emits the result in the requested output language.

pub mod context;
pub mod emission;
pub mod errors;
pub mod flattener;
pub mod helpers;
pub mod operation;
pub mod orchestrator;
pub mod registry;
pub mod sanitizers;
pub mod schema;
pub mod traits;
pub mod types;
pub mod utils;

pub use context::*;
pub use emission::*;
pub use errors::*;
pub use helpers::*;
pub use operation::*;
pub use orchestrator::*;
pub use registry::*;
pub use schema::*;
pub use traits::*;
pub use types::*;
