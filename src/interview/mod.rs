pub mod authoring;
pub mod engine;
pub mod loader;
pub mod recorder;

pub use authoring::*;
pub use engine::*;
pub use loader::*;
pub use recorder::*;
