pub mod adapters;
pub mod registry;
pub mod source;

pub use registry::*;
pub use source::*;
