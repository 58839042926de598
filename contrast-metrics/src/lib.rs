pub mod calculators;
pub mod engine;
pub mod normalize;

pub use calculators::*;
pub use engine::*;
pub use normalize::*;
