pub mod selector;
pub mod session;

pub use selector::*;
pub use session::*;
