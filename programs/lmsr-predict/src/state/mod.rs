pub mod parameters;
pub mod capability;
pub mod lifecycle;
pub mod market;
pub mod position;
pub mod vote;

pub use parameters::*;
pub use capability::*;
pub use lifecycle::*;
pub use market::*;
pub use position::*;
pub use vote::*;
