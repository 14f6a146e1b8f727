//! Application state module

mod app_state;
mod assigner;
mod assignments;
mod picker;

pub use app_state::*;
pub use assigner::*;
pub use assignments::*;
pub use picker::*;
