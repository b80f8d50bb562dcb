pub mod classify;
pub mod grid;
pub mod picker;
pub mod selected_days;
pub mod selection;

pub use classify::*;
pub use grid::*;
pub use picker::*;
pub use selected_days::*;
pub use selection::*;
