pub mod selection_logger;

pub use selection_logger::*;
