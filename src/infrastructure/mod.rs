pub mod hooks;
pub mod logging;
pub mod plugins;

#[cfg(test)]
pub mod test_utils;

pub use hooks::*;
pub use logging::*;
pub use plugins::*;
