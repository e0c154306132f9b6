pub mod config;
pub mod tool;

pub use config::*;
pub use tool::*;
