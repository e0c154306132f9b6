pub mod command;
pub mod config;
pub mod env;
pub mod fs;
pub mod platform;

pub use command::*;
pub use config::*;
pub use env::*;
pub use fs::*;
pub use platform::*;
