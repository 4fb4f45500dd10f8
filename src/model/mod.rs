pub mod config;
pub mod profile;
pub mod suggestion;

pub use config::*;
pub use profile::*;
pub use suggestion::*;
