pub mod app;
pub mod gesture;
pub mod input;
pub mod render;
pub mod slider;
pub mod theme;

pub use app::run;
