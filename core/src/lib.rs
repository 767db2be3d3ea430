pub mod analysis;
pub mod compliance;
pub mod config;
pub mod error;
pub mod model;
mod processing;
pub mod report;
pub use processing::{ffprobe, normalize, startup_self_check};
pub mod util;
