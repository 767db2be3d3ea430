pub mod analysis;
pub mod error;
pub use analysis::*;
pub use error::*;
