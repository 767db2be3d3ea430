mod descriptor;
mod upload;
pub use descriptor::*;
pub use upload::*;
