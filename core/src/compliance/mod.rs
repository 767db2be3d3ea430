mod criteria;
pub mod display;
mod evaluate;
mod verdict;
pub use criteria::*;
pub use evaluate::*;
pub use verdict::*;
