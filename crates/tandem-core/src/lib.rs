pub mod molecule;
pub mod target;

pub use molecule::*;
pub use target::*;
