mod build;
mod coincide;

pub use build::*;
pub use coincide::*;
