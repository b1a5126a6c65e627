pub use structure::*;

pub mod error;
mod structure;
mod traits;
mod utilities;
