pub use bare::BareTerminalBackend;
pub use traits::*;

mod bare;
mod log_file;
mod traits;
