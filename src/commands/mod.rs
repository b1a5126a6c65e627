pub use run::{cmd_run, RunOptions};
pub use show_config::cmd_show_config;

mod run;
mod show_config;
