// Infrastructure: command line surface

pub mod cli;

pub use cli::{cli, init_logging, run, CliConfig};
