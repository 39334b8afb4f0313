mod octocrab_utils;
mod parser;
mod tracing;

pub(crate) use parser::{AuthArgs, Cli, Commands, RunArgs, ServeArgs};
pub(crate) use tracing::init as init_tracing;
