mod constants;
mod files;
mod steps;
mod templates;
mod types;

pub(crate) use steps::{run_create, start_command};
pub(crate) use types::CreateSummary;
