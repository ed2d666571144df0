pub(crate) mod args;
pub(crate) mod output;
pub(crate) mod prompt;
