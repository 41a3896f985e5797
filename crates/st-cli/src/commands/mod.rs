//! CLI command implementations

pub(crate) mod backward;
pub(crate) mod common;
pub(crate) mod forward;
pub(crate) mod history;
pub(crate) mod init;
pub(crate) mod new;
pub(crate) mod state;
pub(crate) mod status;
