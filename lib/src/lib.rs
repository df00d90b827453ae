//! Small ambient utilities shared by the core engine and the runner binary:
//! logging setup today, the natural home for anything else that doesn't
//! belong to a specific registry/dispatch module.

pub mod logging;
