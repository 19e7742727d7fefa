//! Bare-metal server lifecycle automation against an Intersight-style
//! management API: resolve resources by name, start OS installs through a
//! single bulk request, and trigger server-profile deployment.

pub mod compose;
pub mod config;
pub mod deploy;
pub mod files;
pub mod model;
pub mod remote;
pub mod resolve;
pub mod template;
