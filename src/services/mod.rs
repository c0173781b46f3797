//! GitHub API service implementations.

mod audit_log;
mod hooks;
mod issues;
mod migrations;
mod organizations;
mod rate_limit;
mod repositories;
mod rulesets;
mod scim;
mod secrets;
mod users;

pub use audit_log::*;
pub use hooks::*;
pub use issues::*;
pub use migrations::*;
pub use organizations::*;
pub use rate_limit::*;
pub use repositories::*;
pub use rulesets::*;
pub use scim::*;
pub use secrets::*;
pub use users::*;
