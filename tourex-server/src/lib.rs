//! Library surface of the Tourex server, split out so integration tests can
//! assemble the router without spawning the binary.

pub mod api;
pub mod errors;
pub mod infra;
pub mod routes;
pub mod tours;

pub use errors::{AppError, AppResult};
pub use infra::app_state::AppState;
