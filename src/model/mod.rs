mod auth;
mod turno;

pub use auth::*;
pub use turno::*;
