mod handler;
mod model;

pub use handler::{login, refresh};
pub use model::LoginRequest;
