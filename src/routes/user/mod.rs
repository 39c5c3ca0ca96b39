mod handler;
mod model;

pub use handler::{get_user, get_users, register, update_user};
pub use model::{RegisterRequest, UpdatePasswordRequest, User};
