//! Core domain types shared across modules

mod error;
mod key;
mod window;

pub use error::SessionError;
pub use key::ProjectKey;
pub use window::WindowState;
