//! Authentication

mod errors;
mod models;
pub mod password;
mod repository;
mod service;
mod token;

pub use errors::*;
pub use models::{Admin, AdminUuid, IssuedToken, NewAdmin};
pub use repository::PgAuthRepository;
pub use service::*;
pub use token::*;
