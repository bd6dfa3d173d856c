pub mod crud;
pub mod error;
pub mod flash;
pub mod health;
pub mod learner;
pub mod pages;
pub mod reports;
pub mod tables;

pub use error::AppError;
