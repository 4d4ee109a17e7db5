pub mod error;
pub mod health;
pub mod idea;
pub mod session;
