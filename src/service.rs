pub mod idea;
pub mod session;
