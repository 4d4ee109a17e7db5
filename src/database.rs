pub mod session;
pub mod store_repository;
