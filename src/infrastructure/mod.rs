pub mod in_memory;
pub mod models;
pub mod order_repo;
