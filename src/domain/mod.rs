pub mod errors;
pub mod limits;
pub mod order;
pub mod ports;
