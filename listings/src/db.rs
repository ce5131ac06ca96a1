pub mod entities;
pub mod listings_client;
pub mod pool;
