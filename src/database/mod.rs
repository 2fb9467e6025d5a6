pub mod manager;
pub mod models;
pub mod produk;
pub mod users;
