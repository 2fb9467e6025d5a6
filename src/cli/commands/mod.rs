pub mod auth;
pub mod produk;
