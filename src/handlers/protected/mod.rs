// Protected handlers (bearer token required)
//
// Every route in this module sits behind the JWT middleware, which injects
// an AuthUser extension with the decoded claims.
pub mod auth;
pub mod produk;
