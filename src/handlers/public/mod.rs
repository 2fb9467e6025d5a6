// Public handlers (no authentication required)
//
// Route prefix: /auth/* (token acquisition and account creation)
pub mod auth;
