pub mod client;
pub mod models;
pub mod routes;
pub mod service;

pub use client::GoogleOAuthClient;
pub use routes::routes;
