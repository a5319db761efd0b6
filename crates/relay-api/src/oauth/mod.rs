pub mod google;
pub mod state;

pub use google::routes;
