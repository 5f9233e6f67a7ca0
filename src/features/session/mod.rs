pub mod handlers;
pub mod model;
pub mod routes;
pub mod store;

pub use model::Session;
pub use store::SessionStore;
