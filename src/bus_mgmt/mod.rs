mod derive;
mod resolve;
mod validate;

pub mod error;
pub mod model;
pub mod raw;
pub mod schema;

pub use derive::derive;
pub use resolve::resolve_bus;
pub use validate::validate;
