pub mod aggregate;

pub use aggregate::{routes, schema, CONTROLLER, ENTITY};
