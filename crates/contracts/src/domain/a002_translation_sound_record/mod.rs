pub mod aggregate;

pub use aggregate::{categories, routes, schema, CONTROLLER, ENTITY};
