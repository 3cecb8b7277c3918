pub mod core;
pub mod loader;
pub mod sensor;
pub mod shape;
