pub mod bbox;
pub mod film;
pub mod loader;
pub mod ray;
pub mod scene;
pub mod scene_resources;
pub mod spectrum;
pub mod transform;
pub mod warp;
