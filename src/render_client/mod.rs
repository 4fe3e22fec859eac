pub mod camera;
pub mod camera_controller;
pub mod render_device;
pub mod surface_wrapper;
pub mod texture;
