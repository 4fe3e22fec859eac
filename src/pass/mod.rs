pub mod background_pass;
pub mod cube_pass;
pub mod render_pass;
