pub mod cube_scene_renderer;
