use crate::render_client::render_device::RenderDeviceContext;
use std::sync::Arc;
use winit::{
    dpi::PhysicalSize,
    event::{Event, StartCause},
    window::Window,
};

/// Surface lifecycle wrapper. The surface only exists between resume and
/// suspend on Android; everywhere else it is created at the first
/// `start_condition` event and lives until exit.
pub struct SurfaceWrapper {
    surface: Option<wgpu::Surface<'static>>,
    config: Option<wgpu::SurfaceConfiguration>,
}

impl SurfaceWrapper {
    pub fn new() -> Self {
        Self {
            surface: None,
            config: None,
        }
    }

    /// Called before the instance requests an adapter. On wasm the surface
    /// must already exist when the adapter is selected.
    pub fn pre_adapter(&mut self, instance: &wgpu::Instance, window: Arc<Window>) {
        if cfg!(target_arch = "wasm32") {
            self.surface = Some(
                instance
                    .create_surface(window)
                    .expect("Failed to create surface!"),
            );
        }
    }

    pub fn get(&self) -> Option<&wgpu::Surface<'static>> {
        self.surface.as_ref()
    }

    /// Whether the given event is the one that should create the surface.
    pub fn start_condition(event: &Event<()>) -> bool {
        match event {
            Event::NewEvents(StartCause::Init) => !cfg!(target_os = "android"),
            Event::Resumed => cfg!(target_os = "android"),
            _ => false,
        }
    }

    pub fn resume(&mut self, context: &RenderDeviceContext, window: Arc<Window>, srgb: bool) {
        let window_size = window.inner_size();
        let width = window_size.width.max(1);
        let height = window_size.height.max(1);
        log::info!("Surface resume {window_size:?}");

        if self.surface.is_none() {
            self.surface = Some(
                context
                    .instance
                    .create_surface(window)
                    .expect("Failed to create surface!"),
            );
        }

        let surface = self.surface.as_ref().unwrap();
        let mut config = surface
            .get_default_config(&context.adapter, width, height)
            .expect("Surface isn't supported by the adapter.");
        if srgb {
            let view_format = config.format.add_srgb_suffix();
            config.view_formats.push(view_format);
        } else {
            let format = config.format.remove_srgb_suffix();
            config.format = format;
            config.view_formats.push(format);
        }
        surface.configure(&context.device, &config);
        self.config = Some(config);
    }

    pub fn resize(&mut self, context: &RenderDeviceContext, size: PhysicalSize<u32>) {
        log::info!("Surface resize {size:?}");

        let config = self.config.as_mut().unwrap();
        config.width = size.width.max(1);
        config.height = size.height.max(1);
        let surface = self.surface.as_ref().unwrap();
        surface.configure(&context.device, config);
    }

    pub fn acquire(&mut self, context: &RenderDeviceContext) -> wgpu::SurfaceTexture {
        let surface = self.surface.as_ref().unwrap();

        match surface.get_current_texture() {
            Ok(frame) => frame,
            // If we timed out, just try again.
            Err(wgpu::SurfaceError::Timeout) => surface
                .get_current_texture()
                .expect("Failed to acquire next surface texture!"),
            // The surface needs to be reconfigured before it can be used again.
            Err(wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost) => {
                surface.configure(&context.device, self.config.as_ref().unwrap());
                surface
                    .get_current_texture()
                    .expect("Failed to acquire next surface texture!")
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                panic!("The system is out of memory for rendering!")
            }
        }
    }

    pub fn suspend(&mut self) {
        if cfg!(target_os = "android") {
            self.surface = None;
        }
    }

    pub fn config(&self) -> &wgpu::SurfaceConfiguration {
        self.config.as_ref().unwrap()
    }
}
