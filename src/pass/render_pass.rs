use winit::event::WindowEvent;

pub trait RenderPass: 'static {
    fn on_resized(
        &mut self,
        config: &wgpu::SurfaceConfiguration,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
    );

    fn process_event(&mut self, event: WindowEvent);

    fn update_render(&mut self, device: &wgpu::Device, queue: &wgpu::Queue);

    fn render(
        &mut self,
        back_buffer_view: &wgpu::TextureView,
        encoder: &mut wgpu::CommandEncoder,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
    );
}
