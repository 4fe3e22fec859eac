use crate::{
    pass::{background_pass, cube_pass, render_pass},
    render_client::{camera::Camera, camera_controller::CameraController, render_device},
    utils::counter,
};
use anyhow::Result;
use clap::Parser;
use std::{cell::RefCell, rc::Rc};

#[derive(Parser)] // requires `derive` feature
#[command(author, version, about, long_about = None)]
struct CommandLineArguments {
    /// Movement step per frame (per second with --time-scale).
    #[arg(long, default_value_t = 0.1)]
    speed: f32,

    /// Degrees of look rotation per pixel of pointer travel.
    #[arg(long, default_value_t = 0.1)]
    sensitivity: f32,

    /// Vertical field of view in degrees.
    #[arg(long, default_value_t = 60.0)]
    fov: f32,

    /// Scale movement by the frame delta instead of stepping once per frame.
    #[arg(long, default_value_t = false)]
    time_scale: bool,
}

pub struct CubeSceneRenderer {
    passes: Vec<RefCell<Box<dyn render_pass::RenderPass>>>,
    camera: Rc<RefCell<Camera>>,
    camera_controller: CameraController,
    frame_counter: counter::FrameCounter,
}

impl render_device::RenderDevice for CubeSceneRenderer {
    fn init(
        config: &wgpu::SurfaceConfiguration,
        _adapter: &wgpu::Adapter,
        device: &wgpu::Device,
        _queue: &wgpu::Queue,
    ) -> Result<Self> {
        let args = CommandLineArguments::parse();

        let camera = Rc::new(RefCell::new(Camera {
            fov: args.fov,
            aspect: config.width as f32 / config.height as f32,
            ..Default::default()
        }));
        camera.borrow().validate()?;

        let camera_controller =
            CameraController::new(args.speed, args.sensitivity, args.time_scale, camera.clone());

        let mut passes: Vec<RefCell<Box<dyn render_pass::RenderPass>>> = vec![];
        passes.push(RefCell::new(Box::new(
            background_pass::BackgroundPass::create_pass(config, device)?,
        )));
        passes.push(RefCell::new(Box::new(cube_pass::CubeScenePass::create_pass(
            config,
            device,
            camera.clone(),
        )?)));

        Ok(CubeSceneRenderer {
            passes,
            camera,
            camera_controller,
            frame_counter: counter::FrameCounter::new(),
        })
    }

    fn process_event(&mut self, event: winit::event::WindowEvent) {
        self.camera_controller.process_input(&event);

        self.passes.iter().for_each(|pass| {
            pass.borrow_mut().process_event(event.clone());
        })
    }

    fn update_render(&mut self, device: &wgpu::Device, queue: &wgpu::Queue) {
        let delta_time = self.frame_counter.update();
        self.camera_controller.update_camera(delta_time);

        self.passes.iter().for_each(|pass| {
            pass.borrow_mut().update_render(device, queue);
        })
    }

    fn resize(
        &mut self,
        config: &wgpu::SurfaceConfiguration,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
    ) {
        self.camera.borrow_mut().aspect = config.width as f32 / config.height as f32;
        self.passes.iter().for_each(|pass| {
            pass.borrow_mut().on_resized(config, device, queue);
        })
    }

    fn render(
        &mut self,
        back_buffer_view: &wgpu::TextureView,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
    ) {
        let mut encoder: wgpu::CommandEncoder =
            device.create_command_encoder(&wgpu::CommandEncoderDescriptor { label: None });

        self.passes.iter().for_each(|pass| {
            pass.borrow_mut()
                .render(back_buffer_view, &mut encoder, device, queue);
        });

        queue.submit(Some(encoder.finish()));
    }
}
