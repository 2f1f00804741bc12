use crate::constants::*;
use crate::dom;
use crate::frame::{self, FrameLoop};
use globe_core::{FrameCallback, GlobePipeline, RenderHandle, RenderHost, RenderOptions};
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

// ===================== WebGPU state =====================

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
}

impl GpuState {
    pub async fn new(canvas: &web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        // the page shows through around the globe
        let alpha_mode = if caps
            .alpha_modes
            .contains(&wgpu::CompositeAlphaMode::PreMultiplied)
        {
            wgpu::CompositeAlphaMode::PreMultiplied
        } else {
            caps.alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto)
        };
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::info!("[gpu] surface {}x{} {:?}", width, height, format);

        Ok(Self {
            surface,
            device,
            queue,
            config,
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.config.width || height != self.config.height {
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    pub fn render(
        &mut self,
        pipeline: &GlobePipeline,
        frame: &globe_core::FrameState,
    ) -> Result<(), wgpu::SurfaceError> {
        self.resize_if_needed(frame.width, frame.height);
        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        pipeline.encode(
            &self.queue,
            &mut encoder,
            &view,
            frame,
            [self.config.width, self.config.height],
        );
        self.queue.submit(Some(encoder.finish()));
        output.present();
        Ok(())
    }
}

// ===================== Render host =====================

/// Draws sessions onto the canvas the GPU state was created for.
pub struct WebHost {
    gpu: Rc<RefCell<GpuState>>,
}

pub struct WebHandle {
    frame_loop: FrameLoop,
    canvas: web::HtmlCanvasElement,
}

impl WebHost {
    pub fn new(gpu: GpuState) -> Self {
        Self {
            gpu: Rc::new(RefCell::new(gpu)),
        }
    }
}

impl RenderHost for WebHost {
    type Surface = web::HtmlCanvasElement;
    type Handle = WebHandle;
    type Error = anyhow::Error;

    fn create(
        &mut self,
        canvas: &web::HtmlCanvasElement,
        options: RenderOptions,
        mut on_render: FrameCallback,
    ) -> anyhow::Result<WebHandle> {
        dom::size_canvas(canvas, options.width, options.device_pixel_ratio)?;

        let mut state = options.initial_frame();
        let pipeline = {
            let gpu = self.gpu.borrow();
            GlobePipeline::new(&gpu.device, gpu.config.format, options)
        };
        let gpu = self.gpu.clone();
        let frame_loop = frame::start_loop(move || {
            on_render(&mut state);
            let mut gpu = gpu.borrow_mut();
            match gpu.render(&pipeline, &state) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => gpu.reconfigure(),
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("[gpu] out of memory; frame dropped")
                }
                Err(e) => log::warn!("[gpu] frame skipped: {:?}", e),
            }
        });

        dom::set_canvas_opacity(canvas, OPACITY_SHOWN);
        Ok(WebHandle {
            frame_loop,
            canvas: canvas.clone(),
        })
    }
}

impl RenderHandle for WebHandle {
    fn destroy(&mut self) {
        self.frame_loop.stop();
        dom::set_canvas_opacity(&self.canvas, OPACITY_HIDDEN);
    }
}
