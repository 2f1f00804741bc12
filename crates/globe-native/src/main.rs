mod keys;

use anyhow::Context;
use globe_core::{
    FrameCallback, FrameState, GlobePipeline, RenderHandle, RenderHost, RenderOptions, Session,
    SessionConfig, TimerQueue,
};
use instant::Instant;
use keys::KeyAction;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use winit::{
    dpi::{LogicalSize, PhysicalSize},
    event::*,
    event_loop::{EventLoop, EventLoopWindowTarget},
    keyboard::{Key, NamedKey},
    window::{Window, WindowBuilder},
};

struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
}

impl GpuState {
    async fn new(window: Arc<Window>) -> anyhow::Result<Self> {
        let size = window.inner_size();
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No GPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let format = surface_caps
            .formats
            .first()
            .copied()
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            desired_maximum_frame_latency: 2,
            view_formats: vec![],
        };
        surface.configure(&device, &config);
        log::info!("[gpu] {}x{} {:?}", config.width, config.height, format);

        Ok(Self {
            surface,
            device,
            queue,
            config,
        })
    }

    fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
    }

    fn render(
        &mut self,
        pipeline: &GlobePipeline,
        frame: &FrameState,
    ) -> Result<(), wgpu::SurfaceError> {
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

/// The globe currently mounted on the window, if any.
struct Mounted {
    pipeline: GlobePipeline,
    state: FrameState,
    on_render: FrameCallback,
}

/// Render host driven from the winit loop rather than a browser frame callback.
struct NativeHost {
    gpu: GpuState,
    mounted: Rc<RefCell<Option<Mounted>>>,
}

struct NativeHandle {
    mounted: Rc<RefCell<Option<Mounted>>>,
}

impl RenderHandle for NativeHandle {
    fn destroy(&mut self) {
        self.mounted.borrow_mut().take();
    }
}

impl RenderHost for NativeHost {
    type Surface = Arc<Window>;
    type Handle = NativeHandle;
    type Error = anyhow::Error;

    fn create(
        &mut self,
        window: &Arc<Window>,
        options: RenderOptions,
        on_render: FrameCallback,
    ) -> anyhow::Result<NativeHandle> {
        let side = (options.width / options.device_pixel_ratio.max(1)).max(1);
        if let Some(size) = window.request_inner_size(LogicalSize::new(side, side)) {
            self.gpu.resize(size);
        }
        let pipeline = GlobePipeline::new(&self.gpu.device, self.gpu.config.format, options);
        let state = pipeline.options().initial_frame();
        *self.mounted.borrow_mut() = Some(Mounted {
            pipeline,
            state,
            on_render,
        });
        Ok(NativeHandle {
            mounted: self.mounted.clone(),
        })
    }
}

impl NativeHost {
    fn new(gpu: GpuState) -> Self {
        Self {
            gpu,
            mounted: Rc::new(RefCell::new(None)),
        }
    }

    /// Run the frame callback and draw. A host with nothing mounted draws nothing.
    fn frame(&mut self) -> Result<(), wgpu::SurfaceError> {
        let mut mounted = self.mounted.borrow_mut();
        let Some(globe) = mounted.as_mut() else {
            return Ok(());
        };
        (globe.on_render)(&mut globe.state);
        self.gpu.render(&globe.pipeline, &globe.state)
    }
}

type NativeSession = Session<NativeHost, TimerQueue>;

fn load_config(path: Option<String>) -> anyhow::Result<SessionConfig> {
    let Some(path) = path else {
        return Ok(SessionConfig::default());
    };
    let json = std::fs::read_to_string(&path).with_context(|| format!("reading {}", path))?;
    let config = SessionConfig::from_json(&json).with_context(|| format!("parsing {}", path))?;
    log::info!("[config] loaded {} ({} markers)", path, config.markers.len());
    Ok(config)
}

fn handle_key(
    action: KeyAction,
    session: &mut NativeSession,
    host: &mut NativeHost,
    window: &Arc<Window>,
    elwt: &EventLoopWindowTarget<()>,
) {
    match action {
        KeyAction::FocusMarker(i) => {
            if let Some(p) = session.config().markers.get(i).copied() {
                log::info!("[keys] focus marker {} ({:.2}, {:.2})", i + 1, p.lat, p.long);
                session.set_focus(p.lat, p.long);
            }
        }
        KeyAction::ClearFocus => session.clear_focus(),
        KeyAction::ToggleTheme => {
            let mut next = session.config().clone();
            next.theme = next.theme.toggled();
            if let Err(e) = session.reconfigure(next, host, Some(window)) {
                log::error!("reconfigure error: {:?}", e);
                elwt.exit();
            }
        }
        KeyAction::Quit => elwt.exit(),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let config = load_config(std::env::args().nth(1))?;
    let side = config.render_size.max(1);

    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title("Globe (native)")
            .with_inner_size(LogicalSize::new(side, side))
            .with_transparent(true)
            .build(&event_loop)?,
    );

    let gpu = pollster::block_on(GpuState::new(window.clone()))?;
    let mut host = NativeHost::new(gpu);
    let mut session: NativeSession =
        Session::init(config, &mut host, Some(&window), TimerQueue::default())?;

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent {
            event: WindowEvent::Resized(size),
            ..
        } => host.gpu.resize(size),
        Event::WindowEvent {
            event: WindowEvent::CloseRequested,
            ..
        } => elwt.exit(),
        Event::WindowEvent {
            event:
                WindowEvent::KeyboardInput {
                    event:
                        KeyEvent {
                            logical_key,
                            state: ElementState::Pressed,
                            repeat: false,
                            ..
                        },
                    ..
                },
            ..
        } => {
            let action = match &logical_key {
                Key::Named(NamedKey::Escape) => Some(KeyAction::ClearFocus),
                Key::Character(c) => keys::action_for_char(c.as_str(), session.config().markers.len()),
                _ => None,
            };
            if let Some(action) = action {
                handle_key(action, &mut session, &mut host, &window, elwt);
            }
        }
        Event::AboutToWait => {
            session.scheduler_mut().advance_to(Instant::now());
            match host.frame() {
                Ok(_) => window.request_redraw(),
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    host.gpu.resize(window.inner_size())
                }
                Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
                Err(_) => {}
            }
        }
        _ => {}
    })?;
    Ok(())
}
