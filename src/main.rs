use winit::{
    event::*,
    error::EventLoopError,
    event_loop::{ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::Window,
};
use glam::Quat;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, info, warn};

// Import from the library crate
use moondrive::{config::AppConfig, controller, error::StartupError, logging, model, view};

use controller::input::native;
use controller::{FrameOrchestrator, InputEvent, InputState};
use model::MapModel;
use view::{EguiCanvas, GpuContext, LineBatch, OverlayFrame, SceneRenderer};

/// Longest frame step fed to the simulation
const MAX_FRAME_DT: f32 = 0.1;

struct App {
    window: Arc<Window>,
    gpu: GpuContext,
    renderer: SceneRenderer,

    // egui
    egui_ctx: egui::Context,
    egui_state: egui_winit::State,

    // Scene
    batch: LineBatch,
    input: InputState,
    orchestrator: FrameOrchestrator,

    // Frame timing
    last_frame_time: Instant,
    frame_interval: Duration,
}

impl App {
    async fn new(window: Arc<Window>, config: &AppConfig) -> Result<Self, StartupError> {
        let size = window.inner_size();
        let gpu = GpuContext::new_native(window.clone(), size.width, size.height).await?;
        let renderer = SceneRenderer::new(&gpu);

        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            None,
            None,
            None,
        );

        // The scene cannot run without the map
        let rotation = Quat::from_array(config.scene.map_rotation);
        let map = MapModel::load(Path::new(&config.scene.map_model), rotation)?;

        let mut orchestrator = FrameOrchestrator::new(config, map)?;
        let logical = size.to_logical::<f32>(window.scale_factor());
        orchestrator.resize(logical.width as u32, logical.height as u32);

        Ok(Self {
            window,
            gpu,
            renderer,
            egui_ctx,
            egui_state,
            batch: LineBatch::new(),
            input: InputState::new(),
            orchestrator,
            last_frame_time: Instant::now(),
            frame_interval: config.frame_interval(),
        })
    }

    /// Feed a window event to egui and to the scene input state
    fn input(&mut self, event: &WindowEvent) {
        let _ = self.egui_state.on_window_event(self.window.as_ref(), event);

        let translated = match event {
            WindowEvent::KeyboardInput { event: KeyEvent { state, physical_key, repeat, .. }, .. } => {
                let PhysicalKey::Code(code) = physical_key else { return };
                let Some(key) = native::key_from_code(*code) else { return };
                match state {
                    ElementState::Pressed => InputEvent::KeyDown { key, repeat: *repeat },
                    ElementState::Released => InputEvent::KeyUp(key),
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let Some(button) = native::mouse_button(*button) else { return };
                InputEvent::PointerButton { button, is_down: *state == ElementState::Pressed }
            }
            WindowEvent::CursorMoved { position, .. } => {
                // UI layout is in logical pixels
                let pos = position.to_logical::<f32>(self.window.scale_factor());
                InputEvent::PointerMoved { x: pos.x, y: pos.y }
            }
            WindowEvent::Focused(false) => InputEvent::FocusLost,
            _ => return,
        };
        self.input.process_event(&translated);
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.gpu.resize(new_size.width, new_size.height);
        self.renderer.resize(&self.gpu);

        let logical = new_size.to_logical::<f32>(self.window.scale_factor());
        self.orchestrator.resize(logical.width as u32, logical.height as u32);
    }

    fn next_frame_at(&self) -> Instant {
        self.last_frame_time + self.frame_interval
    }

    /// One update + render of the scene, then the GPU submit
    fn redraw(&mut self) -> Result<(), wgpu::SurfaceError> {
        let now = Instant::now();
        let dt = (now - self.last_frame_time).as_secs_f32().min(MAX_FRAME_DT);
        self.last_frame_time = now;

        self.batch.reset();

        let raw_input = self.egui_state.take_egui_input(&self.window);
        self.egui_ctx.begin_pass(raw_input);
        {
            let mut canvas = EguiCanvas::new(&self.egui_ctx);
            self.orchestrator.frame(&self.input, dt, &mut self.batch, &mut canvas);
        }
        let output = self.egui_ctx.end_pass();
        self.egui_state.handle_platform_output(&self.window, output.platform_output);

        let overlay = OverlayFrame {
            primitives: self.egui_ctx.tessellate(output.shapes, output.pixels_per_point),
            textures_delta: output.textures_delta,
            pixels_per_point: output.pixels_per_point,
        };
        let result = self.renderer.draw_frame(&self.gpu, &self.batch, overlay);

        self.input.end_frame();
        result
    }
}

/// Everything that must succeed before the first frame
#[allow(deprecated)]
fn startup() -> Result<(EventLoop<()>, App), StartupError> {
    let config = AppConfig::from_env()?;

    let event_loop = EventLoop::new()?;
    let window_attributes = Window::default_attributes()
        .with_title(config.window.title.clone())
        .with_inner_size(winit::dpi::LogicalSize::new(config.window.width, config.window.height));
    let window = Arc::new(event_loop.create_window(window_attributes)?);
    info!(width = config.window.width, height = config.window.height, "window created");

    let app = pollster::block_on(App::new(window, &config))?;
    Ok((event_loop, app))
}

#[allow(deprecated)]
fn run(event_loop: EventLoop<()>, mut app: App) -> Result<(), EventLoopError> {
    event_loop.run(move |event, elwt| {
        match event {
            Event::WindowEvent {
                ref event,
                window_id,
            } if window_id == app.window.id() => {
                app.input(event);
                match event {
                    WindowEvent::CloseRequested => elwt.exit(),
                    WindowEvent::Resized(physical_size) => {
                        app.resize(*physical_size);
                    }
                    WindowEvent::RedrawRequested => match app.redraw() {
                        Ok(_) => {}
                        Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                            let size = app.window.inner_size();
                            app.resize(size);
                        }
                        Err(wgpu::SurfaceError::OutOfMemory) => {
                            error!("GPU out of memory");
                            elwt.exit();
                        }
                        Err(e) => warn!("surface error: {e:?}"),
                    },
                    _ => {}
                }
            }
            Event::AboutToWait => {
                let next = app.next_frame_at();
                if Instant::now() >= next {
                    app.window.request_redraw();
                }
                elwt.set_control_flow(ControlFlow::WaitUntil(next));
            }
            _ => {}
        }
    })
}

fn main() {
    logging::init();

    let (event_loop, app) = match startup() {
        Ok(started) => started,
        Err(e) => {
            error!("startup failed: {e}");
            std::process::exit(1);
        }
    };

    match run(event_loop, app) {
        Ok(()) => info!("moondrive closed"),
        Err(e) => {
            error!("event loop terminated abnormally: {e}");
            std::process::exit(1);
        }
    }
}
