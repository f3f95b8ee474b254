use std::error::Error;
use std::sync::Arc;

use instant::Instant;
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalPosition, LogicalSize};
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::config::SimConfig;
use crate::debug::timer::SystemPhase;
use crate::debug::{DebugOverlay, SimInfo};
use crate::render::canvas::Canvas;
use crate::render::GpuState;
use crate::sim::Simulation;

/// Initial window size in logical pixels.
const INITIAL_WINDOW_SIZE: LogicalSize<f64> = LogicalSize::new(1280.0, 800.0);

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

/// Top-level application state. Input handlers only stage data; the
/// redraw handler applies it before stepping the simulation.
struct App {
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    debug: Option<DebugOverlay>,

    sim: Simulation,
    /// CPU composite target, sized to the surface in physical pixels.
    canvas: Canvas,

    // Staged input
    pending_resize: bool,
    reset_requested: bool,

    last_frame_time: Option<Instant>,

    /// Set when setup fails; returned from `run` after the loop exits.
    fatal: Option<Box<dyn Error>>,
}

impl App {
    fn new() -> Self {
        Self {
            window: None,
            gpu: None,
            debug: None,
            sim: Simulation::new(SimConfig::DEFAULT),
            canvas: Canvas::new(0, 0),
            pending_resize: false,
            reset_requested: false,
            last_frame_time: None,
            fatal: None,
        }
    }

    /// Create the window, GPU state and overlay. Errors are fatal.
    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), Box<dyn Error>> {
        // Start hidden so the first visible frame already has the trail surface.
        let attrs = WindowAttributes::default()
            .with_title("SlimeGlow")
            .with_transparent(true)
            .with_visible(false)
            .with_inner_size(INITIAL_WINDOW_SIZE);

        let window = Arc::new(event_loop.create_window(attrs)?);

        let size = window.inner_size();
        log::info!(
            "Window created: {}x{} px @ {:.2}x",
            size.width,
            size.height,
            window.scale_factor()
        );

        let gpu = GpuState::new(window.clone())?;
        log::info!("wgpu + trail pipeline initialized");

        self.debug = Some(DebugOverlay::new(&window, &gpu));
        self.gpu = Some(gpu);
        self.window = Some(window.clone());

        let config = self.sim.config();
        log::info!(
            "Config: {} agents, decay {}, diffuse {} (not applied)",
            config.agent_count,
            config.decay,
            config.diffuse
        );
        log::debug!("{config:?}");

        self.apply_resize();

        event_loop.set_control_flow(ControlFlow::Poll);
        window.set_visible(true);
        Ok(())
    }

    /// Rebuild surface, canvas and simulation for the current window size.
    fn apply_resize(&mut self) {
        self.pending_resize = false;
        let Some(window) = &self.window else {
            return;
        };
        let size = window.inner_size();
        let scale = window.scale_factor();

        if let Some(gpu) = &mut self.gpu {
            gpu.resize(size.width, size.height);
        }
        self.canvas.resize(size.width, size.height);

        let logical: LogicalSize<f32> = size.to_logical(scale);
        self.sim.resize(logical.width, logical.height, scale as f32);
    }

    /// One displayed frame: apply staged input, step, composite, present.
    fn redraw(&mut self) {
        let now = Instant::now();
        if let (Some(last), Some(debug)) = (self.last_frame_time, &mut self.debug) {
            debug.stats.record_frame(now.duration_since(last).as_secs_f64());
        }
        self.last_frame_time = Some(now);

        // A staged resize always lands before the step that would use it.
        if self.pending_resize {
            self.apply_resize();
        }

        let Self {
            window,
            gpu,
            debug,
            sim,
            canvas,
            reset_requested,
            ..
        } = self;
        let (Some(window), Some(gpu), Some(debug)) = (window.as_ref(), gpu.as_ref(), debug.as_mut())
        else {
            return;
        };

        if std::mem::take(reset_requested) {
            sim.reset_headings();
        }

        // --- Simulate + composite ---
        if !debug.paused {
            sim.frame(canvas, &mut debug.system_timers);
        }

        // --- Upload ---
        debug.system_timers.begin();
        gpu.upload_trail(canvas);
        debug.system_timers.end(SystemPhase::Upload);

        // --- Render ---
        debug.system_timers.begin();
        if let Some(mut frame) = gpu.begin_frame() {
            gpu.draw_trail(&mut frame.encoder, &frame.view);

            let mut extra_cmd_bufs = Vec::new();
            let mut egui_textures = None;
            if debug.visible {
                let (primitives, textures_delta, screen_descriptor) = debug.run_frame(
                    window,
                    gpu.surface_config.width,
                    gpu.surface_config.height,
                );
                extra_cmd_bufs = debug.prepare_egui(
                    &gpu.device,
                    &gpu.queue,
                    &mut frame.encoder,
                    &primitives,
                    &textures_delta,
                    &screen_descriptor,
                );
                {
                    let mut pass = GpuState::begin_egui_pass(&mut frame.encoder, &frame.view);
                    debug.render_egui(&mut pass, &primitives, &screen_descriptor);
                }
                egui_textures = Some(textures_delta);
            }

            gpu.finish_frame(frame.encoder, frame.output, extra_cmd_bufs);
            if let Some(textures_delta) = egui_textures {
                debug.free_textures(&textures_delta);
            }
        }
        debug.system_timers.end(SystemPhase::Render);

        let space = sim.space();
        let pointer = sim.pointer();
        debug.sim_info = SimInfo {
            agent_count: sim.agent_count(),
            frame_count: sim.frame_count(),
            viewport: space.size.into(),
            device_px: [space.px_w, space.px_h],
            dpr: space.dpr,
            pointer: pointer.into(),
        };
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.init(event_loop) {
            log::error!("Startup failed: {e}");
            self.fatal = Some(e);
            event_loop.exit();
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(w) = &self.window {
            w.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let consumed = match (&self.window, &mut self.debug) {
            (Some(window), Some(debug)) => debug.on_window_event(window, &event),
            _ => false,
        };

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting");
                event_loop.exit();
            }
            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => {
                self.pending_resize = true;
            }
            WindowEvent::CursorMoved { position, .. } if !consumed => {
                if let Some(window) = &self.window {
                    let logical: LogicalPosition<f32> = position.to_logical(window.scale_factor());
                    self.sim.set_pointer(logical.x, logical.y);
                }
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } if !consumed => {
                self.reset_requested = true;
            }
            WindowEvent::KeyboardInput { event, .. } => match event.physical_key {
                PhysicalKey::Code(KeyCode::Escape) if event.state == ElementState::Pressed => {
                    log::info!("ESC pressed, exiting");
                    event_loop.exit();
                }
                PhysicalKey::Code(KeyCode::F12) => {
                    if let Some(debug) = &mut self.debug {
                        debug.poll_toggle(event.state == ElementState::Pressed);
                    }
                }
                _ => {}
            },
            WindowEvent::RedrawRequested => self.redraw(),
            _ => {}
        }
    }
}

/// Create the event loop and run until exit.
pub fn run() -> Result<(), Box<dyn Error>> {
    let event_loop = EventLoop::new()?;
    let mut app = App::new();
    event_loop.run_app(&mut app)?;
    match app.fatal.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
