use anyhow::{Context, Result};
use clap::Parser;
use drillscene_camera::{Camera, CameraMovement};
use drillscene_input::{Action, HOME_POSITION, HeldMovements, PointerTracker};
use drillscene_render_wgpu::{GpuContext, SceneRenderer};
use drillscene_scene::{PolygonMode, SceneFrame};
use egui::Context as EguiContext;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{
    DeviceEvent, DeviceId, ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent,
};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{CursorGrabMode, Window, WindowId};

/// Trackpads report pixels; this many make one wheel line of zoom.
const PIXELS_PER_SCROLL_LINE: f32 = 40.0;

/// Longest frame step fed to movement, so a stall does not teleport the camera.
const MAX_FRAME_DT: f32 = 0.1;

const CONTROLS: &[(&str, &str)] = &[
    ("W A S D", "move"),
    ("Right mouse (hold)", "look around"),
    ("Scroll", "zoom"),
    ("K", "wireframe"),
    ("L", "fill"),
    ("P", "reset camera"),
    ("F1", "toggle HUD"),
    ("Esc", "quit"),
];

#[derive(Parser)]
#[command(name = "drillscene-desktop", about = "Fly around a lit sphere and drill")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Window width in pixels
    #[arg(long, default_value = "800")]
    width: u32,

    /// Window height in pixels
    #[arg(long, default_value = "800")]
    height: u32,

    /// Camera movement speed in world units per second
    #[arg(long)]
    speed: Option<f32>,

    /// Multiplier on pointer motion
    #[arg(long)]
    sensitivity: Option<f32>,

    /// Start with the HUD hidden
    #[arg(long)]
    no_hud: bool,
}

/// Application state. Owns the camera and all timing/pointer bookkeeping.
struct AppState {
    camera: Camera,
    held: HeldMovements,
    pointer: PointerTracker,
    looking: bool,
    /// Set once the platform delivers relative motion; absolute cursor
    /// samples are ignored from then on.
    raw_motion: bool,
    polygon_mode: PolygonMode,
    show_hud: bool,
    started: Instant,
    last_frame: Instant,
}

impl AppState {
    fn new(cli: &Cli) -> Self {
        let mut camera = Camera::at(HOME_POSITION);
        if let Some(speed) = cli.speed {
            camera.movement_speed = speed;
        }
        if let Some(sensitivity) = cli.sensitivity {
            camera.mouse_sensitivity = sensitivity;
        }

        let now = Instant::now();
        Self {
            camera,
            held: HeldMovements::new(),
            pointer: PointerTracker::new(),
            looking: false,
            raw_motion: false,
            polygon_mode: PolygonMode::Fill,
            show_hud: !cli.no_hud,
            started: now,
            last_frame: now,
        }
    }

    /// Advance timing and apply held movement keys. Returns seconds since start.
    fn update(&mut self) -> f32 {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32().min(MAX_FRAME_DT);
        self.last_frame = now;

        self.held.apply(&mut self.camera, dt);
        (now - self.started).as_secs_f32()
    }

    /// Track key state. Returns actions the camera cannot handle on its own.
    fn handle_key(&mut self, key: KeyCode, pressed: bool) -> Option<Action> {
        if let Some(direction) = movement_for_key(key) {
            self.held.set(direction, pressed);
            return None;
        }
        if !pressed {
            return None;
        }

        let action = action_for_key(key)?;
        match action {
            Action::ToggleHud => {
                self.show_hud = !self.show_hud;
                None
            }
            _ if action.apply_to_camera(&mut self.camera, 0.0) => None,
            _ => Some(action),
        }
    }

    fn set_looking(&mut self, looking: bool) {
        self.looking = looking;
        // A new drag must not jump from wherever the last one ended.
        self.pointer.rearm();
    }

    /// Whether the HUD may swallow window input. Never while looking, so the
    /// button release that ends the drag always reaches us.
    fn hud_takes_input(&self) -> bool {
        self.show_hud && !self.looking
    }

    /// Relative mouse motion. Unbounded by the window edges.
    fn mouse_motion(&mut self, dx: f64, dy: f64) {
        if !self.looking {
            return;
        }
        self.raw_motion = true;
        Action::from_mouse_motion(dx, dy).apply_to_camera(&mut self.camera, 0.0);
    }

    /// Absolute cursor samples, used only where relative motion never arrives.
    fn cursor_moved(&mut self, x: f32, y: f32) {
        if !self.looking || self.raw_motion {
            return;
        }
        if let Some((xoffset, yoffset)) = self.pointer.track(x, y) {
            Action::Look { xoffset, yoffset }.apply_to_camera(&mut self.camera, 0.0);
        }
    }

    fn scroll(&mut self, delta: MouseScrollDelta) {
        let lines = match delta {
            MouseScrollDelta::LineDelta(_, y) => y,
            MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / PIXELS_PER_SCROLL_LINE,
        };
        Action::Zoom(lines).apply_to_camera(&mut self.camera, 0.0);
    }

    fn draw_ui(&mut self, ctx: &EguiContext) {
        if !self.show_hud {
            return;
        }

        let cam = &self.camera;
        egui::Window::new("Camera")
            .default_pos([12.0, 12.0])
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(format!(
                    "Position: ({:.2}, {:.2}, {:.2})",
                    cam.position.x, cam.position.y, cam.position.z
                ));
                ui.label(format!("Yaw: {:.1}°  Pitch: {:.1}°", cam.yaw(), cam.pitch()));
                ui.label(format!("FOV: {:.1}°", cam.zoom()));
                ui.label(format!("Polygon mode: {}", self.polygon_mode.label()));
                ui.separator();

                egui::Grid::new("controls").show(ui, |ui| {
                    for (keys, what) in CONTROLS {
                        ui.monospace(*keys);
                        ui.label(*what);
                        ui.end_row();
                    }
                });
            });
    }
}

fn movement_for_key(key: KeyCode) -> Option<CameraMovement> {
    match key {
        KeyCode::KeyW => Some(CameraMovement::Forward),
        KeyCode::KeyS => Some(CameraMovement::Backward),
        KeyCode::KeyA => Some(CameraMovement::Left),
        KeyCode::KeyD => Some(CameraMovement::Right),
        _ => None,
    }
}

fn action_for_key(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::KeyK => Some(Action::SetPolygonMode(PolygonMode::Line)),
        KeyCode::KeyL => Some(Action::SetPolygonMode(PolygonMode::Fill)),
        KeyCode::KeyP => Some(Action::ResetCamera),
        KeyCode::F1 => Some(Action::ToggleHud),
        KeyCode::Escape => Some(Action::Quit),
        _ => None,
    }
}

/// Everything that exists only once a window is up.
struct Graphics {
    window: Arc<Window>,
    gpu: GpuContext,
    renderer: SceneRenderer,
    egui_winit: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

struct GpuApp {
    state: AppState,
    size: PhysicalSize<u32>,
    graphics: Option<Graphics>,
    egui_ctx: EguiContext,
}

impl GpuApp {
    fn new(cli: &Cli) -> Self {
        Self {
            state: AppState::new(cli),
            size: PhysicalSize::new(cli.width.max(1), cli.height.max(1)),
            graphics: None,
            egui_ctx: EguiContext::default(),
        }
    }

    fn init_graphics(&mut self, event_loop: &ActiveEventLoop) -> Result<Graphics> {
        let attrs = Window::default_attributes()
            .with_title("Drill Scene")
            .with_inner_size(self.size);
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("failed to create window")?,
        );

        let size = window.inner_size();
        let gpu = GpuContext::new(window.clone(), size.width, size.height)?;
        if !gpu.wireframe_supported() {
            tracing::warn!(backend = ?gpu.backend(), "K will keep the fill mode on this adapter");
        }
        let renderer = SceneRenderer::new(
            &gpu.device,
            gpu.surface_format(),
            gpu.config.width,
            gpu.config.height,
            gpu.wireframe_supported(),
        )?;

        let egui_winit = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer =
            egui_wgpu::Renderer::new(&gpu.device, gpu.surface_format(), None, 1, false);

        Ok(Graphics {
            window,
            gpu,
            renderer,
            egui_winit,
            egui_renderer,
        })
    }

    fn handle_host_action(&mut self, event_loop: &ActiveEventLoop, action: Action) {
        match action {
            Action::Quit => event_loop.exit(),
            Action::SetPolygonMode(mode) => {
                let Some(graphics) = &self.graphics else {
                    return;
                };
                match graphics.renderer.ensure_polygon_mode(mode) {
                    Ok(()) => {
                        self.state.polygon_mode = mode;
                        tracing::info!("polygon mode: {}", mode.label());
                    }
                    Err(e) => tracing::warn!("{e}"),
                }
            }
            other => tracing::debug!(?other, "unhandled action"),
        }
    }

    fn set_looking(&mut self, looking: bool) {
        self.state.set_looking(looking);
        let Some(graphics) = &self.graphics else {
            return;
        };
        graphics.window.set_cursor_visible(!looking);
        if !looking {
            if let Err(e) = graphics.window.set_cursor_grab(CursorGrabMode::None) {
                tracing::debug!("cursor release failed: {e}");
            }
            return;
        }
        let grabbed = graphics
            .window
            .set_cursor_grab(CursorGrabMode::Locked)
            .or_else(|_| graphics.window.set_cursor_grab(CursorGrabMode::Confined));
        if let Err(e) = grabbed {
            tracing::debug!("cursor grab unavailable: {e}");
        }
    }

    fn redraw(&mut self) {
        let elapsed = self.state.update();

        let Some(graphics) = &mut self.graphics else {
            return;
        };
        let gpu = &graphics.gpu;

        let output = match gpu.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.reconfigure();
                return;
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        // All input for this frame has been applied by now.
        let frame = SceneFrame::compose(&self.state.camera, gpu.aspect(), elapsed)
            .with_polygon_mode(self.state.polygon_mode);
        graphics
            .renderer
            .render(&gpu.device, &gpu.queue, &view, &frame);

        let raw_input = graphics.egui_winit.take_egui_input(&graphics.window);
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            self.state.draw_ui(ctx);
        });
        graphics
            .egui_winit
            .handle_platform_output(&graphics.window, full_output.platform_output);

        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [gpu.config.width, gpu.config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        let egui_renderer = &mut graphics.egui_renderer;
        for (id, image_delta) in &full_output.textures_delta.set {
            egui_renderer.update_texture(&gpu.device, &gpu.queue, *id, image_delta);
        }
        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("egui_encoder"),
            });
        egui_renderer.update_buffers(
            &gpu.device,
            &gpu.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            egui_renderer.render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        gpu.queue.submit(std::iter::once(encoder.finish()));
        for id in &full_output.textures_delta.free {
            egui_renderer.free_texture(id);
        }

        output.present();
        graphics.window.request_redraw();
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.graphics.is_some() {
            return;
        }

        match self.init_graphics(event_loop) {
            Ok(graphics) => self.graphics = Some(graphics),
            Err(e) => {
                tracing::error!("failed to initialize graphics: {e:#}");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let Some(graphics) = &mut self.graphics {
            let response = graphics
                .egui_winit
                .on_window_event(&graphics.window, &event);
            if response.consumed && self.state.hud_takes_input() {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(graphics) = &mut self.graphics {
                    graphics.gpu.resize(new_size.width, new_size.height);
                    let (width, height) = (graphics.gpu.config.width, graphics.gpu.config.height);
                    graphics
                        .renderer
                        .resize(&graphics.gpu.device, width, height);
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: key_state,
                        repeat: false,
                        ..
                    },
                ..
            } => {
                if let Some(action) = self
                    .state
                    .handle_key(key, key_state == ElementState::Pressed)
                {
                    self.handle_host_action(event_loop, action);
                }
            }
            WindowEvent::MouseInput {
                button: MouseButton::Right,
                state: btn_state,
                ..
            } => {
                self.set_looking(btn_state == ElementState::Pressed);
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.state.cursor_moved(position.x as f32, position.y as f32);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.state.scroll(delta);
            }
            WindowEvent::Focused(false) => {
                self.state.held.clear();
                self.set_looking(false);
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
            }
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
            self.state.mouse_motion(dx, dy);
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(graphics) = &self.graphics {
            graphics.window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("drillscene-desktop starting");
    for (keys, what) in CONTROLS {
        tracing::info!("{keys:>20}: {what}");
    }

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(&cli);
    event_loop.run_app(&mut app)?;

    Ok(())
}
