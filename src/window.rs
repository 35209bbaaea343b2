//! The interactive viewer: winit window, input, and the frame loop.
//!
//! | Input | Action |
//! |-------|--------|
//! | Space / Enter | toggle between tree and scattered |
//! | Left drag | orbit |
//! | Wheel | zoom |
//! | P | pause time |
//! | Escape | quit |

use std::sync::Arc;

use tracing::{error, info, warn};
use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::error::ViewerError;
use crate::gpu::GpuSurface;
use crate::scene::Scene;
use crate::time::Time;

/// Frames between window title refreshes.
const TITLE_INTERVAL: u64 = 30;

/// Open a window and run `scene` until it is closed.
pub fn run(scene: Scene) -> Result<(), ViewerError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(scene);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

/// Counts redraws, not simulated frames, so the title keeps its cadence
/// while time is paused.
#[derive(Debug, Default)]
struct TitleRefresh {
    redraws: u64,
}

impl TitleRefresh {
    /// Count one redraw; `true` every [`TITLE_INTERVAL`] redraws.
    fn tick(&mut self) -> bool {
        self.redraws += 1;
        self.redraws % TITLE_INTERVAL == 0
    }
}

struct App {
    scene: Scene,
    time: Time,
    window: Option<Arc<Window>>,
    gpu: Option<GpuSurface>,
    mouse_pressed: bool,
    last_mouse_pos: Option<(f64, f64)>,
    title_refresh: TitleRefresh,
    error: Option<ViewerError>,
}

impl App {
    fn new(scene: Scene) -> Self {
        Self {
            scene,
            time: Time::new(),
            window: None,
            gpu: None,
            mouse_pressed: false,
            last_mouse_pos: None,
            title_refresh: TitleRefresh::default(),
            error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: ViewerError) {
        error!(%err, "viewer stopped");
        self.error = Some(err);
        event_loop.exit();
    }

    fn title(&self) -> String {
        format!(
            "Conifer - {} [Space] - {:.0} fps",
            self.scene.state().toggle_label(),
            self.time.fps()
        )
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, event: &KeyEvent) {
        if event.state != ElementState::Pressed || event.repeat {
            return;
        }
        match event.physical_key {
            PhysicalKey::Code(KeyCode::Space | KeyCode::Enter) => {
                self.scene.state().toggle();
                if let Some(window) = &self.window {
                    window.set_title(&self.title());
                }
            }
            PhysicalKey::Code(KeyCode::KeyP) => self.time.toggle_pause(),
            PhysicalKey::Code(KeyCode::Escape) => event_loop.exit(),
            _ => {}
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(window) = self.window.clone() else {
            return;
        };

        self.time.update();
        let pixel_ratio = window.scale_factor() as f32;

        if self.scene.frame(&self.time, pixel_ratio, &mut self.gpu) {
            if let Some(gpu) = &mut self.gpu {
                match gpu.render(self.time.elapsed(), self.time.delta()) {
                    Ok(()) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        warn!("surface lost, reconfiguring");
                        gpu.reconfigure();
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        error!("GPU out of memory");
                        event_loop.exit();
                    }
                    Err(e) => warn!(error = %e, "render error"),
                }
            }
        }

        if self.title_refresh.tick() {
            window.set_title(&self.title());
        }
        window.request_redraw();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = Window::default_attributes()
            .with_title(self.title())
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => return self.fail(event_loop, e.into()),
        };
        self.window = Some(window.clone());

        match pollster::block_on(GpuSurface::new(window, self.scene.config())) {
            Ok(gpu) => {
                info!("viewer ready");
                self.gpu = Some(gpu);
            }
            Err(e) => self.fail(event_loop, e.into()),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(physical_size);
                }
            }
            WindowEvent::KeyboardInput { event, .. } => self.handle_key(event_loop, &event),
            WindowEvent::MouseInput { state, button, .. } => {
                if button == MouseButton::Left {
                    self.mouse_pressed = state == ElementState::Pressed;
                    if !self.mouse_pressed {
                        self.last_mouse_pos = None;
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                if self.mouse_pressed {
                    if let Some((last_x, last_y)) = self.last_mouse_pos {
                        let dx = (position.x - last_x) as f32;
                        let dy = (position.y - last_y) as f32;
                        if let Some(gpu) = &mut self.gpu {
                            gpu.camera.orbit(dx, dy);
                        }
                    }
                    self.last_mouse_pos = Some((position.x, position.y));
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let scroll = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.1,
                };
                if let Some(gpu) = &mut self.gpu {
                    gpu.camera.zoom(scroll);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }
}
