//! Window lifecycle and the frame loop.
//!
//! [`App`] drives the whole scene from winit events: window creation on
//! resume, input routing, one [`crate::scene::Scene::advance`] plus one
//! render per `RedrawRequested`, and buffer release on close. Once the event
//! loop exits no further mutation happens.

use std::sync::Arc;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowId};

use crate::error::{ParamError, SceneError};
use crate::galaxy::GalaxyField;
use crate::gpu::GpuState;
use crate::input::{Binding, Input};
use crate::scene::{Scene, SceneConfig};
use crate::starfield::{StarLayer, BACKGROUND_LAYERS};

/// The winit application driving the scene.
pub struct App {
    config: SceneConfig,
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    scene: Option<Scene>,
    input: Input,
}

impl App {
    /// Create the application. Parameters are validated up front so the
    /// window never opens on a degenerate configuration.
    pub fn new(config: SceneConfig) -> Result<Self, SceneError> {
        config.galaxy.validate()?;
        Ok(Self {
            config,
            window: None,
            gpu: None,
            scene: None,
            input: Input::new(1280, 720),
        })
    }

    /// Generate the galaxy field and star layers from the configured seed.
    fn generate(&self) -> Result<(GalaxyField, [StarLayer; 3]), ParamError> {
        let mut rng = match self.config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        let field = GalaxyField::generate(&self.config.galaxy, &mut rng)?;
        let layers = [
            StarLayer::generate(&BACKGROUND_LAYERS[0], &mut rng)?,
            StarLayer::generate(&BACKGROUND_LAYERS[1], &mut rng)?,
            StarLayer::generate(&BACKGROUND_LAYERS[2], &mut rng)?,
        ];
        Ok((field, layers))
    }

    /// Run one frame: route buffered input into the scene, advance it, and
    /// render the snapshot.
    fn frame(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(gpu), Some(scene)) = (self.gpu.as_mut(), self.scene.as_mut()) else {
            return;
        };
        let aspect = gpu.aspect();

        if self.input.pressed(Binding::ToggleAutoRotate) {
            scene.camera.toggle_auto_rotate();
        }
        if self.input.pressed(Binding::ResetCamera) {
            scene.camera.reset();
        }
        if self.input.clicked() {
            scene.click(self.input.mouse_ndc(), aspect);
        }

        let drag = self.input.drag_delta();
        if drag.length_squared() > 0.0 {
            scene.camera.orbit(drag.x, drag.y);
        }
        let scroll = self.input.scroll_delta();
        if scroll != 0.0 {
            scene.camera.zoom(scroll);
        }

        let snapshot = scene.advance(aspect);
        match gpu.render(&snapshot) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost) => gpu.resize(winit::dpi::PhysicalSize {
                width: gpu.config.width,
                height: gpu.config.height,
            }),
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("surface out of memory, shutting down");
                event_loop.exit();
            }
            Err(e) => log::warn!("render error: {e:?}"),
        }

        self.input.begin_frame();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = Window::default_attributes()
            .with_title("stardrift — particle galaxy")
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));
        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let (field, layers) = match self.generate() {
            Ok(generated) => generated,
            Err(e) => {
                log::error!("generation failed: {e}");
                event_loop.exit();
                return;
            }
        };
        log::info!(
            "generated galaxy field: {} particles across {} branches",
            field.len(),
            self.config.galaxy.branches
        );

        let gpu = match pollster::block_on(GpuState::new(window.clone(), &field, &layers)) {
            Ok(gpu) => gpu,
            Err(e) => {
                log::error!("{e}");
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        self.input.set_window_size(size.width, size.height);

        // Validated in App::new; the scene cannot reject the parameters here.
        self.scene = match Scene::new(self.config.galaxy.clone()) {
            Ok(scene) => Some(scene),
            Err(e) => {
                log::error!("scene setup failed: {e}");
                event_loop.exit();
                return;
            }
        };
        self.gpu = Some(gpu);
        self.window = Some(window);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        self.input.handle_event(&event);

        match event {
            WindowEvent::CloseRequested => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.release();
                }
                let frames = self.scene.as_ref().map(|s| s.clock.frame()).unwrap_or(0);
                log::info!("scene closed after {frames} frames");
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                self.input
                    .set_window_size(physical_size.width, physical_size.height);
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(physical_size);
                }
            }
            WindowEvent::RedrawRequested => {
                self.frame(event_loop);
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}
