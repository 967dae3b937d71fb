//! Cubefield - frustum-culled cube sandbox
//!
//! Spawns a grid of cubes, flies a first-person camera through it, and
//! draws only what the view frustum contains, batched by material.

use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    event::{DeviceEvent, DeviceId, ElementState, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{CursorGrabMode, Fullscreen, Window, WindowId},
};

use cubefield::config::{AppConfig, SceneConfig};
use cubefield_core::MaterialBatcher;
use cubefield_input::CameraController;
use cubefield_math::Vec3;
use cubefield_render::{
    camera::Camera,
    context::RenderContext,
    geometry::{Cube, GeometryObject},
    gizmos,
    material::{CameraUniform, Material, MaterialRegistry},
};

/// World-unit length of the gizmo lines showing plane normals
const GIZMO_NORMAL_LENGTH: f32 = 2.0;

/// GPU-backed scene state, created once the window exists
struct GpuScene {
    materials: MaterialRegistry,
    objects: Vec<Box<dyn GeometryObject>>,
}

/// Main application state
struct App {
    config: AppConfig,
    window: Option<Arc<Window>>,
    render_context: Option<RenderContext>,
    scene: Option<GpuScene>,
    camera: Camera,
    controller: CameraController,
    batcher: MaterialBatcher,
    last_frame: std::time::Instant,
    cursor_captured: bool,
}

impl App {
    fn new() -> Self {
        // Load configuration
        let config = AppConfig::load().unwrap_or_else(|e| {
            log::warn!("Failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        });

        let camera = Self::build_camera(&config);

        // Configure controller from config
        let controller = CameraController::new()
            .with_move_speed(config.input.move_speed)
            .with_mouse_sensitivity(config.input.mouse_sensitivity)
            .with_scroll_sensitivity(config.input.scroll_sensitivity);

        Self {
            config,
            window: None,
            render_context: None,
            scene: None,
            camera,
            controller,
            batcher: MaterialBatcher::new(),
            last_frame: std::time::Instant::now(),
            cursor_captured: false,
        }
    }

    fn build_camera(config: &AppConfig) -> Camera {
        let aspect = config.window.width as f32 / config.window.height.max(1) as f32;
        let mut camera = Camera::new(
            Vec3::from(config.camera.start_position),
            aspect,
            config.camera.near,
            config.camera.far,
        );
        camera.pitch_limit = config.camera.pitch_limit;
        camera
    }

    /// Build the cube grid, centered on the origin
    fn spawn_cubes(device: &wgpu::Device, scene: &SceneConfig, material_index: usize) -> Vec<Cube> {
        let mut cubes = Vec::with_capacity((scene.rows * scene.columns * scene.layers) as usize);
        let offset = |count: u32| (count.saturating_sub(1)) as f32 * scene.spacing * 0.5;
        for row in 0..scene.rows {
            for layer in 0..scene.layers {
                for column in 0..scene.columns {
                    let position = Vec3::new(
                        row as f32 * scene.spacing - offset(scene.rows),
                        layer as f32 * scene.spacing - offset(scene.layers),
                        column as f32 * scene.spacing - offset(scene.columns),
                    );
                    cubes.push(Cube::new(
                        device,
                        cubefield_core::Transform::from_position(position),
                        material_index,
                    ));
                }
            }
        }
        cubes
    }

    /// Capture cursor for FPS-style controls
    fn capture_cursor(&mut self) {
        if let Some(window) = &self.window {
            // Try Locked mode first (best for FPS), fall back to Confined
            let grab_result = window
                .set_cursor_grab(CursorGrabMode::Locked)
                .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined));

            if grab_result.is_ok() {
                window.set_cursor_visible(false);
                self.cursor_captured = true;
                log::info!("Cursor captured - Escape to release");
            } else {
                log::warn!("Failed to capture cursor");
            }
        }
    }

    /// Release cursor
    fn release_cursor(&mut self) {
        if let Some(window) = &self.window {
            let _ = window.set_cursor_grab(CursorGrabMode::None);
            window.set_cursor_visible(true);
            self.cursor_captured = false;
            log::info!("Cursor released - click to capture");
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let now = std::time::Instant::now();
        // Cap dt so the first frame or a focus stall cannot teleport the camera
        let dt = (now - self.last_frame).as_secs_f32().min(1.0 / 30.0);
        self.last_frame = now;

        let position = self
            .controller
            .update(&mut self.camera, dt, self.cursor_captured);

        let (Some(ctx), Some(scene)) = (&self.render_context, &self.scene) else {
            return;
        };

        self.camera.set_aspect(ctx.aspect_ratio());
        self.camera.recalculate_frustum();

        // Cull inside each batch's range, assigning every visible object a
        // model-buffer slot within its material. Batches themselves are
        // fixed since scene construction.
        let frustum = self.camera.frustum();
        let mut visible: Vec<(usize, u32)> = Vec::new();
        let mut batch_ranges: Vec<(usize, std::ops::Range<usize>)> =
            Vec::with_capacity(self.batcher.len());
        for (material_index, batch) in self.batcher.iter() {
            let material = match scene.materials.get(material_index) {
                Ok(material) => material,
                Err(e) => {
                    log::error!("cannot draw material {}: {}", material_index, e);
                    event_loop.exit();
                    return;
                }
            };
            let start = visible.len();
            for object_index in batch.start_index..batch.start_index + batch.objects_count {
                let object = &scene.objects[object_index];
                if !object.is_in_frustum(frustum) {
                    continue;
                }
                let slot = (visible.len() - start) as u32;
                material.write_model(&ctx.queue, slot, &object.transform().world_matrix());
                visible.push((object_index, slot));
            }
            batch_ranges.push((material_index, start..visible.len()));
        }

        if self.config.debug.log_culling_stats {
            log::debug!(
                "visible {}/{} objects in {} batches",
                visible.len(),
                scene.objects.len(),
                self.batcher.len()
            );
        }

        // Shared camera/lighting uniform, identical for every material
        let light_dir = Vec3::from(self.config.rendering.light_dir).normalized();
        let camera_uniform = CameraUniform {
            view_proj: self.camera.view_projection_matrix(),
            view_pos: [position.x, position.y, position.z, 1.0],
            light_dir: [light_dir.x, light_dir.y, light_dir.z, 0.0],
            light_params: [
                self.config.rendering.ambient_strength,
                self.config.rendering.diffuse_strength,
                0.0,
                0.0,
            ],
        };
        for (_, material) in scene.materials.iter() {
            material.write_camera(&ctx.queue, &camera_uniform);
        }

        // Update window title with position and culling stats
        if let Some(window) = &self.window {
            let hint = if self.cursor_captured {
                "[Esc to release]"
            } else {
                "[Click to capture]"
            };
            window.set_title(&format!(
                "{} - ({:.1}, {:.1}, {:.1}) | {}/{} visible {}",
                self.config.window.title,
                position.x,
                position.y,
                position.z,
                visible.len(),
                scene.objects.len(),
                hint
            ));
        }

        let output = match ctx.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let size = ctx.size;
                if let Some(ctx) = &mut self.render_context {
                    ctx.resize(size);
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
                return;
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Surface out of memory");
                event_loop.exit();
                return;
            }
            Err(e) => {
                log::warn!("Surface error: {:?}", e);
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let bg = &self.config.rendering.background_color;
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: bg[0] as f64,
                            g: bg[1] as f64,
                            b: bg[2] as f64,
                            a: bg[3] as f64,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: ctx.depth_view(),
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            // One pipeline bind per material, one dynamic offset per object
            for (material_index, range) in &batch_ranges {
                if range.is_empty() {
                    continue;
                }
                let Ok(material) = scene.materials.get(*material_index) else {
                    continue;
                };
                material.use_in_pass(&mut render_pass);
                for &(object_index, slot) in &visible[range.clone()] {
                    let object = &scene.objects[object_index];
                    material.prepare_for_object(&mut render_pass, slot);
                    object.open_drawing_context(&mut render_pass);
                    object.draw(&mut render_pass);
                }
            }
        }

        ctx.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            let mut window_attributes = Window::default_attributes()
                .with_title(&self.config.window.title)
                .with_inner_size(winit::dpi::LogicalSize::new(
                    self.config.window.width,
                    self.config.window.height,
                ));
            if self.config.window.fullscreen {
                window_attributes =
                    window_attributes.with_fullscreen(Some(Fullscreen::Borderless(None)));
            }

            let window = Arc::new(
                event_loop
                    .create_window(window_attributes)
                    .expect("Failed to create window"),
            );

            let render_context = pollster::block_on(RenderContext::new(
                window.clone(),
                self.config.window.vsync,
            ))
            .unwrap_or_else(|e| panic!("Failed to initialize graphics: {}", e));

            let scene_config = &self.config.scene;
            let cube_count = scene_config.rows * scene_config.columns * scene_config.layers;
            let gizmo_count = gizmos::FRUSTUM_EDGES.len() as u32 + 6;

            let mut materials = MaterialRegistry::new();
            let cube_material = materials.add(Material::lit(
                &render_context.device,
                render_context.config.format,
                cube_count.max(1),
            ));
            let line_material = materials.add(Material::line(
                &render_context.device,
                render_context.config.format,
                gizmo_count,
            ));

            // Spawn order keeps each material's objects contiguous, which
            // the batcher depends on
            let mut objects: Vec<Box<dyn GeometryObject>> = Vec::new();
            for cube in Self::spawn_cubes(&render_context.device, scene_config, cube_material) {
                objects.push(Box::new(cube));
            }
            if self.config.debug.show_frustum_gizmos {
                for line in gizmos::frustum_gizmos(
                    &render_context.device,
                    self.camera.frustum(),
                    line_material,
                    GIZMO_NORMAL_LENGTH,
                ) {
                    objects.push(Box::new(line));
                }
            }

            // Batches are fixed for the scene's lifetime; per-frame culling
            // walks each batch's index range
            self.batcher
                .rebuild(objects.iter().map(|object| object.material_index()));

            log::info!(
                "Spawned {} cubes ({}x{}x{} grid, spacing {})",
                cube_count,
                scene_config.rows,
                scene_config.layers,
                scene_config.columns,
                scene_config.spacing
            );

            self.window = Some(window);
            self.render_context = Some(render_context);
            self.scene = Some(GpuScene { materials, objects });
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => {
                if let Some(ctx) = &mut self.render_context {
                    ctx.resize(physical_size);
                    self.camera.set_aspect(ctx.aspect_ratio());
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    if event.state == ElementState::Pressed {
                        match key {
                            KeyCode::Escape => {
                                // Escape releases cursor first, then exits if pressed again
                                if self.cursor_captured {
                                    self.release_cursor();
                                } else {
                                    event_loop.exit();
                                }
                                return;
                            }
                            KeyCode::KeyR => {
                                let aspect = self.camera.aspect;
                                self.camera = Self::build_camera(&self.config);
                                self.camera.set_aspect(aspect);
                                log::info!("Camera reset to starting position");
                            }
                            KeyCode::KeyF => {
                                if let Some(window) = &self.window {
                                    let new_fullscreen = if window.fullscreen().is_some() {
                                        None
                                    } else {
                                        Some(Fullscreen::Borderless(None))
                                    };
                                    window.set_fullscreen(new_fullscreen);
                                }
                            }
                            _ => {}
                        }
                    }
                    // Pass to controller for movement keys
                    self.controller.process_keyboard(key, event.state);
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                // Click to capture cursor (FPS style)
                if state == ElementState::Pressed
                    && button == MouseButton::Left
                    && !self.cursor_captured
                {
                    self.capture_cursor();
                }
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let scroll = match delta {
                    winit::event::MouseScrollDelta::LineDelta(_, y) => y,
                    winit::event::MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 100.0,
                };
                self.controller.process_scroll(scroll);
            }

            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
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
        if let DeviceEvent::MouseMotion { delta } = event {
            self.controller.process_mouse_motion(delta.0, delta.1);
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(scene) = &self.scene {
            for object in &scene.objects {
                object.dispose();
            }
            log::info!("Released {} scene objects", scene.objects.len());
        }
    }
}

fn main() {
    // Initialize logging
    env_logger::init();
    log::info!("Starting Cubefield");

    // Create event loop
    let event_loop = EventLoop::new().expect("Failed to create event loop");
    event_loop.set_control_flow(ControlFlow::Poll);

    // Create and run application
    let mut app = App::new();
    event_loop.run_app(&mut app).expect("Event loop error");
}
