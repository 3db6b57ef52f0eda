//! Windowed inventory screen (winit + wgpu + egui).

use crate::config::{AtlasConfig, InventoryConfig};
use anyhow::Result;
use gridstash_core::{DepositMode, GridInventory};
use gridstash_input::InputState;
use gridstash_ui::{AtlasTexture, InventoryView, SpriteAtlas, BACKGROUND_COLOR};
use std::sync::Arc;
use tracing::{debug, info, warn};
use winit::event::{Event, MouseButton, WindowEvent};
use winit::event_loop::EventLoopWindowTarget;
use winit::window::Window;

/// Result of handling an event, for the outer event loop.
pub enum AppAction {
    /// Keep running
    Continue,
    /// Close the window and exit
    Quit,
}

/// Placeholder grid used when the atlas image cannot be loaded.
const PLACEHOLDER_COLUMNS: u32 = 8;
const PLACEHOLDER_ROWS: u32 = 8;

/// Load the configured atlas, falling back to generated tiles on failure.
pub fn load_atlas(cfg: &AtlasConfig) -> SpriteAtlas {
    match SpriteAtlas::load(&cfg.path, cfg.tile_size) {
        Ok(atlas) => {
            info!(
                path = %cfg.path.display(),
                columns = atlas.columns(),
                rows = atlas.rows(),
                "Loaded item atlas"
            );
            atlas
        }
        Err(err) => {
            warn!(%err, path = %cfg.path.display(), "Failed to load item atlas, using placeholder tiles");
            SpriteAtlas::placeholder(cfg.tile_size, PLACEHOLDER_COLUMNS, PLACEHOLDER_ROWS)
        }
    }
}

/// Inventory screen state
pub struct InventoryApp {
    window: Arc<Window>,
    egui_state: egui_winit::State,
    egui_ctx: egui::Context,
    wgpu_device: wgpu::Device,
    wgpu_queue: wgpu::Queue,
    surface: wgpu::Surface<'static>,
    surface_config: wgpu::SurfaceConfiguration,
    egui_renderer: egui_wgpu::Renderer,
    input: InputState,
    inventory: GridInventory,
    view: InventoryView,
    atlas: AtlasTexture,
}

impl InventoryApp {
    /// Create the window, GPU surface and egui state around an owned inventory.
    pub fn new(
        event_loop: &EventLoopWindowTarget<()>,
        config: &InventoryConfig,
        inventory: GridInventory,
        atlas: SpriteAtlas,
    ) -> Result<Self> {
        let window = Arc::new(
            winit::window::WindowBuilder::new()
                .with_title(config.window.title.as_str())
                .with_inner_size(winit::dpi::LogicalSize::new(
                    config.window.width,
                    config.window.height,
                ))
                .build(event_loop)?,
        );

        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
        );

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance.create_surface(window.clone())?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .ok_or_else(|| anyhow::anyhow!("Failed to find suitable GPU adapter"))?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("Inventory Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
            },
            None,
        ))?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(surface_caps.formats[0]);

        let size = window.inner_size();
        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        surface.configure(&device, &surface_config);

        let egui_renderer = egui_wgpu::Renderer::new(&device, surface_format, None, 1);
        let atlas = AtlasTexture::upload(&egui_ctx, atlas);

        info!(slots = inventory.len(), "Inventory window ready");

        Ok(Self {
            window,
            egui_state,
            egui_ctx,
            wgpu_device: device,
            wgpu_queue: queue,
            surface,
            surface_config,
            egui_renderer,
            input: InputState::new(),
            inventory,
            view: InventoryView::new(config.layout),
            atlas,
        })
    }

    /// Handle an event
    pub fn handle_event(&mut self, event: &Event<()>) -> AppAction {
        match event {
            Event::WindowEvent { event, window_id } if *window_id == self.window.id() => {
                self.input.handle_event(event);
                let _ = self.egui_state.on_window_event(&self.window, event);

                match event {
                    WindowEvent::CloseRequested => {
                        return AppAction::Quit;
                    }
                    WindowEvent::Resized(new_size) => {
                        if new_size.width > 0 && new_size.height > 0 {
                            self.surface_config.width = new_size.width;
                            self.surface_config.height = new_size.height;
                            self.surface
                                .configure(&self.wgpu_device, &self.surface_config);
                        }
                    }
                    WindowEvent::RedrawRequested => {
                        return self.frame();
                    }
                    _ => {}
                }
            }
            Event::AboutToWait => {
                self.window.request_redraw();
            }
            _ => {}
        }

        AppAction::Continue
    }

    /// Apply this frame's clicks, then draw.
    fn frame(&mut self) -> AppAction {
        if self.input.quit_requested() {
            return AppAction::Quit;
        }

        let pointer = self
            .input
            .cursor_position_logical(self.window.scale_factor())
            .map(|(x, y)| egui::pos2(x, y));

        if let Some(pointer) = pointer {
            for (button, mode) in [
                (MouseButton::Left, DepositMode::All),
                (MouseButton::Right, DepositMode::One),
            ] {
                if self.input.mouse_button_just_pressed(button) {
                    self.click(mode, pointer);
                }
            }
        }
        self.input.begin_frame();

        self.render(pointer);
        AppAction::Continue
    }

    fn click(&mut self, mode: DepositMode, pointer: egui::Pos2) {
        let Some(slot) = self.view.slot_at(&self.inventory, pointer) else {
            debug!(x = pointer.x, y = pointer.y, "Click outside the grid");
            return;
        };
        match self.inventory.deposit(mode, slot) {
            Ok(outcome) => debug!(slot, ?mode, ?outcome, held = %self.inventory.held(), "Deposit"),
            Err(err) => debug!(%err, "Click rejected"),
        }
    }

    /// Render the grid and the held stack
    fn render(&mut self, pointer: Option<egui::Pos2>) {
        let output = match self.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface
                    .configure(&self.wgpu_device, &self.surface_config);
                return;
            }
            Err(e) => {
                warn!("Failed to get surface texture: {}", e);
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let raw_input = self.egui_state.take_egui_input(&self.window);

        let inventory_view = &self.view;
        let inventory = &self.inventory;
        let atlas = &self.atlas;
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            egui::CentralPanel::default()
                .frame(egui::Frame::none().fill(BACKGROUND_COLOR))
                .show(ctx, |ui| {
                    inventory_view.paint(ui.painter(), inventory, atlas, pointer);
                });
        });

        self.egui_state
            .handle_platform_output(&self.window, full_output.platform_output);

        let tris = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.surface_config.width, self.surface_config.height],
            pixels_per_point: self.window.scale_factor() as f32,
        };

        let mut encoder =
            self.wgpu_device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("Inventory Render Encoder"),
                });

        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer.update_texture(
                &self.wgpu_device,
                &self.wgpu_queue,
                *id,
                image_delta,
            );
        }

        self.egui_renderer.update_buffers(
            &self.wgpu_device,
            &self.wgpu_queue,
            &mut encoder,
            &tris,
            &screen_descriptor,
        );

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Inventory Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.39,
                            g: 0.58,
                            b: 0.93,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            self.egui_renderer
                .render(&mut render_pass, &tris, &screen_descriptor);
        }

        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }

        self.wgpu_queue.submit(std::iter::once(encoder.finish()));
        output.present();
    }
}
