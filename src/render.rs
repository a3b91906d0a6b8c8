use eventtimes_core::constants::{FIELD_CAMERA_Z, FIELD_FOV_DEG, GOLD_RGB};
use eventtimes_core::particles::ParticleField;
use glam::{Mat4, Vec3};
use web_sys as web;

mod particles;
use particles::{create_field_resources, pack_instances, DiscInstance, FieldResources, FieldUniforms};

const NEAR: f32 = 0.1;
const FAR: f32 = 1000.0;

/// WebGPU state for the transparent particle layer.
pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    field: FieldResources,
    instances: Vec<DiscInstance>,
    width: u32,
    height: u32,
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement, capacity: usize) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::MemoryUsage,
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
                    wgpu::TextureFormat::Bgra8Unorm | wgpu::TextureFormat::Rgba8Unorm
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        // The page must show through everywhere the field is empty.
        let alpha_mode = caps
            .alpha_modes
            .iter()
            .copied()
            .find(|m| *m == wgpu::CompositeAlphaMode::PreMultiplied)
            .or_else(|| caps.alpha_modes.first().copied())
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
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

        let field = create_field_resources(&device, format, capacity);
        log::info!(
            "[render] particle layer {}x{} {:?} alpha={:?}",
            width,
            height,
            format,
            alpha_mode
        );
        Ok(Self {
            surface,
            device,
            queue,
            config,
            field,
            instances: Vec::with_capacity(capacity),
            width,
            height,
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    fn uniforms(&self) -> FieldUniforms {
        let aspect = self.width as f32 / self.height.max(1) as f32;
        let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, FIELD_CAMERA_Z), Vec3::ZERO, Vec3::Y);
        let proj = Mat4::perspective_rh(FIELD_FOV_DEG.to_radians(), aspect, NEAR, FAR);
        FieldUniforms {
            view: view.to_cols_array_2d(),
            proj: proj.to_cols_array_2d(),
            color: [GOLD_RGB[0], GOLD_RGB[1], GOLD_RGB[2], 1.0],
        }
    }

    pub fn render(&mut self, field: &ParticleField) -> Result<(), wgpu::SurfaceError> {
        pack_instances(field, &mut self.instances);
        let count = self.instances.len().min(self.field.capacity);
        self.queue.write_buffer(
            &self.field.instance_buffer,
            0,
            bytemuck::cast_slice(&self.instances[..count]),
        );
        let u = self.uniforms();
        self.queue
            .write_buffer(&self.field.uniform_buffer, 0, bytemuck::bytes_of(&u));

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("particles_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.field.pipeline);
            rpass.set_bind_group(0, &self.field.bind_group, &[]);
            rpass.set_vertex_buffer(0, self.field.instance_buffer.slice(..));
            rpass.draw(0..6, 0..count as u32);
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
