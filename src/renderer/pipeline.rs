//! WebGPU render pipeline setup

use glam::Vec2;

use super::DrawSink;
use super::shapes::{self, CIRCLE_SEGMENTS};
use super::vertex::Vertex;

/// Per-frame triangle list in screen pixels
#[derive(Debug, Default, Clone)]
pub struct VertexBatch {
    vertices: Vec<Vertex>,
}

impl VertexBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

impl DrawSink for VertexBatch {
    fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: [f32; 4]) {
        self.vertices.extend(shapes::rect(pos, size, color));
    }

    fn line(&mut self, a: Vec2, b: Vec2, width: f32, color: [f32; 4]) {
        self.vertices.extend(shapes::line(a, b, width, color));
    }

    fn circle(&mut self, center: Vec2, radius: f32, width: f32, color: [f32; 4]) {
        let half = width / 2.0;
        self.vertices.extend(shapes::ring(
            center,
            (radius - half).max(0.0),
            radius + half,
            color,
            CIRCLE_SEGMENTS,
        ));
    }
}

/// Screen pixels (origin top-left, y down) to normalized device coordinates
#[inline]
pub fn pixel_to_ndc(p: [f32; 2], screen: Vec2) -> [f32; 2] {
    [p[0] / screen.x * 2.0 - 1.0, 1.0 - p[1] / screen.y * 2.0]
}

/// Vertex capacity of the first buffer; grows by doubling
const INITIAL_VERTEX_CAPACITY: usize = 4096;

/// Main render state
pub struct RenderState {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    /// Vertices the current buffer can hold
    vertex_capacity: usize,
    /// Backing size in physical pixels
    pub size: (u32, u32),
    /// NDC staging, reused across frames
    staging: Vec<Vertex>,
}

impl RenderState {
    pub async fn new(
        surface: wgpu::Surface<'static>,
        adapter: &wgpu::Adapter,
        width: u32,
        height: u32,
    ) -> Result<Self, wgpu::RequestDeviceError> {
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("block-sandbox-device"),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
                ..Default::default()
            })
            .await?;

        let caps = surface.get_capabilities(adapter);
        log::info!("Surface formats: {:?}", caps.formats);

        // Colors are sRGB hex values; write them through unconverted
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .unwrap_or(caps.formats[0]);
        log::info!("Using surface format: {:?}", format);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let pipeline = create_pipeline(&device, format);
        let vertex_buffer = create_vertex_buffer(&device, INITIAL_VERTEX_CAPACITY);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            vertex_buffer,
            vertex_capacity: INITIAL_VERTEX_CAPACITY,
            size: (width, height),
            staging: Vec::with_capacity(INITIAL_VERTEX_CAPACITY),
        })
    }

    pub fn resize(&mut self, new_width: u32, new_height: u32) {
        if new_width > 0 && new_height > 0 {
            self.size = (new_width, new_height);
            self.config.width = new_width;
            self.config.height = new_height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Copy the batch into the vertex buffer as NDC, growing it if needed
    fn upload(&mut self, batch: &VertexBatch, screen: Vec2) -> u32 {
        self.staging.clear();
        self.staging.extend(batch.vertices().iter().map(|v| Vertex {
            position: pixel_to_ndc(v.position, screen),
            color: v.color,
        }));

        if self.staging.len() > self.vertex_capacity {
            self.vertex_capacity = self.staging.len().next_power_of_two();
            self.vertex_buffer = create_vertex_buffer(&self.device, self.vertex_capacity);
            log::debug!("Vertex buffer grown to {} vertices", self.vertex_capacity);
        }
        if !self.staging.is_empty() {
            self.queue
                .write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(&self.staging));
        }
        self.staging.len() as u32
    }

    /// Upload the batch and render it over `clear`.
    ///
    /// `screen` is the logical size the batch was laid out in, which may
    /// differ from the backing size on high-DPI displays.
    pub fn render(
        &mut self,
        batch: &VertexBatch,
        screen: Vec2,
        clear: [f32; 4],
    ) -> Result<(), wgpu::SurfaceError> {
        let vertex_count = self.upload(batch, screen);

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame_encoder"),
            });

        {
            let [r, g, b, a] = clear.map(f64::from);
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("world_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                ..Default::default()
            });

            if vertex_count > 0 {
                pass.set_pipeline(&self.pipeline);
                pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
                pass.draw(0..vertex_count, 0..1);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

fn create_vertex_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("vertex_buffer"),
        size: (capacity * std::mem::size_of::<Vertex>()) as wgpu::BufferAddress,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

/// Flat-colored, alpha-blended triangle list pipeline
fn create_pipeline(device: &wgpu::Device, format: wgpu::TextureFormat) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("flat_shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
    });

    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("flat_layout"),
        bind_group_layouts: &[],
        immediate_size: 0,
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("flat_pipeline"),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[Vertex::desc()],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        // Triangle list, no culling
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_to_ndc_corners() {
        let screen = Vec2::new(800.0, 600.0);
        assert_eq!(pixel_to_ndc([0.0, 0.0], screen), [-1.0, 1.0]);
        assert_eq!(pixel_to_ndc([800.0, 600.0], screen), [1.0, -1.0]);
        assert_eq!(pixel_to_ndc([400.0, 300.0], screen), [0.0, 0.0]);
    }

    #[test]
    fn test_batch_tessellates_commands() {
        let mut batch = VertexBatch::new();
        batch.fill_rect(Vec2::ZERO, Vec2::splat(32.0), [1.0; 4]);
        batch.line(Vec2::ZERO, Vec2::new(0.0, 10.0), 3.0, [1.0; 4]);
        batch.circle(Vec2::new(50.0, 50.0), 8.0, 3.0, [1.0; 4]);
        assert_eq!(batch.len(), 6 + 6 + CIRCLE_SEGMENTS as usize * 6);
        batch.clear();
        assert!(batch.is_empty());
    }
}
