use std::collections::HashMap;

use anyhow::{bail, Result};
use glam::Mat4;

use crate::batch::{BlendFunc, FilterMode, TextureId, Vertex};
use crate::coords::Color;
use crate::shader::{self, Globals, ShaderOptions, MAX_EFFECT_UNIFORMS};

use super::{
    Backend, GraphicsError, GraphicsErrorKind, TextureImage, UniformLocation, UniformValue,
};

/// Error scopes kept open between polls, outermost first.
const POLLED_FILTERS: [wgpu::ErrorFilter; 2] =
    [wgpu::ErrorFilter::OutOfMemory, wgpu::ErrorFilter::Validation];

struct TextureEntry {
    texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
}

/// [`Backend`] on top of a wgpu device.
///
/// Every draw and clear is recorded into its own command encoder and submitted
/// immediately, so uniform writes staged between two submissions apply only to
/// the later one. Blend state is baked into pipelines; one pipeline is built
/// per distinct [`BlendFunc`] and cached.
///
/// Draws target the view set with [`set_target`](Self::set_target), typically
/// the current surface texture.
///
/// Graphics errors are collected with one `OutOfMemory` and one `Validation`
/// error scope, popped and pushed again on every poll. A wgpu scope keeps only
/// the first error raised inside it, so each poll sees at most one error per
/// category: the oldest of that interval. Later errors of the same category
/// before the next poll are lost. Poll once per frame to keep intervals short.
pub struct WgpuBackend {
    device: wgpu::Device,
    queue: wgpu::Queue,
    format: wgpu::TextureFormat,

    shader: wgpu::ShaderModule,
    pipeline_layout: wgpu::PipelineLayout,
    pipelines: HashMap<BlendFunc, wgpu::RenderPipeline>,
    blend: BlendFunc,

    globals: Globals,
    globals_ubo: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,

    texture_bgl: wgpu::BindGroupLayout,
    nearest_sampler: wgpu::Sampler,
    linear_sampler: wgpu::Sampler,
    white: TextureEntry,
    textures: HashMap<TextureId, TextureEntry>,
    bound: Option<TextureId>,
    next_texture: u32,

    vertex_vbo: wgpu::Buffer,
    vertex_capacity: usize,

    target: Option<wgpu::TextureView>,
    warned_no_target: bool,

    uniforms: HashMap<String, UniformLocation>,
    errors: Vec<GraphicsError>,
    scopes_open: bool,
}

impl WgpuBackend {
    /// Compiles the batching shader (with the user effect) for `format` targets.
    ///
    /// Fails if the effect does not compile or the uniform declarations are invalid.
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        format: wgpu::TextureFormat,
        options: &ShaderOptions,
    ) -> Result<Self> {
        let source = shader::compose(options)?;
        let uniforms = shader::uniform_table(options)?;

        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("sequel batch shader"),
            source: wgpu::ShaderSource::Wgsl(source.into()),
        });
        if let Some(err) = pollster::block_on(device.pop_error_scope()) {
            bail!("batch shader failed to compile: {err}");
        }

        let globals_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("sequel globals bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(std::mem::size_of::<Globals>() as u64),
                },
                count: None,
            }],
        });

        let texture_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("sequel texture bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("sequel pipeline layout"),
            bind_group_layouts: &[&globals_bgl, &texture_bgl],
            push_constant_ranges: &[],
        });

        let globals = Globals::default();
        let globals_ubo = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("sequel globals ubo"),
            size: std::mem::size_of::<Globals>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        queue.write_buffer(&globals_ubo, 0, bytemuck::bytes_of(&globals));

        let globals_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("sequel globals bind group"),
            layout: &globals_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_ubo.as_entire_binding(),
            }],
        });

        let nearest_sampler = create_sampler(device, FilterMode::Nearest);
        let linear_sampler = create_sampler(device, FilterMode::Linear);

        let white = upload_texture(
            device,
            queue,
            &texture_bgl,
            &nearest_sampler,
            TextureImage {
                pixels: &[255; 4],
                width: 1,
                height: 1,
                filter: FilterMode::Nearest,
            },
            "sequel white texture",
        );

        let vertex_vbo = create_vertex_buffer(device, 0);

        for filter in POLLED_FILTERS {
            device.push_error_scope(filter);
        }

        log::debug!(
            "wgpu batch backend ready (format {format:?}, {} user uniforms)",
            uniforms.len()
        );

        Ok(Self {
            device: device.clone(),
            queue: queue.clone(),
            format,
            shader,
            pipeline_layout,
            pipelines: HashMap::new(),
            blend: BlendFunc::default(),
            globals,
            globals_ubo,
            globals_bind_group,
            texture_bgl,
            nearest_sampler,
            linear_sampler,
            white,
            textures: HashMap::new(),
            bound: None,
            next_texture: 0,
            vertex_vbo,
            vertex_capacity: 0,
            target: None,
            warned_no_target: false,
            uniforms,
            errors: Vec::new(),
            scopes_open: true,
        })
    }

    /// Sets the view that draws and clears render into.
    pub fn set_target(&mut self, view: wgpu::TextureView) {
        self.target = Some(view);
        self.warned_no_target = false;
    }

    /// Detaches the current target, e.g. before presenting the surface texture.
    pub fn take_target(&mut self) -> Option<wgpu::TextureView> {
        self.target.take()
    }

    pub fn format(&self) -> wgpu::TextureFormat {
        self.format
    }

    fn ensure_pipeline(&mut self, blend: BlendFunc) {
        if self.pipelines.contains_key(&blend) {
            return;
        }

        let pipeline = self.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("sequel batch pipeline"),
            layout: Some(&self.pipeline_layout),
            vertex: wgpu::VertexState {
                module: &self.shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::layout()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &self.shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: self.format,
                    blend: Some(blend.to_wgpu()),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        log::debug!("built batch pipeline for {blend:?}");
        self.pipelines.insert(blend, pipeline);
    }

    fn target_or_warn(&mut self, what: &str) -> Option<wgpu::TextureView> {
        if self.target.is_none() && !self.warned_no_target {
            log::warn!("{what} without a target view; call WgpuBackend::set_target first");
            self.warned_no_target = true;
        }
        self.target.clone()
    }

    fn collect_scoped_errors(&mut self) {
        if !self.scopes_open {
            return;
        }
        // Inner scopes pop first; re-push in the original order.
        for filter in POLLED_FILTERS.iter().rev() {
            if let Some(err) = pollster::block_on(self.device.pop_error_scope()) {
                let error = map_error(*filter, err);
                log::debug!("graphics error captured: {error}");
                self.errors.push(error);
            }
        }
        for filter in POLLED_FILTERS {
            self.device.push_error_scope(filter);
        }
    }
}

impl Backend for WgpuBackend {
    fn resize_vertex_buffer(&mut self, capacity: usize) {
        if capacity == self.vertex_capacity {
            return;
        }
        self.vertex_vbo = create_vertex_buffer(&self.device, capacity);
        self.vertex_capacity = capacity;
        log::debug!("vertex buffer mirror resized to {capacity} vertices");
    }

    fn draw(&mut self, vertices: &[Vertex]) -> bool {
        if vertices.is_empty() {
            return false;
        }
        let Some(view) = self.target_or_warn("draw") else { return false };

        if vertices.len() > self.vertex_capacity {
            log::warn!(
                "draw of {} vertices exceeds mirror capacity {}; resizing",
                vertices.len(),
                self.vertex_capacity
            );
            self.resize_vertex_buffer(vertices.len());
        }

        let blend = self.blend;
        self.ensure_pipeline(blend);

        self.queue.write_buffer(&self.vertex_vbo, 0, bytemuck::cast_slice(vertices));
        self.queue.write_buffer(&self.globals_ubo, 0, bytemuck::bytes_of(&self.globals));

        let Some(pipeline) = self.pipelines.get(&blend) else { return false };
        let texture_bind_group = self
            .bound
            .and_then(|id| self.textures.get(&id))
            .map_or(&self.white.bind_group, |t| &t.bind_group);
        let byte_len = std::mem::size_of_val(vertices) as u64;

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("sequel flush encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("sequel flush pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            rpass.set_pipeline(pipeline);
            rpass.set_bind_group(0, &self.globals_bind_group, &[]);
            rpass.set_bind_group(1, texture_bind_group, &[]);
            rpass.set_vertex_buffer(0, self.vertex_vbo.slice(..byte_len));
            rpass.draw(0..vertices.len() as u32, 0..1);
        }
        self.queue.submit(std::iter::once(encoder.finish()));
        true
    }

    fn set_color(&mut self, color: Color) {
        self.globals.color = color.to_array();
    }

    fn set_transform(&mut self, matrix: Mat4) {
        self.globals.transform = matrix.to_cols_array_2d();
    }

    fn bind_texture(&mut self, texture: Option<TextureId>) {
        let texture = match texture {
            Some(id) if !self.textures.contains_key(&id) => {
                log::warn!("bind of unknown texture {}; sampling disabled", id.get());
                None
            }
            other => other,
        };
        self.bound = texture;
        self.globals.flags[0] = u32::from(texture.is_some());
    }

    fn set_blend(&mut self, blend: BlendFunc) {
        self.blend = blend;
        self.ensure_pipeline(blend);
    }

    fn clear(&mut self, color: Color) {
        let Some(view) = self.target_or_warn("clear") else { return };

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("sequel clear encoder"),
            });
        {
            let _rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("sequel clear"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(color.into()),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
        }
        self.queue.submit(std::iter::once(encoder.finish()));
    }

    fn create_texture(&mut self, image: TextureImage<'_>) -> TextureId {
        self.next_texture += 1;
        let Some(id) = TextureId::new(self.next_texture) else {
            unreachable!("texture counter starts at 1");
        };

        let sampler = match image.filter {
            FilterMode::Nearest => &self.nearest_sampler,
            FilterMode::Linear => &self.linear_sampler,
        };
        let entry = upload_texture(
            &self.device,
            &self.queue,
            &self.texture_bgl,
            sampler,
            image,
            "sequel texture",
        );
        self.textures.insert(id, entry);
        log::debug!("created texture {} ({}x{})", id.get(), image.width, image.height);
        id
    }

    fn free_texture(&mut self, texture: TextureId) -> bool {
        let Some(entry) = self.textures.remove(&texture) else {
            return false;
        };
        entry.texture.destroy();
        if self.bound == Some(texture) {
            self.bound = None;
            self.globals.flags[0] = 0;
        }
        true
    }

    fn uniform_location(&self, name: &str) -> Option<UniformLocation> {
        self.uniforms.get(name).copied()
    }

    fn set_uniform(&mut self, location: UniformLocation, value: UniformValue) {
        let Some(slot) = self.globals.params.get_mut(location.0 as usize) else {
            log::warn!(
                "uniform slot {} out of range (max {MAX_EFFECT_UNIFORMS})",
                location.0
            );
            return;
        };
        *slot = match value {
            UniformValue::Float(v) => [v, 0.0, 0.0, 0.0],
            UniformValue::Vec4(v) => v,
            UniformValue::Int(v) => [v as f32, 0.0, 0.0, 0.0],
        };
    }

    fn poll_error(&mut self, drain: bool) -> Option<GraphicsError> {
        self.collect_scoped_errors();
        let latest = self.errors.pop();
        if drain {
            self.errors.clear();
        }
        latest
    }

    fn release(&mut self) {
        for (_, entry) in self.textures.drain() {
            entry.texture.destroy();
        }
        self.bound = None;
        self.pipelines.clear();
        self.vertex_vbo.destroy();
        self.vertex_capacity = 0;
        self.target = None;

        if self.scopes_open {
            for _ in POLLED_FILTERS {
                if let Some(err) = pollster::block_on(self.device.pop_error_scope()) {
                    log::warn!("graphics error pending at teardown: {err}");
                }
            }
            self.scopes_open = false;
        }
        log::debug!("wgpu batch backend released");
    }
}

fn create_vertex_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
    // Zero-sized vertex buffers are valid but cannot be sliced; keep one vertex.
    let size = (capacity.max(1) * std::mem::size_of::<Vertex>()) as u64;
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("sequel vertex vbo"),
        size,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn create_sampler(device: &wgpu::Device, filter: FilterMode) -> wgpu::Sampler {
    device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("sequel sampler"),
        address_mode_u: wgpu::AddressMode::ClampToEdge,
        address_mode_v: wgpu::AddressMode::ClampToEdge,
        address_mode_w: wgpu::AddressMode::ClampToEdge,
        mag_filter: filter.into(),
        min_filter: filter.into(),
        ..Default::default()
    })
}

fn upload_texture(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    layout: &wgpu::BindGroupLayout,
    sampler: &wgpu::Sampler,
    image: TextureImage<'_>,
    label: &str,
) -> TextureEntry {
    let size = wgpu::Extent3d {
        width: image.width,
        height: image.height,
        depth_or_array_layers: 1,
    };
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8Unorm,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });

    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        image.pixels,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(4 * image.width),
            rows_per_image: Some(image.height),
        },
        size,
    );

    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(label),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    });

    TextureEntry {
        texture,
        bind_group,
    }
}

fn map_error(filter: wgpu::ErrorFilter, err: wgpu::Error) -> GraphicsError {
    let kind = match (filter, &err) {
        (_, wgpu::Error::OutOfMemory { .. }) => GraphicsErrorKind::OutOfMemory,
        (_, wgpu::Error::Validation { .. }) => GraphicsErrorKind::Validation,
        (wgpu::ErrorFilter::OutOfMemory, _) => GraphicsErrorKind::OutOfMemory,
        _ => GraphicsErrorKind::Internal,
    };
    GraphicsError::new(kind, err.to_string())
}
