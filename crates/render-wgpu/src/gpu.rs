use crate::error::RenderError;
use crate::shaders;
use bytemuck::{Pod, Zeroable};
use drillscene_scene::mesh::{self, ColoredVertex, DEFAULT_SPHERE_SEGMENTS, Vertex};
use drillscene_scene::palette::{DRILL_AMBIENT, SPHERE_AMBIENT};
use drillscene_scene::{GeometryError, PolygonMode, SceneFrame, normal_matrix};
use glam::{Mat4, Vec3};
use wgpu::util::DeviceExt;

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub(crate) struct SceneUniforms {
    view_proj: [[f32; 4]; 4],
    light_pos: [f32; 4],
    light_color: [f32; 4],
    view_pos: [f32; 4],
}

impl SceneUniforms {
    pub(crate) fn from_frame(frame: &SceneFrame) -> Self {
        Self {
            view_proj: frame.view_projection().to_cols_array_2d(),
            light_pos: frame.light.position.extend(1.0).to_array(),
            light_color: frame.light.color.extend(1.0).to_array(),
            view_pos: frame.view_pos.extend(1.0).to_array(),
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub(crate) struct ItemUniforms {
    model: [[f32; 4]; 4],
    normal_matrix: [[f32; 4]; 4],
    color: [f32; 4],
    /// x = ambient strength
    material: [f32; 4],
}

impl ItemUniforms {
    pub(crate) fn new(model: Mat4, color: Vec3, ambient: f32) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            normal_matrix: normal_matrix(model).to_cols_array_2d(),
            color: color.extend(1.0).to_array(),
            material: [ambient, 0.0, 0.0, 0.0],
        }
    }

    fn sphere(frame: &SceneFrame) -> Self {
        Self::new(frame.object_transform, frame.sphere_color, SPHERE_AMBIENT)
    }

    // Drill colour comes from its vertices.
    fn drill(frame: &SceneFrame) -> Self {
        Self::new(frame.object_transform, Vec3::ONE, DRILL_AMBIENT)
    }

    fn lamp(frame: &SceneFrame) -> Self {
        Self::new(frame.lamp_model, frame.light.color, 0.0)
    }
}

/// Uniform buffer + bind group for one drawable.
struct ItemBinding {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl ItemBinding {
    fn new(device: &wgpu::Device, layout: &wgpu::BindGroupLayout, label: &str) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::bytes_of(&ItemUniforms::new(Mat4::IDENTITY, Vec3::ONE, 0.0)),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });
        Self { buffer, bind_group }
    }

    fn write(&self, queue: &wgpu::Queue, uniforms: &ItemUniforms) {
        queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(uniforms));
    }
}

/// One pipeline per drawable for a given rasterization mode.
struct PipelineSet {
    sphere: wgpu::RenderPipeline,
    drill: wgpu::RenderPipeline,
    lamp: wgpu::RenderPipeline,
}

struct PipelineInputs<'a> {
    layout: &'a wgpu::PipelineLayout,
    lit_shader: &'a wgpu::ShaderModule,
    lamp_shader: &'a wgpu::ShaderModule,
    surface_format: wgpu::TextureFormat,
}

impl PipelineSet {
    fn new(device: &wgpu::Device, inputs: &PipelineInputs<'_>, mode: wgpu::PolygonMode) -> Self {
        let vertex_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &wgpu::vertex_attr_array![
                0 => Float32x3,
                1 => Float32x3,
            ],
        };
        let colored_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ColoredVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &wgpu::vertex_attr_array![
                0 => Float32x3,
                1 => Float32x3,
                2 => Float32x3,
            ],
        };
        let position_only = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &wgpu::vertex_attr_array![0 => Float32x3],
        };

        let suffix = match mode {
            wgpu::PolygonMode::Line => "line",
            _ => "fill",
        };

        // Sphere and drill triangles are not consistently wound; draw both sides.
        let sphere = create_pipeline(
            device,
            inputs,
            &format!("sphere_pipeline_{suffix}"),
            (inputs.lit_shader, "vs_sphere", "fs_lit"),
            vertex_layout,
            mode,
            None,
        );
        let drill = create_pipeline(
            device,
            inputs,
            &format!("drill_pipeline_{suffix}"),
            (inputs.lit_shader, "vs_drill", "fs_lit"),
            colored_layout,
            mode,
            None,
        );
        let lamp = create_pipeline(
            device,
            inputs,
            &format!("lamp_pipeline_{suffix}"),
            (inputs.lamp_shader, "vs_lamp", "fs_lamp"),
            position_only,
            mode,
            Some(wgpu::Face::Back),
        );

        Self {
            sphere,
            drill,
            lamp,
        }
    }
}

fn create_pipeline(
    device: &wgpu::Device,
    inputs: &PipelineInputs<'_>,
    label: &str,
    (module, vs_entry, fs_entry): (&wgpu::ShaderModule, &str, &str),
    vertex_layout: wgpu::VertexBufferLayout<'_>,
    polygon_mode: wgpu::PolygonMode,
    cull_mode: Option<wgpu::Face>,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(inputs.layout),
        vertex: wgpu::VertexState {
            module,
            entry_point: Some(vs_entry),
            compilation_options: Default::default(),
            buffers: &[vertex_layout],
        },
        fragment: Some(wgpu::FragmentState {
            module,
            entry_point: Some(fs_entry),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format: inputs.surface_format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            cull_mode,
            polygon_mode,
            ..Default::default()
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: Default::default(),
            bias: Default::default(),
        }),
        multisample: Default::default(),
        multiview: None,
        cache: None,
    })
}

/// wgpu renderer for the sphere, drill and lamp scene.
pub struct SceneRenderer {
    fill_pipelines: PipelineSet,
    line_pipelines: Option<PipelineSet>,
    scene_buffer: wgpu::Buffer,
    scene_bind_group: wgpu::BindGroup,
    sphere_item: ItemBinding,
    drill_item: ItemBinding,
    lamp_item: ItemBinding,
    sphere_vertex_buffer: wgpu::Buffer,
    sphere_index_buffer: wgpu::Buffer,
    sphere_index_count: u32,
    drill_vertex_buffer: wgpu::Buffer,
    drill_vertex_count: u32,
    lamp_vertex_buffer: wgpu::Buffer,
    lamp_index_buffer: wgpu::Buffer,
    lamp_index_count: u32,
    depth_texture: wgpu::TextureView,
}

impl SceneRenderer {
    /// Build pipelines and upload the static geometry.
    ///
    /// Line pipelines are only created when `wireframe_supported` is set, i.e.
    /// the device was created with `Features::POLYGON_MODE_LINE`.
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
        wireframe_supported: bool,
    ) -> Result<Self, GeometryError> {
        let scene_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("scene_uniform_buffer"),
            contents: bytemuck::bytes_of(&SceneUniforms::zeroed()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let uniform_entry = wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        };
        let scene_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_bind_group_layout"),
            entries: &[uniform_entry],
        });
        let item_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("item_bind_group_layout"),
            entries: &[uniform_entry],
        });

        let scene_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_bind_group"),
            layout: &scene_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: scene_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pipeline_layout"),
            bind_group_layouts: &[&scene_layout, &item_layout],
            push_constant_ranges: &[],
        });

        let lit_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("lit_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::LIT_SHADER.into()),
        });
        let lamp_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("lamp_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::LAMP_SHADER.into()),
        });

        let inputs = PipelineInputs {
            layout: &pipeline_layout,
            lit_shader: &lit_shader,
            lamp_shader: &lamp_shader,
            surface_format,
        };
        let fill_pipelines = PipelineSet::new(device, &inputs, wgpu::PolygonMode::Fill);
        let line_pipelines = wireframe_supported
            .then(|| PipelineSet::new(device, &inputs, wgpu::PolygonMode::Line));

        // Sphere mesh
        let sphere = mesh::sphere_mesh(DEFAULT_SPHERE_SEGMENTS, DEFAULT_SPHERE_SEGMENTS)?;
        let sphere_vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("sphere_vertex_buffer"),
            contents: bytemuck::cast_slice(&sphere.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let sphere_index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("sphere_index_buffer"),
            contents: bytemuck::cast_slice(&sphere.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let sphere_index_count = sphere.indices.len() as u32;

        // Drill mesh
        let drill = mesh::drill_mesh();
        let drill_vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("drill_vertex_buffer"),
            contents: bytemuck::cast_slice(&drill),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let drill_vertex_count = drill.len() as u32;

        // Lamp cube
        let lamp = mesh::lamp_cube_mesh();
        let lamp_vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("lamp_vertex_buffer"),
            contents: bytemuck::cast_slice(&lamp.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let lamp_index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("lamp_index_buffer"),
            contents: bytemuck::cast_slice(&lamp.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let lamp_index_count = lamp.indices.len() as u32;

        let depth_texture = Self::create_depth_texture(device, width, height);

        tracing::debug!(
            sphere_indices = sphere_index_count,
            drill_vertices = drill_vertex_count,
            wireframe_supported,
            "scene renderer ready"
        );

        Ok(Self {
            fill_pipelines,
            line_pipelines,
            scene_buffer,
            scene_bind_group,
            sphere_item: ItemBinding::new(device, &item_layout, "sphere_item"),
            drill_item: ItemBinding::new(device, &item_layout, "drill_item"),
            lamp_item: ItemBinding::new(device, &item_layout, "lamp_item"),
            sphere_vertex_buffer,
            sphere_index_buffer,
            sphere_index_count,
            drill_vertex_buffer,
            drill_vertex_count,
            lamp_vertex_buffer,
            lamp_index_buffer,
            lamp_index_count,
            depth_texture,
        })
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth_texture = Self::create_depth_texture(device, width, height);
    }

    /// Check that frames in `mode` can be drawn as requested.
    pub fn ensure_polygon_mode(&self, mode: PolygonMode) -> Result<(), RenderError> {
        match mode {
            PolygonMode::Fill => Ok(()),
            PolygonMode::Line if self.line_pipelines.is_some() => Ok(()),
            PolygonMode::Line => Err(RenderError::PolygonModeUnsupported(mode)),
        }
    }

    // Unsupported line mode falls back to fill.
    fn pipelines_for(&self, mode: PolygonMode) -> &PipelineSet {
        match mode {
            PolygonMode::Line => self.line_pipelines.as_ref().unwrap_or(&self.fill_pipelines),
            PolygonMode::Fill => &self.fill_pipelines,
        }
    }

    /// Render one frame: sphere, drill, then the lamp marker.
    pub fn render(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        view: &wgpu::TextureView,
        frame: &SceneFrame,
    ) {
        queue.write_buffer(
            &self.scene_buffer,
            0,
            bytemuck::bytes_of(&SceneUniforms::from_frame(frame)),
        );
        self.sphere_item.write(queue, &ItemUniforms::sphere(frame));
        self.drill_item.write(queue, &ItemUniforms::drill(frame));
        self.lamp_item.write(queue, &ItemUniforms::lamp(frame));

        let pipelines = self.pipelines_for(frame.polygon_mode);
        let clear = frame.clear_color;

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("render_encoder"),
        });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("main_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: clear.x as f64,
                            g: clear.y as f64,
                            b: clear.z as f64,
                            a: clear.w as f64,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            pass.set_bind_group(0, &self.scene_bind_group, &[]);

            // Sphere
            pass.set_pipeline(&pipelines.sphere);
            pass.set_bind_group(1, &self.sphere_item.bind_group, &[]);
            pass.set_vertex_buffer(0, self.sphere_vertex_buffer.slice(..));
            pass.set_index_buffer(
                self.sphere_index_buffer.slice(..),
                wgpu::IndexFormat::Uint32,
            );
            pass.draw_indexed(0..self.sphere_index_count, 0, 0..1);

            // Drill
            pass.set_pipeline(&pipelines.drill);
            pass.set_bind_group(1, &self.drill_item.bind_group, &[]);
            pass.set_vertex_buffer(0, self.drill_vertex_buffer.slice(..));
            pass.draw(0..self.drill_vertex_count, 0..1);

            // Lamp marker
            pass.set_pipeline(&pipelines.lamp);
            pass.set_bind_group(1, &self.lamp_item.bind_group, &[]);
            pass.set_vertex_buffer(0, self.lamp_vertex_buffer.slice(..));
            pass.set_index_buffer(self.lamp_index_buffer.slice(..), wgpu::IndexFormat::Uint16);
            pass.draw_indexed(0..self.lamp_index_count, 0, 0..1);
        }

        queue.submit(std::iter::once(encoder.finish()));
    }

    fn create_depth_texture(
        device: &wgpu::Device,
        width: u32,
        height: u32,
    ) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth_texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&Default::default())
    }
}
