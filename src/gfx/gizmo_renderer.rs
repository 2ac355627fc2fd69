//! # Gizmo Renderer
//!
//! Uploads pooled gizmo handles to the GPU and draws one frame of them.
//!
//! Six pipelines share the one unlit shader: three primitive topologies, each
//! in a depth-tested and an overlay variant. Overlay pipelines skip the depth
//! test so wire gizmos stay visible through solid geometry. All per-handle
//! GPU state lives on the handles themselves as lazily created resources, so
//! a steady-state frame is a handful of uniform updates and no allocation.

use wgpu::util::DeviceExt;

use crate::gfx::camera::CameraUniform;
use crate::gfx::geometry::Topology;
use crate::gfx::texture_resource::TextureResource;
use crate::gfx::vertex::GizmoVertex;
use crate::gizmos::handle::{HandleGpuResources, ModelUniform, Part, PartGpuResources};
use crate::gizmos::Gizmos;
use crate::wgpu_utils::UniformBuffer;

const PIPELINE_COUNT: usize = 6;

fn pipeline_index(topology: Topology, overlay: bool) -> usize {
    let base = match topology {
        Topology::LineList => 0,
        Topology::LineStrip => 1,
        Topology::TriangleList => 2,
    };
    base + if overlay { 3 } else { 0 }
}

/// Renders the handles attached to a [`Gizmos`] frame container.
pub struct GizmoRenderer {
    globals_ubo: UniformBuffer<CameraUniform>,
    globals_bind_group: wgpu::BindGroup,
    model_bind_group_layout: wgpu::BindGroupLayout,
    pipelines: [wgpu::RenderPipeline; PIPELINE_COUNT],
    // Reused across uploads so dirty geometry never allocates per frame.
    vertex_scratch: Vec<GizmoVertex>,
}

impl GizmoRenderer {
    pub fn new(device: &wgpu::Device, surface_format: wgpu::TextureFormat) -> Self {
        let globals_ubo = UniformBuffer::new_with_data(device, &CameraUniform::default());

        let globals_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Gizmo Globals Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let globals_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Gizmo Globals Bind Group"),
            layout: &globals_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_ubo.binding_resource(),
            }],
        });

        let model_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Gizmo Model Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Gizmo Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/gizmos.wgsl").into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Gizmo Pipeline Layout"),
            bind_group_layouts: &[&globals_bind_group_layout, &model_bind_group_layout],
            push_constant_ranges: &[],
        });

        let variants = [
            (Topology::LineList, false),
            (Topology::LineStrip, false),
            (Topology::TriangleList, false),
            (Topology::LineList, true),
            (Topology::LineStrip, true),
            (Topology::TriangleList, true),
        ];

        let pipelines = variants.map(|(topology, overlay)| {
            Self::create_pipeline(
                device,
                &pipeline_layout,
                &shader,
                surface_format,
                topology,
                overlay,
            )
        });

        Self {
            globals_ubo,
            globals_bind_group,
            model_bind_group_layout,
            pipelines,
            vertex_scratch: Vec::new(),
        }
    }

    fn create_pipeline(
        device: &wgpu::Device,
        layout: &wgpu::PipelineLayout,
        shader: &wgpu::ShaderModule,
        surface_format: wgpu::TextureFormat,
        topology: Topology,
        overlay: bool,
    ) -> wgpu::RenderPipeline {
        let wgpu_topology = match topology {
            Topology::LineList => wgpu::PrimitiveTopology::LineList,
            Topology::LineStrip => wgpu::PrimitiveTopology::LineStrip,
            Topology::TriangleList => wgpu::PrimitiveTopology::TriangleList,
        };

        // Overlay variants draw regardless of depth and leave the depth
        // buffer untouched.
        let (depth_compare, depth_write_enabled) = if overlay {
            (wgpu::CompareFunction::Always, false)
        } else {
            (wgpu::CompareFunction::Less, true)
        };

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(&format!(
                "Gizmo Pipeline {:?}{}",
                topology,
                if overlay { " Overlay" } else { "" }
            )),
            layout: Some(layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some("vs_main"),
                buffers: &[GizmoVertex::desc()],
                compilation_options: Default::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu_topology,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
                unclipped_depth: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: TextureResource::DEPTH_FORMAT,
                depth_write_enabled,
                depth_compare,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            multiview: None,
            cache: None,
        })
    }

    /// Uploads the camera uniform shared by all gizmo pipelines.
    pub fn update_camera(&mut self, queue: &wgpu::Queue, uniform: CameraUniform) {
        self.globals_ubo.update_content(queue, uniform);
    }

    /// Creates or refreshes GPU resources for every handle attached to the
    /// current frame. Must run after the draw callback and before `draw()`.
    pub fn prepare(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, gizmos: &mut Gizmos) {
        for i in 0..gizmos.frame_len() {
            let Some(attachment) = gizmos.attachment(i) else {
                break;
            };
            let handle = gizmos.handle_mut(attachment);

            let model = ModelUniform {
                model: handle.matrix().into(),
            };

            match handle.gpu.as_mut() {
                Some(gpu) => gpu.transform_buffer.update_content(queue, model),
                None => {
                    let transform_buffer = UniformBuffer::new_with_data(device, &model);
                    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                        label: Some("Gizmo Model Bind Group"),
                        layout: &self.model_bind_group_layout,
                        entries: &[wgpu::BindGroupEntry {
                            binding: 0,
                            resource: transform_buffer.binding_resource(),
                        }],
                    });
                    handle.gpu = Some(HandleGpuResources {
                        transform_buffer,
                        bind_group,
                    });
                }
            }

            let material_color = handle.material_color;
            for part in &mut handle.parts {
                Self::prepare_part(device, queue, part, material_color, &mut self.vertex_scratch);
            }
        }
    }

    fn prepare_part(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        part: &mut Part,
        material_color: crate::gizmos::Color,
        scratch: &mut Vec<GizmoVertex>,
    ) {
        let needs_upload = part.gpu.is_none() || part.geometry.is_dirty();
        if !needs_upload {
            return;
        }

        scratch.clear();
        let geometry = &part.geometry;
        let flat = material_color.to_array();
        for (i, position) in geometry.positions.iter().enumerate() {
            let color = if geometry.has_color_buffer() {
                geometry.colors[i]
            } else {
                flat
            };
            scratch.push(GizmoVertex {
                position: *position,
                color,
            });
        }

        match part.gpu.as_ref() {
            Some(gpu) => {
                // Geometry buffers never resize after creation, so an
                // in-place write is always valid.
                queue.write_buffer(&gpu.vertex_buffer, 0, bytemuck::cast_slice(scratch));
            }
            None => {
                let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("Gizmo Vertex Buffer"),
                    contents: bytemuck::cast_slice(scratch),
                    usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                });

                // Indices are immutable after pool construction.
                let index_buffer = if geometry.indices.is_empty() {
                    None
                } else {
                    Some(
                        device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                            label: Some("Gizmo Index Buffer"),
                            contents: bytemuck::cast_slice(&geometry.indices),
                            usage: wgpu::BufferUsages::INDEX,
                        }),
                    )
                };

                part.gpu = Some(PartGpuResources {
                    vertex_buffer,
                    index_buffer,
                    vertex_count: geometry.vertex_count() as u32,
                    index_count: geometry.indices.len() as u32,
                });
            }
        }

        part.geometry.mark_clean();
    }

    /// Records draw calls for the current frame, batched by pipeline to keep
    /// state changes down.
    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>, gizmos: &Gizmos) {
        if gizmos.frame_len() == 0 {
            return;
        }

        render_pass.set_bind_group(0, &self.globals_bind_group, &[]);

        for index in 0..PIPELINE_COUNT {
            let mut pipeline_bound = false;

            for i in 0..gizmos.frame_len() {
                let Some(attachment) = gizmos.attachment(i) else {
                    break;
                };
                let handle = gizmos.handle(attachment);
                if !handle
                    .parts
                    .iter()
                    .any(|p| pipeline_index(p.topology, p.overlay) == index)
                {
                    continue;
                }

                let Some(handle_gpu) = handle.gpu.as_ref() else {
                    continue;
                };

                if !pipeline_bound {
                    render_pass.set_pipeline(&self.pipelines[index]);
                    pipeline_bound = true;
                }
                render_pass.set_bind_group(1, &handle_gpu.bind_group, &[]);

                for part in &handle.parts {
                    if pipeline_index(part.topology, part.overlay) != index {
                        continue;
                    }
                    Self::draw_part(render_pass, part);
                }
            }
        }
    }

    fn draw_part(render_pass: &mut wgpu::RenderPass<'_>, part: &Part) {
        let Some(gpu) = part.gpu.as_ref() else {
            return;
        };
        render_pass.set_vertex_buffer(0, gpu.vertex_buffer.slice(..));
        match gpu.index_buffer.as_ref() {
            Some(index_buffer) => {
                render_pass.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                render_pass.draw_indexed(0..gpu.index_count, 0, 0..1);
            }
            None => {
                render_pass.draw(0..gpu.vertex_count, 0..1);
            }
        }
    }
}
