use super::helpers::{self, ScenePipelineDesc};
use crate::assets::MeshData;
use crate::constants::HDR_FORMAT;
use crate::core::{FrameView, MeshHandle, SunState, TerrainGrid, TerrainVertex};
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct SceneUniforms {
    view_proj: [[f32; 4]; 4],
    model: [[f32; 4]; 4],
    tint: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct SunUniforms {
    view_proj: [[f32; 4]; 4],
    model: [[f32; 4]; 4],
    color: [f32; 4],
    params: [f32; 4],
}

const NO_TINT: [f32; 4] = [0.0, 0.0, 0.0, 0.0];
const GRID_TINT: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

const VERTEX_ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

fn vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<TerrainVertex>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &VERTEX_ATTRS,
    }
}

struct UniformSlot {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl UniformSlot {
    fn new(device: &wgpu::Device, label: &str, layout: &wgpu::BindGroupLayout, size: usize) -> Self {
        let buffer = helpers::uniform_buffer(device, label, size);
        let bind_group = helpers::uniform_bind_group(device, label, layout, &buffer);
        Self { buffer, bind_group }
    }
}

pub(crate) struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

/// Pipelines and buffers for the HDR scene pass.
pub(crate) struct SceneResources {
    faces_pipeline: wgpu::RenderPipeline,
    grid_pipeline: wgpu::RenderPipeline,
    vehicle_pipeline: wgpu::RenderPipeline,
    sun_pipeline: wgpu::RenderPipeline,
    faces: UniformSlot,
    grid: UniformSlot,
    vehicle: UniformSlot,
    sun: UniformSlot,
    terrain_vertices: wgpu::Buffer,
    triangle_indices: wgpu::Buffer,
    triangle_count: u32,
    line_indices: wgpu::Buffer,
    line_count: u32,
    meshes: Vec<GpuMesh>,
}

impl SceneResources {
    pub(crate) fn new(device: &wgpu::Device, terrain: &TerrainGrid) -> Self {
        let scene_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::core::SCENE_WGSL.into()),
        });
        let sun_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("sun_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::core::SUN_WGSL.into()),
        });
        let stages = wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT;
        let scene_layout = helpers::uniform_layout(device, "scene_bgl", stages);
        let sun_layout = helpers::uniform_layout(device, "sun_bgl", stages);
        let scene_pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pl_scene"),
            bind_group_layouts: &[&scene_layout],
            push_constant_ranges: &[],
        });
        let sun_pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pl_sun"),
            bind_group_layouts: &[&sun_layout],
            push_constant_ranges: &[],
        });

        let buffers = [vertex_layout()];
        let faces_pipeline = helpers::make_scene_pipeline(
            device,
            ScenePipelineDesc {
                label: "terrain_faces",
                layout: &scene_pl,
                shader: &scene_shader,
                buffers: &buffers,
                topology: wgpu::PrimitiveTopology::TriangleList,
                // push faces back so the grid lines win the depth test
                depth_bias: wgpu::DepthBiasState {
                    constant: 2,
                    slope_scale: 2.0,
                    clamp: 0.0,
                },
                color_format: HDR_FORMAT,
            },
        );
        let grid_pipeline = helpers::make_scene_pipeline(
            device,
            ScenePipelineDesc {
                label: "terrain_grid",
                layout: &scene_pl,
                shader: &scene_shader,
                buffers: &buffers,
                topology: wgpu::PrimitiveTopology::LineList,
                depth_bias: wgpu::DepthBiasState::default(),
                color_format: HDR_FORMAT,
            },
        );
        let vehicle_pipeline = helpers::make_scene_pipeline(
            device,
            ScenePipelineDesc {
                label: "vehicle",
                layout: &scene_pl,
                shader: &scene_shader,
                buffers: &buffers,
                topology: wgpu::PrimitiveTopology::TriangleList,
                depth_bias: wgpu::DepthBiasState::default(),
                color_format: HDR_FORMAT,
            },
        );
        let sun_pipeline = helpers::make_scene_pipeline(
            device,
            ScenePipelineDesc {
                label: "sun",
                layout: &sun_pl,
                shader: &sun_shader,
                buffers: &[],
                topology: wgpu::PrimitiveTopology::TriangleList,
                depth_bias: wgpu::DepthBiasState::default(),
                color_format: HDR_FORMAT,
            },
        );

        let scene_size = std::mem::size_of::<SceneUniforms>();
        let faces = UniformSlot::new(device, "faces_uniforms", &scene_layout, scene_size);
        let grid = UniformSlot::new(device, "grid_uniforms", &scene_layout, scene_size);
        let vehicle = UniformSlot::new(device, "vehicle_uniforms", &scene_layout, scene_size);
        let sun = UniformSlot::new(device, "sun_uniforms", &sun_layout, std::mem::size_of::<SunUniforms>());

        let terrain_vertices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("terrain_vertices"),
            contents: bytemuck::cast_slice(terrain.vertices()),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });
        let triangle_indices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("terrain_triangles"),
            contents: bytemuck::cast_slice(terrain.triangle_indices()),
            usage: wgpu::BufferUsages::INDEX,
        });
        let line_indices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("terrain_lines"),
            contents: bytemuck::cast_slice(terrain.line_indices()),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            faces_pipeline,
            grid_pipeline,
            vehicle_pipeline,
            sun_pipeline,
            faces,
            grid,
            vehicle,
            sun,
            terrain_vertices,
            triangle_indices,
            triangle_count: terrain.triangle_indices().len() as u32,
            line_indices,
            line_count: terrain.line_indices().len() as u32,
            meshes: Vec::new(),
        }
    }

    pub(crate) fn upload_mesh(&mut self, device: &wgpu::Device, mesh: &MeshData) -> MeshHandle {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("vehicle_vertices"),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("vehicle_indices"),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let handle = MeshHandle(self.meshes.len() as u32);
        self.meshes.push(GpuMesh {
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
        });
        handle
    }

    /// Push this frame's vertices and per-draw uniforms.
    pub(crate) fn write(&self, queue: &wgpu::Queue, view: &FrameView<'_>) {
        let view_proj = view.camera.view_proj().to_cols_array_2d();
        let terrain_model = view.terrain_model.to_cols_array_2d();
        queue.write_buffer(&self.terrain_vertices, 0, bytemuck::cast_slice(view.vertices));
        let faces = SceneUniforms {
            view_proj,
            model: terrain_model,
            tint: NO_TINT,
        };
        // black lines over faces; on their own they keep the height colors
        let grid = SceneUniforms {
            tint: if view.layers.faces { GRID_TINT } else { NO_TINT },
            ..faces
        };
        queue.write_buffer(&self.faces.buffer, 0, bytemuck::bytes_of(&faces));
        queue.write_buffer(&self.grid.buffer, 0, bytemuck::bytes_of(&grid));
        if let Some((_, transform)) = &view.vehicle {
            let vehicle = SceneUniforms {
                view_proj,
                model: transform.model_matrix().to_cols_array_2d(),
                tint: NO_TINT,
            };
            queue.write_buffer(&self.vehicle.buffer, 0, bytemuck::bytes_of(&vehicle));
        }
        let sun = sun_uniforms(view_proj, &view.sun, view.post.sun_color);
        queue.write_buffer(&self.sun.buffer, 0, bytemuck::bytes_of(&sun));
    }

    pub(crate) fn draw(&self, pass: &mut wgpu::RenderPass<'_>, view: &FrameView<'_>) {
        pass.set_pipeline(&self.sun_pipeline);
        pass.set_bind_group(0, &self.sun.bind_group, &[]);
        pass.draw(0..6, 0..1);

        pass.set_vertex_buffer(0, self.terrain_vertices.slice(..));
        if view.layers.faces {
            pass.set_pipeline(&self.faces_pipeline);
            pass.set_bind_group(0, &self.faces.bind_group, &[]);
            pass.set_index_buffer(self.triangle_indices.slice(..), wgpu::IndexFormat::Uint32);
            pass.draw_indexed(0..self.triangle_count, 0, 0..1);
        }
        if view.layers.grid {
            pass.set_pipeline(&self.grid_pipeline);
            pass.set_bind_group(0, &self.grid.bind_group, &[]);
            pass.set_index_buffer(self.line_indices.slice(..), wgpu::IndexFormat::Uint32);
            pass.draw_indexed(0..self.line_count, 0, 0..1);
        }

        if let Some((handle, _)) = &view.vehicle {
            if let Some(mesh) = self.meshes.get(handle.0 as usize) {
                pass.set_pipeline(&self.vehicle_pipeline);
                pass.set_bind_group(0, &self.vehicle.bind_group, &[]);
                pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                pass.draw_indexed(0..mesh.index_count, 0, 0..1);
            }
        }
    }
}

fn sun_uniforms(view_proj: [[f32; 4]; 4], sun: &SunState, color: [f32; 3]) -> SunUniforms {
    let model = sun.model_matrix();
    SunUniforms {
        view_proj,
        model: model.to_cols_array_2d(),
        color: [color[0], color[1], color[2], sun.intensity],
        params: [sun.time, sun.phase, 0.0, 0.0],
    }
}
