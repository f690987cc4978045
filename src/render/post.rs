use super::helpers;
use super::targets::RenderTargets;
use crate::constants::{BLOOM_TINT_MIX, BLUR_TAP_SPACING};
use crate::core::PostParams;

#[repr(C)]
#[derive(Copy, Clone, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct PostUniforms {
    resolution: [f32; 2],
    blur_dir: [f32; 2],
    strength: f32,
    threshold: f32,
    radius: f32,
    time: f32,
    tint: [f32; 4],
}

impl PostUniforms {
    pub(crate) fn new(params: &PostParams, resolution: [f32; 2], blur_dir: [f32; 2], time: f32) -> Self {
        let t = params.particle_tint;
        Self {
            resolution,
            blur_dir,
            strength: params.bloom.strength,
            threshold: params.bloom.threshold,
            radius: params.bloom.radius * BLUR_TAP_SPACING,
            time,
            tint: [t[0], t[1], t[2], BLOOM_TINT_MIX],
        }
    }
}

/// Layouts, pipelines and one uniform buffer per pass direction.
///
/// Uniform writes land before the encoder runs, so each pass that needs
/// different values reads its own buffer.
pub(crate) struct PostResources {
    pub(crate) bgl0: wgpu::BindGroupLayout, // tex+sampler+uniform
    pub(crate) bgl1: wgpu::BindGroupLayout, // tex+sampler
    pub(crate) main_uniforms: wgpu::Buffer,
    pub(crate) blur_h_uniforms: wgpu::Buffer,
    pub(crate) blur_v_uniforms: wgpu::Buffer,
    pub(crate) bright_pipeline: wgpu::RenderPipeline,
    pub(crate) blur_pipeline: wgpu::RenderPipeline,
    pub(crate) composite_pipeline: wgpu::RenderPipeline,
}

/// Bind groups that reference the render targets; rebuilt on resize.
pub(crate) struct PostBindGroups {
    pub(crate) from_hdr: wgpu::BindGroup,
    pub(crate) from_bloom_a_h: wgpu::BindGroup,
    pub(crate) from_bloom_b_v: wgpu::BindGroup,
    pub(crate) bloom_a_only: wgpu::BindGroup,
}

fn texture_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Texture {
            multisampled: false,
            view_dimension: wgpu::TextureViewDimension::D2,
            sample_type: wgpu::TextureSampleType::Float { filterable: true },
        },
        count: None,
    }
}

fn sampler_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
        count: None,
    }
}

pub(crate) fn create_post_resources(
    device: &wgpu::Device,
    post_shader: &wgpu::ShaderModule,
    bloom_format: wgpu::TextureFormat,
    swap_format: wgpu::TextureFormat,
) -> PostResources {
    let bgl0 = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("post_bgl0"),
        entries: &[
            texture_entry(0),
            sampler_entry(1),
            wgpu::BindGroupLayoutEntry {
                binding: 2,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            },
        ],
    });
    let bgl1 = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("post_bgl1"),
        entries: &[texture_entry(0), sampler_entry(1)],
    });
    let size = std::mem::size_of::<PostUniforms>();
    let main_uniforms = helpers::uniform_buffer(device, "post_uniforms", size);
    let blur_h_uniforms = helpers::uniform_buffer(device, "post_uniforms_blur_h", size);
    let blur_v_uniforms = helpers::uniform_buffer(device, "post_uniforms_blur_v", size);
    let pl_bright_blur = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("pl_post_0"),
        bind_group_layouts: &[&bgl0],
        push_constant_ranges: &[],
    });
    let pl_composite = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("pl_post_comp"),
        bind_group_layouts: &[&bgl0, &bgl1],
        push_constant_ranges: &[],
    });
    let bright_pipeline = helpers::make_post_pipeline(
        device,
        &pl_bright_blur,
        post_shader,
        "fs_bright",
        bloom_format,
        None,
    );
    let blur_pipeline = helpers::make_post_pipeline(
        device,
        &pl_bright_blur,
        post_shader,
        "fs_blur",
        bloom_format,
        None,
    );
    let composite_pipeline = helpers::make_post_pipeline(
        device,
        &pl_composite,
        post_shader,
        "fs_composite",
        swap_format,
        Some(wgpu::BlendState::REPLACE),
    );

    PostResources {
        bgl0,
        bgl1,
        main_uniforms,
        blur_h_uniforms,
        blur_v_uniforms,
        bright_pipeline,
        blur_pipeline,
        composite_pipeline,
    }
}

fn source_group(
    device: &wgpu::Device,
    label: &str,
    post: &PostResources,
    view: &wgpu::TextureView,
    sampler: &wgpu::Sampler,
    uniforms: &wgpu::Buffer,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(label),
        layout: &post.bgl0,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: uniforms.as_entire_binding(),
            },
        ],
    })
}

pub(crate) fn create_bind_groups(
    device: &wgpu::Device,
    post: &PostResources,
    sampler: &wgpu::Sampler,
    targets: &RenderTargets,
) -> PostBindGroups {
    let bloom_a_only = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("bg_bloom_a_only"),
        layout: &post.bgl1,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&targets.bloom_a_view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    });
    PostBindGroups {
        from_hdr: source_group(device, "bg_hdr", post, &targets.hdr_view, sampler, &post.main_uniforms),
        from_bloom_a_h: source_group(
            device,
            "bg_from_bloom_a",
            post,
            &targets.bloom_a_view,
            sampler,
            &post.blur_h_uniforms,
        ),
        from_bloom_b_v: source_group(
            device,
            "bg_from_bloom_b",
            post,
            &targets.bloom_b_view,
            sampler,
            &post.blur_v_uniforms,
        ),
        bloom_a_only,
    }
}

pub(crate) fn write_post_uniforms(
    queue: &wgpu::Queue,
    post: &PostResources,
    params: &PostParams,
    bloom_resolution: [f32; 2],
    time: f32,
) {
    let main = PostUniforms::new(params, bloom_resolution, [0.0, 0.0], time);
    let h = PostUniforms::new(params, bloom_resolution, [1.0, 0.0], time);
    let v = PostUniforms::new(params, bloom_resolution, [0.0, 1.0], time);
    queue.write_buffer(&post.main_uniforms, 0, bytemuck::bytes_of(&main));
    queue.write_buffer(&post.blur_h_uniforms, 0, bytemuck::bytes_of(&h));
    queue.write_buffer(&post.blur_v_uniforms, 0, bytemuck::bytes_of(&v));
}

pub(crate) fn blit(
    encoder: &mut wgpu::CommandEncoder,
    label: &str,
    target: &wgpu::TextureView,
    clear: wgpu::Color,
    pipeline: &wgpu::RenderPipeline,
    bg0: &wgpu::BindGroup,
    bg1: Option<&wgpu::BindGroup>,
) {
    let mut r = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some(label),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view: target,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(clear),
                store: wgpu::StoreOp::Store,
            },
        })],
        depth_stencil_attachment: None,
        timestamp_writes: None,
        occlusion_query_set: None,
    });
    r.set_pipeline(pipeline);
    r.set_bind_group(0, bg0, &[]);
    if let Some(g1) = bg1 {
        r.set_bind_group(1, g1, &[]);
    }
    r.draw(0..3, 0..1);
}
