//! A compiled compute pipeline with a fixed 2D output shape.
//!
//! Binding layout shared by every demo shader:
//!
//! | binding | contents                                 |
//! |---------|------------------------------------------|
//! | 0       | uniform block `P`                        |
//! | 1       | read-only `array<u32>` input (optional)  |
//! | 2       | read-write `array<u32>` output           |
//!
//! Output element `(x, y)` lives at `y * width + x`. Shaders use an
//! 8x8 workgroup and must ignore invocations outside the output.

use std::marker::PhantomData;

use bytemuck::Pod;

use super::{GpuBuffer, GpuContext};
use crate::compute::ComputeError;

/// Workgroup edge length, must match `@workgroup_size` in the shaders
pub const WORKGROUP_SIZE: u32 = 8;

/// WGSL source plus the entry point to compile
#[derive(Clone, Copy, Debug)]
pub struct KernelSource {
    pub label: &'static str,
    pub wgsl: &'static str,
    pub entry_point: &'static str,
    pub reads_input: bool,
}

/// Number of workgroups covering `extent` invocations
pub fn workgroup_count(extent: u32) -> u32 {
    extent.div_ceil(WORKGROUP_SIZE)
}

pub struct Kernel<P: Pod> {
    label: &'static str,
    output_shape: [u32; 2],
    pipeline: wgpu::ComputePipeline,
    bind_group: wgpu::BindGroup,
    params: GpuBuffer<P>,
    input: Option<GpuBuffer<u32>>,
    output: GpuBuffer<u32>,
    download: GpuBuffer<u32>,
    _marker: PhantomData<P>,
}

impl<P: Pod> Kernel<P> {
    /// Compile `source` and allocate buffers for a `[width, height]` output
    pub fn new(context: &GpuContext, source: &KernelSource, output_shape: [u32; 2]) -> Result<Self, ComputeError> {
        let [width, height] = output_shape;
        let limit = context.max_workgroups_per_dimension();
        if workgroup_count(width) > limit || workgroup_count(height) > limit {
            return Err(ComputeError::DispatchTooLarge { width, height, limit });
        }

        let len = (width as usize) * (height as usize);
        let params = GpuBuffer::<P>::new_uniform(context, source.label);
        let input = source
            .reads_input
            .then(|| GpuBuffer::<u32>::new_input(context, source.label, len));
        let output = GpuBuffer::<u32>::new_output(context, source.label, len);
        let download = GpuBuffer::<u32>::new_download(context, source.label, len);

        let module = context.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(source.label),
            source: wgpu::ShaderSource::Wgsl(source.wgsl.into()),
        });

        let storage = |binding: u32, read_only: bool| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::COMPUTE,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Storage { read_only },
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        };
        let mut layout_entries = vec![wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::COMPUTE,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }];
        let mut group_entries = vec![wgpu::BindGroupEntry {
            binding: 0,
            resource: params.buffer.as_entire_binding(),
        }];
        if let Some(input) = &input {
            layout_entries.push(storage(1, true));
            group_entries.push(wgpu::BindGroupEntry {
                binding: 1,
                resource: input.buffer.as_entire_binding(),
            });
        }
        layout_entries.push(storage(2, false));
        group_entries.push(wgpu::BindGroupEntry {
            binding: 2,
            resource: output.buffer.as_entire_binding(),
        });

        let bind_group_layout = context.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some(source.label),
            entries: &layout_entries,
        });
        let bind_group = context.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(source.label),
            layout: &bind_group_layout,
            entries: &group_entries,
        });
        let pipeline_layout = context.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(source.label),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });
        let pipeline = context.device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
            label: Some(source.label),
            layout: Some(&pipeline_layout),
            module: &module,
            entry_point: Some(source.entry_point),
            compilation_options: wgpu::PipelineCompilationOptions::default(),
            cache: None,
        });

        log::debug!("compiled kernel {} for {}x{}", source.label, width, height);

        Ok(Self {
            label: source.label,
            output_shape,
            pipeline,
            bind_group,
            params,
            input,
            output,
            download,
            _marker: PhantomData,
        })
    }

    pub fn output_shape(&self) -> [u32; 2] {
        self.output_shape
    }

    /// Number of output elements
    pub fn len(&self) -> usize {
        self.output.len
    }

    pub fn is_empty(&self) -> bool {
        self.output.len == 0
    }

    /// Upload `params` (and `input` for kernels that read one), dispatch,
    /// and read the output back. Blocks until the GPU is done.
    pub fn run(&self, context: &GpuContext, params: &P, input: Option<&[u32]>) -> Result<Vec<u32>, ComputeError> {
        if self.is_empty() {
            return Ok(Vec::new());
        }

        self.params.write(context, std::slice::from_ref(params))?;
        match (&self.input, input) {
            (Some(buffer), Some(data)) if data.len() == buffer.len => buffer.write(context, data)?,
            (Some(buffer), data) => {
                return Err(ComputeError::ShapeMismatch {
                    expected: buffer.len,
                    actual: data.map_or(0, <[u32]>::len),
                });
            }
            (None, _) => {}
        }

        let mut encoder = context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: Some(self.label) });
        {
            let mut pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                label: Some(self.label),
                timestamp_writes: None,
            });
            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &self.bind_group, &[]);
            let [width, height] = self.output_shape;
            pass.dispatch_workgroups(workgroup_count(width), workgroup_count(height), 1);
        }
        encoder.copy_buffer_to_buffer(&self.output.buffer, 0, &self.download.buffer, 0, self.output.size_bytes());
        context.queue.submit([encoder.finish()]);

        self.download.read_to_vec(context)
    }
}
