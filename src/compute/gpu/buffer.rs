//! Typed GPU buffers and host readback.

use std::marker::PhantomData;
use std::sync::mpsc;

use bytemuck::{Pod, cast_slice};
use wgpu::{Buffer, BufferDescriptor, BufferUsages};

use super::GpuContext;
use crate::compute::ComputeError;

/// A `wgpu::Buffer` that remembers how many `T` it holds
pub struct GpuBuffer<T: Pod> {
    pub buffer: Buffer,
    pub len: usize,
    _marker: PhantomData<T>,
}

impl<T: Pod> GpuBuffer<T> {
    fn byte_size(len: usize) -> u64 {
        // zero-sized bindings are invalid, keep at least one element
        (len.max(1) * size_of::<T>()) as u64
    }

    fn create(context: &GpuContext, label: &str, len: usize, usage: BufferUsages) -> Self {
        let buffer = context.device.create_buffer(&BufferDescriptor {
            label: Some(label),
            size: Self::byte_size(len),
            usage,
            mapped_at_creation: false,
        });
        Self {
            buffer,
            len,
            _marker: PhantomData,
        }
    }

    /// Read-only storage input, filled later with [`GpuBuffer::write`]
    pub fn new_input(context: &GpuContext, label: &str, len: usize) -> Self {
        Self::create(context, label, len, BufferUsages::STORAGE | BufferUsages::COPY_DST)
    }

    /// Shader-writable output that can be copied out
    pub fn new_output(context: &GpuContext, label: &str, len: usize) -> Self {
        Self::create(context, label, len, BufferUsages::STORAGE | BufferUsages::COPY_SRC)
    }

    /// Host-mappable staging buffer for readback
    pub fn new_download(context: &GpuContext, label: &str, len: usize) -> Self {
        Self::create(context, label, len, BufferUsages::COPY_DST | BufferUsages::MAP_READ)
    }

    /// Uniform block holding a single `T`
    pub fn new_uniform(context: &GpuContext, label: &str) -> Self {
        Self::create(context, label, 1, BufferUsages::UNIFORM | BufferUsages::COPY_DST)
    }

    pub fn size_bytes(&self) -> u64 {
        Self::byte_size(self.len)
    }

    /// Queue a write of `data` at the start of the buffer
    pub fn write(&self, context: &GpuContext, data: &[T]) -> Result<(), ComputeError> {
        if data.len() > self.len.max(1) {
            return Err(ComputeError::ShapeMismatch {
                expected: self.len,
                actual: data.len(),
            });
        }
        context.queue.write_buffer(&self.buffer, 0, cast_slice(data));
        Ok(())
    }

    /// Map the buffer, copy `len` elements out and unmap. Blocks until
    /// the GPU has finished all submitted work.
    pub fn read_to_vec(&self, context: &GpuContext) -> Result<Vec<T>, ComputeError> {
        let slice = self.buffer.slice(..);
        let (tx, rx) = mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = tx.send(result);
        });

        context.device.poll(wgpu::PollType::Wait)?;
        rx.recv().map_err(|_| ComputeError::MapCallbackDropped)??;

        let data = slice.get_mapped_range();
        let mut result: Vec<T> = cast_slice(&data).to_vec();
        drop(data);
        self.buffer.unmap();

        result.truncate(self.len);
        Ok(result)
    }
}
