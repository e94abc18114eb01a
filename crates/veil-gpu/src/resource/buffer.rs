use std::marker::PhantomData;

use bytemuck::Pod;

use super::Handle;

pub type BufferRef = Handle<Buffer>;

/// CPU mirror of a GPU-visible buffer.
///
/// Every mutation bumps `stamp`; a backend compares it with the stamp it last
/// uploaded to decide whether the device copy needs a write.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Buffer {
    bytes: Vec<u8>,
    stamp: u64,
}

impl Buffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a buffer initialized with the bytes of `value`.
    pub fn from_pod<T: Pod>(value: &T) -> Self {
        Self {
            bytes: bytemuck::bytes_of(value).to_vec(),
            stamp: 0,
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.bytes
    }

    /// Mutation counter; starts at 0 and increments once per write.
    #[inline]
    pub fn stamp(&self) -> u64 {
        self.stamp
    }

    /// Writes `data` at `offset`, growing the buffer if it is too small.
    pub fn write(&mut self, offset: usize, data: &[u8]) {
        let end = offset + data.len();
        if end > self.bytes.len() {
            self.bytes.resize(end, 0);
        }
        self.bytes[offset..end].copy_from_slice(data);
        self.stamp = self.stamp.wrapping_add(1);
    }
}

/// Typed window over the head of a buffer.
///
/// `get` never touches the stamp; `edit` is exactly one buffer write.
#[derive(Debug, Clone)]
pub struct BufferView<T: Pod> {
    buffer: BufferRef,
    _marker: PhantomData<T>,
}

impl<T: Pod> BufferView<T> {
    /// Allocates a fresh buffer holding `value`.
    pub fn new(value: &T) -> Self {
        Self::from_buffer(Handle::new(Buffer::from_pod(value)))
    }

    /// Wraps an existing buffer. It must hold at least `size_of::<T>()` bytes.
    pub fn from_buffer(buffer: BufferRef) -> Self {
        debug_assert!(buffer.borrow().size() >= std::mem::size_of::<T>());
        Self {
            buffer,
            _marker: PhantomData,
        }
    }

    #[inline]
    pub fn buffer(&self) -> &BufferRef {
        &self.buffer
    }

    /// Reads the current value.
    pub fn get(&self) -> T {
        let buffer = self.buffer.borrow();
        bytemuck::pod_read_unaligned(&buffer.data()[..std::mem::size_of::<T>()])
    }

    /// Applies `f` to a copy of the value and writes it back.
    pub fn edit(&self, f: impl FnOnce(&mut T)) {
        let mut value = self.get();
        f(&mut value);
        self.buffer.borrow_mut().write(0, bytemuck::bytes_of(&value));
    }
}
