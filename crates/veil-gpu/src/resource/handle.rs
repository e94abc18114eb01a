use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

use super::{BufferRef, FramebufferRef, TextureRef};
use crate::pipeline::PipelineRef;

/// Shared-ownership handle to a GPU-side object.
///
/// Cloning bumps the reference count; the object lives until the last owner
/// (render task, batch, backend) drops it. Handles are single-thread only,
/// matching the render-thread recording model.
pub struct Handle<T>(Rc<RefCell<T>>);

impl<T> Handle<T> {
    pub fn new(value: T) -> Self {
        Self(Rc::new(RefCell::new(value)))
    }

    /// Immutable access to the object.
    ///
    /// # Panics
    /// Panics if the object is currently borrowed mutably.
    #[inline]
    pub fn borrow(&self) -> Ref<'_, T> {
        self.0.borrow()
    }

    /// Mutable access to the object.
    ///
    /// # Panics
    /// Panics if the object is currently borrowed.
    #[inline]
    pub fn borrow_mut(&self) -> RefMut<'_, T> {
        self.0.borrow_mut()
    }

    /// True when both handles point at the same object.
    #[inline]
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }

    /// Number of live owners, this handle included.
    #[inline]
    pub fn owners(this: &Self) -> usize {
        Rc::strong_count(&this.0)
    }
}

impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<T: fmt::Debug> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.try_borrow() {
            Ok(v) => f.debug_tuple("Handle").field(&*v).finish(),
            Err(_) => f.write_str("Handle(<borrowed>)"),
        }
    }
}

/// Identity equality: two handles are equal when they share the object.
impl<T> PartialEq for Handle<T> {
    fn eq(&self, other: &Self) -> bool {
        Self::ptr_eq(self, other)
    }
}

impl<T> Eq for Handle<T> {}

/// Kind tag of a [`Resource`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ResourceKind {
    Pipeline,
    Framebuffer,
    Texture,
    Buffer,
}

/// A reference held by a batch's resource table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    Pipeline(PipelineRef),
    Framebuffer(FramebufferRef),
    Texture(TextureRef),
    Buffer(BufferRef),
}

impl Resource {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Resource::Pipeline(_) => ResourceKind::Pipeline,
            Resource::Framebuffer(_) => ResourceKind::Framebuffer,
            Resource::Texture(_) => ResourceKind::Texture,
            Resource::Buffer(_) => ResourceKind::Buffer,
        }
    }
}
