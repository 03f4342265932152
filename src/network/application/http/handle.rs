//! Child connection objects.
//!
//! A [`ChildHandle`] owns one child created by a controller's service binding
//! and destroys it exactly once: explicitly through [`ChildHandle::release`],
//! or when the handle goes out of scope on any exit path.

use core::ops::{Deref, DerefMut};

use log::{debug, warn};

use crate::network::ServiceBinding;
use crate::network::error::{AcquireError, Status};

/// Exclusive ownership of one child connection object.
pub struct ChildHandle<'b, B: ServiceBinding> {
    binding: &'b mut B,
    child: Option<B::Child>,
}

impl<'b, B: ServiceBinding> ChildHandle<'b, B> {
    /// Create a child on `controller`.
    pub fn acquire(binding: &'b mut B, controller: B::Controller) -> Result<Self, AcquireError> {
        let child = binding.create_child(controller)?;
        debug!("created HTTP child on controller {:?}", controller);
        Ok(Self {
            binding,
            child: Some(child),
        })
    }

    /// Destroy the child now and report how that went.
    pub fn release(mut self) -> Result<(), Status> {
        self.destroy()
    }

    fn destroy(&mut self) -> Result<(), Status> {
        match self.child.take() {
            Some(child) => self.binding.destroy_child(child),
            None => Ok(()),
        }
    }
}

impl<B: ServiceBinding> Deref for ChildHandle<'_, B> {
    type Target = B::Child;

    fn deref(&self) -> &Self::Target {
        match &self.child {
            Some(child) => child,
            None => unreachable!("child used after release"),
        }
    }
}

impl<B: ServiceBinding> DerefMut for ChildHandle<'_, B> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        match &mut self.child {
            Some(child) => child,
            None => unreachable!("child used after release"),
        }
    }
}

impl<B: ServiceBinding> Drop for ChildHandle<'_, B> {
    fn drop(&mut self) {
        if let Err(status) = self.destroy() {
            warn!("destroying HTTP child failed: {}", status);
        }
    }
}

impl<B: ServiceBinding> core::fmt::Debug for ChildHandle<'_, B> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ChildHandle")
            .field("released", &self.child.is_none())
            .finish()
    }
}
