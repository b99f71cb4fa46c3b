//! Map surface lifecycle
//!
//! A view mounts a surface when it appears and must release it when it goes
//! away. [`MapSession`] ties the surface to the view's owner: release happens
//! on [`MapSession::release`] or on drop, whichever comes first, and never
//! twice.

use crate::MapSurface;

pub struct MapSession<S: MapSurface> {
    surface: Option<S>,
}

impl<S: MapSurface> MapSession<S> {
    /// Take ownership of a freshly created surface
    pub fn mount(surface: S) -> Self {
        log::debug!("map session mounted");
        Self {
            surface: Some(surface),
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.surface.is_some()
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    /// Tear the surface down and hand it back. Returns `None` once released.
    pub fn release(&mut self) -> Option<S> {
        let mut surface = self.surface.take()?;
        surface.teardown();
        log::debug!("map session released");
        Some(surface)
    }
}

impl<S: MapSurface> Drop for MapSession<S> {
    fn drop(&mut self) {
        self.release();
    }
}
