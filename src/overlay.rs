//! Overlay surface lifecycle
//!
//! The surface is created lazily when the first entry mounts and torn down
//! once the last entry has exited with nothing pending.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceId(u64);

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "surface-{}", self.0)
    }
}

/// Handle to a live overlay surface, passed to `Renderable::mount`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceHandle {
    id: SurfaceId,
}

impl SurfaceHandle {
    pub fn id(&self) -> SurfaceId {
        self.id
    }
}

/// Platform side of the overlay: inserts and removes the actual window/layer
pub trait OverlayHost {
    fn create_surface(&mut self, surface: &SurfaceHandle);

    fn destroy_surface(&mut self, surface: &SurfaceHandle);
}

/// Host without a platform window. Counts lifecycle calls.
#[derive(Debug, Default)]
pub struct HeadlessHost {
    pub created: usize,
    pub destroyed: usize,
}

impl HeadlessHost {
    pub fn live_surfaces(&self) -> usize {
        self.created - self.destroyed
    }
}

impl OverlayHost for HeadlessHost {
    fn create_surface(&mut self, _surface: &SurfaceHandle) {
        self.created += 1;
    }

    fn destroy_surface(&mut self, _surface: &SurfaceHandle) {
        self.destroyed += 1;
    }
}

pub struct OverlayManager<H: OverlayHost> {
    host: H,
    surface: Option<SurfaceHandle>,
    next_id: u64,
}

impl<H: OverlayHost> OverlayManager<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            surface: None,
            next_id: 0,
        }
    }

    /// Return the live surface, creating it first if needed.
    /// The flag is true when a new surface was created.
    pub fn ensure_surface(&mut self) -> (SurfaceHandle, bool) {
        if let Some(surface) = &self.surface {
            return (surface.clone(), false);
        }

        self.next_id += 1;
        let surface = SurfaceHandle {
            id: SurfaceId(self.next_id),
        };
        self.host.create_surface(&surface);
        log::debug!("Created overlay {}", surface.id());
        self.surface = Some(surface.clone());
        (surface, true)
    }

    pub fn teardown(&mut self) -> Option<SurfaceId> {
        let surface = self.surface.take()?;
        self.host.destroy_surface(&surface);
        log::debug!("Tore down overlay {}", surface.id());
        Some(surface.id())
    }

    pub fn surface(&self) -> Option<&SurfaceHandle> {
        self.surface.as_ref()
    }

    pub fn is_live(&self) -> bool {
        self.surface.is_some()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}
