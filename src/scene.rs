//! The scene slot holding the live point cloud.
//!
//! GPU resources of a point cloud are released explicitly through
//! [`Dispose`], never by relying on `Drop` ordering. [`Scene::replace`]
//! releases and detaches the old cloud before the new one becomes live, so
//! repeated regeneration never accumulates buffers.

use crate::galaxy::PointCloud;

/// Explicit release of renderer-side resources.
pub trait Dispose {
    /// Release all resources. Calling this twice must be harmless.
    fn dispose(&mut self);

    fn is_disposed(&self) -> bool;
}

/// Turns a CPU point cloud into something the renderer can draw.
pub trait PointsUploader {
    type Points: Dispose;

    fn upload(&mut self, cloud: &PointCloud) -> Self::Points;
}

/// Holds at most one live point cloud.
#[derive(Debug)]
pub struct Scene<P: Dispose> {
    live: Option<P>,
}

impl<P: Dispose> Scene<P> {
    pub fn new() -> Self {
        Self { live: None }
    }

    /// Attach `points`, disposing and returning the previously live cloud.
    pub fn replace(&mut self, points: P) -> Option<P> {
        let old = self.live.take().map(|mut old| {
            old.dispose();
            old
        });
        self.live = Some(points);
        old
    }

    /// Dispose and detach the live cloud, if any.
    pub fn clear(&mut self) -> Option<P> {
        self.live.take().map(|mut old| {
            old.dispose();
            old
        })
    }

    pub fn live(&self) -> Option<&P> {
        self.live.as_ref()
    }

    /// Number of attached clouds: 0 or 1.
    pub fn live_count(&self) -> usize {
        self.live.is_some() as usize
    }
}

impl<P: Dispose> Default for Scene<P> {
    fn default() -> Self {
        Self::new()
    }
}
