//! Explicit render loop scheduling.
//!
//! The window asks for a redraw once per display refresh. [`RenderLoop`]
//! runs the frame callback for each such tick and tells the caller whether
//! to schedule the next one. A [`StopHandle`] ends the loop from anywhere on
//! the event-loop thread.

use std::cell::Cell;
use std::rc::Rc;

/// What the caller should do after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    /// Request the next redraw.
    Continue,
    /// The loop was stopped; do not schedule again.
    Stopped,
}

/// Cloneable stop signal for a [`RenderLoop`].
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Rc<Cell<bool>>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.set(true);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.get()
    }
}

/// One render per tick, until stopped.
#[derive(Debug, Default)]
pub struct RenderLoop {
    stop: StopHandle,
    frames: u64,
}

impl RenderLoop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn is_running(&self) -> bool {
        !self.stop.is_stopped()
    }

    /// Frames rendered so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Run `frame` unless the loop has been stopped.
    pub fn tick<F: FnOnce()>(&mut self, frame: F) -> LoopControl {
        if self.stop.is_stopped() {
            return LoopControl::Stopped;
        }
        frame();
        self.frames += 1;
        if self.stop.is_stopped() {
            LoopControl::Stopped
        } else {
            LoopControl::Continue
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runs_one_frame_per_tick() {
        let mut render_loop = RenderLoop::new();
        let mut rendered = 0;
        for _ in 0..5 {
            assert_eq!(render_loop.tick(|| rendered += 1), LoopControl::Continue);
        }
        assert_eq!(rendered, 5);
        assert_eq!(render_loop.frames(), 5);
    }

    #[test]
    fn test_stop_prevents_further_frames() {
        let mut render_loop = RenderLoop::new();
        let handle = render_loop.stop_handle();
        let mut rendered = 0;

        render_loop.tick(|| rendered += 1);
        handle.stop();
        assert!(!render_loop.is_running());
        assert_eq!(render_loop.tick(|| rendered += 1), LoopControl::Stopped);
        assert_eq!(rendered, 1);
    }

    #[test]
    fn test_stop_from_inside_frame_finishes_that_frame() {
        let mut render_loop = RenderLoop::new();
        let handle = render_loop.stop_handle();
        let mut rendered = 0;
        let control = render_loop.tick(|| {
            rendered += 1;
            handle.stop();
        });
        assert_eq!(control, LoopControl::Stopped);
        assert_eq!(rendered, 1);
        assert_eq!(render_loop.frames(), 1);
    }
}
