//! Resize notifier
//!
//! Native resize notifications only raise a flag; a 10 ms poll runs the
//! registered callbacks at most once per poll, however many resizes
//! arrived in between.

use std::fmt;
use std::time::Duration;

/// Interval between resize polls
pub const RESIZE_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Canvas size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

type ResizeCallback = Box<dyn FnMut(Viewport)>;

/// Debounced resize fan-out
pub struct ResizeNotifier {
    callbacks: Vec<ResizeCallback>,
    resized: bool,
    viewport: Viewport,
}

impl ResizeNotifier {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            callbacks: Vec::new(),
            resized: false,
            viewport,
        }
    }

    /// Register a callback and run it once right away
    pub fn register<F>(&mut self, callback: F)
    where
        F: FnMut(Viewport) + 'static,
    {
        let mut callback: ResizeCallback = Box::new(callback);
        callback(self.viewport);
        self.callbacks.push(callback);
    }

    /// Record a native resize
    pub fn mark_resized(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.resized = true;
    }

    /// Run every callback once if a resize is pending
    ///
    /// Returns whether callbacks ran.
    pub fn poll(&mut self) -> bool {
        if !self.resized {
            return false;
        }
        self.resized = false;

        let viewport = self.viewport;
        for callback in &mut self.callbacks {
            callback(viewport);
        }
        true
    }

    /// Latest known size
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }
}

impl fmt::Debug for ResizeNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResizeNotifier")
            .field("callbacks", &self.callbacks.len())
            .field("resized", &self.resized)
            .field("viewport", &self.viewport)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn register_runs_immediately() {
        let mut notifier = ResizeNotifier::new(Viewport::new(300.0, 150.0));
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&seen);
        notifier.register(move |v| sink.borrow_mut().push(v));

        assert_eq!(*seen.borrow(), vec![Viewport::new(300.0, 150.0)]);
        assert!(!notifier.poll());
    }

    #[test]
    fn bursts_collapse_into_one_run_in_order() {
        let mut notifier = ResizeNotifier::new(Viewport::default());
        let order = Rc::new(RefCell::new(Vec::new()));

        for id in 0..3 {
            let sink = Rc::clone(&order);
            notifier.register(move |v| sink.borrow_mut().push((id, v.width)));
        }
        order.borrow_mut().clear();

        notifier.mark_resized(Viewport::new(100.0, 50.0));
        notifier.mark_resized(Viewport::new(640.0, 480.0));
        assert!(notifier.poll());
        assert!(!notifier.poll());

        assert_eq!(
            *order.borrow(),
            vec![(0, 640.0), (1, 640.0), (2, 640.0)]
        );
    }
}
