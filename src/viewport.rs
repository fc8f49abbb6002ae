use crate::lifecycle::{Disposer, Mount};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_y: f64,
    pub scroll_height: f64,
    pub viewport_height: f64,
}

impl ScrollMetrics {
    pub fn new(scroll_y: f64, scroll_height: f64, viewport_height: f64) -> Self {
        Self {
            scroll_y,
            scroll_height,
            viewport_height,
        }
    }

    // 0 when the document does not overflow.
    pub fn progress(&self) -> f64 {
        let scrollable = self.scroll_height - self.viewport_height;
        if !(scrollable > 0.0) || !self.scroll_y.is_finite() {
            return 0.0;
        }

        (self.scroll_y / scrollable).clamp(0.0, 1.0)
    }

    pub fn is_scrolled_past(&self, threshold: f64) -> bool {
        self.scroll_y > threshold
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrackSpan {
    Leaving,
    Crossing,
}

pub fn element_progress(top: f64, height: f64, viewport_height: f64, span: TrackSpan) -> f64 {
    let (travelled, distance) = match span {
        TrackSpan::Leaving => (-top, height),
        TrackSpan::Crossing => (viewport_height - top, viewport_height + height),
    };

    if !(distance > 0.0) || !travelled.is_finite() {
        return 0.0;
    }

    (travelled / distance).clamp(0.0, 1.0)
}

pub trait ScrollSource {
    fn metrics(&self) -> ScrollMetrics;
    fn on_scroll(&self, handler: Box<dyn FnMut(ScrollMetrics)>) -> Disposer;
}

pub struct ViewportTracker;

impl ViewportTracker {
    // Reports once immediately.
    pub fn attach(source: &dyn ScrollSource, mut on_change: impl FnMut(ScrollMetrics) + 'static) -> Mount {
        on_change(source.metrics());

        let mut mount = Mount::new();
        mount.hold(source.on_scroll(Box::new(on_change)));
        mount
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::testing::FakeScroll;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn progress_is_zero_when_document_fits_viewport() {
        let metrics = ScrollMetrics::new(0.0, 800.0, 800.0);
        assert_eq!(metrics.progress(), 0.0);
        assert!(!metrics.progress().is_nan());

        let shorter = ScrollMetrics::new(0.0, 500.0, 800.0);
        assert_eq!(shorter.progress(), 0.0);
    }

    #[test]
    fn progress_is_fraction_of_overflow() {
        let metrics = ScrollMetrics::new(600.0, 2_000.0, 800.0);
        assert!((metrics.progress() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn progress_clamps_overscroll() {
        assert_eq!(ScrollMetrics::new(-40.0, 2_000.0, 800.0).progress(), 0.0);
        assert_eq!(ScrollMetrics::new(1_500.0, 2_000.0, 800.0).progress(), 1.0);
    }

    #[test]
    fn scrolled_threshold_is_strict() {
        assert!(!ScrollMetrics::new(40.0, 2_000.0, 800.0).is_scrolled_past(40.0));
        assert!(ScrollMetrics::new(41.0, 2_000.0, 800.0).is_scrolled_past(40.0));
    }

    #[test]
    fn leaving_span_tracks_element_exit() {
        assert_eq!(element_progress(0.0, 900.0, 800.0, TrackSpan::Leaving), 0.0);
        assert!((element_progress(-450.0, 900.0, 800.0, TrackSpan::Leaving) - 0.5).abs() < 1e-12);
        assert_eq!(element_progress(-2_000.0, 900.0, 800.0, TrackSpan::Leaving), 1.0);
    }

    #[test]
    fn crossing_span_starts_at_viewport_bottom() {
        assert_eq!(element_progress(800.0, 400.0, 800.0, TrackSpan::Crossing), 0.0);
        assert!((element_progress(200.0, 400.0, 800.0, TrackSpan::Crossing) - 0.5).abs() < 1e-12);
        assert_eq!(element_progress(-400.0, 400.0, 800.0, TrackSpan::Crossing), 1.0);
    }

    #[test]
    fn unmeasured_element_reports_zero() {
        assert_eq!(element_progress(-10.0, 0.0, 800.0, TrackSpan::Leaving), 0.0);
    }

    #[test]
    fn tracker_reports_at_mount_and_on_scroll() {
        let source = FakeScroll::new(ScrollMetrics::new(0.0, 1_800.0, 800.0));
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&seen);
        let mount = ViewportTracker::attach(&source, move |metrics| {
            sink.borrow_mut().push(metrics.progress());
        });
        source.scroll_to(500.0);

        assert_eq!(*seen.borrow(), vec![0.0, 0.5]);
        drop(mount);
    }

    #[test]
    fn detaching_tracker_leaves_no_listeners() {
        let source = FakeScroll::new(ScrollMetrics::new(0.0, 1_800.0, 800.0));
        let seen = Rc::new(RefCell::new(0));

        let sink = Rc::clone(&seen);
        let mount = ViewportTracker::attach(&source, move |_| *sink.borrow_mut() += 1);
        assert_eq!(source.live_listeners(), 1);

        mount.detach();
        assert_eq!(source.live_listeners(), 0);

        source.scroll_to(900.0);
        assert_eq!(*seen.borrow(), 1);
    }
}
