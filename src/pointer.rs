// A missing or zero-sized box means the element has not been laid out yet;
// pointer events against it are ignored.

use crate::motion::{interpolate, Spring, SpringConfig};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn is_measured(&self) -> bool {
        self.width > 0.0
            && self.height > 0.0
            && self.left.is_finite()
            && self.top.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
    }

    pub fn center(&self) -> Point {
        Point {
            x: self.left + self.width / 2.0,
            y: self.top + self.height / 2.0,
        }
    }
}

fn measured(rect: Option<Rect>) -> Option<Rect> {
    rect.filter(Rect::is_measured)
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PointerGlowTracker {
    x: Spring,
    y: Spring,
}

impl PointerGlowTracker {
    pub fn new(config: SpringConfig) -> Self {
        Self {
            x: Spring::new(config, 0.0),
            y: Spring::new(config, 0.0),
        }
    }

    pub fn pointer_moved(&mut self, client: Point, container: Option<Rect>) -> bool {
        let Some(rect) = measured(container) else {
            return false;
        };

        self.x.set_target(client.x - rect.left);
        self.y.set_target(client.y - rect.top);
        true
    }

    pub fn step(&mut self, dt_seconds: f64) -> Point {
        Point::new(self.x.step(dt_seconds), self.y.step(dt_seconds))
    }

    pub fn is_settled(&self) -> bool {
        self.x.is_settled() && self.y.is_settled()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlowStyle {
    pub radius_px: u32,
    pub color: &'static str,
    pub fade_percent: u8,
}

impl GlowStyle {
    pub fn background(&self, at: Point) -> String {
        format!(
            "background: radial-gradient({}px at {:.1}px {:.1}px, {}, transparent {}%);",
            self.radius_px, at.x, at.y, self.color, self.fade_percent
        )
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TiltAngles {
    pub rotate_x: f64,
    pub rotate_y: f64,
}

impl TiltAngles {
    pub fn transform(&self) -> String {
        format!(
            "transform: perspective(1000px) rotateX({:.2}deg) rotateY({:.2}deg);",
            self.rotate_x, self.rotate_y
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TiltController {
    max_degrees: f64,
    input_extent: Option<f64>,
    angles: TiltAngles,
}

impl TiltController {
    pub fn new(max_degrees: f64) -> Self {
        Self {
            max_degrees: max_degrees.abs(),
            input_extent: None,
            angles: TiltAngles::default(),
        }
    }

    pub fn with_input_extent(mut self, extent: f64) -> Self {
        if extent > 0.0 && extent.is_finite() {
            self.input_extent = Some(extent);
        }
        self
    }

    pub fn angles(&self) -> TiltAngles {
        self.angles
    }

    pub fn pointer_moved(&mut self, client: Point, container: Option<Rect>) -> TiltAngles {
        let Some(rect) = measured(container) else {
            return self.angles;
        };

        let center = rect.center();
        let (extent_x, extent_y) = match self.input_extent {
            Some(extent) => (extent, extent),
            None => (rect.width / 2.0, rect.height / 2.0),
        };
        let max = self.max_degrees;

        self.angles = TiltAngles {
            rotate_x: interpolate(client.y - center.y, (-extent_y, extent_y), (max, -max)),
            rotate_y: interpolate(client.x - center.x, (-extent_x, extent_x), (-max, max)),
        };
        self.angles
    }

    pub fn pointer_left(&mut self) -> TiltAngles {
        self.angles = TiltAngles::default();
        self.angles
    }
}

pub fn magnetic_offset(client: Point, button: Option<Rect>, strength: f64) -> Option<Point> {
    let rect = measured(button)?;
    let center = rect.center();
    Some(Point::new(
        (client.x - center.x) * strength,
        (client.y - center.y) * strength,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card() -> Rect {
        Rect::new(100.0, 200.0, 400.0, 300.0)
    }

    fn settle(glow: &mut PointerGlowTracker) -> Point {
        let mut position = Point::default();
        for _ in 0..600 {
            position = glow.step(1.0 / 60.0);
        }
        position
    }

    #[test]
    fn glow_targets_pointer_relative_to_container_corner() {
        let mut glow = PointerGlowTracker::new(SpringConfig::critical(80.0));

        assert!(glow.pointer_moved(Point::new(150.0, 260.0), Some(card())));
        assert_eq!(settle(&mut glow), Point::new(50.0, 60.0));
    }

    #[test]
    fn glow_trails_pointer_instead_of_snapping() {
        let mut glow = PointerGlowTracker::new(SpringConfig::new(80.0, 25.0));
        glow.pointer_moved(Point::new(500.0, 500.0), Some(card()));

        let after_one_frame = glow.step(1.0 / 60.0);
        assert!(after_one_frame.x > 0.0 && after_one_frame.x < 400.0);
        assert!(!glow.is_settled());

        assert_eq!(settle(&mut glow), Point::new(400.0, 300.0));
        assert!(glow.is_settled());
    }

    #[test]
    fn glow_ignores_unmeasured_container() {
        let mut glow = PointerGlowTracker::new(SpringConfig::new(80.0, 25.0));

        assert!(!glow.pointer_moved(Point::new(10.0, 10.0), None));
        assert!(!glow.pointer_moved(Point::new(10.0, 10.0), Some(Rect::new(0.0, 0.0, 0.0, 120.0))));
        assert!(glow.is_settled());
        assert_eq!(settle(&mut glow), Point::default());
    }

    #[test]
    fn glow_style_renders_radial_gradient() {
        let style = GlowStyle {
            radius_px: 600,
            color: "rgba(59,130,246,0.08)",
            fade_percent: 60,
        };
        assert_eq!(
            style.background(Point::new(12.0, 34.56)),
            "background: radial-gradient(600px at 12.0px 34.6px, rgba(59,130,246,0.08), transparent 60%);"
        );
    }

    #[test]
    fn tilt_maps_edges_to_full_range() {
        let mut tilt = TiltController::new(10.0);

        let right_edge = tilt.pointer_moved(Point::new(500.0, 350.0), Some(card()));
        assert_eq!(right_edge.rotate_y, 10.0);
        assert_eq!(right_edge.rotate_x, 0.0);

        let top_left = tilt.pointer_moved(Point::new(100.0, 200.0), Some(card()));
        assert_eq!(top_left.rotate_y, -10.0);
        assert_eq!(top_left.rotate_x, 10.0);
    }

    #[test]
    fn tilt_clamps_outside_input_extent() {
        let mut tilt = TiltController::new(7.0).with_input_extent(200.0);
        let angles = tilt.pointer_moved(Point::new(2_000.0, -2_000.0), Some(card()));

        assert_eq!(angles.rotate_y, 7.0);
        assert_eq!(angles.rotate_x, 7.0);
    }

    #[test]
    fn tilt_center_is_flat() {
        let mut tilt = TiltController::new(10.0);
        let angles = tilt.pointer_moved(card().center(), Some(card()));
        assert_eq!(angles, TiltAngles::default());
    }

    #[test]
    fn tilt_resets_on_leave() {
        let mut tilt = TiltController::new(10.0);
        tilt.pointer_moved(Point::new(480.0, 220.0), Some(card()));
        assert_ne!(tilt.angles(), TiltAngles::default());

        assert_eq!(tilt.pointer_left(), TiltAngles::default());
    }

    #[test]
    fn tilt_keeps_angles_for_unmeasured_container() {
        let mut tilt = TiltController::new(10.0);
        let before = tilt.pointer_moved(Point::new(480.0, 220.0), Some(card()));

        let after = tilt.pointer_moved(Point::new(0.0, 0.0), Some(Rect::default()));
        assert_eq!(before, after);
        assert!(!after.rotate_x.is_nan() && !after.rotate_y.is_nan());
    }

    #[test]
    fn magnetic_offset_scales_distance_from_center() {
        let offset = magnetic_offset(Point::new(340.0, 350.0), Some(card()), 0.25);
        assert_eq!(offset, Some(Point::new(10.0, 0.0)));
        assert_eq!(magnetic_offset(Point::new(0.0, 0.0), None, 0.25), None);
    }
}
