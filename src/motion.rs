const SPRING_SUBSTEP_SECONDS: f64 = 1.0 / 240.0;
const SPRING_MAX_FRAME_SECONDS: f64 = 0.1;
const SPRING_REST_DELTA: f64 = 0.01;
const SPRING_REST_SPEED: f64 = 0.01;

// Ranges may be descending; a degenerate input range yields the output start.
pub fn interpolate(value: f64, input: (f64, f64), output: (f64, f64)) -> f64 {
    let span = input.1 - input.0;
    if span == 0.0 || !span.is_finite() || !value.is_finite() {
        return output.0;
    }

    let t = ((value - input.0) / span).clamp(0.0, 1.0);
    output.0 + (output.1 - output.0) * t
}

pub fn ease_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringConfig {
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
}

impl SpringConfig {
    pub const fn new(stiffness: f64, damping: f64) -> Self {
        Self {
            stiffness,
            damping,
            mass: 1.0,
        }
    }

    pub fn critical(stiffness: f64) -> Self {
        Self::new(stiffness, 2.0 * stiffness.sqrt())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Spring {
    config: SpringConfig,
    position: f64,
    velocity: f64,
    target: f64,
}

impl Spring {
    pub fn new(config: SpringConfig, initial: f64) -> Self {
        Self {
            config,
            position: initial,
            velocity: 0.0,
            target: initial,
        }
    }

    pub fn set_target(&mut self, target: f64) {
        if target.is_finite() {
            self.target = target;
        }
    }

    pub fn is_settled(&self) -> bool {
        (self.position - self.target).abs() < SPRING_REST_DELTA
            && self.velocity.abs() < SPRING_REST_SPEED
    }

    // Long frames (tab switches) are capped.
    pub fn step(&mut self, dt_seconds: f64) -> f64 {
        if !(dt_seconds > 0.0) || self.is_settled() {
            return self.position;
        }

        let SpringConfig {
            stiffness,
            damping,
            mass,
        } = self.config;
        let mass = if mass > 0.0 { mass } else { 1.0 };
        let mut remaining = dt_seconds.min(SPRING_MAX_FRAME_SECONDS);

        while remaining > 0.0 {
            let h = remaining.min(SPRING_SUBSTEP_SECONDS);
            let spring_force = -stiffness * (self.position - self.target);
            let damping_force = -damping * self.velocity;
            self.velocity += (spring_force + damping_force) / mass * h;
            self.position += self.velocity * h;
            remaining -= h;
        }

        if self.is_settled() {
            self.position = self.target;
            self.velocity = 0.0;
        }

        self.position
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Counter {
    pub target: u32,
    pub duration_ms: f64,
}

impl Counter {
    pub const fn new(target: u32, duration_ms: f64) -> Self {
        Self {
            target,
            duration_ms,
        }
    }

    pub fn value_at(&self, elapsed_ms: f64) -> u32 {
        if self.duration_ms <= 0.0 {
            return self.target;
        }

        let eased = ease_out_cubic(elapsed_ms / self.duration_ms);
        (f64::from(self.target) * eased).floor() as u32
    }

    pub fn is_done(&self, elapsed_ms: f64) -> bool {
        elapsed_ms >= self.duration_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interpolate_clamps_at_input_extremes() {
        assert_eq!(interpolate(-500.0, (-200.0, 200.0), (-7.0, 7.0)), -7.0);
        assert_eq!(interpolate(500.0, (-200.0, 200.0), (-7.0, 7.0)), 7.0);
        assert_eq!(interpolate(0.0, (-200.0, 200.0), (-7.0, 7.0)), 0.0);
        assert!((interpolate(0.5, (0.0, 1.0), (1.0, 0.94)) - 0.97).abs() < 1e-12);
    }

    #[test]
    fn interpolate_with_degenerate_range_returns_output_start() {
        assert_eq!(interpolate(3.0, (1.0, 1.0), (0.0, 10.0)), 0.0);
        assert_eq!(interpolate(f64::NAN, (0.0, 1.0), (2.0, 3.0)), 2.0);
    }

    #[test]
    fn critical_spring_has_unit_damping_ratio() {
        let config = SpringConfig::critical(80.0);
        let ratio = config.damping / (2.0 * (config.stiffness * config.mass).sqrt());
        assert!((ratio - 1.0).abs() < 1e-12);
    }

    #[test]
    fn critically_damped_spring_settles_without_overshoot() {
        let mut spring = Spring::new(SpringConfig::critical(120.0), 0.0);
        spring.set_target(100.0);

        let mut max_seen: f64 = 0.0;
        let mut last = 0.0;
        for _ in 0..240 {
            last = spring.step(1.0 / 60.0);
            max_seen = max_seen.max(last);
        }

        assert!(max_seen <= 100.0 + SPRING_REST_DELTA);
        assert!(spring.is_settled());
        assert_eq!(last, 100.0);
    }

    #[test]
    fn spring_trails_target_after_one_frame() {
        let mut spring = Spring::new(SpringConfig::new(80.0, 25.0), 0.0);
        spring.set_target(300.0);

        let first = spring.step(1.0 / 60.0);
        assert!(first > 0.0 && first < 300.0);
    }

    #[test]
    fn spring_ignores_non_positive_steps() {
        let mut spring = Spring::new(SpringConfig::new(60.0, 20.0), 5.0);
        spring.set_target(10.0);
        assert_eq!(spring.step(0.0), 5.0);
        assert_eq!(spring.step(-1.0), 5.0);
        assert_eq!(spring.step(f64::NAN), 5.0);
    }

    #[test]
    fn counter_reaches_target_and_floors_midway() {
        let counter = Counter::new(12, 1_300.0);
        assert_eq!(counter.value_at(0.0), 0);
        assert_eq!(counter.value_at(1_300.0), 12);
        assert_eq!(counter.value_at(5_000.0), 12);

        let midway = counter.value_at(650.0);
        assert!(midway > 6 && midway < 12);
        assert!(!counter.is_done(1_299.0));
        assert!(counter.is_done(1_300.0));
    }
}
