//! Pure viewport math for the scroll panorama.
//!
//! The panorama is a fixed-size surface much wider than the window. The
//! controller maps drag gestures, wheel zoom, jump requests and idle ticks
//! onto a single [`Transform`]; the canvas redraws from whatever the
//! transform currently says. Nothing in here touches the UI toolkit, so the
//! whole gesture model is testable with plain instants.

use std::time::{Duration, Instant};

/// Reference frame length the auto-scroll speed is expressed against.
const REFERENCE_FRAME_MS: f32 = 16.67;

/// Assumed container height when the window has not been measured yet.
pub const DEFAULT_CONTAINER_HEIGHT: f32 = 800.0;

/// Camera over the scroll content: pan offset in screen pixels plus the
/// user zoom factor. The on-screen scale is `fit_scale * scale`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub x: f32,
    pub y: f32,
    pub scale: f32,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        x: 0.0,
        y: 0.0,
        scale: 1.0,
    };
}

/// Pan limits along one axis, with a small overscroll buffer for bounce feel.
#[derive(Debug, Clone, Copy)]
pub struct PanBounds {
    pub min: f32,
    pub max: f32,
    pub buffer: f32,
}

impl PanBounds {
    /// Bounds for content of `content_extent` on-screen pixels inside a
    /// container of `container_extent` pixels. Content shorter than the
    /// container collapses to the single offset that keeps it at the origin.
    pub fn new(container_extent: f32, content_extent: f32, buffer: f32) -> Self {
        PanBounds {
            min: (container_extent - content_extent).min(0.0),
            max: 0.0,
            buffer: buffer.max(0.0),
        }
    }

    /// Clamp an offset into the soft range (buffer included).
    pub fn clamp(&self, value: f32) -> f32 {
        if !value.is_finite() {
            return self.max;
        }
        value.clamp(self.min - self.buffer, self.max + self.buffer)
    }

    /// Clamp an offset into the hard range. Jump targets and wrap points use
    /// this so animations always settle inside the real extent.
    pub fn clamp_hard(&self, value: f32) -> f32 {
        if !value.is_finite() {
            return self.max;
        }
        value.clamp(self.min, self.max)
    }
}

pub fn ease_in_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let u = -2.0 * t + 2.0;
        1.0 - u * u * u / 2.0
    }
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// An in-flight animated jump between two transforms.
#[derive(Debug, Clone, Copy)]
pub struct Jump {
    from: Transform,
    to: Transform,
    started: Instant,
    duration: Duration,
}

impl Jump {
    pub fn new(from: Transform, to: Transform, started: Instant, duration: Duration) -> Self {
        Jump {
            from,
            to,
            started,
            duration,
        }
    }

    /// Sample the animation. Once the duration has elapsed the result is
    /// exactly the target transform, never an interpolated approximation.
    pub fn sample(&self, now: Instant) -> (Transform, bool) {
        let elapsed = now.saturating_duration_since(self.started);
        if self.duration.is_zero() || elapsed >= self.duration {
            return (self.to, true);
        }
        let t = ease_in_out_cubic(elapsed.as_secs_f32() / self.duration.as_secs_f32());
        let transform = Transform {
            x: lerp(self.from.x, self.to.x, t),
            y: lerp(self.from.y, self.to.y, t),
            scale: lerp(self.from.scale, self.to.scale, t),
        };
        (transform, false)
    }
}

/// Outcome of a tick, so the caller knows whether anything moved and
/// whether a jump just settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Quiet,
    AutoScrolled,
    Jumping,
    JumpFinished,
}

/// Geometry and timing knobs, already sanitized by configuration loading.
#[derive(Debug, Clone, Copy)]
pub struct ViewportSettings {
    pub fill_fraction: f32,
    pub overscroll: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
    pub idle_delay: Duration,
    /// Pixels advanced per reference frame while idle-scrolling.
    pub auto_scroll_speed: f32,
}

/// Maps pointer gestures and idle ticks onto the viewport transform.
///
/// Drag interaction and idle auto-scroll are mutually exclusive: every
/// interaction entry point re-asserts the exclusion instead of assuming it.
pub struct ViewportController {
    transform: Transform,
    container_width: f32,
    container_height: f32,
    content_width: f32,
    content_height: f32,
    settings: ViewportSettings,
    dragging: bool,
    auto_scrolling: bool,
    last_interaction: Option<Instant>,
    jump: Option<Jump>,
}

impl ViewportController {
    pub fn new(content_width: f32, content_height: f32, settings: ViewportSettings) -> Self {
        let mut controller = ViewportController {
            transform: Transform::IDENTITY,
            container_width: 0.0,
            container_height: 0.0,
            content_width: content_width.max(1.0),
            content_height: content_height.max(1.0),
            settings,
            dragging: false,
            auto_scrolling: false,
            last_interaction: None,
            jump: None,
        };
        controller.transform.y = controller.centered_y();
        controller
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn is_auto_scrolling(&self) -> bool {
        self.auto_scrolling
    }

    pub fn content(&self) -> (f32, f32) {
        (self.content_width, self.content_height)
    }

    /// Record the measured container. Non-finite or non-positive values are
    /// kept at zero and the default height takes over in `fit_scale`.
    pub fn set_container(&mut self, width: f32, height: f32) {
        self.container_width = if width.is_finite() { width.max(0.0) } else { 0.0 };
        self.container_height = if height.is_finite() { height.max(0.0) } else { 0.0 };
        self.reclamp();
    }

    pub fn set_content(&mut self, width: f32, height: f32) {
        self.content_width = width.max(1.0);
        self.content_height = height.max(1.0);
        self.reclamp();
    }

    fn effective_container_height(&self) -> f32 {
        if self.container_height > 0.0 {
            self.container_height
        } else {
            DEFAULT_CONTAINER_HEIGHT
        }
    }

    /// Scale that fits the content height into the configured fraction of
    /// the container height.
    pub fn fit_scale(&self) -> f32 {
        let target = self.effective_container_height() * self.settings.fill_fraction;
        (target / self.content_height).max(f32::EPSILON)
    }

    /// Total on-screen scale: vertical fit times the user zoom.
    pub fn draw_scale(&self) -> f32 {
        self.fit_scale() * self.transform.scale
    }

    pub fn pan_bounds_x(&self) -> PanBounds {
        PanBounds::new(
            self.container_width,
            self.content_width * self.draw_scale(),
            self.settings.overscroll,
        )
    }

    fn pan_bounds_y(&self) -> PanBounds {
        PanBounds::new(
            self.effective_container_height(),
            self.content_height * self.draw_scale(),
            0.0,
        )
    }

    fn centered_y(&self) -> f32 {
        (self.effective_container_height() - self.content_height * self.draw_scale()) / 2.0
    }

    fn reclamp(&mut self) {
        self.transform.x = self.pan_bounds_x().clamp(self.transform.x);
        let bounds_y = self.pan_bounds_y();
        if bounds_y.min >= bounds_y.max {
            // Content no taller than the container: keep it vertically centered.
            self.transform.y = self.centered_y();
        } else {
            self.transform.y = bounds_y.clamp(self.transform.y);
        }
    }

    /// Fraction of the panorama the left window edge currently sits at.
    pub fn offset_fraction(&self) -> f32 {
        let visible = self.content_width * self.draw_scale();
        if visible <= 0.0 {
            return 0.0;
        }
        (-self.transform.x / visible).clamp(0.0, 1.0)
    }

    /// Fraction of the panorama covered by the window, for the minimap.
    pub fn viewport_fraction(&self) -> f32 {
        let visible = self.content_width * self.draw_scale();
        if visible <= 0.0 {
            return 1.0;
        }
        (self.container_width / visible).clamp(0.0, 1.0)
    }

    pub fn begin_drag(&mut self, now: Instant) {
        self.dragging = true;
        // Re-assert the exclusion on every interaction start.
        self.auto_scrolling = false;
        self.jump = None;
        self.last_interaction = Some(now);
    }

    pub fn on_drag(&mut self, delta_x: f32, delta_y: f32, now: Instant) {
        if !delta_x.is_finite() || !delta_y.is_finite() {
            return;
        }
        self.transform.x = self.pan_bounds_x().clamp(self.transform.x + delta_x);
        let bounds_y = self.pan_bounds_y();
        if bounds_y.min < bounds_y.max {
            self.transform.y = bounds_y.clamp(self.transform.y + delta_y);
        }
        self.last_interaction = Some(now);
        self.auto_scrolling = false;
    }

    pub fn end_drag(&mut self, now: Instant) {
        self.dragging = false;
        self.last_interaction = Some(now);
    }

    /// Any pointer movement counts as activity and resets the idle timer.
    pub fn pointer_activity(&mut self, now: Instant) {
        self.last_interaction = Some(now);
        self.auto_scrolling = false;
    }

    /// Multiply the zoom by `factor`, keeping the content point under the
    /// cursor fixed on screen.
    pub fn zoom_by(&mut self, factor: f32, cursor_x: f32, cursor_y: f32, now: Instant) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        let old_scale = self.draw_scale();
        let new_zoom = (self.transform.scale * factor)
            .clamp(self.settings.min_zoom, self.settings.max_zoom);
        if (new_zoom - self.transform.scale).abs() <= f32::EPSILON {
            self.pointer_activity(now);
            return;
        }
        let anchor_x = (cursor_x - self.transform.x) / old_scale;
        let anchor_y = (cursor_y - self.transform.y) / old_scale;
        self.transform.scale = new_zoom;
        let new_scale = self.draw_scale();
        self.transform.x = cursor_x - anchor_x * new_scale;
        self.transform.y = cursor_y - anchor_y * new_scale;
        self.jump = None;
        self.auto_scrolling = false;
        self.last_interaction = Some(now);
        self.reclamp();
    }

    /// Animate to the given offset and zoom over `duration`. The target is
    /// hard-clamped at the zoom it will land on, so the animation settles
    /// inside the real extent with no overshoot.
    pub fn request_jump(
        &mut self,
        target_x: f32,
        target_zoom: f32,
        duration: Duration,
        now: Instant,
    ) {
        let zoom = if target_zoom.is_finite() && target_zoom > 0.0 {
            target_zoom.clamp(self.settings.min_zoom, self.settings.max_zoom)
        } else {
            self.transform.scale
        };
        let landing_scale = self.fit_scale() * zoom;
        let bounds = PanBounds::new(
            self.container_width,
            self.content_width * landing_scale,
            self.settings.overscroll,
        );
        let target_y = {
            let extent = self.content_height * landing_scale;
            let container = self.effective_container_height();
            if extent <= container {
                (container - extent) / 2.0
            } else {
                PanBounds::new(container, extent, 0.0).clamp_hard(self.transform.y)
            }
        };
        let target = Transform {
            x: bounds.clamp_hard(target_x),
            y: target_y,
            scale: zoom,
        };
        self.auto_scrolling = false;
        self.last_interaction = Some(now);
        self.jump = Some(Jump::new(self.transform, target, now, duration));
    }

    /// Jump so the given content fraction lands at the horizontal center.
    pub fn center_on(&mut self, fraction: f32, target_zoom: f32, duration: Duration, now: Instant) {
        let zoom = if target_zoom.is_finite() && target_zoom > 0.0 {
            target_zoom.clamp(self.settings.min_zoom, self.settings.max_zoom)
        } else {
            self.transform.scale
        };
        let landing_scale = self.fit_scale() * zoom;
        let target_x =
            self.container_width / 2.0 - fraction.clamp(0.0, 1.0) * self.content_width * landing_scale;
        self.request_jump(target_x, zoom, duration, now);
    }

    /// Advance animations and, after the quiet period, the idle auto-scroll.
    ///
    /// The auto-scroll advances at a constant per-frame rate corrected by the
    /// actual frame delta; on reaching the far edge it wraps back to the
    /// start offset.
    pub fn tick(&mut self, now: Instant, frame_delta: Duration) -> TickOutcome {
        if let Some(jump) = self.jump {
            let (transform, finished) = jump.sample(now);
            self.transform = transform;
            if finished {
                self.jump = None;
                self.last_interaction = Some(now);
                return TickOutcome::JumpFinished;
            }
            return TickOutcome::Jumping;
        }

        // Checked on every tick rather than assumed: a drag in progress
        // always wins over the idle path.
        if self.dragging {
            return TickOutcome::Quiet;
        }

        let quiet = match self.last_interaction {
            None => true,
            Some(at) => now.saturating_duration_since(at) >= self.settings.idle_delay,
        };
        if !quiet {
            self.auto_scrolling = false;
            return TickOutcome::Quiet;
        }

        self.auto_scrolling = true;
        let frames = frame_delta.as_secs_f32() * 1000.0 / REFERENCE_FRAME_MS;
        let step = self.settings.auto_scroll_speed * frames;
        let bounds = self.pan_bounds_x();
        let next = self.transform.x - step;
        self.transform.x = if next < bounds.min {
            bounds.max
        } else {
            next
        };
        TickOutcome::AutoScrolled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> ViewportSettings {
        ViewportSettings {
            fill_fraction: 0.8,
            overscroll: 120.0,
            min_zoom: 1.0,
            max_zoom: 4.0,
            idle_delay: Duration::from_secs(10),
            auto_scroll_speed: 7.5,
        }
    }

    fn controller() -> ViewportController {
        let mut c = ViewportController::new(12_000.0, 1_000.0, settings());
        c.set_container(1_280.0, 800.0);
        c
    }

    #[test]
    fn drag_offsets_stay_within_buffered_bounds() {
        let mut c = controller();
        let now = Instant::now();
        c.begin_drag(now);
        for i in 0..200 {
            let delta = if i % 3 == 0 { -5_000.0 } else { 1_700.0 };
            c.on_drag(delta, 0.0, now);
            let bounds = c.pan_bounds_x();
            let x = c.transform().x;
            assert!(
                x >= bounds.min - bounds.buffer - 1e-3 && x <= bounds.max + bounds.buffer + 1e-3,
                "offset {x} escaped [{}, {}]",
                bounds.min - bounds.buffer,
                bounds.max + bounds.buffer
            );
        }
    }

    #[test]
    fn jump_lands_exactly_on_target() {
        let mut c = controller();
        let now = Instant::now();
        c.request_jump(-2_400.0, 1.5, Duration::from_millis(1_200), now);

        let midway = now + Duration::from_millis(600);
        assert_eq!(c.tick(midway, Duration::from_millis(16)), TickOutcome::Jumping);

        let done = now + Duration::from_millis(1_201);
        assert_eq!(c.tick(done, Duration::from_millis(16)), TickOutcome::JumpFinished);
        let t = c.transform();
        assert!((t.x - -2_400.0).abs() < f32::EPSILON, "x settled at {}", t.x);
        assert!((t.scale - 1.5).abs() < f32::EPSILON, "scale settled at {}", t.scale);
    }

    #[test]
    fn zero_duration_jump_settles_immediately() {
        let mut c = controller();
        let now = Instant::now();
        c.request_jump(-500.0, 1.0, Duration::ZERO, now);
        assert_eq!(c.tick(now, Duration::from_millis(16)), TickOutcome::JumpFinished);
        assert!((c.transform().x - -500.0).abs() < f32::EPSILON);
    }

    #[test]
    fn auto_scroll_never_activates_while_dragging() {
        let mut c = controller();
        let now = Instant::now();
        c.begin_drag(now);
        let much_later = now + Duration::from_secs(60);
        assert_eq!(c.tick(much_later, Duration::from_millis(16)), TickOutcome::Quiet);
        assert!(!c.is_auto_scrolling());
    }

    #[test]
    fn pointer_activity_resets_idle_timer() {
        let mut c = controller();
        let now = Instant::now();
        c.pointer_activity(now);
        let almost = now + Duration::from_secs(9);
        assert_eq!(c.tick(almost, Duration::from_millis(16)), TickOutcome::Quiet);

        c.pointer_activity(almost);
        let would_have_fired = now + Duration::from_secs(11);
        assert_eq!(
            c.tick(would_have_fired, Duration::from_millis(16)),
            TickOutcome::Quiet,
            "activity at t=9s must push the idle deadline past t=11s"
        );
        let fires = almost + Duration::from_secs(10);
        assert_eq!(c.tick(fires, Duration::from_millis(16)), TickOutcome::AutoScrolled);
    }

    #[test]
    fn idle_scroll_is_frame_delta_corrected() {
        let mut c1 = controller();
        let mut c2 = controller();
        let now = Instant::now();
        let later = now + Duration::from_secs(11);

        c1.tick(later, Duration::from_millis(16));
        c2.tick(later, Duration::from_millis(32));
        let step1 = -c1.transform().x;
        let step2 = -c2.transform().x;
        assert!(
            (step2 - 2.0 * step1).abs() < 0.01,
            "a doubled frame delta should double the advance ({step1} vs {step2})"
        );
    }

    #[test]
    fn idle_scroll_wraps_to_start_at_far_edge() {
        let mut c = controller();
        let now = Instant::now();
        // Park just shy of the far edge, then let the idle scroll run past it.
        let bounds = c.pan_bounds_x();
        c.begin_drag(now);
        c.on_drag(bounds.min - c.transform().x, 0.0, now);
        c.end_drag(now);

        let later = now + Duration::from_secs(11);
        c.tick(later, Duration::from_secs(1));
        assert!(
            (c.transform().x - bounds.max).abs() < f32::EPSILON,
            "exhausted auto-scroll must wrap to the start offset, got {}",
            c.transform().x
        );
    }

    #[test]
    fn unmeasured_container_falls_back_to_default_height() {
        let c = ViewportController::new(12_000.0, 1_000.0, settings());
        let scale = c.fit_scale();
        assert!(scale.is_finite() && scale > 0.0);
        assert!((scale - DEFAULT_CONTAINER_HEIGHT * 0.8 / 1_000.0).abs() < 1e-4);
    }

    #[test]
    fn short_content_clamps_to_single_offset() {
        let mut c = ViewportController::new(600.0, 1_000.0, ViewportSettings {
            overscroll: 0.0,
            ..settings()
        });
        c.set_container(1_280.0, 800.0);
        let now = Instant::now();
        c.begin_drag(now);
        c.on_drag(-900.0, 0.0, now);
        assert!((c.transform().x - 0.0).abs() < f32::EPSILON);
        c.on_drag(900.0, 0.0, now);
        assert!((c.transform().x - 0.0).abs() < f32::EPSILON);
    }

    #[test]
    fn zoom_clamps_to_configured_range() {
        let mut c = controller();
        let now = Instant::now();
        c.zoom_by(100.0, 640.0, 400.0, now);
        assert!((c.transform().scale - 4.0).abs() < f32::EPSILON);
        c.zoom_by(0.0001, 640.0, 400.0, now);
        assert!((c.transform().scale - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn zoom_keeps_cursor_anchor_fixed() {
        let mut c = controller();
        let now = Instant::now();
        c.begin_drag(now);
        c.on_drag(-1_000.0, 0.0, now);
        c.end_drag(now);

        let cursor = (640.0, 400.0);
        let before = c.transform();
        let scale_before = c.draw_scale();
        let anchor = ((cursor.0 - before.x) / scale_before, (cursor.1 - before.y) / scale_before);

        c.zoom_by(1.5, cursor.0, cursor.1, now);

        let after = c.transform();
        let scale_after = c.draw_scale();
        let reprojected = (
            after.x + anchor.0 * scale_after,
            after.y + anchor.1 * scale_after,
        );
        // Clamping may shift the result at the extents; in the interior the
        // anchor must not move.
        assert!((reprojected.0 - cursor.0).abs() < 1.0, "x anchor drifted to {}", reprojected.0);
    }

    #[test]
    fn ease_curve_is_bounded_and_symmetric() {
        assert!((ease_in_out_cubic(0.0) - 0.0).abs() < f32::EPSILON);
        assert!((ease_in_out_cubic(1.0) - 1.0).abs() < f32::EPSILON);
        assert!((ease_in_out_cubic(0.5) - 0.5).abs() < 1e-4);
        assert!(ease_in_out_cubic(0.25) < 0.25);
        assert!(ease_in_out_cubic(0.75) > 0.75);
    }
}
