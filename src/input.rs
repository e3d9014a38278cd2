//! Wheel input: scoped listener registration and scroll gesture recognition.
//!
//! Surfaces that want wheel input (the 3D canvas, the 2D detail page)
//! register with the `WheelRouter` and hold the returned
//! `WheelSubscription` for as long as they are mounted. Dropping the
//! subscription removes the registration, so unmount/remount cycles never
//! leave stale listeners behind.
//!
//! `ScrollGestures` turns raw wheel deltas into navigation intents:
//! - continued downward scroll on the canvas while a section is open in 3D
//!   → `EnterDetail` (one-shot, then a cooldown swallows the rest of the
//!   gesture)
//! - upward scroll on the detail page while it is scrolled to the very top
//!   → `LeaveDetail`

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crate::navigation::{NavIntent, NavState, ViewMode};

/// Wheel delta in page convention: positive `delta_y` scrolls down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelEvent {
    pub delta_y: f32,
}

/// Surfaces that can own wheel input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceKind {
    Canvas,
    DetailPanel,
}

// ─── Listener scoping ────────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct Registry {
    next_id: u64,
    /// Registration order; the last entry is the topmost surface.
    entries: Vec<(u64, SurfaceKind)>,
}

/// Routes wheel events to the topmost mounted surface.
#[derive(Debug, Clone, Default)]
pub struct WheelRouter {
    registry: Rc<RefCell<Registry>>,
}

/// Registration handle. Dropping it unregisters the surface.
#[derive(Debug)]
pub struct WheelSubscription {
    id: u64,
    surface: SurfaceKind,
    registry: Rc<RefCell<Registry>>,
}

impl WheelSubscription {
    pub fn surface(&self) -> SurfaceKind {
        self.surface
    }
}

impl Drop for WheelSubscription {
    fn drop(&mut self) {
        let mut reg = self.registry.borrow_mut();
        reg.entries.retain(|(id, _)| *id != self.id);
        log::debug!("wheel listener {} ({:?}) released", self.id, self.surface);
    }
}

impl WheelRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, surface: SurfaceKind) -> WheelSubscription {
        let mut reg = self.registry.borrow_mut();
        let id = reg.next_id;
        reg.next_id += 1;
        reg.entries.push((id, surface));
        log::debug!("wheel listener {} ({:?}) attached", id, surface);
        WheelSubscription {
            id,
            surface,
            registry: Rc::clone(&self.registry),
        }
    }

    /// The surface that receives the next wheel event, if any is mounted.
    pub fn target(&self) -> Option<SurfaceKind> {
        self.registry.borrow().entries.last().map(|(_, s)| *s)
    }

    pub fn listener_count(&self) -> usize {
        self.registry.borrow().entries.len()
    }
}

// ─── Gesture recognition ─────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct GestureConfig {
    /// Accumulated downward delta (points) needed to open the detail page.
    pub enter_threshold: f32,
    /// Quiet period after a transition during which wheel input is ignored.
    pub cooldown: Duration,
    /// Accumulated delta decays if no wheel event arrives for this long.
    pub gesture_gap: Duration,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            enter_threshold: 60.0,
            cooldown: Duration::from_millis(900),
            gesture_gap: Duration::from_millis(250),
        }
    }
}

/// Scroll gesture state machine.
#[derive(Debug, Clone)]
pub struct ScrollGestures {
    cfg: GestureConfig,
    accumulated_down: f32,
    last_event: Option<Duration>,
    cooldown_until: Option<Duration>,
}

impl ScrollGestures {
    pub fn new(cfg: GestureConfig) -> Self {
        Self {
            cfg,
            accumulated_down: 0.0,
            last_event: None,
            cooldown_until: None,
        }
    }

    /// Process one wheel event delivered to `surface`.
    ///
    /// `panel_offset` is the detail page's current scroll offset (0 = top).
    /// `now` is the time since mount.
    pub fn on_wheel(
        &mut self,
        event: WheelEvent,
        surface: SurfaceKind,
        nav: NavState,
        panel_offset: f32,
        now: Duration,
    ) -> Option<NavIntent> {
        if let Some(until) = self.cooldown_until {
            if now < until {
                self.last_event = Some(now);
                return None;
            }
            self.cooldown_until = None;
        }

        if let Some(last) = self.last_event {
            if now.saturating_sub(last) > self.cfg.gesture_gap {
                self.accumulated_down = 0.0;
            }
        }
        self.last_event = Some(now);

        let intent = match (surface, nav) {
            (
                SurfaceKind::Canvas,
                NavState::Section {
                    view: ViewMode::ThreeD,
                    ..
                },
            ) => {
                if event.delta_y > 0.0 {
                    self.accumulated_down += event.delta_y;
                } else {
                    self.accumulated_down = 0.0;
                }
                if self.accumulated_down >= self.cfg.enter_threshold {
                    Some(NavIntent::EnterDetail)
                } else {
                    None
                }
            }
            (
                SurfaceKind::DetailPanel,
                NavState::Section {
                    view: ViewMode::TwoD,
                    ..
                },
            ) => {
                self.accumulated_down = 0.0;
                if event.delta_y < 0.0 && panel_offset == 0.0 {
                    Some(NavIntent::LeaveDetail)
                } else {
                    None
                }
            }
            _ => {
                self.accumulated_down = 0.0;
                None
            }
        };

        if intent.is_some() {
            self.accumulated_down = 0.0;
            self.cooldown_until = Some(now + self.cfg.cooldown);
        }
        intent
    }
}

impl Default for ScrollGestures {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::Section;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn open(view: ViewMode) -> NavState {
        NavState::Section {
            section: Section::Projects,
            view,
        }
    }

    fn wheel(d: f32) -> WheelEvent {
        WheelEvent { delta_y: d }
    }

    #[test]
    fn subscriptions_release_on_drop() {
        let router = WheelRouter::new();
        let _canvas = router.subscribe(SurfaceKind::Canvas);
        for _ in 0..50 {
            let panel = router.subscribe(SurfaceKind::DetailPanel);
            assert_eq!(router.target(), Some(SurfaceKind::DetailPanel));
            drop(panel);
        }
        assert_eq!(router.listener_count(), 1);
        assert_eq!(router.target(), Some(SurfaceKind::Canvas));
    }

    #[test]
    fn no_target_when_nothing_mounted() {
        let router = WheelRouter::new();
        {
            let _c = router.subscribe(SurfaceKind::Canvas);
            assert_eq!(router.listener_count(), 1);
        }
        assert_eq!(router.target(), None);
    }

    #[test]
    fn continued_scroll_down_enters_detail() {
        let mut g = ScrollGestures::default();
        let nav = open(ViewMode::ThreeD);
        assert_eq!(g.on_wheel(wheel(30.0), SurfaceKind::Canvas, nav, 0.0, ms(0)), None);
        assert_eq!(
            g.on_wheel(wheel(30.0), SurfaceKind::Canvas, nav, 0.0, ms(16)),
            Some(NavIntent::EnterDetail)
        );
    }

    #[test]
    fn scroll_down_at_center_does_nothing() {
        let mut g = ScrollGestures::default();
        for i in 0..10 {
            let r = g.on_wheel(wheel(100.0), SurfaceKind::Canvas, NavState::Center, 0.0, ms(i * 16));
            assert_eq!(r, None);
        }
    }

    #[test]
    fn one_gesture_cannot_retrigger() {
        let mut g = ScrollGestures::default();
        let nav = open(ViewMode::ThreeD);
        let mut fired = 0;
        // 500 ms of continuous scrolling
        for i in 0..30u64 {
            if g
                .on_wheel(wheel(40.0), SurfaceKind::Canvas, nav, 0.0, ms(i * 16))
                .is_some()
            {
                fired += 1;
            }
        }
        assert_eq!(fired, 1);
    }

    #[test]
    fn slow_ticks_do_not_accumulate_across_gaps() {
        let mut g = ScrollGestures::default();
        let nav = open(ViewMode::ThreeD);
        for i in 0..5u64 {
            let r = g.on_wheel(wheel(20.0), SurfaceKind::Canvas, nav, 0.0, ms(i * 1000));
            assert_eq!(r, None);
        }
    }

    #[test]
    fn scroll_up_at_top_leaves_detail() {
        let mut g = ScrollGestures::default();
        let nav = open(ViewMode::TwoD);
        assert_eq!(
            g.on_wheel(wheel(-10.0), SurfaceKind::DetailPanel, nav, 0.0, ms(0)),
            Some(NavIntent::LeaveDetail)
        );
    }

    #[test]
    fn scroll_up_with_offset_stays_in_detail() {
        let mut g = ScrollGestures::default();
        let nav = open(ViewMode::TwoD);
        assert_eq!(
            g.on_wheel(wheel(-10.0), SurfaceKind::DetailPanel, nav, 0.5, ms(0)),
            None
        );
        assert_eq!(
            g.on_wheel(wheel(-10.0), SurfaceKind::DetailPanel, nav, 240.0, ms(16)),
            None
        );
    }

    #[test]
    fn cooldown_blocks_immediate_exit_after_entering() {
        let mut g = ScrollGestures::default();
        let entered = g.on_wheel(wheel(80.0), SurfaceKind::Canvas, open(ViewMode::ThreeD), 0.0, ms(0));
        assert_eq!(entered, Some(NavIntent::EnterDetail));
        let nav = open(ViewMode::TwoD);
        assert_eq!(
            g.on_wheel(wheel(-10.0), SurfaceKind::DetailPanel, nav, 0.0, ms(100)),
            None
        );
        assert_eq!(
            g.on_wheel(wheel(-10.0), SurfaceKind::DetailPanel, nav, 0.0, ms(1200)),
            Some(NavIntent::LeaveDetail)
        );
    }
}
