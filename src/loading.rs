//! Loading gate.
//!
//! The scene stays hidden behind the loading screen until BOTH the asset
//! loader has settled AND a minimum display time has elapsed since mount.
//! The percentage on screen is a fixed-rate counter, independent of real
//! asset progress.
//!
//! Time is passed in as "elapsed since mount" so the gate is driven by the
//! frame loop and can be stepped deterministically in tests.

use std::time::Duration;

/// Loading screen tuning.
#[derive(Debug, Clone)]
pub struct LoadingConfig {
    /// Minimum time the loading screen stays up.
    pub min_display: Duration,
    /// Counter step interval (1 % per tick).
    pub tick: Duration,
    /// Fade-out duration of the loading screen after reveal.
    pub fade_out: Duration,
}

impl Default for LoadingConfig {
    fn default() -> Self {
        Self {
            min_display: Duration::from_millis(2100),
            tick: Duration::from_millis(20),
            fade_out: Duration::from_millis(600),
        }
    }
}

/// Fired once when the gate opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Revealed {
    pub at: Duration,
}

#[derive(Debug, Clone)]
pub struct LoadingGate {
    cfg: LoadingConfig,
    revealed_at: Option<Duration>,
}

impl LoadingGate {
    pub fn new(cfg: LoadingConfig) -> Self {
        Self {
            cfg,
            revealed_at: None,
        }
    }

    /// Feed the current time and asset signal. Returns `Some` exactly once:
    /// on the first call where both conditions hold.
    pub fn poll(&mut self, elapsed: Duration, assets_ready: bool) -> Option<Revealed> {
        if self.revealed_at.is_some() {
            return None;
        }
        if assets_ready && elapsed >= self.cfg.min_display {
            self.revealed_at = Some(elapsed);
            log::info!("loading complete after {:.2}s", elapsed.as_secs_f32());
            return Some(Revealed { at: elapsed });
        }
        None
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed_at.is_some()
    }

    /// Counter shown on the loading screen, 0..=100.
    pub fn progress_percent(&self, elapsed: Duration) -> u32 {
        let tick = self.cfg.tick.as_millis().max(1);
        (elapsed.as_millis() / tick).min(100) as u32
    }

    /// Loading-screen opacity: 1.0 until reveal, then fades to 0.
    pub fn overlay_alpha(&self, elapsed: Duration) -> f32 {
        match self.revealed_at {
            None => 1.0,
            Some(at) => {
                let fade = self.cfg.fade_out.as_secs_f32();
                if fade <= 0.0 {
                    return 0.0;
                }
                let t = elapsed.saturating_sub(at).as_secs_f32() / fade;
                (1.0 - t).clamp(0.0, 1.0)
            }
        }
    }
}

impl Default for LoadingGate {
    fn default() -> Self {
        Self::new(LoadingConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    /// Step the gate at 10 ms frames, flipping the asset signal at `ready_at`.
    fn reveal_time(ready_at: Duration) -> Duration {
        let mut gate = LoadingGate::default();
        let mut t = Duration::ZERO;
        loop {
            if let Some(r) = gate.poll(t, t >= ready_at) {
                return r.at;
            }
            t += ms(10);
            assert!(t < Duration::from_secs(60));
        }
    }

    #[test]
    fn early_assets_wait_for_minimum_time() {
        let at = reveal_time(ms(500));
        assert_eq!(at, ms(2100));
    }

    #[test]
    fn late_assets_reveal_when_ready() {
        let at = reveal_time(ms(5000));
        assert_eq!(at, ms(5000));
    }

    #[test]
    fn withheld_between_ready_and_minimum() {
        let mut gate = LoadingGate::default();
        assert!(gate.poll(ms(500), true).is_none());
        assert!(gate.poll(ms(1500), true).is_none());
        assert!(gate.poll(ms(2099), true).is_none());
        assert!(gate.poll(ms(2100), true).is_some());
    }

    #[test]
    fn minimum_time_alone_is_not_enough() {
        let mut gate = LoadingGate::default();
        assert!(gate.poll(ms(3000), false).is_none());
        assert!(gate.poll(ms(10_000), false).is_none());
        assert!(!gate.is_revealed());
    }

    #[test]
    fn reveal_fires_once() {
        let mut gate = LoadingGate::default();
        assert!(gate.poll(ms(2200), true).is_some());
        assert!(gate.poll(ms(2300), true).is_none());
        assert!(gate.is_revealed());
    }

    #[test]
    fn counter_reaches_100_after_two_seconds() {
        let gate = LoadingGate::default();
        assert_eq!(gate.progress_percent(Duration::ZERO), 0);
        assert_eq!(gate.progress_percent(ms(1000)), 50);
        assert_eq!(gate.progress_percent(ms(2000)), 100);
        assert_eq!(gate.progress_percent(ms(9000)), 100);
    }

    #[test]
    fn overlay_fades_after_reveal() {
        let mut gate = LoadingGate::default();
        assert_eq!(gate.overlay_alpha(ms(100)), 1.0);
        gate.poll(ms(2100), true);
        assert_eq!(gate.overlay_alpha(ms(2100)), 1.0);
        assert!((gate.overlay_alpha(ms(2400)) - 0.5).abs() < 1e-3);
        assert_eq!(gate.overlay_alpha(ms(3000)), 0.0);
    }
}
