//! Interactive session: controls in, presentations out.
//!
//! Every input change and every animation tick rebuilds the full
//! [`Snapshot`] from the current controls and hands it to the sink. The only
//! state carried between recomputes is the control values and the animation
//! clock.

use std::time::Instant;

use pv_model::{Snapshot, recompute};
use tracing::{debug, info};

use crate::animation::{AnimationDriver, advance_time};
use crate::controls::{ControlState, ParameterSource};
use crate::present::{Presentation, PresentationSink};

pub struct Session<S: PresentationSink> {
    controls: ControlState,
    animation: AnimationDriver,
    latest: Snapshot,
    sink: S,
}

impl<S: PresentationSink> Session<S> {
    /// Session at the default controls.
    pub fn new(sink: S) -> Self {
        Self::with_controls(ControlState::default(), sink)
    }

    pub fn with_controls(controls: ControlState, sink: S) -> Self {
        Self::with_parts(controls, AnimationDriver::default(), sink)
    }

    /// Session with a custom animation cadence.
    pub fn with_parts(controls: ControlState, animation: AnimationDriver, sink: S) -> Self {
        let latest = recompute(controls.read());
        let mut session = Self {
            controls,
            animation,
            latest,
            sink,
        };
        session.publish();
        session
    }

    pub fn controls(&self) -> &ControlState {
        &self.controls
    }

    pub fn animation(&self) -> &AnimationDriver {
        &self.animation
    }

    pub fn latest(&self) -> &Snapshot {
        &self.latest
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Change the controls, then recompute.
    pub fn update(&mut self, edit: impl FnOnce(&mut ControlState)) -> &Snapshot {
        edit(&mut self.controls);
        self.refresh();
        &self.latest
    }

    /// Replace every control at once, e.g. after loading a scenario.
    pub fn replace_controls(&mut self, controls: ControlState) -> &Snapshot {
        self.update(|c| *c = controls)
    }

    /// Stop the animation and restore the default controls.
    pub fn reset(&mut self) -> &Snapshot {
        self.stop_animation();
        info!("Resetting controls to defaults");
        self.replace_controls(ControlState::default())
    }

    pub fn start_animation(&mut self, now: Instant) {
        if let Some(start_h) = self.animation.start(now) {
            info!(start_h, "Animation started");
            self.update(|c| c.time_of_day_h = start_h);
        }
    }

    pub fn stop_animation(&mut self) {
        if self.animation.stop() {
            info!(
                time_h = self.controls.time_of_day_h,
                "Animation stopped"
            );
        }
    }

    pub fn toggle_animation(&mut self, now: Instant) {
        if self.animation.is_running() {
            self.stop_animation();
        } else {
            self.start_animation(now);
        }
    }

    /// Apply every animation tick due at `now`, recomputing after each one.
    /// Returns the number of ticks applied.
    pub fn poll(&mut self, now: Instant) -> u32 {
        let ticks = self.animation.poll(now);
        let step_h = self.animation.step_h();
        for _ in 0..ticks {
            self.update(|c| c.time_of_day_h = advance_time(c.time_of_day_h, step_h));
        }
        ticks
    }

    fn refresh(&mut self) {
        self.latest = recompute(self.controls.read());
        self.publish();
    }

    fn publish(&mut self) {
        debug!(
            time_h = self.latest.params.time_of_day_h,
            power_w = self.latest.power.watts(),
            daily_kwh = self.latest.financial.daily_energy_kwh(),
            "Recomputed"
        );
        let presentation = Presentation::from_snapshot(&self.latest);
        self.sink.present(&presentation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{CYCLE_START_H, TICK_INTERVAL};
    use crate::present::LatestPresentation;
    use pv_model::SimulationParameters;

    #[test]
    fn new_session_presents_defaults() {
        let session = Session::new(LatestPresentation::default());
        assert_eq!(session.sink().count(), 1);
        assert_eq!(session.latest().params, SimulationParameters::default());
    }

    #[test]
    fn every_update_presents() {
        let mut session = Session::new(LatestPresentation::default());
        session.update(|c| c.cloud_pct = 50.0);
        session.update(|c| c.angle_deg = 30.0);
        assert_eq!(session.sink().count(), 3);
        assert_eq!(session.latest().params.cloud_cover, 0.5);
        let shown = session.sink().get().unwrap();
        assert_eq!(shown.readouts.angle, "30°");
    }

    #[test]
    fn animation_starts_at_cycle_start_and_ticks() {
        let t0 = Instant::now();
        let mut session = Session::new(LatestPresentation::default());
        session.start_animation(t0);
        assert_eq!(session.controls().time_of_day_h, CYCLE_START_H);

        assert_eq!(session.poll(t0 + TICK_INTERVAL), 1);
        assert_eq!(session.controls().time_of_day_h, 5.25);
        assert_eq!(session.latest().params.time_of_day_h, 5.25);

        session.toggle_animation(t0 + TICK_INTERVAL);
        assert!(!session.animation().is_running());
        assert_eq!(session.poll(t0 + TICK_INTERVAL * 10), 0);
        assert_eq!(session.controls().time_of_day_h, 5.25);
    }

    #[test]
    fn reset_stops_animation_and_restores_defaults() {
        let t0 = Instant::now();
        let mut session = Session::new(LatestPresentation::default());
        let pristine = session.latest().clone();
        session.update(|c| c.area_m2 = 40.0);
        session.start_animation(t0);
        session.poll(t0 + TICK_INTERVAL * 3);

        session.reset();
        assert!(!session.animation().is_running());
        assert_eq!(session.controls(), &ControlState::default());
        assert_eq!(session.latest(), &pristine);
    }
}
