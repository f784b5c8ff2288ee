//! Animation phases driven by the host's frame clock.
//!
//! The animator never schedules frames itself: the owner calls
//! [`Animator::tick`] with the time elapsed since the animation started and
//! redraws while it reports [`AnimationTick::Running`].

use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, PI};
use std::time::Duration;
use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Easing {
    #[default]
    Linear,
    InQuad,
    OutQuad,
    InOutQuad,
    InCubic,
    OutCubic,
    InOutCubic,
    InQuart,
    OutQuart,
    InOutQuart,
    InQuint,
    OutQuint,
    InOutQuint,
    InSine,
    OutSine,
    InOutSine,
    InExpo,
    OutExpo,
    InOutExpo,
    InCirc,
    OutCirc,
    InOutCirc,
    InElastic,
    OutElastic,
    InOutElastic,
    InBack,
    OutBack,
    InOutBack,
    InBounce,
    OutBounce,
    InOutBounce,
}

const BACK_OVERSHOOT: f64 = 1.70158;

impl Easing {
    /// Eased phase for `t = elapsed / duration` in `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        match self {
            Easing::Linear => t,
            Easing::InQuad => t * t,
            Easing::OutQuad => -t * (t - 2.0),
            Easing::InOutQuad => {
                let p = t * 2.0;
                if p < 1.0 {
                    0.5 * p * p
                } else {
                    let p = p - 1.0;
                    -0.5 * (p * (p - 2.0) - 1.0)
                }
            }
            Easing::InCubic => t * t * t,
            Easing::OutCubic => {
                let p = t - 1.0;
                p * p * p + 1.0
            }
            Easing::InOutCubic => {
                let p = t * 2.0;
                if p < 1.0 {
                    0.5 * p * p * p
                } else {
                    let p = p - 2.0;
                    0.5 * (p * p * p + 2.0)
                }
            }
            Easing::InQuart => t.powi(4),
            Easing::OutQuart => -((t - 1.0).powi(4) - 1.0),
            Easing::InOutQuart => {
                let p = t * 2.0;
                if p < 1.0 {
                    0.5 * p.powi(4)
                } else {
                    -0.5 * ((p - 2.0).powi(4) - 2.0)
                }
            }
            Easing::InQuint => t.powi(5),
            Easing::OutQuint => (t - 1.0).powi(5) + 1.0,
            Easing::InOutQuint => {
                let p = t * 2.0;
                if p < 1.0 {
                    0.5 * p.powi(5)
                } else {
                    0.5 * ((p - 2.0).powi(5) + 2.0)
                }
            }
            Easing::InSine => -(t * FRAC_PI_2).cos() + 1.0,
            Easing::OutSine => (t * FRAC_PI_2).sin(),
            Easing::InOutSine => -0.5 * ((PI * t).cos() - 1.0),
            Easing::InExpo => {
                if t == 0.0 {
                    0.0
                } else {
                    2f64.powf(10.0 * (t - 1.0))
                }
            }
            Easing::OutExpo => {
                if t == 1.0 {
                    1.0
                } else {
                    -(2f64.powf(-10.0 * t)) + 1.0
                }
            }
            Easing::InOutExpo => {
                if t == 0.0 {
                    return 0.0;
                }
                if t == 1.0 {
                    return 1.0;
                }
                let p = t * 2.0;
                if p < 1.0 {
                    0.5 * 2f64.powf(10.0 * (p - 1.0))
                } else {
                    0.5 * (-(2f64.powf(-10.0 * (p - 1.0))) + 2.0)
                }
            }
            Easing::InCirc => -((1.0 - t * t).sqrt() - 1.0),
            Easing::OutCirc => {
                let p = t - 1.0;
                (1.0 - p * p).sqrt()
            }
            Easing::InOutCirc => {
                let p = t * 2.0;
                if p < 1.0 {
                    -0.5 * ((1.0 - p * p).sqrt() - 1.0)
                } else {
                    let p = p - 2.0;
                    0.5 * ((1.0 - p * p).sqrt() + 1.0)
                }
            }
            Easing::InElastic => {
                if t == 0.0 {
                    return 0.0;
                }
                if t == 1.0 {
                    return 1.0;
                }
                let (p, s) = elastic_period(0.3);
                let q = t - 1.0;
                -(2f64.powf(10.0 * q) * ((q - s) * (2.0 * PI) / p).sin())
            }
            Easing::OutElastic => {
                if t == 0.0 {
                    return 0.0;
                }
                if t == 1.0 {
                    return 1.0;
                }
                let (p, s) = elastic_period(0.3);
                2f64.powf(-10.0 * t) * ((t - s) * (2.0 * PI) / p).sin() + 1.0
            }
            Easing::InOutElastic => {
                if t == 0.0 {
                    return 0.0;
                }
                let position = t * 2.0;
                if position == 2.0 {
                    return 1.0;
                }
                let (p, s) = elastic_period(0.3 * 1.5);
                let q = position - 1.0;
                if position < 1.0 {
                    -0.5 * (2f64.powf(10.0 * q) * ((q - s) * (2.0 * PI) / p).sin())
                } else {
                    2f64.powf(-10.0 * q) * ((q - s) * (2.0 * PI) / p).sin() * 0.5 + 1.0
                }
            }
            Easing::InBack => {
                let s = BACK_OVERSHOOT;
                t * t * ((s + 1.0) * t - s)
            }
            Easing::OutBack => {
                let s = BACK_OVERSHOOT;
                let p = t - 1.0;
                p * p * ((s + 1.0) * p + s) + 1.0
            }
            Easing::InOutBack => {
                let s = BACK_OVERSHOOT * 1.525;
                let p = t * 2.0;
                if p < 1.0 {
                    0.5 * (p * p * ((s + 1.0) * p - s))
                } else {
                    let p = p - 2.0;
                    0.5 * (p * p * ((s + 1.0) * p + s) + 2.0)
                }
            }
            Easing::InBounce => 1.0 - out_bounce(1.0 - t),
            Easing::OutBounce => out_bounce(t),
            Easing::InOutBounce => {
                if t < 0.5 {
                    (1.0 - out_bounce(1.0 - t * 2.0)) * 0.5
                } else {
                    out_bounce(t * 2.0 - 1.0) * 0.5 + 0.5
                }
            }
        }
    }
}

/// Period and phase shift of the elastic curves for a unit duration.
fn elastic_period(p: f64) -> (f64, f64) {
    (p, p / (2.0 * PI) * 1f64.asin())
}

fn out_bounce(t: f64) -> f64 {
    const K: f64 = 7.5625;
    const D: f64 = 2.75;
    if t < 1.0 / D {
        K * t * t
    } else if t < 2.0 / D {
        let p = t - 1.5 / D;
        K * p * p + 0.75
    } else if t < 2.5 / D {
        let p = t - 2.25 / D;
        K * p * p + 0.9375
    } else {
        let p = t - 2.625 / D;
        K * p * p + 0.984375
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationTick {
    /// Nothing is animating.
    Idle,
    Running,
    /// The last frame of an animation; phases hold their final values.
    Finished,
}

#[derive(Clone, Copy, Debug)]
struct Track {
    duration: Duration,
    easing: Easing,
}

impl Track {
    fn phase(&self, elapsed: Duration) -> f64 {
        if self.duration.is_zero() {
            return self.easing.apply(1.0);
        }
        let elapsed = elapsed.min(self.duration);
        self.easing
            .apply(elapsed.as_secs_f64() / self.duration.as_secs_f64())
    }
}

/// X/Y animation phases in `[0, 1]` (overshooting easings may leave that
/// range mid-animation).
#[derive(Clone, Debug)]
pub struct Animator {
    phase_x: f64,
    phase_y: f64,
    x: Option<Track>,
    y: Option<Track>,
}

impl Default for Animator {
    fn default() -> Self {
        Self::new()
    }
}

impl Animator {
    pub fn new() -> Self {
        Self {
            phase_x: 1.0,
            phase_y: 1.0,
            x: None,
            y: None,
        }
    }

    pub fn phase_x(&self) -> f64 {
        self.phase_x
    }

    pub fn phase_y(&self) -> f64 {
        self.phase_y
    }

    pub fn set_phase_x(&mut self, phase: f64) {
        self.phase_x = phase;
    }

    pub fn set_phase_y(&mut self, phase: f64) {
        self.phase_y = phase;
    }

    pub fn is_running(&self) -> bool {
        self.x.is_some() || self.y.is_some()
    }

    /// Starts animating the axes that have a duration; the others keep their
    /// current phase.
    pub fn animate(
        &mut self,
        x_duration: Option<Duration>,
        y_duration: Option<Duration>,
        easing_x: Easing,
        easing_y: Easing,
    ) {
        debug!(?x_duration, ?y_duration, "starting animation");
        if let Some(duration) = x_duration {
            self.x = Some(Track {
                duration,
                easing: easing_x,
            });
            self.phase_x = 0.0;
        }
        if let Some(duration) = y_duration {
            self.y = Some(Track {
                duration,
                easing: easing_y,
            });
            self.phase_y = 0.0;
        }
    }

    pub fn animate_x(&mut self, duration: Duration, easing: Easing) {
        self.animate(Some(duration), None, easing, Easing::Linear);
    }

    pub fn animate_y(&mut self, duration: Duration, easing: Easing) {
        self.animate(None, Some(duration), Easing::Linear, easing);
    }

    /// Advances both phases to `elapsed` since [`Animator::animate`].
    pub fn tick(&mut self, elapsed: Duration) -> AnimationTick {
        if !self.is_running() {
            return AnimationTick::Idle;
        }

        let mut end = Duration::ZERO;
        if let Some(track) = &self.x {
            self.phase_x = track.phase(elapsed);
            end = end.max(track.duration);
        }
        if let Some(track) = &self.y {
            self.phase_y = track.phase(elapsed);
            end = end.max(track.duration);
        }

        if elapsed >= end {
            self.x = None;
            self.y = None;
            debug!("animation finished");
            AnimationTick::Finished
        } else {
            AnimationTick::Running
        }
    }

    /// Cancels the animation and snaps both phases to 1.
    pub fn stop(&mut self) {
        if self.is_running() {
            debug!("animation stopped");
        }
        self.x = None;
        self.y = None;
        self.phase_x = 1.0;
        self.phase_y = 1.0;
    }
}
