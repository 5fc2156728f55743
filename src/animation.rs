// Counter Animation Module
// Tick-driven count-up state for KPI cards.

use crate::metrics::MetricValue;
use std::time::Duration;

/// Default delay between animation frames
pub const DEFAULT_TICK_MS: u64 = 20;

/// Default divisor used to derive the per-tick step from the target value
pub const DEFAULT_STEPS: u64 = 50;

/// Smallest increment of a floating-point counter
const MIN_FLOAT_STEP: f64 = 0.01;

/// Timing and granularity of the count-up animation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationConfig {
    /// Delay after each numeric frame
    pub tick: Duration,
    /// Divisor for the step size (target / steps)
    pub steps: u64,
}

impl AnimationConfig {
    pub fn new(tick_ms: u64, steps: u64) -> Self {
        Self {
            tick: Duration::from_millis(tick_ms),
            steps: steps.max(1),
        }
    }

    /// No delay between frames
    pub fn instant() -> Self {
        Self::new(0, DEFAULT_STEPS)
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_MS, DEFAULT_STEPS)
    }
}

/// Per-tick increment for an integer counter: `max(1, value / steps)`
pub fn integer_step(value: u64, steps: u64) -> u64 {
    (value / steps.max(1)).max(1)
}

/// Per-tick increment for a float counter: `max(0.01, value / steps)`
pub fn float_step(value: f64, steps: u64) -> f64 {
    (value / steps.max(1) as f64).max(MIN_FLOAT_STEP)
}

#[derive(Debug, Clone, PartialEq)]
enum Counter {
    Integer { current: u64, target: u64, step: u64 },
    Float { current: f64, target: f64, step: f64 },
    Text(String),
}

/// Displayed value of one card, advanced one frame per tick
#[derive(Debug, Clone, PartialEq)]
pub struct CounterState {
    counter: Counter,
    emitted: bool,
    finished: bool,
}

impl CounterState {
    pub fn new(value: &MetricValue, steps: u64) -> Self {
        let counter = match value {
            MetricValue::Integer(target) => Counter::Integer {
                current: 0,
                target: *target,
                step: integer_step(*target, steps),
            },
            MetricValue::Float(target) => Counter::Float {
                current: 0.0,
                target: *target,
                step: float_step(*target, steps),
            },
            MetricValue::Text(text) => Counter::Text(text.clone()),
        };
        Self {
            counter,
            emitted: false,
            finished: false,
        }
    }

    /// Current display text. Before the first tick this is the baseline.
    pub fn display(&self) -> String {
        match &self.counter {
            Counter::Integer { current, .. } => format_thousands(*current),
            Counter::Float { current, .. } => format!("{:.2}", current),
            Counter::Text(text) => text.clone(),
        }
    }

    /// Display text of the final value
    pub fn final_display(&self) -> String {
        match &self.counter {
            Counter::Integer { target, .. } => format_thousands(*target),
            Counter::Float { target, .. } => format!("{:.2}", target),
            Counter::Text(text) => text.clone(),
        }
    }

    pub fn is_animated(&self) -> bool {
        !matches!(self.counter, Counter::Text(_))
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Advance one frame and return the new display, or `None` once the
    /// final value has been shown.
    ///
    /// Values that are already at or below the baseline produce exactly one
    /// frame showing the final value.
    pub fn tick(&mut self) -> Option<String> {
        if self.finished {
            return None;
        }

        let advanced = match &mut self.counter {
            Counter::Integer {
                current,
                target,
                step,
            } => {
                if *current < *target {
                    *current = current.saturating_add(*step).min(*target);
                    true
                } else {
                    *current = *target;
                    false
                }
            }
            Counter::Float {
                current,
                target,
                step,
            } => {
                if *current < *target {
                    *current += *step;
                    if *current > *target {
                        *current = *target;
                    }
                    true
                } else {
                    *current = *target;
                    false
                }
            }
            Counter::Text(_) => false,
        };

        if !advanced {
            self.finished = true;
            if self.emitted {
                return None;
            }
        }

        self.emitted = true;
        if advanced && self.at_target() {
            self.finished = true;
        }
        Some(self.display())
    }

    fn at_target(&self) -> bool {
        match &self.counter {
            Counter::Integer { current, target, .. } => current >= target,
            Counter::Float { current, target, .. } => current >= target,
            Counter::Text(_) => true,
        }
    }
}

impl Iterator for CounterState {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        self.tick()
    }
}

/// All frames of a card's animation, in order
pub fn frames(value: &MetricValue, steps: u64) -> Vec<String> {
    CounterState::new(value, steps).collect()
}

/// Format an integer with comma thousands separators
pub fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
