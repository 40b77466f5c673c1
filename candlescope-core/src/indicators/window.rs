//! Rolling-window accumulator.
//!
//! Used by the ADX engine so every sliding sum is O(1) per step: push the
//! newest value, drop the oldest.
//!
//! Add-then-subtract leaves rounding residue behind. A window holding only
//! zeros therefore reports exactly 0.0, and a non-negative accumulator
//! never reports a sum below zero.

use std::collections::VecDeque;

#[derive(Debug, Clone)]
pub struct RollingSum {
    window: usize,
    values: VecDeque<f64>,
    sum: f64,
    non_zero: usize,
    non_negative: bool,
}

impl RollingSum {
    /// `window` must be at least 1; callers validate it first.
    pub fn new(window: usize) -> Self {
        debug_assert!(window >= 1, "rolling window must be >= 1");
        Self {
            window,
            values: VecDeque::with_capacity(window + 1),
            sum: 0.0,
            non_zero: 0,
            non_negative: false,
        }
    }

    /// Accumulator for inputs that are never negative (ranges, movements).
    pub fn non_negative(window: usize) -> Self {
        Self {
            non_negative: true,
            ..Self::new(window)
        }
    }

    /// Add a value; returns the window sum once the window is full.
    pub fn push(&mut self, value: f64) -> Option<f64> {
        self.values.push_back(value);
        self.sum += value;
        if value != 0.0 {
            self.non_zero += 1;
        }
        if self.values.len() > self.window {
            if let Some(oldest) = self.values.pop_front() {
                self.sum -= oldest;
                if oldest != 0.0 {
                    self.non_zero -= 1;
                }
            }
        }
        if self.non_zero == 0 {
            self.sum = 0.0;
        }
        self.is_full().then(|| self.sum())
    }

    /// Add a value; returns the window mean once the window is full.
    pub fn push_mean(&mut self, value: f64) -> Option<f64> {
        self.push(value).map(|sum| sum / self.window as f64)
    }

    pub fn is_full(&self) -> bool {
        self.values.len() == self.window
    }

    pub fn sum(&self) -> f64 {
        if self.non_negative {
            self.sum.max(0.0)
        } else {
            self.sum
        }
    }
}
