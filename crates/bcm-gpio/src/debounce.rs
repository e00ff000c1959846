//! Debounced push-button input
//!
//! Everything here is built from two primitives: a raw pin read and a
//! relative sleep. There are no interrupts and no buffering; every wait spins
//! or sleeps on the calling thread.
//!
//! The button is assumed active high. Only the pressed level is confirmed by
//! a second sample, so the idle path costs a single read.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::InputPin;
use log::{debug, trace};

use crate::config::Timing;

/// Push-button with click and multi-click detection
pub struct DebouncedInput<P, D> {
    pin: P,
    delay: D,
    timing: Timing,
}

impl<P, D> DebouncedInput<P, D>
where
    P: InputPin,
    D: DelayNs,
{
    /// Wrap `pin` with the default [`Timing`]
    pub fn new(pin: P, delay: D) -> Self {
        Self::with_timing(pin, delay, Timing::default())
    }

    pub fn with_timing(pin: P, delay: D, timing: Timing) -> Self {
        Self { pin, delay, timing }
    }

    pub fn timing(&self) -> &Timing {
        &self.timing
    }

    /// Release the pin and delay
    pub fn into_inner(self) -> (P, D) {
        (self.pin, self.delay)
    }

    /// Debounced level of the pin
    ///
    /// A high sample is confirmed by a second sample `bounce_ms` later; the
    /// result is high only if both are high. A low sample returns immediately.
    pub fn debounced_read(&mut self) -> Result<bool, P::Error> {
        if !self.pin.is_high()? {
            return Ok(false);
        }
        self.delay.delay_ms(self.timing.bounce_ms);
        self.pin.is_high()
    }

    /// Block until one full press and release has been observed
    ///
    /// There is no timeout: if the button is never pressed this never returns.
    pub fn wait_for_click(&mut self) -> Result<(), P::Error> {
        while !self.debounced_read()? {}
        while self.debounced_read()? {}
        Ok(())
    }

    /// Count clicks until the button stays idle for `click_timeout_ms`
    ///
    /// Blocks for the first click, which always counts as 1. Every further
    /// click increments the count, wrapping back to 1 once it exceeds
    /// `max_count`, and restarts the idle timeout. `on_click` is called inline
    /// with the current count after each click, before polling resumes.
    pub fn count_clicks(
        &mut self,
        max_count: u8,
        mut on_click: Option<&mut dyn FnMut(u8)>,
    ) -> Result<u8, P::Error> {
        self.wait_for_click()?;

        let mut count = 1;
        if let Some(callback) = on_click.as_deref_mut() {
            callback(count);
        }

        // A zero probe interval still has to make progress towards the timeout
        let step = self.timing.probe_ms.max(1);
        let mut idle_ms: u32 = 0;

        while idle_ms < self.timing.click_timeout_ms {
            if !self.debounced_read()? {
                self.delay.delay_ms(self.timing.probe_ms);
                idle_ms = idle_ms.saturating_add(step);
                continue;
            }

            count = next_count(count, max_count);
            trace!("click {count}");
            if let Some(callback) = on_click.as_deref_mut() {
                callback(count);
            }

            // Spin until release
            while self.debounced_read()? {}
            idle_ms = 0;
        }

        debug!("click session ended at {count}");
        Ok(count)
    }
}

fn next_count(count: u8, max_count: u8) -> u8 {
    match count.checked_add(1) {
        Some(next) if next <= max_count => next,
        _ => 1,
    }
}
