//! Timing of the multiplexer: how often `tick()` runs and what that means for the viewer.

use fugit::{HertzU32, MicrosDurationU32};
use log::debug;

use crate::geometry::WIDTH;

/// Grayscale phases per cycle: a pixel of magnitude `v` is lit for `v` of them.
pub const PHASE_STEPS: u8 = 128;

pub const DEFAULT_TICK_RATE: HertzU32 = HertzU32::kHz(50);

/// Fastest tick rate whose period is still a whole microsecond.
const MAX_TICK_RATE: HertzU32 = HertzU32::MHz(1);

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RefreshError {
    ZeroRate,
    TooFast,
}

/// Rate at which the pacing source calls [`MatrixDisplay::tick`](crate::display::MatrixDisplay::tick).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RefreshRate {
    tick_rate: HertzU32,
}

impl RefreshRate {
    pub fn new(tick_rate: HertzU32) -> Result<Self, RefreshError> {
        if tick_rate.to_Hz() == 0 {
            return Err(RefreshError::ZeroRate);
        }
        if tick_rate > MAX_TICK_RATE {
            return Err(RefreshError::TooFast);
        }

        let rate = Self { tick_rate };
        debug!(
            "refresh: tick every {} us, column at {} Hz, frame at {} Hz",
            rate.tick_period().to_micros(),
            rate.column_rate().to_Hz(),
            rate.frame_rate().to_Hz()
        );
        Ok(rate)
    }

    pub fn tick_rate(&self) -> HertzU32 {
        self.tick_rate
    }

    pub fn tick_period(&self) -> MicrosDurationU32 {
        MicrosDurationU32::micros(1_000_000 / self.tick_rate.to_Hz())
    }

    /// How often any single column gets strobed.
    pub fn column_rate(&self) -> HertzU32 {
        HertzU32::Hz(self.tick_rate.to_Hz() / WIDTH as u32)
    }

    /// How often every column has been shown at every grayscale phase.
    pub fn frame_rate(&self) -> HertzU32 {
        HertzU32::Hz(self.tick_rate.to_Hz() / (WIDTH as u32 * u32::from(PHASE_STEPS)))
    }

    pub fn is_flicker_free(&self, min_frame_rate: HertzU32) -> bool {
        self.frame_rate() >= min_frame_rate
    }
}

impl Default for RefreshRate {
    fn default() -> Self {
        Self {
            tick_rate: DEFAULT_TICK_RATE,
        }
    }
}
