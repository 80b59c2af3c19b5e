//! Day/night cycle

use crate::consts::DAY_CYCLE_STEP;
use crate::lerp_rgb;

pub const DAY_SKY: [u8; 3] = [0x87, 0xce, 0xeb];
pub const NIGHT_SKY: [u8; 3] = [0x23, 0x2d, 0x4b];

/// Phase accumulator in [0, 1)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DayCycle {
    phase: f32,
}

impl DayCycle {
    pub fn new(phase: f32) -> Self {
        Self {
            phase: phase.rem_euclid(1.0),
        }
    }

    #[inline]
    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Advance one tick, wrapping back to 0 past the end of the cycle
    pub fn advance(&mut self) {
        self.phase += DAY_CYCLE_STEP;
        if self.phase >= 1.0 {
            self.phase = 0.0;
        }
    }

    /// 0 at full day, 1 at full night
    pub fn darkness(&self) -> f32 {
        (self.phase * std::f32::consts::PI).sin().abs()
    }

    /// Background color for the current phase
    pub fn tint(&self) -> [u8; 3] {
        lerp_rgb(DAY_SKY, NIGHT_SKY, self.darkness())
    }
}
