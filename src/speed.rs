//! Speed normalization.

use ufmt::{uDisplay, uWrite, Formatter};

use crate::motor::Direction;

/// Largest accepted speed magnitude in percent
pub const MAX_PERCENT: i8 = 100;

/// Duty code for full speed (10 bit)
pub const MAX_DUTY: u16 = 1023;

/// A normalized speed command
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct Speed {
    /// Signed speed in percent, `-100..=100`
    pub percent: i8,
    /// Unsigned duty code, `0..=1023`
    pub duty: u16,
}

impl Speed {
    pub const STOP: Self = Self {
        percent: 0,
        duty: 0,
    };

    pub fn direction(&self) -> Direction {
        match self.percent {
            p if p > 0 => Direction::Forward,
            p if p < 0 => Direction::Backward,
            _ => Direction::Stop,
        }
    }
}

impl uDisplay for Speed {
    fn fmt<W>(&self, f: &mut Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        ufmt::uwrite!(f, "{}% (duty {})", self.percent, self.duty)
    }
}

/// Clamp a signed percentage to `-100..=100` and map its magnitude to a duty code.
///
/// Out of range input is not an error. The duty code is
/// `floor(|percent| * 1023 / 100)`.
pub fn normalize(speed: i32) -> Speed {
    let max = i32::from(MAX_PERCENT);
    let percent = speed.clamp(-max, max);
    let duty = percent.unsigned_abs() * u32::from(MAX_DUTY) / max as u32;
    Speed {
        percent: percent as i8,
        duty: duty as u16,
    }
}
