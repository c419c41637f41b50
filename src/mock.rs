//! Recording pin surface for unit tests.

use crate::config::PinConfig;
use crate::pins::{Level, PinIo};

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Write {
    Digital(u8, Level),
    Pwm(u8, u16),
}

/// Records every write in order. Fails with the pin number when writing to
/// `fail_on`.
#[derive(Debug, Default)]
pub struct MockPins {
    pub writes: Vec<Write>,
    pub fail_on: Option<u8>,
}

impl MockPins {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last level written to a digital pin
    pub fn level(&self, pin: u8) -> Option<Level> {
        self.writes.iter().rev().find_map(|w| match *w {
            Write::Digital(p, level) if p == pin => Some(level),
            _ => None,
        })
    }

    /// Last duty code written to a PWM pin
    pub fn duty(&self, pin: u8) -> Option<u16> {
        self.writes.iter().rev().find_map(|w| match *w {
            Write::Pwm(p, duty) if p == pin => Some(duty),
            _ => None,
        })
    }
}

impl PinIo for MockPins {
    type DigitalPin = u8;
    type PwmPin = u8;
    type Error = u8;

    const DEFAULT_PINS: PinConfig<u8, u8> = PinConfig {
        dir_a1: 0,
        dir_a2: 1,
        dir_b1: 2,
        dir_b2: 8,
        pwm_a: 12,
        pwm_b: 16,
    };

    fn write_digital(&mut self, pin: u8, level: Level) -> Result<(), u8> {
        if self.fail_on == Some(pin) {
            return Err(pin);
        }
        self.writes.push(Write::Digital(pin, level));
        Ok(())
    }

    fn write_pwm(&mut self, pin: u8, duty: u16) -> Result<(), u8> {
        if self.fail_on == Some(pin) {
            return Err(pin);
        }
        self.writes.push(Write::Pwm(pin, duty));
        Ok(())
    }
}
