//! Pin mapping of the two H-bridge channels.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::motor::{Channel, MotorPins};

/// Pin assignment for both channels.
///
/// Identifiers are not checked for duplicates, the same pin may serve in
/// several roles.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PinConfig<D, P> {
    /// Channel A direction pin 1 (IN1)
    pub dir_a1: D,
    /// Channel A direction pin 2 (IN2)
    pub dir_a2: D,
    /// Channel B direction pin 1 (IN3)
    pub dir_b1: D,
    /// Channel B direction pin 2 (IN4)
    pub dir_b2: D,
    /// Channel A speed pin (ENA)
    pub pwm_a: P,
    /// Channel B speed pin (ENB)
    pub pwm_b: P,
}

impl<D: Copy, P: Copy> PinConfig<D, P> {
    /// The three pins of one channel.
    pub fn channel(&self, channel: Channel) -> MotorPins<D, P> {
        match channel {
            Channel::A => MotorPins {
                dir1: self.dir_a1,
                dir2: self.dir_a2,
                pwm: self.pwm_a,
            },
            Channel::B => MotorPins {
                dir1: self.dir_b1,
                dir2: self.dir_b2,
                pwm: self.pwm_b,
            },
        }
    }
}

/// A partial [`PinConfig`]. Fields left at `None` keep their previous value.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PinConfigUpdate<D, P> {
    pub dir_a1: Option<D>,
    pub dir_a2: Option<D>,
    pub dir_b1: Option<D>,
    pub dir_b2: Option<D>,
    pub pwm_a: Option<P>,
    pub pwm_b: Option<P>,
}

impl<D, P> Default for PinConfigUpdate<D, P> {
    fn default() -> Self {
        Self {
            dir_a1: None,
            dir_a2: None,
            dir_b1: None,
            dir_b2: None,
            pwm_a: None,
            pwm_b: None,
        }
    }
}

impl<D, P> PinConfigUpdate<D, P> {
    /// An update that changes nothing.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dir_a1(mut self, pin: D) -> Self {
        self.dir_a1 = Some(pin);
        self
    }

    pub fn dir_a2(mut self, pin: D) -> Self {
        self.dir_a2 = Some(pin);
        self
    }

    pub fn dir_b1(mut self, pin: D) -> Self {
        self.dir_b1 = Some(pin);
        self
    }

    pub fn dir_b2(mut self, pin: D) -> Self {
        self.dir_b2 = Some(pin);
        self
    }

    pub fn pwm_a(mut self, pin: P) -> Self {
        self.pwm_a = Some(pin);
        self
    }

    pub fn pwm_b(mut self, pin: P) -> Self {
        self.pwm_b = Some(pin);
        self
    }

    /// Apply this update on top of `previous`.
    pub fn merge_over(self, previous: &PinConfig<D, P>) -> PinConfig<D, P>
    where
        D: Copy,
        P: Copy,
    {
        PinConfig {
            dir_a1: self.dir_a1.unwrap_or(previous.dir_a1),
            dir_a2: self.dir_a2.unwrap_or(previous.dir_a2),
            dir_b1: self.dir_b1.unwrap_or(previous.dir_b1),
            dir_b2: self.dir_b2.unwrap_or(previous.dir_b2),
            pwm_a: self.pwm_a.unwrap_or(previous.pwm_a),
            pwm_b: self.pwm_b.unwrap_or(previous.pwm_b),
        }
    }
}

impl<D, P> From<PinConfig<D, P>> for PinConfigUpdate<D, P> {
    fn from(config: PinConfig<D, P>) -> Self {
        Self {
            dir_a1: Some(config.dir_a1),
            dir_a2: Some(config.dir_a2),
            dir_b1: Some(config.dir_b1),
            dir_b2: Some(config.dir_b2),
            pwm_a: Some(config.pwm_a),
            pwm_b: Some(config.pwm_b),
        }
    }
}
