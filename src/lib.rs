//! Driver for dual-channel H-bridge motor controllers like the L298N.
//!
//! Each channel uses two direction outputs and one PWM output. The driver holds
//! the pin mapping, normalizes signed percentage speeds to 10 bit duty codes and
//! sequences the pin writes so the direction lines settle before the speed line
//! is energized.
//!
//! ```ignore
//! let mut driver = L298n::new(pins);
//! driver.configure(PinConfigUpdate::new().dir_a1(5))?;
//! driver.set_speed(Motor::A, 50)?;
//! driver.stop_all()?;
//! ```
#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod driver;
pub mod motor;
pub mod pins;
pub mod speed;

#[cfg(test)]
mod mock;

pub use config::{PinConfig, PinConfigUpdate};
pub use driver::L298n;
pub use motor::{Channel, Direction, Motor, MotorPins};
pub use pins::{Level, PinBank, PinError, PinIo};
pub use speed::Speed;
