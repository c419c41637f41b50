//! The dual channel driver: configuration, speed commands and all-stop.

use log::debug;

use crate::config::{PinConfig, PinConfigUpdate};
use crate::motor::{self, Channel, Motor};
use crate::pins::{Level, PinIo};
use crate::speed::{self, Speed};

type Pins<IO> = PinConfig<<IO as PinIo>::DigitalPin, <IO as PinIo>::PwmPin>;

/// Apply `speed` to the selected motor(s) using the mapping in `config`.
///
/// The speed is normalized once and the same value is used for both channels
/// when `motor` is [`Motor::Both`], channel A first.
pub fn set_speed<IO: PinIo>(
    io: &mut IO,
    config: &Pins<IO>,
    motor: Motor,
    speed: i32,
) -> Result<Speed, IO::Error> {
    let speed = speed::normalize(speed);
    match motor {
        Motor::A => motor::drive(io, config.channel(Channel::A), speed)?,
        Motor::B => motor::drive(io, config.channel(Channel::B), speed)?,
        Motor::Both => {
            motor::drive(io, config.channel(Channel::A), speed)?;
            motor::drive(io, config.channel(Channel::B), speed)?;
        }
    }
    Ok(speed)
}

/// Pull all four direction pins low and both PWM pins to zero duty.
pub fn stop_all<IO: PinIo>(io: &mut IO, config: &Pins<IO>) -> Result<(), IO::Error> {
    io.write_digital(config.dir_a1, Level::Low)?;
    io.write_digital(config.dir_a2, Level::Low)?;
    io.write_digital(config.dir_b1, Level::Low)?;
    io.write_digital(config.dir_b2, Level::Low)?;
    io.write_pwm(config.pwm_a, 0)?;
    io.write_pwm(config.pwm_b, 0)
}

/// L298N-class dual H-bridge driver.
///
/// Owns the pin surface and the current pin mapping. Several drivers can exist
/// side by side, one per bridge.
pub struct L298n<IO: PinIo> {
    io: IO,
    config: Pins<IO>,
}

impl<IO: PinIo> L298n<IO> {
    /// Create a driver with the pin surface's default mapping. No pins are written.
    pub fn new(io: IO) -> Self {
        Self::with_config(io, IO::DEFAULT_PINS)
    }

    /// Create a driver with an explicit mapping. No pins are written.
    pub fn with_config(io: IO, config: Pins<IO>) -> Self {
        Self { io, config }
    }

    /// Replace the given pins and bring all six mapped pins to a safe state.
    ///
    /// The new mapping is kept even if one of the writes fails.
    pub fn configure(
        &mut self,
        update: PinConfigUpdate<IO::DigitalPin, IO::PwmPin>,
    ) -> Result<(), IO::Error> {
        self.config = update.merge_over(&self.config);
        debug!("configure: pins updated, de-energizing");
        stop_all(&mut self.io, &self.config)
    }

    /// Drive `motor` at `speed` percent, clamped to `-100..=100`.
    ///
    /// Returns the normalized speed that was applied.
    pub fn set_speed(&mut self, motor: Motor, speed: i32) -> Result<Speed, IO::Error> {
        let applied = set_speed(&mut self.io, &self.config, motor, speed)?;
        debug!(
            "set_speed: {:?} {}% (duty {})",
            motor, applied.percent, applied.duty
        );
        Ok(applied)
    }

    /// Stop both motors regardless of earlier commands.
    pub fn stop_all(&mut self) -> Result<(), IO::Error> {
        debug!("stop_all");
        stop_all(&mut self.io, &self.config)
    }

    pub fn config(&self) -> &Pins<IO> {
        &self.config
    }

    pub fn pins(&self) -> &IO {
        &self.io
    }

    pub fn pins_mut(&mut self) -> &mut IO {
        &mut self.io
    }

    /// Give back the pin surface.
    pub fn release(self) -> IO {
        self.io
    }
}
