//! The pin I/O surface the driver writes to.
//!
//! The driver only needs two capabilities: set a digital output to a level and
//! set a PWM output to a 10 bit duty code. [`PinIo`] captures those, together with
//! the identifier types the pin mapping is made of. [`PinBank`] implements it on
//! top of `embedded-hal` pins addressed by index.

use embedded_hal::{digital::v2::OutputPin, PwmPin as PwmChannel};
use ufmt::{uDisplay, uWrite, Formatter};

use crate::config::PinConfig;
use crate::speed::MAX_DUTY;

/// Digital output level
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Level {
    Low,
    High,
}

impl uDisplay for Level {
    fn fmt<W>(&self, f: &mut Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        f.write_str(match self {
            Self::Low => "low",
            Self::High => "high",
        })
    }
}

/// Synchronous access to digital and PWM outputs.
///
/// Writes must take effect immediately and in call order. Errors are returned
/// as-is by the driver, which never retries.
pub trait PinIo {
    /// Identifier of a digital output
    type DigitalPin: Copy;
    /// Identifier of a PWM capable output
    type PwmPin: Copy;
    type Error;

    /// Mapping used by a driver until it is configured otherwise.
    const DEFAULT_PINS: PinConfig<Self::DigitalPin, Self::PwmPin>;

    fn write_digital(&mut self, pin: Self::DigitalPin, level: Level) -> Result<(), Self::Error>;

    /// Set the duty code of a PWM output, `0..=1023`.
    fn write_pwm(&mut self, pin: Self::PwmPin, duty: u16) -> Result<(), Self::Error>;
}

/// Errors reported by a [`PinBank`]
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum PinError<E> {
    /// No output is registered at this index
    UnknownPin(usize),
    /// The digital output rejected the write
    Digital(E),
}

/// A [`PinIo`] made of `embedded-hal` outputs, addressed by their array index.
///
/// All digital outputs must share one type, as must all PWM channels. Erased pin
/// types (e.g. `PA<Output<PushPull>>`) are the usual way to get there.
pub struct PinBank<D, W, const ND: usize, const NP: usize> {
    digital: [D; ND],
    pwm: [W; NP],
}

impl<D, W, const ND: usize, const NP: usize> PinBank<D, W, ND, NP>
where
    W: PwmChannel<Duty = u16>,
{
    /// Take ownership of the outputs. Every PWM channel is enabled at zero duty.
    pub fn new(digital: [D; ND], mut pwm: [W; NP]) -> Self {
        for channel in pwm.iter_mut() {
            channel.set_duty(0);
            channel.enable();
        }
        Self { digital, pwm }
    }

    /// Give the outputs back.
    pub fn release(self) -> ([D; ND], [W; NP]) {
        (self.digital, self.pwm)
    }
}

impl<D, W, const ND: usize, const NP: usize> PinIo for PinBank<D, W, ND, NP>
where
    D: OutputPin,
    W: PwmChannel<Duty = u16>,
{
    type DigitalPin = usize;
    type PwmPin = usize;
    type Error = PinError<D::Error>;

    const DEFAULT_PINS: PinConfig<usize, usize> = PinConfig {
        dir_a1: 0,
        dir_a2: 1,
        dir_b1: 2,
        dir_b2: 3,
        pwm_a: 0,
        pwm_b: 1,
    };

    fn write_digital(&mut self, pin: usize, level: Level) -> Result<(), Self::Error> {
        let output = self.digital.get_mut(pin).ok_or(PinError::UnknownPin(pin))?;
        match level {
            Level::Low => output.set_low(),
            Level::High => output.set_high(),
        }
        .map_err(PinError::Digital)
    }

    fn write_pwm(&mut self, pin: usize, duty: u16) -> Result<(), Self::Error> {
        let channel = self.pwm.get_mut(pin).ok_or(PinError::UnknownPin(pin))?;
        // Duty codes are 10 bit, the timer resolution is whatever the channel has
        let max = u32::from(channel.get_max_duty());
        let code = u32::from(duty.min(MAX_DUTY));
        channel.set_duty((code * max / u32::from(MAX_DUTY)) as u16);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use heapless::String;
    use ufmt::uwrite;

    #[derive(Debug, Default)]
    struct MockOutput {
        high: bool,
        broken: bool,
    }

    impl OutputPin for MockOutput {
        type Error = ();

        fn set_low(&mut self) -> Result<(), ()> {
            if self.broken {
                return Err(());
            }
            self.high = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), ()> {
            if self.broken {
                return Err(());
            }
            self.high = true;
            Ok(())
        }
    }

    #[derive(Debug)]
    struct MockChannel {
        duty: u16,
        max: u16,
        enabled: bool,
    }

    impl MockChannel {
        fn new(max: u16) -> Self {
            Self {
                duty: 0xffff,
                max,
                enabled: false,
            }
        }
    }

    impl PwmChannel for MockChannel {
        type Duty = u16;

        fn disable(&mut self) {
            self.enabled = false;
        }

        fn enable(&mut self) {
            self.enabled = true;
        }

        fn get_duty(&self) -> u16 {
            self.duty
        }

        fn get_max_duty(&self) -> u16 {
            self.max
        }

        fn set_duty(&mut self, duty: u16) {
            self.duty = duty;
        }
    }

    fn bank() -> PinBank<MockOutput, MockChannel, 4, 2> {
        PinBank::new(
            Default::default(),
            [MockChannel::new(1023), MockChannel::new(4999)],
        )
    }

    #[test]
    fn test_new_enables_channels_at_zero() {
        let (_, pwm) = bank().release();
        for channel in pwm.iter() {
            assert!(channel.enabled);
            assert_eq!(channel.duty, 0);
        }
    }

    #[test]
    fn test_write_digital() {
        let mut bank = bank();
        bank.write_digital(2, Level::High).unwrap();
        let (digital, _) = bank.release();
        assert!(digital[2].high);
        assert!(!digital[0].high);

        let mut bank = PinBank::new(digital, [MockChannel::new(1023)]);
        bank.write_digital(2, Level::Low).unwrap();
        let (digital, _) = bank.release();
        assert!(!digital[2].high);
    }

    #[test]
    fn test_write_pwm_scales_to_channel() {
        let mut bank = bank();
        bank.write_pwm(0, 511).unwrap();
        bank.write_pwm(1, 1023).unwrap();
        let (_, pwm) = bank.release();
        assert_eq!(pwm[0].duty, 511);
        assert_eq!(pwm[1].duty, 4999);

        let mut bank = PinBank::new([MockOutput::default()], [MockChannel::new(4999)]);
        bank.write_pwm(0, 511).unwrap();
        let (_, pwm) = bank.release();
        // 511 * 4999 / 1023
        assert_eq!(pwm[0].duty, 2497);
    }

    #[test]
    fn test_write_pwm_clamps_code() {
        let mut bank = bank();
        bank.write_pwm(1, 5000).unwrap();
        let (_, pwm) = bank.release();
        assert_eq!(pwm[1].duty, 4999);
    }

    #[test]
    fn test_unknown_pin() {
        let mut bank = bank();
        assert_eq!(
            bank.write_digital(4, Level::High),
            Err(PinError::UnknownPin(4))
        );
        assert_eq!(bank.write_pwm(2, 100), Err(PinError::UnknownPin(2)));
    }

    #[test]
    fn test_digital_error_is_passed_through() {
        let mut digital: [MockOutput; 4] = Default::default();
        digital[1].broken = true;
        let mut bank = PinBank::new(digital, [MockChannel::new(1023)]);
        assert_eq!(bank.write_digital(1, Level::Low), Err(PinError::Digital(())));
        assert_eq!(bank.write_digital(0, Level::Low), Ok(()));
    }

    #[test]
    fn test_default_pins() {
        type Bank = PinBank<MockOutput, MockChannel, 4, 2>;
        let pins = Bank::DEFAULT_PINS;
        assert_eq!(
            (pins.dir_a1, pins.dir_a2, pins.dir_b1, pins.dir_b2),
            (0, 1, 2, 3)
        );
        assert_eq!((pins.pwm_a, pins.pwm_b), (0, 1));
    }

    #[test]
    fn test_level_display() {
        let mut s: String<8> = String::new();
        uwrite!(s, "{}/{}", Level::High, Level::Low).unwrap();
        assert_eq!(s.as_str(), "high/low");
    }
}
