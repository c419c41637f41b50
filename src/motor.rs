//! Driving a single H-bridge channel.
//!
//! | IN1  | IN2  | EN   | Motor    |
//! |------|------|------|----------|
//! | high | low  | duty | forward  |
//! | low  | high | duty | backward |
//! | low  | low  | 0    | stop     |

use log::trace;
use ufmt::{uDisplay, uWrite, Formatter};

use crate::pins::{Level, PinIo};
use crate::speed::Speed;

/// Which motor a command applies to
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Motor {
    A,
    B,
    Both,
}

impl uDisplay for Motor {
    fn fmt<W>(&self, f: &mut Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        f.write_str(match self {
            Self::A => "motor 1",
            Self::B => "motor 2",
            Self::Both => "both motors",
        })
    }
}

/// One of the two H-bridge channels
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Channel {
    A,
    B,
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Direction {
    Forward,
    Backward,
    Stop,
}

impl uDisplay for Direction {
    fn fmt<W>(&self, f: &mut Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        f.write_str(match self {
            Self::Forward => "forward",
            Self::Backward => "backward",
            Self::Stop => "stop",
        })
    }
}

/// The pins of one channel
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct MotorPins<D, P> {
    pub dir1: D,
    pub dir2: D,
    pub pwm: P,
}

/// Drive one channel at `speed`.
///
/// Pins are written in the order direction 1, direction 2, PWM, so the bridge
/// direction is settled before the speed line goes up. The first failing write
/// aborts the sequence.
pub fn drive<IO: PinIo>(
    io: &mut IO,
    pins: MotorPins<IO::DigitalPin, IO::PwmPin>,
    speed: Speed,
) -> Result<(), IO::Error> {
    let (dir1, dir2, duty) = match speed.direction() {
        Direction::Forward => (Level::High, Level::Low, speed.duty),
        Direction::Backward => (Level::Low, Level::High, speed.duty),
        Direction::Stop => (Level::Low, Level::Low, 0),
    };
    trace!("drive: {:?} {:?} duty {}", dir1, dir2, duty);
    io.write_digital(pins.dir1, dir1)?;
    io.write_digital(pins.dir2, dir2)?;
    io.write_pwm(pins.pwm, duty)
}
