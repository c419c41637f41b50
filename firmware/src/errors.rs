//! Error handling.

use heapless::spsc::Queue;
use l298n::PinError;

/// All possible error types
#[derive(Debug, PartialEq, Copy, Clone)]
pub enum Error {
    MotorGpioWriteError,
    MotorUnknownPin,
    StatusFormatError,
}

impl Error {
    pub fn log<const N: usize>(&self, queue: &mut Queue<Self, N>) {
        match queue.enqueue(*self) {
            Ok(()) => { /* Enqueued */ }
            Err(e) => {
                // Queue full, drop the oldest value and try again
                queue.dequeue();
                queue.enqueue(e).ok();
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MotorGpioWriteError => "Motor GPIO write error",
            Self::MotorUnknownPin => "Motor pin not present on this board",
            Self::StatusFormatError => "Formatting status line failed",
        }
    }
}

impl<E> From<PinError<E>> for Error {
    fn from(e: PinError<E>) -> Self {
        match e {
            PinError::UnknownPin(_) => Self::MotorUnknownPin,
            PinError::Digital(_) => Self::MotorGpioWriteError,
        }
    }
}
