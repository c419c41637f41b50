//! Wiring of the L298N module on the STM32F411 board.
//!
//! | L298N | MCU  | Bank index        |
//! |-------|------|-------------------|
//! | IN1   | PA1  | digital 0         |
//! | IN2   | PA4  | digital 1         |
//! | IN3   | PA5  | digital 2         |
//! | IN4   | PA6  | digital 3         |
//! | ENA   | PB4  | pwm 0 (TIM3 CH1)  |
//! | ENB   | PB5  | pwm 1 (TIM3 CH2)  |

use embedded_hal::PwmPin;
use l298n::{L298n, PinBank};
use stm32f4xx_hal::{
    gpio::{Output, PushPull, PA},
    pac::TIM3,
    timer::PwmChannel,
};

/// PWM frequency of the enable lines
pub const PWM_FREQUENCY_KHZ: u32 = 20;

/// Number of errors kept until they are printed
pub const ERROR_QUEUE_SIZE: usize = 8;

pub type DirectionPin = PA<Output<PushPull>>;

/// The two enable lines live on different timer channels, and thus types
pub enum SpeedChannel {
    Ena(PwmChannel<TIM3, 0>),
    Enb(PwmChannel<TIM3, 1>),
}

impl SpeedChannel {
    fn inner(&self) -> &dyn PwmPin<Duty = u16> {
        match self {
            Self::Ena(ch) => ch,
            Self::Enb(ch) => ch,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn PwmPin<Duty = u16> {
        match self {
            Self::Ena(ch) => ch,
            Self::Enb(ch) => ch,
        }
    }
}

impl PwmPin for SpeedChannel {
    type Duty = u16;

    fn disable(&mut self) {
        self.inner_mut().disable()
    }

    fn enable(&mut self) {
        self.inner_mut().enable()
    }

    fn get_duty(&self) -> u16 {
        self.inner().get_duty()
    }

    fn get_max_duty(&self) -> u16 {
        self.inner().get_max_duty()
    }

    fn set_duty(&mut self, duty: u16) {
        self.inner_mut().set_duty(duty)
    }
}

pub type Bridge = PinBank<DirectionPin, SpeedChannel, 4, 2>;

pub type Motors = L298n<Bridge>;
