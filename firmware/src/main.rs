#![no_std]
#![no_main]

use panic_halt as _;

mod board;
mod errors;
mod logger;

#[rtic::app(device = stm32f4xx_hal::pac, peripherals = true)]
mod app {
    use heapless::{spsc::Queue, String};
    use l298n::{L298n, Motor, PinBank, PinConfigUpdate};
    use log::LevelFilter;
    use rtic::Mutex;
    use rtt_target::{rprintln, rtt_init_print};
    use stm32f4xx_hal::{
        gpio::{gpioa, gpioc, Edge, Input, Output, PushPull},
        prelude::*,
    };
    use ufmt::uwrite;

    use crate::board::{Motors, SpeedChannel, ERROR_QUEUE_SIZE, PWM_FREQUENCY_KHZ};
    use crate::errors::Error;
    use crate::logger;

    /// Commands cycled through by the button. `None` is all-stop.
    const DEMO_STEPS: [Option<(Motor, i32)>; 5] = [
        Some((Motor::A, 50)),
        Some((Motor::B, -50)),
        Some((Motor::Both, 100)),
        Some((Motor::Both, -150)),
        None,
    ];

    #[shared]
    struct Shared {
        motors: Motors,
        errors: Queue<Error, ERROR_QUEUE_SIZE>,
    }

    #[local]
    struct Local {
        // Debugging
        button: gpioa::PA0<Input>,
        led: gpioc::PC13<Output<PushPull>>,

        step: usize,
    }

    #[init]
    fn init(mut ctx: init::Context) -> (Shared, Local, init::Monotonics) {
        rtt_init_print!();
        logger::init(LevelFilter::Debug);

        rprintln!("Initializing");

        let mut syscfg = ctx.device.SYSCFG.constrain();

        // Clock setup
        let rcc = ctx.device.RCC.constrain();
        let clocks = rcc.cfgr.sysclk(48.MHz()).freeze();

        rprintln!("Clock setup done");

        // GPIO setup
        let gpioa = ctx.device.GPIOA.split();
        let gpiob = ctx.device.GPIOB.split();
        let gpioc = ctx.device.GPIOC.split();

        // LED and button for debugging purposes
        let led = gpioc.pc13.into_push_pull_output();
        let mut button = gpioa.pa0.into_pull_up_input();

        // H-bridge direction pins IN1-IN4
        let direction = [
            gpioa.pa1.into_push_pull_output().erase_number(),
            gpioa.pa4.into_push_pull_output().erase_number(),
            gpioa.pa5.into_push_pull_output().erase_number(),
            gpioa.pa6.into_push_pull_output().erase_number(),
        ];

        // Enable lines ENA / ENB on TIM3
        let channels = (gpiob.pb4.into_alternate(), gpiob.pb5.into_alternate());
        let (ena, enb) = ctx
            .device
            .TIM3
            .pwm_hz(channels, PWM_FREQUENCY_KHZ.kHz(), &clocks)
            .split();

        rprintln!("GPIO and PWM setup done");

        let bridge = PinBank::new(direction, [SpeedChannel::Ena(ena), SpeedChannel::Enb(enb)]);
        let mut motors = L298n::new(bridge);
        let mut errors = Queue::new();

        // Bring the bridge into a known state
        if let Err(e) = motors.configure(PinConfigUpdate::new()) {
            Error::from(e).log(&mut errors);
        }

        rprintln!("Motor driver setup done");

        // Wire up button interrupt
        button.make_interrupt_source(&mut syscfg);
        button.enable_interrupt(&mut ctx.device.EXTI);
        button.trigger_on_edge(&mut ctx.device.EXTI, Edge::Rising);

        rprintln!("Done initializing");

        (
            Shared { motors, errors },
            Local {
                button,
                led,
                step: 0,
            },
            init::Monotonics(),
        )
    }

    #[idle(shared = [errors])]
    fn idle(mut ctx: idle::Context) -> ! {
        loop {
            while let Some(e) = ctx.shared.errors.lock(|errors| errors.dequeue()) {
                rprintln!("Error: {}", e.as_str());
            }
            cortex_m::asm::wfi();
        }
    }

    #[task(binds = EXTI0, local = [button, led, step], shared = [motors, errors])]
    fn button_click(mut ctx: button_click::Context) {
        ctx.local.button.clear_interrupt_pending_bit();
        ctx.local.led.toggle();

        let step = DEMO_STEPS[*ctx.local.step];
        *ctx.local.step = (*ctx.local.step + 1) % DEMO_STEPS.len();

        let mut status: String<48> = String::new();
        let result = ctx.shared.motors.lock(|motors| match step {
            Some((motor, speed)) => motors.set_speed(motor, speed).map(|applied| {
                uwrite!(status, "{}: {} {}", motor, applied.direction(), applied)
            }),
            None => motors
                .stop_all()
                .map(|()| uwrite!(status, "all motors stopped")),
        });

        match result {
            Ok(Ok(())) => rprintln!("{}", status.as_str()),
            Ok(Err(())) => ctx
                .shared
                .errors
                .lock(|errors| Error::StatusFormatError.log(errors)),
            Err(e) => ctx.shared.errors.lock(|errors| Error::from(e).log(errors)),
        }
    }
}
