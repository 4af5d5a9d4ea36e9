#![cfg_attr(target_arch = "avr", no_std)]
#![cfg_attr(target_arch = "avr", no_main)]
#![cfg_attr(target_arch = "avr", feature(abi_avr_interrupt))]

#[cfg(target_arch = "avr")]
mod firmware {
    use panic_halt as _;

    use avr_device::atmega128a::Peripherals;
    use avr_device::interrupt::{self, Mutex};
    use core::cell::RefCell;
    use mips_blink::config::{LED_PINS, SHUTDOWN_SLEEP_MODE};
    use mips_blink::drivers::LedBank;
    use mips_blink::hal::{power, Output, Pin, PortA, Power, Timer1Tick};
    use mips_blink::Sequencer;

    #[cfg(feature = "debug")]
    type Console = mips_blink::drivers::SerialConsole;
    #[cfg(not(feature = "debug"))]
    type Console = mips_blink::drivers::NullConsole;

    type Blinker = Sequencer<Pin<Output>, Timer1Tick, Power, Console>;

    // Only the tick interrupt touches this after startup
    static SEQUENCER: Mutex<RefCell<Option<Blinker>>> = Mutex::new(RefCell::new(None));

    #[avr_device::entry]
    fn main() -> ! {
        let dp = Peripherals::take().unwrap();

        let mut porta = PortA::new(dp.PORTA);
        let mut power = Power::new(dp.CPU, porta.control());
        power.disable_clock_divider();
        power.set_sleep_mode(SHUTDOWN_SLEEP_MODE);

        let leds = LED_PINS.map(|bit| porta.pin(bit).unwrap().into_output());

        #[cfg(feature = "debug")]
        let console = Console::new(dp.USART0);
        #[cfg(not(feature = "debug"))]
        let console = Console::default();

        let mut sequencer = Sequencer::new(
            LedBank::new(leds),
            Timer1Tick::new(dp.TC1),
            power,
            console,
        );
        sequencer.start();

        interrupt::free(|cs| {
            SEQUENCER.borrow(cs).replace(Some(sequencer));
        });

        // Enable interrupts globally
        unsafe { interrupt::enable() };

        loop {
            // Everything happens in TIMER1_COMPA
            power::idle();
        }
    }

    #[avr_device::interrupt(atmega128a)]
    fn TIMER1_COMPA() {
        interrupt::free(|cs| {
            if let Some(sequencer) = SEQUENCER.borrow(cs).borrow_mut().as_mut() {
                // Pins on this target cannot fail
                sequencer.on_tick().ok();
            }
        });
    }
}

#[cfg(not(target_arch = "avr"))]
fn main() {
    // The firmware only runs on the ATmega128; host builds exist for tests
}
