use core::convert::Infallible;
use ufmt::uWrite;

/// Log sink for the sequencer
pub trait Console: uWrite {
    /// Push out anything still buffered; called before the MCU sleeps
    fn flush(&mut self) {}
}

/// Discards everything, used when the `debug` feature is off
#[derive(Default)]
pub struct NullConsole;

impl uWrite for NullConsole {
    type Error = Infallible;

    #[inline]
    fn write_str(&mut self, _s: &str) -> Result<(), Infallible> {
        Ok(())
    }
}

impl Console for NullConsole {}

#[cfg(all(target_arch = "avr", feature = "debug"))]
pub use self::serial::SerialConsole;

#[cfg(all(target_arch = "avr", feature = "debug"))]
mod serial {
    use super::Console;
    use crate::hal::Uart;
    use avr_device::atmega128a::USART0;
    use core::convert::Infallible;
    use ufmt::uWrite;

    pub struct SerialConsole {
        uart: Uart,
    }

    impl SerialConsole {
        pub fn new(usart: USART0) -> Self {
            Self {
                uart: Uart::new(usart),
            }
        }
    }

    impl uWrite for SerialConsole {
        type Error = Infallible;

        fn write_str(&mut self, s: &str) -> Result<(), Infallible> {
            self.uart.write_str(s);
            Ok(())
        }
    }

    impl Console for SerialConsole {
        fn flush(&mut self) {
            self.uart.flush();
        }
    }
}
