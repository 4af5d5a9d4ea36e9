use crate::board::{PowerControl, SleepMode, MCUCR_SE, MCUCR_SM_MASK};
use crate::hal::gpio::PortControl;
use avr_device::atmega128a::CPU;

pub struct Power {
    _cpu: CPU,
    port: PortControl,
    sleep_mode: SleepMode,
}

impl Power {
    pub fn new(cpu: CPU, port: PortControl) -> Self {
        Self {
            _cpu: cpu,
            port,
            sleep_mode: SleepMode::Idle,
        }
    }

    /// Run the core straight from the oscillator (internal RC, 1 MHz)
    pub fn disable_clock_divider(&mut self) {
        unsafe {
            (*CPU::ptr()).xdiv.write(|w| w.bits(0));
        }
    }

    /// Mode used by `enter_low_power_sleep`
    pub fn set_sleep_mode(&mut self, mode: SleepMode) {
        self.sleep_mode = mode;
        write_sleep_mode(mode);
    }
}

#[inline]
fn write_sleep_mode(mode: SleepMode) {
    unsafe {
        let p = CPU::ptr();
        (*p).mcucr.modify(|r, w| w.bits((r.bits() & !MCUCR_SM_MASK) | mode.mcucr_bits()));
    }
}

#[inline]
fn sleep_enabled(enabled: bool) {
    unsafe {
        let p = CPU::ptr();
        (*p).mcucr.modify(|r, w| {
            if enabled {
                w.bits(r.bits() | MCUCR_SE)
            } else {
                w.bits(r.bits() & !MCUCR_SE)
            }
        });
    }
}

/// Idle until the next interrupt; used by the main loop between ticks
pub fn idle() {
    write_sleep_mode(SleepMode::Idle);
    sleep_enabled(true);
    avr_device::asm::sleep();
    sleep_enabled(false);
}

impl PowerControl for Power {
    fn set_port_levels(&mut self, mask: u8, high: bool) {
        self.port.set_levels(mask, high);
    }

    fn disable_port_pins(&mut self, mask: u8) {
        self.port.disable(mask);
    }

    fn enter_low_power_sleep(&mut self) {
        write_sleep_mode(self.sleep_mode);
        sleep_enabled(true);
        avr_device::asm::sleep();
        sleep_enabled(false);
    }
}
