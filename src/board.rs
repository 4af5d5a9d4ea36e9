//! Hardware collaborators consumed by the sequencer
//!
//! The AVR implementations live in `hal`; tests provide their own.

/// Periodic millisecond interrupt
pub trait TickSource {
    /// Arm a periodic interrupt firing every `period_ms`
    fn configure_timer(&mut self, period_ms: u16);
    fn stop(&mut self);
}

/// Bulk port control and the final sleep transition
pub trait PowerControl {
    fn set_port_levels(&mut self, mask: u8, high: bool);
    /// Turn the masked pins into floating inputs
    fn disable_port_pins(&mut self, mask: u8);
    /// Halt the core; does not return on hardware
    fn enter_low_power_sleep(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SleepMode {
    Idle = 0,
    AdcNoiseReduction = 1,
    PowerDown = 2,
    PowerSave = 3,
    Standby = 6,
    ExtendedStandby = 7,
}

impl SleepMode {
    /// SM2..0 placed at their MCUCR positions (SM0 = bit 3, SM1 = bit 4, SM2 = bit 2)
    pub const fn mcucr_bits(self) -> u8 {
        let m = self as u8;
        ((m & 0b001) << 3) | ((m & 0b010) << 3) | (m & 0b100)
    }
}

pub const MCUCR_SM_MASK: u8 = 0x1C;
pub const MCUCR_SE: u8 = 0x20;

/// Clock divisors Timer1's CS1 bits can select
pub const fn is_timer_prescaler(divisor: u16) -> bool {
    matches!(divisor, 1 | 8 | 64 | 256 | 1024)
}

/// Output compare value for a CTC timer producing one interrupt per tick
pub const fn timer_compare_value(cpu_hz: u32, prescaler: u16, tick_ms: u16) -> u16 {
    assert!(is_timer_prescaler(prescaler), "unsupported timer prescaler");
    let counts = cpu_hz / prescaler as u32 / 1000 * tick_ms as u32;
    assert!(counts > 0 && counts <= 0x1_0000);
    (counts - 1) as u16
}

/// UBRR for double-speed (U2X) asynchronous mode
pub const fn uart_ubrr_double_speed(cpu_hz: u32, baud: u32) -> u16 {
    (cpu_hz / (8 * baud) - 1) as u16
}
