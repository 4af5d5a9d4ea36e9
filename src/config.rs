//! Configuration constants for the blink demo

use crate::blink::{BlinkChannel, CHANNEL_COUNT};
use crate::board::{timer_compare_value, SleepMode};
use crate::reference::{ATMEGA328P, PIC16F627A, SAMD09, XMEGA256A3BU};

/// CPU frequency in Hz (internal RC oscillator, CKSEL fuses at 1 MHz)
pub const CPU_FREQ_HZ: u32 = 1_000_000;

/// Timer1 clock prescaler
pub const TIMER_PRESCALER: u16 = 1;

/// Tick period in milliseconds
pub const TICK_MS: u16 = 1;

/// Timer1 OCR1A value for one tick; an impossible clock setup fails the build
pub const TICK_COMPARE: u16 = timer_compare_value(CPU_FREQ_HZ, TIMER_PRESCALER, TICK_MS);

/// Tick count at which every LED is switched off and the MCU sleeps
pub const SHUTDOWN_TICK: u16 = 15_000;

/// LEDs sit on PORTA; the whole port is released at shutdown
pub const LED_PORT_MASK: u8 = 0xFF;

/// LED bit positions on PORTA, in channel order
pub const LED_PINS: [u8; CHANNEL_COUNT] = [3, 2, 1, 0];

/// Sleep mode selected at startup and entered at the shutdown tick
pub const SHUTDOWN_SLEEP_MODE: SleepMode = SleepMode::PowerDown;

/// UART baud rate for the debug console
pub const UART_BAUD: u32 = 4800;

// Ticks are chosen so the slowest device (5 MIPS) takes 10 s to finish.
// Each channel goes high every tenth of its run and latches at the end.
pub const CHANNELS: [BlinkChannel; CHANNEL_COUNT] = [
    BlinkChannel::new(SAMD09, 111, 131, 1110),
    BlinkChannel::new(XMEGA256A3BU, 156, 176, 1560),
    BlinkChannel::new(ATMEGA328P, 250, 270, 2500),
    BlinkChannel::new(PIC16F627A, 1000, 1020, 10000),
];
