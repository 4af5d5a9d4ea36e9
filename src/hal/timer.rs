use crate::board::{timer_compare_value, TickSource};
use crate::config::{CPU_FREQ_HZ, TIMER_PRESCALER};
use avr_device::atmega128a::TC1;

const TCCR1B_WGM12: u8 = 1 << 3;
const TIMSK_OCIE1A: u8 = 1 << 4;
const TCCR1B_CS_MASK: u8 = 0x07;

#[derive(Clone, Copy)]
pub enum Prescaler {
    Direct = 1,
    Div8 = 2,
    Div64 = 3,
    Div256 = 4,
    Div1024 = 5,
}

impl Prescaler {
    pub const fn from_divisor(divisor: u16) -> Self {
        match divisor {
            1 => Prescaler::Direct,
            8 => Prescaler::Div8,
            64 => Prescaler::Div64,
            256 => Prescaler::Div256,
            1024 => Prescaler::Div1024,
            _ => panic!("unsupported Timer1 prescaler"),
        }
    }
}

// Evaluated at compile time, a bad TIMER_PRESCALER fails the build
const PRESCALER: Prescaler = Prescaler::from_divisor(TIMER_PRESCALER);

/// Timer1 in CTC mode, firing TIMER1_COMPA once per tick
pub struct Timer1Tick {
    _timer: TC1,
}

impl Timer1Tick {
    pub fn new(timer: TC1) -> Self {
        unsafe {
            let p = TC1::ptr();
            (*p).tccr1b.write(|w| w.bits(0));
            (*p).tccr1a.write(|w| w.bits(0));
            (*p).tcnt1.write(|w| w.bits(0));
        }
        Self { _timer: timer }
    }
}

impl TickSource for Timer1Tick {
    fn configure_timer(&mut self, period_ms: u16) {
        let top = timer_compare_value(CPU_FREQ_HZ, TIMER_PRESCALER, period_ms);
        unsafe {
            let p = TC1::ptr();
            (*p).ocr1a.write(|w| w.bits(top));
            (*p).tcnt1.write(|w| w.bits(0));
            (*p).timsk.modify(|r, w| w.bits(r.bits() | TIMSK_OCIE1A));
            (*p).tccr1b
                .write(|w| w.bits(TCCR1B_WGM12 | (PRESCALER as u8 & TCCR1B_CS_MASK)));
        }
    }

    fn stop(&mut self) {
        unsafe {
            let p = TC1::ptr();
            (*p).tccr1b.modify(|r, w| w.bits(r.bits() & !TCCR1B_CS_MASK));
            (*p).timsk.modify(|r, w| w.bits(r.bits() & !TIMSK_OCIE1A));
        }
    }
}
