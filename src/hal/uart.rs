use crate::board::uart_ubrr_double_speed;
use crate::config::{CPU_FREQ_HZ, UART_BAUD};
use crate::drivers::TxRing;
use avr_device::atmega128a::USART0;
use avr_device::interrupt::Mutex;
use core::cell::RefCell;

const UCSRA_U2X: u8 = 1 << 1;
const UCSRA_UDRE: u8 = 1 << 5;
const UCSRA_TXC: u8 = 1 << 6;
const UCSRB_TXEN: u8 = 1 << 3;
const UCSRB_UDRIE: u8 = 1 << 5;
// Async, 8N1
const UCSRC_8N1: u8 = 0x06;

static TX_BUFFER: Mutex<RefCell<TxRing>> = Mutex::new(RefCell::new(TxRing::new()));

/// Transmit-only USART0, drained by the UDRE interrupt
pub struct Uart {
    _usart: USART0,
}

impl Uart {
    pub fn new(usart: USART0) -> Self {
        let ubrr = uart_ubrr_double_speed(CPU_FREQ_HZ, UART_BAUD);
        unsafe {
            let p = USART0::ptr();
            (*p).ubrr0h.write(|w| w.bits((ubrr >> 8) as u8));
            (*p).ubrr0l.write(|w| w.bits(ubrr as u8));
            (*p).ucsr0a.write(|w| w.bits(UCSRA_U2X));
            (*p).ucsr0c.write(|w| w.bits(UCSRC_8N1));
            (*p).ucsr0b.write(|w| w.bits(UCSRB_TXEN));
        }
        Self { _usart: usart }
    }

    /// Queue a byte; a full ring sends its oldest byte by polling first
    pub fn write_byte(&mut self, byte: u8) {
        avr_device::interrupt::free(|cs| {
            if let Some(oldest) = TX_BUFFER.borrow(cs).borrow_mut().push(byte) {
                send_blocking(oldest);
            }
        });
        unsafe {
            (*USART0::ptr()).ucsr0b.modify(|r, w| w.bits(r.bits() | UCSRB_UDRIE));
        }
    }

    pub fn write_str(&mut self, s: &str) {
        for byte in s.bytes() {
            self.write_byte(byte);
        }
    }

    /// Drain the buffer by polling; safe with interrupts disabled
    pub fn flush(&mut self) {
        avr_device::interrupt::free(|cs| {
            let mut buffer = TX_BUFFER.borrow(cs).borrow_mut();
            let mut sent = false;
            while let Some(byte) = buffer.pop() {
                send_blocking(byte);
                sent = true;
            }
            unsafe {
                let p = USART0::ptr();
                if sent {
                    while (*p).ucsr0a.read().bits() & UCSRA_TXC == 0 {}
                }
                (*p).ucsr0b.modify(|r, w| w.bits(r.bits() & !UCSRB_UDRIE));
            }
        });
    }
}

fn send_blocking(byte: u8) {
    unsafe {
        let p = USART0::ptr();
        while (*p).ucsr0a.read().bits() & UCSRA_UDRE == 0 {}
        // Writing TXC clears it
        (*p).ucsr0a.modify(|r, w| w.bits(r.bits() | UCSRA_TXC));
        (*p).udr0.write(|w| w.bits(byte));
    }
}

#[avr_device::interrupt(atmega128a)]
fn USART0_UDRE() {
    avr_device::interrupt::free(|cs| {
        if let Some(byte) = TX_BUFFER.borrow(cs).borrow_mut().pop() {
            unsafe {
                (*USART0::ptr()).udr0.write(|w| w.bits(byte));
            }
        } else {
            // Buffer empty - disable TX interrupt
            unsafe {
                (*USART0::ptr()).ucsr0b.modify(|r, w| w.bits(r.bits() & !UCSRB_UDRIE));
            }
        }
    });
}
