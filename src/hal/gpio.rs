use avr_device::atmega128a::PORTA;
use core::convert::Infallible;
use core::marker::PhantomData;
use embedded_hal::digital::v2::OutputPin;

pub trait PinMode {}
pub struct Input;
pub struct Output;
impl PinMode for Input {}
impl PinMode for Output {}

/// A single PORTA pin, identified by its bit mask
#[derive(Debug)]
pub struct Pin<MODE> {
    mask: u8,
    _mode: PhantomData<MODE>,
}

/// Owner of PORTA, hands out pins and bulk port control
pub struct PortA {
    _port: PORTA,
    taken: u8,
}

impl PortA {
    pub fn new(port: PORTA) -> Self {
        Self { _port: port, taken: 0 }
    }

    /// Take a pin by bit position; each pin can be taken once
    pub fn pin(&mut self, bit: u8) -> Option<Pin<Input>> {
        let mask = 1u8.checked_shl(u32::from(bit))?;
        if self.taken & mask != 0 {
            return None;
        }
        self.taken |= mask;
        Some(Pin {
            mask,
            _mode: PhantomData,
        })
    }

    /// Bulk control over the whole port, used at shutdown
    pub fn control(&self) -> PortControl {
        PortControl { _private: () }
    }
}

impl<MODE: PinMode> Pin<MODE> {
    pub fn into_output(self) -> Pin<Output> {
        unsafe {
            (*PORTA::ptr()).ddra.modify(|r, w| w.bits(r.bits() | self.mask));
        }
        Pin {
            mask: self.mask,
            _mode: PhantomData,
        }
    }
}

impl OutputPin for Pin<Output> {
    type Error = Infallible;

    #[inline]
    fn set_high(&mut self) -> Result<(), Self::Error> {
        unsafe {
            (*PORTA::ptr()).porta.modify(|r, w| w.bits(r.bits() | self.mask));
        }
        Ok(())
    }

    #[inline]
    fn set_low(&mut self) -> Result<(), Self::Error> {
        unsafe {
            (*PORTA::ptr()).porta.modify(|r, w| w.bits(r.bits() & !self.mask));
        }
        Ok(())
    }
}

/// Mask-based access to PORTA regardless of which pins are owned
pub struct PortControl {
    _private: (),
}

impl PortControl {
    #[inline]
    pub fn set_levels(&mut self, mask: u8, high: bool) {
        unsafe {
            (*PORTA::ptr()).porta.modify(|r, w| {
                if high {
                    w.bits(r.bits() | mask)
                } else {
                    w.bits(r.bits() & !mask)
                }
            });
        }
    }

    #[inline]
    pub fn disable(&mut self, mask: u8) {
        unsafe {
            (*PORTA::ptr()).ddra.modify(|r, w| w.bits(r.bits() & !mask));
            (*PORTA::ptr()).porta.modify(|r, w| w.bits(r.bits() & !mask));
        }
    }
}
