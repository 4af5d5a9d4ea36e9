//! Reference microcontrollers whose throughput the LEDs stand in for

/// Instruction throughput figure a device is rated at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Throughput {
    Mips(u16),
    Dmips(u16),
}

impl Throughput {
    #[inline]
    pub const fn value(self) -> u16 {
        match self {
            Throughput::Mips(v) | Throughput::Dmips(v) => v,
        }
    }

    pub const fn unit(self) -> &'static str {
        match self {
            Throughput::Mips(_) => "MIPS",
            Throughput::Dmips(_) => "DMIPS",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceDevice {
    pub name: &'static str,
    pub clock_mhz: u16,
    pub throughput: Throughput,
}

impl ReferenceDevice {
    pub const fn new(name: &'static str, clock_mhz: u16, throughput: Throughput) -> Self {
        Self {
            name,
            clock_mhz,
            throughput,
        }
    }
}

pub const SAMD09: ReferenceDevice = ReferenceDevice::new("SAM D09", 48, Throughput::Dmips(48));
pub const XMEGA256A3BU: ReferenceDevice =
    ReferenceDevice::new("ATxmega256A3BU", 32, Throughput::Mips(32));
pub const ATMEGA328P: ReferenceDevice =
    ReferenceDevice::new("ATmega328P", 20, Throughput::Mips(20));
pub const PIC16F627A: ReferenceDevice = ReferenceDevice::new("PIC16F627A", 20, Throughput::Mips(5));
