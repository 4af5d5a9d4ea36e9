pub mod gpio;
pub mod power;
pub mod timer;
#[cfg(feature = "debug")]
pub mod uart;

// Re-export commonly used types
pub use gpio::{Output, Pin, PortA};
pub use power::Power;
pub use timer::Timer1Tick;
#[cfg(feature = "debug")]
pub use uart::Uart;
