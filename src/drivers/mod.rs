pub mod console;
pub mod led_bank;
pub mod tx_ring;

pub use console::{Console, NullConsole};
#[cfg(all(target_arch = "avr", feature = "debug"))]
pub use console::SerialConsole;
pub use led_bank::LedBank;
pub use tx_ring::TxRing;
