//! Four-LED throughput demo for the ATmega128
//!
//! A 1 ms timer interrupt drives [`sequencer::Sequencer`], which blinks one
//! LED per reference microcontroller at a rate scaled to its MIPS rating and
//! puts the MCU to sleep once the run is over.
#![cfg_attr(not(test), no_std)]
#![cfg_attr(all(target_arch = "avr", feature = "debug"), feature(abi_avr_interrupt))]

pub mod blink;
pub mod board;
pub mod config;
pub mod drivers;
pub mod error;
pub mod reference;
pub mod sequencer;

#[cfg(target_arch = "avr")]
pub mod hal;

pub use error::Error;
pub use sequencer::Sequencer;
