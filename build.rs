use std::env;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Host builds only compile the scheduling library for unit tests
    let target = env::var("TARGET").unwrap_or_default();
    if !target.contains("avr") {
        return;
    }

    // Configure for ATmega128
    println!("cargo:rustc-link-arg=-mmcu=atmega128");

    // Internal RC oscillator, see config::CPU_FREQ_HZ
    println!("cargo:rustc-env=MCU_FREQ_HZ=1000000");

    if env::var("CARGO_FEATURE_DEBUG").is_ok() {
        println!("cargo:warning=Serial debug log enabled on USART0");
    }
}
