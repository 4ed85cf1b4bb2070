use std::env;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Host builds (unit and integration tests) carry no hardware layer
    if env::var("CARGO_FEATURE_ATMEGA328P").is_err() {
        return;
    }

    let target = env::var("TARGET").unwrap_or_default();
    if !target.contains("avr") {
        panic!("The atmega328p feature only supports AVR targets!");
    }

    // Configure for ATmega328P (Arduino Uno)
    println!("cargo:rustc-link-arg=-mmcu=atmega328p");

    println!("cargo:warning=Building for ATmega328P at 16MHz");
}
