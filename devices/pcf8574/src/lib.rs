#![cfg_attr(not(feature = "std"), no_std)]

//! PCF8574 I2C I/O expander driver
//!
//! The PCF8574 exposes 8 quasi-bidirectional pins behind a single data
//! register. There is no register addressing: a one byte read returns the
//! pin levels, a one byte write sets the output latches.
//!
//! [`PinExpander`] keeps a cached copy of that register and only polls the
//! device from [`PinExpander::refresh`], at most once per poll interval.
//! [`asynch::PinExpander`] is the same driver over an async bus.

pub mod asynch;
mod blocking;
mod cache;
mod port;

pub use blocking::PinExpander;
pub use port::Port;

/// Base address of the PCF8574 (A2..A0 tied low)
pub const DEFAULT_ADDRESS: u8 = 0x20;
/// Base address of the PCF8574A variant
pub const DEFAULT_ADDRESS_A: u8 = 0x38;
/// Default minimum spacing between two polls, in milliseconds
pub const DEFAULT_INTERVAL_MS: u32 = 10;
/// Register value at power-on, all pins pulled up
pub const POWER_ON_REGISTER: u8 = 0b1111_1111;

/// I2C device address
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Address(u8);

impl From<u8> for Address {
    fn from(a: u8) -> Self {
        Address(a)
    }
}

impl Default for Address {
    fn default() -> Self {
        Address(DEFAULT_ADDRESS)
    }
}

impl Address {
    /// Address of a PCF8574 from the level of its A0, A1 and A2 pins
    pub fn from_pins(a0: bool, a1: bool, a2: bool) -> Self {
        Address(DEFAULT_ADDRESS | Self::pin_bits(a0, a1, a2))
    }

    /// Address of a PCF8574A from the level of its A0, A1 and A2 pins
    pub fn from_pins_a(a0: bool, a1: bool, a2: bool) -> Self {
        Address(DEFAULT_ADDRESS_A | Self::pin_bits(a0, a1, a2))
    }

    /// Raw 7-bit address
    pub fn as_u8(self) -> u8 {
        self.0
    }

    fn pin_bits(a0: bool, a1: bool, a2: bool) -> u8 {
        ((a2 as u8) << 2) | ((a1 as u8) << 1) | (a0 as u8)
    }
}

/// Driver configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub address: Address,
    /// Minimum time between two physical reads done by `refresh`, 0 polls on every call
    pub interval_ms: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            address: Address::default(),
            interval_ms: DEFAULT_INTERVAL_MS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<E> {
    /// I2C communication error
    I2c(E),
    /// Invalid pin number (must be 0-7)
    InvalidPin,
}

/// Monotonic millisecond clock used to gate polling
///
/// The value is allowed to wrap around, elapsed time is computed with
/// wrapping arithmetic.
pub trait Clock {
    fn now_ms(&self) -> u32;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> u32 {
        (**self).now_ms()
    }
}

/// Clock counting milliseconds since its creation
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy)]
pub struct StdClock {
    start: std::time::Instant,
}

#[cfg(feature = "std")]
impl StdClock {
    pub fn new() -> Self {
        Self {
            start: std::time::Instant::now(),
        }
    }
}

#[cfg(feature = "std")]
impl Default for StdClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl Clock for StdClock {
    fn now_ms(&self) -> u32 {
        // Truncation is the wraparound
        self.start.elapsed().as_millis() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_from_pins() {
        assert_eq!(Address::from_pins(false, false, false).as_u8(), 0x20);
        assert_eq!(Address::from_pins(true, false, false).as_u8(), 0x21);
        assert_eq!(Address::from_pins(false, true, true).as_u8(), 0x26);
        assert_eq!(Address::from_pins(true, true, true).as_u8(), 0x27);
    }

    #[test]
    fn test_address_from_pins_a() {
        assert_eq!(Address::from_pins_a(false, false, false).as_u8(), 0x38);
        assert_eq!(Address::from_pins_a(true, true, true).as_u8(), 0x3f);
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.address, Address::from(0x20));
        assert_eq!(config.interval_ms, 10);
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_std_clock_is_monotonic() {
        let clock = StdClock::new();
        let first = clock.now_ms();
        std::thread::sleep(std::time::Duration::from_millis(2));
        assert!(clock.now_ms().wrapping_sub(first) >= 2);
    }
}
