use core::fmt::{self, Write};

use bitfield::bitfield;
use heapless::String;

bitfield! {
    /// Snapshot of the 8 expander pins, bit 0 is P0
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct Port(u8);
    impl Debug;

    pub p0, set_p0: 0;
    pub p1, set_p1: 1;
    pub p2, set_p2: 2;
    pub p3, set_p3: 3;
    pub p4, set_p4: 4;
    pub p5, set_p5: 5;
    pub p6, set_p6: 6;
    pub p7, set_p7: 7;
}

impl Port {
    pub const PINS: u8 = 8;

    pub fn from_u8(value: u8) -> Self {
        Port(value)
    }

    pub fn as_u8(&self) -> u8 {
        self.0
    }

    /// Set a pin, out of range pins are ignored
    pub fn set_pin(&mut self, pin: u8, value: bool) {
        if pin < Self::PINS {
            if value {
                self.0 |= 1 << pin;
            } else {
                self.0 &= !(1 << pin);
            }
        }
    }

    /// Level of a pin, `None` if out of range
    pub fn get_pin(&self, pin: u8) -> Option<bool> {
        if pin < Self::PINS {
            Some(self.0 & (1 << pin) != 0)
        } else {
            None
        }
    }

    /// Pins as '1'/'0' characters, P0 first
    pub fn bits(&self) -> String<8> {
        let mut bits = String::new();
        for pin in 0..Self::PINS {
            // Capacity is exactly one char per pin
            let _ = bits.push(self.bit_char(pin));
        }
        bits
    }

    fn bit_char(&self, pin: u8) -> char {
        if self.0 & (1 << pin) != 0 {
            '1'
        } else {
            '0'
        }
    }
}

impl Default for Port {
    fn default() -> Self {
        Port(crate::POWER_ON_REGISTER)
    }
}

impl From<u8> for Port {
    fn from(value: u8) -> Self {
        Port(value)
    }
}

impl From<Port> for u8 {
    fn from(port: Port) -> Self {
        port.0
    }
}

/// Same text as [`Port::bits`], least significant bit first
impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for pin in 0..Self::PINS {
            f.write_char(self.bit_char(pin))?;
        }
        Ok(())
    }
}
