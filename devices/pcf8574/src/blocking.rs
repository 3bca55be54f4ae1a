use embedded_hal::i2c::I2c;
use heapless::String;

use crate::cache::RegisterCache;
use crate::{Address, Clock, Config, Error, Port};

/// PCF8574 driver over a blocking I2C bus
///
/// Reads and writes through [`get_register`](Self::get_register) and
/// [`set_register`](Self::set_register) always hit the bus and never touch
/// the cached register. Only [`refresh`](Self::refresh) updates the cache,
/// and it polls the device at most once per interval.
pub struct PinExpander<I2C, CLK> {
    i2c: I2C,
    clock: CLK,
    address: u8,
    cache: RegisterCache,
}

impl<I2C, CLK, E> PinExpander<I2C, CLK>
where
    I2C: I2c<Error = E>,
    CLK: Clock,
{
    /// Create a driver at the default address (0x20) polling every 10 ms
    pub fn new(i2c: I2C, clock: CLK) -> Self {
        Self::with_config(i2c, clock, Config::default())
    }

    /// Create a driver at the given address
    pub fn with_address(i2c: I2C, clock: CLK, address: Address) -> Self {
        Self::with_config(
            i2c,
            clock,
            Config {
                address,
                ..Config::default()
            },
        )
    }

    pub fn with_config(i2c: I2C, clock: CLK, config: Config) -> Self {
        Self {
            i2c,
            clock,
            address: config.address.as_u8(),
            cache: RegisterCache::new(config.interval_ms),
        }
    }

    /// Give back the bus and the clock
    pub fn destroy(self) -> (I2C, CLK) {
        (self.i2c, self.clock)
    }

    pub fn address(&self) -> Address {
        Address::from(self.address)
    }

    /// Read the register from the device, bypassing the cache and the poll interval
    pub fn get_register(&mut self) -> Result<u8, Error<E>> {
        let mut buffer = [0u8; 1];
        self.i2c
            .read(self.address, &mut buffer)
            .map_err(Error::I2c)?;
        Ok(buffer[0])
    }

    /// Write the register to the device
    ///
    /// The cache is left as is, the next due `refresh` picks up the new value.
    pub fn set_register(&mut self, value: u8) -> Result<(), Error<E>> {
        log::trace!("pcf8574@{:#04x}: write {:#010b}", self.address, value);
        self.i2c
            .write(self.address, &[value])
            .map_err(Error::I2c)
    }

    /// Poll the device if the interval elapsed since the last poll
    ///
    /// Returns whether the cached register changed, which is also what
    /// [`changed`](Self::changed) reports until the next call. On a bus
    /// error the cache is kept and the next call polls again.
    pub fn refresh(&mut self) -> Result<bool, Error<E>> {
        let now = self.clock.now_ms();
        if !self.cache.begin_refresh(now) {
            return Ok(false);
        }

        match self.get_register() {
            Ok(value) => Ok(self.cache.record(now, value)),
            Err(e) => {
                log::warn!("pcf8574@{:#04x}: poll failed", self.address);
                Err(e)
            }
        }
    }

    /// Whether the last `refresh` saw a new register value
    pub fn changed(&self) -> bool {
        self.cache.changed()
    }

    /// Cached register
    pub fn port(&self) -> Port {
        self.cache.port()
    }

    /// Cached register as '1'/'0' characters, P0 first
    pub fn bits_as_string(&self) -> String<8> {
        self.cache.port().bits()
    }

    /// Cached level of a pin
    pub fn pin(&self, pin: u8) -> Result<bool, Error<E>> {
        self.cache.port().get_pin(pin).ok_or(Error::InvalidPin)
    }

    pub fn set_interval(&mut self, interval_ms: u32) {
        self.cache.set_interval_ms(interval_ms);
    }

    pub fn get_interval(&self) -> u32 {
        self.cache.interval_ms()
    }
}
