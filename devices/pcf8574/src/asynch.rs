//! Async flavour of the driver, for executors such as embassy

use embedded_hal_async::i2c::I2c as AsyncI2c;
use heapless::String;

use crate::cache::RegisterCache;
use crate::{Address, Clock, Config, Error, Port};

/// PCF8574 driver over an async I2C bus
///
/// Same behavior as [`crate::PinExpander`], bus accesses are awaited.
pub struct PinExpander<I2C, CLK> {
    i2c: I2C,
    clock: CLK,
    address: u8,
    cache: RegisterCache,
}

impl<I2C, CLK, E> PinExpander<I2C, CLK>
where
    I2C: AsyncI2c<Error = E>,
    CLK: Clock,
{
    pub fn new(i2c: I2C, clock: CLK) -> Self {
        Self::with_config(i2c, clock, Config::default())
    }

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
        PinExpander {
            i2c,
            clock,
            address: config.address.as_u8(),
            cache: RegisterCache::new(config.interval_ms),
        }
    }

    pub fn destroy(self) -> (I2C, CLK) {
        (self.i2c, self.clock)
    }

    pub fn address(&self) -> Address {
        Address::from(self.address)
    }

    /// Read the register from the device, bypassing the cache.
    pub async fn get_register(&mut self) -> Result<u8, Error<E>> {
        let mut data: [u8; 1] = [0];
        self.i2c
            .read(self.address, &mut data)
            .await
            .map_err(Error::I2c)?;
        Ok(data[0])
    }

    /// Write the register to the device, the cache is not updated.
    pub async fn set_register(&mut self, value: u8) -> Result<(), Error<E>> {
        log::trace!("pcf8574@{:#04x}: write {:#010b}", self.address, value);
        self.i2c
            .write(self.address, &[value])
            .await
            .map_err(Error::I2c)
    }

    /// Poll the device if due, return whether the cached register changed.
    pub async fn refresh(&mut self) -> Result<bool, Error<E>> {
        let now = self.clock.now_ms();
        if !self.cache.begin_refresh(now) {
            return Ok(false);
        }

        match self.get_register().await {
            Ok(value) => Ok(self.cache.record(now, value)),
            Err(e) => {
                log::warn!("pcf8574@{:#04x}: poll failed", self.address);
                Err(e)
            }
        }
    }

    pub fn changed(&self) -> bool {
        self.cache.changed()
    }

    pub fn port(&self) -> Port {
        self.cache.port()
    }

    pub fn bits_as_string(&self) -> String<8> {
        self.cache.port().bits()
    }

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
