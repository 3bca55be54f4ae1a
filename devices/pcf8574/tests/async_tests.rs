use core::cell::Cell;

use embedded_hal::i2c::ErrorKind;
use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};
use pcf8574::asynch::PinExpander;
use pcf8574::{Address, Clock, Error};
use tokio_test::block_on;

struct TestClock(Cell<u32>);

impl TestClock {
    fn advance(&self, ms: u32) {
        self.0.set(self.0.get().wrapping_add(ms));
    }
}

impl Clock for TestClock {
    fn now_ms(&self) -> u32 {
        self.0.get()
    }
}

#[test]
fn read_and_write_register() {
    let expectations = [
        I2cTransaction::write(0xaa, vec![0b0011_0011]),
        I2cTransaction::read(0xaa, vec![0b1100_0011]),
    ];
    let mut i2c = I2cMock::new(&expectations);
    let clock = TestClock(Cell::new(0));

    let mut expander = PinExpander::with_address(&mut i2c, &clock, Address::from(0xaa));

    let result = block_on(expander.set_register(0b0011_0011));
    assert!(result.is_ok());

    let result = block_on(expander.get_register());
    assert_eq!(result, Ok(0b1100_0011));

    //neither access touches the cache
    assert_eq!(expander.port().as_u8(), 0xFF);
    assert!(!expander.changed());

    i2c.done();
}

#[test]
fn refresh_gates_and_reports_change() {
    let expectations = [
        I2cTransaction::read(0x20, vec![0b1111_1111]),
        I2cTransaction::read(0x20, vec![0b0000_0001]),
    ];
    let mut i2c = I2cMock::new(&expectations);
    let clock = TestClock(Cell::new(0));

    let mut expander = PinExpander::new(&mut i2c, &clock);

    assert_eq!(block_on(expander.refresh()), Ok(false));
    assert_eq!(block_on(expander.refresh()), Ok(false));

    clock.advance(10);
    assert_eq!(block_on(expander.refresh()), Ok(true));
    assert!(expander.changed());
    assert_eq!(expander.bits_as_string().as_str(), "10000000");
    assert_eq!(expander.pin(0), Ok(true));
    assert_eq!(expander.pin(1), Ok(false));
    assert_eq!(expander.pin(8), Err(Error::InvalidPin));

    i2c.done();
}

#[test]
fn zero_interval() {
    let expectations = [
        I2cTransaction::read(0x20, vec![0b1111_1111]),
        I2cTransaction::read(0x20, vec![0b1111_1111]),
    ];
    let mut i2c = I2cMock::new(&expectations);
    let clock = TestClock(Cell::new(0));

    let mut expander = PinExpander::new(&mut i2c, &clock);
    expander.set_interval(0);

    assert_eq!(block_on(expander.refresh()), Ok(false));
    assert_eq!(block_on(expander.refresh()), Ok(false));

    i2c.done();
}

#[test]
fn failed_poll_is_reported() {
    let expectations = [
        I2cTransaction::read(0x20, vec![0]).with_error(ErrorKind::Other),
        I2cTransaction::read(0x20, vec![0b0101_0101]),
    ];
    let mut i2c = I2cMock::new(&expectations);
    let clock = TestClock(Cell::new(0));

    let mut expander = PinExpander::new(&mut i2c, &clock);

    assert_eq!(block_on(expander.refresh()), Err(Error::I2c(ErrorKind::Other)));
    assert_eq!(expander.port().as_u8(), 0xFF);
    assert!(!expander.changed());

    assert_eq!(block_on(expander.refresh()), Ok(true));
    assert_eq!(expander.port().as_u8(), 0b0101_0101);

    i2c.done();
}
