use crate::Port;

/// Polling state shared by the blocking and async drivers
#[derive(Debug, Clone, Copy)]
pub(crate) struct RegisterCache {
    port: Port,
    changed: bool,
    interval_ms: u32,
    /// `None` until the first successful poll
    last_poll_ms: Option<u32>,
}

impl RegisterCache {
    pub(crate) fn new(interval_ms: u32) -> Self {
        Self {
            port: Port::default(),
            changed: false,
            interval_ms,
            last_poll_ms: None,
        }
    }

    /// Start a refresh: clear the change flag and tell whether the device is due for a read
    pub(crate) fn begin_refresh(&mut self, now_ms: u32) -> bool {
        self.changed = false;
        match self.last_poll_ms {
            None => true,
            Some(last) => now_ms.wrapping_sub(last) >= self.interval_ms,
        }
    }

    /// Store the value of a successful poll, return whether it differs from the cache
    pub(crate) fn record(&mut self, now_ms: u32, value: u8) -> bool {
        let previous = self.port.as_u8();
        if value ^ previous != 0 {
            log::debug!("pcf8574: register {:#010b} -> {:#010b}", previous, value);
            self.port = Port::from_u8(value);
            self.changed = true;
        }
        self.last_poll_ms = Some(now_ms);
        self.changed
    }

    pub(crate) fn port(&self) -> Port {
        self.port
    }

    pub(crate) fn changed(&self) -> bool {
        self.changed
    }

    pub(crate) fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    pub(crate) fn set_interval_ms(&mut self, interval_ms: u32) {
        self.interval_ms = interval_ms;
    }
}
