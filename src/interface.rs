//! The display interface for e-Paper displays.

use core::fmt;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::spi::SpiBus;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// The controller kept BUSY asserted longer than the configured bound
    Timeout,
    /// Frame buffer does not hold exactly `width * height / 8` bytes
    InvalidBufferLength { expected: usize, actual: usize },
    /// Operation invoked in a state that does not allow it, e.g. drawing before `init`
    ProtocolMisuse,
    /// Width or height is zero, or width is not a multiple of 8
    InvalidGeometry,
    BusWriteError,
    DCError,
    CSError,
    RSTError,
    BUSYError,
}

impl fmt::Display for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayError::Timeout => f.write_str("controller busy timeout"),
            DisplayError::InvalidBufferLength { expected, actual } => {
                write!(f, "frame buffer is {} bytes, expected {}", actual, expected)
            }
            DisplayError::ProtocolMisuse => f.write_str("operation not valid in current state"),
            DisplayError::InvalidGeometry => f.write_str("invalid panel geometry"),
            DisplayError::BusWriteError => f.write_str("SPI write failed"),
            DisplayError::DCError => f.write_str("DC pin error"),
            DisplayError::CSError => f.write_str("CS pin error"),
            DisplayError::RSTError => f.write_str("RST pin error"),
            DisplayError::BUSYError => f.write_str("BUSY pin error"),
        }
    }
}

/// Trait implemented by displays to provide implemenation of core functionality.
pub trait DisplayInterface {
    fn send_command_data(&mut self, command: u8, data: &[u8]) -> Result<(), DisplayError> {
        self.send_command(command)?;
        self.send_data(data)?;
        Ok(())
    }

    /// Send a command to the controller.
    fn send_command(&mut self, command: u8) -> Result<(), DisplayError>;

    /// Send data for a command.
    fn send_data(&mut self, data: &[u8]) -> Result<(), DisplayError>;

    /// Send data via iter, returns the number of bytes written
    fn send_data_from_iter<I>(&mut self, iter: I) -> Result<usize, DisplayError>
    where
        I: IntoIterator<Item = u8>;

    /// Raw level of the BUSY line. Polarity is up to the controller.
    fn is_busy_high(&mut self) -> Result<bool, DisplayError>;

    /// Hard reset: RST high, low, then high again, delays in milliseconds
    fn reset<D>(
        &mut self,
        delay: &mut D,
        initial_ms: u32,
        low_ms: u32,
        settle_ms: u32,
    ) -> Result<(), DisplayError>
    where
        D: DelayNs;
}

/// EPaperDisplay SPI display interface.
pub struct EPDInterface<SPI, CS, DC, RST, BUSY> {
    spi: SPI,
    cs: CS,
    dc: DC,
    rst: RST,
    busy: BUSY,
}

impl<SPI, CS, DC, RST, BUSY> EPDInterface<SPI, CS, DC, RST, BUSY>
where
    SPI: SpiBus<u8>,
    DC: OutputPin,
    CS: OutputPin,
    RST: OutputPin,
    BUSY: InputPin,
{
    pub fn new(spi: SPI, cs: CS, dc: DC, rst: RST, busy: BUSY) -> Self {
        EPDInterface {
            spi,
            cs,
            dc,
            rst,
            busy,
        }
    }

    /// Consume the display interface and return
    /// the underlying peripherial driver and GPIO pins used by it
    pub fn release(self) -> (SPI, CS, DC, RST, BUSY) {
        (self.spi, self.cs, self.dc, self.rst, self.busy)
    }

    fn write_framed(&mut self, is_data: bool, data: &[u8]) -> Result<(), DisplayError> {
        // Assert chip select pin
        self.cs.set_low().map_err(|_| DisplayError::CSError)?;

        // 1 = data, 0 = command
        let dc = if is_data {
            self.dc.set_high()
        } else {
            self.dc.set_low()
        };
        if dc.is_err() {
            self.cs.set_high().ok();
            return Err(DisplayError::DCError);
        }

        let ret = self
            .spi
            .write(data)
            .and_then(|_| self.spi.flush())
            .map_err(|_| DisplayError::BusWriteError);

        // Deassert chip select pin
        self.cs.set_high().ok();

        ret
    }
}

impl<SPI, CS, DC, RST, BUSY> DisplayInterface for EPDInterface<SPI, CS, DC, RST, BUSY>
where
    SPI: SpiBus<u8>,
    DC: OutputPin,
    CS: OutputPin,
    RST: OutputPin,
    BUSY: InputPin,
{
    /// Send a command to the controller.
    fn send_command(&mut self, command: u8) -> Result<(), DisplayError> {
        self.write_framed(false, &[command])
    }

    /// Send data for a command.
    fn send_data(&mut self, data: &[u8]) -> Result<(), DisplayError> {
        self.write_framed(true, data)
    }

    fn send_data_from_iter<I>(&mut self, iter: I) -> Result<usize, DisplayError>
    where
        I: IntoIterator<Item = u8>,
    {
        self.cs.set_low().map_err(|_| DisplayError::CSError)?;
        if self.dc.set_high().is_err() {
            self.cs.set_high().ok();
            return Err(DisplayError::DCError);
        }

        // stage through a small chunk, one SPI transaction per byte is too slow for 38k frames
        let mut chunk = [0u8; 64];
        let mut filled = 0;
        let mut n = 0;
        for d in iter {
            chunk[filled] = d;
            filled += 1;
            n += 1;
            if filled == chunk.len() {
                if self.spi.write(&chunk).is_err() {
                    self.cs.set_high().ok();
                    return Err(DisplayError::BusWriteError);
                }
                filled = 0;
            }
        }

        let ret = self
            .spi
            .write(&chunk[..filled])
            .and_then(|_| self.spi.flush())
            .map_err(|_| DisplayError::BusWriteError);

        // Deassert chip select pin
        self.cs.set_high().ok();

        ret.map(|_| n)
    }

    fn is_busy_high(&mut self) -> Result<bool, DisplayError> {
        self.busy.is_high().map_err(|_| DisplayError::BUSYError)
    }

    fn reset<D>(
        &mut self,
        delay: &mut D,
        initial_ms: u32,
        low_ms: u32,
        settle_ms: u32,
    ) -> Result<(), DisplayError>
    where
        D: DelayNs,
    {
        self.rst.set_high().map_err(|_| DisplayError::RSTError)?;
        delay.delay_ms(initial_ms);

        self.rst.set_low().map_err(|_| DisplayError::RSTError)?;
        delay.delay_ms(low_ms);

        self.rst.set_high().map_err(|_| DisplayError::RSTError)?;
        delay.delay_ms(settle_ms);
        Ok(())
    }
}
