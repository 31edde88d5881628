//! Driver for the 5.83" 648 x 480 black/white e-paper panel on a UC8179 controller.
//!
//! The driver owns an [`EPDInterface`] (SPI bus plus RST, DC, CS and BUSY lines) and
//! sequences the controller: reset, power and panel configuration, waveform LUT,
//! frame transmission and refresh. Every operation blocks until BUSY reports idle,
//! bounded by [`PanelConfig::busy_timeout_ms`].
//!
//! ```ignore
//! let interface = EPDInterface::new(spi, cs, dc, rst, busy);
//! let mut epd: EPD<_> = EPD::new(interface, PanelConfig::EPD_5IN83);
//!
//! epd.init(&mut delay)?;
//! epd.clear(&mut delay)?;
//!
//! let mut buf = [0u8; 648 * 480 / 8];
//! let mut fb = FrameBuffer::new(&mut buf, epd.config())?;
//! Circle::new(Point::new(100, 100), 80)
//!     .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
//!     .draw(&mut fb)?;
//! epd.display_frame(fb.as_bytes(), false, &mut delay)?;
//! epd.sleep(&mut delay)?;
//! ```

#![no_std]

pub mod command;
pub mod config;
pub mod display;
pub mod interface;
pub mod lut;

use core::marker::PhantomData;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_hal::delay::DelayNs;

pub use config::{DisplaySize, DisplaySize648x480, PanelConfig};
pub use display::{DisplayRotation, FrameBuffer};
use drivers::{Driver, UC8179};
pub use interface::{DisplayError, DisplayInterface, EPDInterface};
use lut::Waveform;

pub mod drivers;

/// Where the controller is in its power/configuration lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Never initialized, or registers lost to a hardware reset
    Uninitialized,
    /// Configured, waveform not loaded yet
    AwaitingLutLoad,
    Ready,
    /// Refresh started, BUSY not yet released
    Busy,
    /// Deep sleep, only `init` wakes it
    Asleep,
}

pub struct EPD<I: DisplayInterface, D: Driver = UC8179> {
    interface: I,
    config: PanelConfig,
    waveform: Waveform,
    state: State,
    _phantom: PhantomData<D>,
}

impl<DI: DisplayInterface, D: Driver> EPD<DI, D> {
    /// No bus traffic happens until [`EPD::init`].
    pub fn new(interface: DI, config: PanelConfig) -> Self {
        Self {
            interface,
            config,
            waveform: lut::LUT_FULL_REFRESH,
            state: State::Uninitialized,
            _phantom: PhantomData,
        }
    }

    /// Use another waveform, loaded on the next `init` or `set_lut`.
    pub fn with_waveform(mut self, waveform: Waveform) -> Self {
        self.waveform = waveform;
        self
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    pub fn interface(&self) -> &DI {
        &self.interface
    }

    /// Consume the driver and hand back the interface
    pub fn release(self) -> DI {
        self.interface
    }

    /// Reset, configure and load the waveform. Valid from any state.
    pub fn init<DELAY: DelayNs>(&mut self, delay: &mut DELAY) -> Result<(), D::Error> {
        #[cfg(feature = "defmt")]
        defmt::debug!("init from {}", self.state);

        self.state = State::AwaitingLutLoad;
        let ret = D::wake_up(&mut self.interface, delay, &self.config).and_then(|_| {
            D::set_shape(&mut self.interface, self.config.width(), self.config.height())
        });
        if let Err(e) = ret {
            self.state = State::Uninitialized;
            return Err(e);
        }

        self.set_lut()
    }

    /// Hardware reset pulse only. The controller forgets its configuration.
    pub fn reset<DELAY: DelayNs>(&mut self, delay: &mut DELAY) -> Result<(), D::Error> {
        #[cfg(feature = "defmt")]
        defmt::debug!("hw reset");

        self.state = State::Uninitialized;
        self.interface.reset(
            delay,
            self.config.reset_initial_ms,
            self.config.reset_low_ms,
            self.config.reset_settle_ms,
        )?;
        Ok(())
    }

    /// Write the waveform LUT registers. `init` already does this once.
    pub fn set_lut(&mut self) -> Result<(), D::Error> {
        match self.state {
            State::AwaitingLutLoad | State::Ready => {}
            _ => return Err(DisplayError::ProtocolMisuse.into()),
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("load lut, {} bytes", self.waveform.payload_len());

        D::update_waveform(&mut self.interface, &self.waveform)?;
        self.state = State::Ready;
        Ok(())
    }

    /// Poll BUSY until the controller is idle.
    ///
    /// Fails with [`DisplayError::Timeout`] after `busy_timeout_ms`; the state is left
    /// untouched then and the caller should `init` again.
    pub fn wait_until_idle<DELAY: DelayNs>(&mut self, delay: &mut DELAY) -> Result<(), D::Error> {
        D::busy_wait(&mut self.interface, delay, &self.config)?;
        if self.state == State::Busy {
            self.state = State::Ready;
        }
        Ok(())
    }

    /// Send a full frame and refresh the panel.
    ///
    /// `buffer` must be exactly `width * height / 8` bytes, anything else is rejected
    /// before touching the bus. With `inverted` every byte is complemented on the wire.
    pub fn display_frame<DELAY: DelayNs>(
        &mut self,
        buffer: &[u8],
        inverted: bool,
        delay: &mut DELAY,
    ) -> Result<(), D::Error> {
        self.ensure_ready()?;

        let expected = self.config.buffer_len();
        if buffer.len() != expected {
            #[cfg(feature = "defmt")]
            defmt::warn!("frame is {} bytes, expected {}", buffer.len(), expected);
            return Err(DisplayError::InvalidBufferLength {
                expected,
                actual: buffer.len(),
            }
            .into());
        }

        let mask = if inverted { 0xff } else { 0x00 };
        self.refresh(buffer.iter().map(|&b| b ^ mask), delay)
    }

    /// Blank the whole panel to white.
    pub fn clear<DELAY: DelayNs>(&mut self, delay: &mut DELAY) -> Result<(), D::Error> {
        self.clear_with(BinaryColor::Off, delay)
    }

    /// Fill the whole panel with one color, `On` is black.
    pub fn clear_with<DELAY: DelayNs>(
        &mut self,
        color: BinaryColor,
        delay: &mut DELAY,
    ) -> Result<(), D::Error> {
        self.ensure_ready()?;

        let byte = if color.is_on() == D::BLACK_BIT {
            0xff
        } else {
            0x00
        };
        let n = self.config.buffer_len();
        self.refresh(core::iter::repeat(byte).take(n), delay)
    }

    /// Power off and enter deep sleep. Call `init` before drawing again.
    pub fn sleep<DELAY: DelayNs>(&mut self, delay: &mut DELAY) -> Result<(), D::Error> {
        match self.state {
            State::Asleep => return Ok(()),
            State::Uninitialized | State::Busy => {
                return Err(DisplayError::ProtocolMisuse.into())
            }
            State::AwaitingLutLoad | State::Ready => {}
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("deep sleep");

        D::sleep(&mut self.interface, delay, &self.config)?;
        self.state = State::Asleep;
        Ok(())
    }

    fn ensure_ready(&self) -> Result<(), D::Error> {
        if self.state != State::Ready {
            #[cfg(feature = "defmt")]
            defmt::warn!("display in state {}", self.state);
            return Err(DisplayError::ProtocolMisuse.into());
        }
        Ok(())
    }

    fn refresh<I, DELAY>(&mut self, frame: I, delay: &mut DELAY) -> Result<(), D::Error>
    where
        I: IntoIterator<Item = u8>,
        DELAY: DelayNs,
    {
        let _n = D::update_frame(&mut self.interface, frame)?;

        #[cfg(feature = "defmt")]
        defmt::debug!("sent {} bytes, refresh", _n);

        D::turn_on_display(&mut self.interface)?;
        self.state = State::Busy;
        self.wait_until_idle(delay)
    }
}
