use embedded_hal::delay::DelayNs;

use crate::config::PanelConfig;
use crate::interface::{DisplayError, DisplayInterface};
use crate::lut::Waveform;

pub use self::uc8179::*;

mod uc8179;

/// Command sequences of one controller family.
///
/// Implementors are stateless, lifecycle bookkeeping lives in [`crate::EPD`].
pub trait Driver {
    type Error: From<DisplayError>;

    // Almost all EPD use bit 0 as black, but some use bit 1 as black
    const BLACK_BIT: bool = false;

    /// HW reset, wait for the controller, then power and panel configuration
    fn wake_up<DI: DisplayInterface, DELAY: DelayNs>(
        di: &mut DI,
        delay: &mut DELAY,
        config: &PanelConfig,
    ) -> Result<(), Self::Error>;

    fn set_shape<DI: DisplayInterface>(di: &mut DI, x: u16, y: u16) -> Result<(), Self::Error>;

    /// Write every LUT register of `waveform`
    fn update_waveform<DI: DisplayInterface>(
        di: &mut DI,
        waveform: &Waveform,
    ) -> Result<(), Self::Error>;

    /// Stream a frame into display RAM, returns bytes written
    fn update_frame<DI: DisplayInterface, I>(di: &mut DI, buffer: I) -> Result<usize, Self::Error>
    where
        I: IntoIterator<Item = u8>;

    /// Start the refresh. Does not wait for it to finish.
    fn turn_on_display<DI: DisplayInterface>(di: &mut DI) -> Result<(), Self::Error>;

    /// Power off and enter deep sleep
    fn sleep<DI: DisplayInterface, DELAY: DelayNs>(
        di: &mut DI,
        delay: &mut DELAY,
        config: &PanelConfig,
    ) -> Result<(), Self::Error>;

    /// Block until the controller reports idle, or `config.busy_timeout_ms` has passed
    fn busy_wait<DI: DisplayInterface, DELAY: DelayNs>(
        di: &mut DI,
        delay: &mut DELAY,
        config: &PanelConfig,
    ) -> Result<(), Self::Error>;
}
