//! Panel geometry and timing.
//!
//! Geometry can come from a compile time [`DisplaySize`] marker or be given at runtime,
//! either way the driver only ever sees a [`PanelConfig`].

use crate::interface::DisplayError;

/// Trait that defines display size information
pub trait DisplaySize {
    /// Width in pixels
    const WIDTH: usize;
    /// Height in pixels
    const HEIGHT: usize;

    /// Frame buffer length in bytes
    const N: usize = (Self::WIDTH / 8) * Self::HEIGHT;
}

/// 5in83, Waveshare 5.83" V2 and GDEW0583T8
#[derive(Clone, Copy)]
pub struct DisplaySize648x480;

impl DisplaySize for DisplaySize648x480 {
    const WIDTH: usize = 648;
    const HEIGHT: usize = 480;
}

/// Everything the driver needs to know about the attached panel.
///
/// All delays are in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PanelConfig {
    width: u16,
    height: u16,
    /// RST held high before the pulse
    pub reset_initial_ms: u32,
    /// RST held low
    pub reset_low_ms: u32,
    /// RST held high after the pulse, before the first command
    pub reset_settle_ms: u32,
    /// Sleep between two BUSY reads
    pub busy_poll_interval_ms: u32,
    /// Give up waiting for BUSY after this long
    pub busy_timeout_ms: u32,
    /// Charge pump settle time after power on
    pub power_on_delay_ms: u32,
}

impl PanelConfig {
    /// 5.83", 648 x 480
    pub const EPD_5IN83: PanelConfig = PanelConfig::with_geometry(648, 480);

    const fn with_geometry(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            reset_initial_ms: 200,
            reset_low_ms: 2,
            reset_settle_ms: 200,
            busy_poll_interval_ms: 10,
            // a full refresh takes a few seconds at low temperature
            busy_timeout_ms: 30_000,
            power_on_delay_ms: 100,
        }
    }

    /// Width must be a non-zero multiple of 8 so that every row is whole bytes.
    pub const fn new(width: u16, height: u16) -> Result<Self, DisplayError> {
        if width == 0 || height == 0 || width % 8 != 0 {
            return Err(DisplayError::InvalidGeometry);
        }
        Ok(Self::with_geometry(width, height))
    }

    pub fn from_size<S: DisplaySize>() -> Result<Self, DisplayError> {
        let width = u16::try_from(S::WIDTH).map_err(|_| DisplayError::InvalidGeometry)?;
        let height = u16::try_from(S::HEIGHT).map_err(|_| DisplayError::InvalidGeometry)?;
        Self::new(width, height)
    }

    pub const fn width(&self) -> u16 {
        self.width
    }

    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Frame buffer length in bytes, one bit per pixel
    pub const fn buffer_len(&self) -> usize {
        self.width as usize * self.height as usize / 8
    }

    pub const fn with_reset_timing(mut self, initial_ms: u32, low_ms: u32, settle_ms: u32) -> Self {
        self.reset_initial_ms = initial_ms;
        self.reset_low_ms = low_ms;
        self.reset_settle_ms = settle_ms;
        self
    }

    pub const fn with_busy_poll_interval_ms(mut self, ms: u32) -> Self {
        self.busy_poll_interval_ms = ms;
        self
    }

    pub const fn with_busy_timeout_ms(mut self, ms: u32) -> Self {
        self.busy_timeout_ms = ms;
        self
    }

    pub const fn with_power_on_delay_ms(mut self, ms: u32) -> Self {
        self.power_on_delay_ms = ms;
        self
    }
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self::EPD_5IN83
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_5in83_buffer_len() {
        assert_eq!(PanelConfig::EPD_5IN83.buffer_len(), 38_880);
        assert_eq!(DisplaySize648x480::N, 38_880);
    }

    #[test]
    fn test_from_size_matches_preset() {
        let config = PanelConfig::from_size::<DisplaySize648x480>().unwrap();
        assert_eq!(config, PanelConfig::EPD_5IN83);
    }

    #[test]
    fn test_rejects_bad_geometry() {
        assert_eq!(PanelConfig::new(0, 480), Err(DisplayError::InvalidGeometry));
        assert_eq!(PanelConfig::new(648, 0), Err(DisplayError::InvalidGeometry));
        assert_eq!(PanelConfig::new(650, 480), Err(DisplayError::InvalidGeometry));
        assert_eq!(PanelConfig::new(16, 4).unwrap().buffer_len(), 8);
    }

    #[test]
    fn test_builders() {
        let config = PanelConfig::EPD_5IN83
            .with_busy_timeout_ms(500)
            .with_busy_poll_interval_ms(5)
            .with_reset_timing(10, 10, 10)
            .with_power_on_delay_ms(0);
        assert_eq!(config.busy_timeout_ms, 500);
        assert_eq!(config.busy_poll_interval_ms, 5);
        assert_eq!(config.reset_low_ms, 10);
        assert_eq!(config.power_on_delay_ms, 0);
        assert_eq!(config.width(), 648);
    }
}
