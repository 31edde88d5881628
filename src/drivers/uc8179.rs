//! UC8179 driver
//!
//! Up to 20MHz
//!
//! For:
//! - Waveshare 5.83" V2 (B/W and the B/W/R board run in KW mode)

use embedded_hal::delay::DelayNs;

use super::Driver;
use crate::command::Command;
use crate::config::PanelConfig;
use crate::interface::{DisplayError, DisplayInterface};
use crate::lut::Waveform;

/// 800 source x 600 gate max, driven here in B/W (KW) mode with LUT from register
pub struct UC8179;

impl Driver for UC8179 {
    type Error = DisplayError;
    const BLACK_BIT: bool = true;

    fn busy_wait<DI: DisplayInterface, DELAY: DelayNs>(
        di: &mut DI,
        delay: &mut DELAY,
        config: &PanelConfig,
    ) -> Result<(), Self::Error> {
        let mut waited_ms: u32 = 0;
        loop {
            di.send_command(Command::GetStatus.addr())?;

            // negative logic, BUSY_N is low while the controller works
            if di.is_busy_high()? {
                return Ok(());
            }

            if waited_ms >= config.busy_timeout_ms {
                #[cfg(feature = "defmt")]
                defmt::warn!("busy timeout after {} ms", waited_ms);
                return Err(DisplayError::Timeout);
            }

            delay.delay_ms(config.busy_poll_interval_ms);
            // a zero interval still has to make progress towards the timeout
            waited_ms = waited_ms.saturating_add(config.busy_poll_interval_ms.max(1));
        }
    }

    fn wake_up<DI: DisplayInterface, DELAY: DelayNs>(
        di: &mut DI,
        delay: &mut DELAY,
        config: &PanelConfig,
    ) -> Result<(), Self::Error> {
        // HW Reset
        di.reset(
            delay,
            config.reset_initial_ms,
            config.reset_low_ms,
            config.reset_settle_ms,
        )?;
        Self::busy_wait(di, delay, config)?;

        // Power Setting
        // VGH=20V, VGL=-20V, VDH=15V, VDL=-15V
        di.send_command_data(Command::PowerSetting.addr(), &[0x07, 0x07, 0x3f, 0x3f])?;

        // Booster soft start, phase A/B/C strength and phase C2 enable
        di.send_command_data(Command::BoosterSoftStart.addr(), &[0x17, 0x17, 0x28, 0x17])?;

        di.send_command(Command::PowerOn.addr())?;
        delay.delay_ms(config.power_on_delay_ms);

        // Panel setting
        // KW-3f   KWR-2F BWROTP 0f BWOTP 1f
        di.send_command_data(Command::PanelSetting.addr(), &[0x3f])?;

        di.send_command_data(Command::DualSpi.addr(), &[0x00])?;

        // BDZ=0, BDV=01 drives the border, DDX=00 so new data 1 = black
        di.send_command_data(Command::VcomAndDataIntervalSetting.addr(), &[0x10, 0x07])?;

        di.send_command_data(Command::TconSetting.addr(), &[0x22])?;

        Ok(())
    }

    fn set_shape<DI: DisplayInterface>(di: &mut DI, x: u16, y: u16) -> Result<(), Self::Error> {
        di.send_command_data(
            Command::ResolutionSetting.addr(),
            &[(x >> 8) as u8, x as u8, (y >> 8) as u8, y as u8],
        )?;
        Ok(())
    }

    fn update_waveform<DI: DisplayInterface>(
        di: &mut DI,
        waveform: &Waveform,
    ) -> Result<(), Self::Error> {
        for (register, table) in waveform.tables {
            di.send_command_data(register.addr(), &table[..])?;
        }
        Ok(())
    }

    fn update_frame<DI: DisplayInterface, I>(di: &mut DI, buffer: I) -> Result<usize, Self::Error>
    where
        I: IntoIterator<Item = u8>,
    {
        di.send_command(Command::DataStartTransmission2.addr())?;
        di.send_data_from_iter(buffer)
    }

    fn turn_on_display<DI: DisplayInterface>(di: &mut DI) -> Result<(), Self::Error> {
        di.send_command(Command::DisplayRefresh.addr())
    }

    fn sleep<DI: DisplayInterface, DELAY: DelayNs>(
        di: &mut DI,
        delay: &mut DELAY,
        config: &PanelConfig,
    ) -> Result<(), Self::Error> {
        di.send_command(Command::PowerOff.addr())?;
        Self::busy_wait(di, delay, config)?;

        di.send_command_data(Command::DeepSleep.addr(), &[0xa5])?;
        Ok(())
    }
}
