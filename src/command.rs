//! Command Table
//!
//! UC8179 opcodes used by the black/white full refresh path.

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Panel Setting
    ///
    /// <<RES:b2, REG:b1, KW_R:b1, UD:b1, SHL:b1, SHD_N:b1, RST_N:b1>>
    ///
    /// ## REG
    /// - 0, LUT from OTP [POR]
    /// - 1, LUT from register
    ///
    /// ## KW/R
    /// - 0, KWR mode [POR]
    /// - 1, KW mode
    PanelSetting = 0x00,
    /// Power Setting
    ///
    /// <<0:b3, BD_EN:b1, 0:b1, VSR_EN:b1, VS_EN:b1, VG_EN:b1>>
    /// <<0:b5, VCOM_SLEW:b1, VGH_VGL:b2>>
    /// <<0:b2, VDH:b6>>
    /// <<0:b2, VDL:b6>>
    PowerSetting = 0x01,
    /// Turn off the booster, regulators and VCOM. BUSY goes high when done.
    PowerOff = 0x02,
    /// Turn on the booster, regulators and VCOM.
    PowerOn = 0x04,
    /// Booster Soft Start
    ///
    /// <<BTPHA:u8>> <<BTPHB:u8>> <<BTPHC1:u8>> <<PHC2EN:b1, 0:b1, BTPHC2:b6>>
    BoosterSoftStart = 0x06,
    /// Deep Sleep
    ///
    /// Check code must be 0xA5, only a hardware reset wakes the chip.
    DeepSleep = 0x07,
    /// Display Refresh
    DisplayRefresh = 0x12,
    /// New data, KW mode
    DataStartTransmission2 = 0x13,
    /// Dual SPI mode
    ///
    /// <<0:b2, MM_EN:b1, DUSPI_EN:b1, 0:b4>>
    DualSpi = 0x15,
    /// VCOM LUT (LUTC)
    LutVcom = 0x20,
    /// White to white LUT (LUTWW)
    LutWhiteToWhite = 0x21,
    /// Black to white LUT (LUTKW)
    LutBlackToWhite = 0x22,
    /// White to black LUT (LUTWK)
    LutWhiteToBlack = 0x23,
    /// Black to black LUT (LUTKK)
    LutBlackToBlack = 0x24,
    /// VCOM and Data Interval Setting
    ///
    /// <<BDZ:b1, 0:b1, BDV:b2, N2OCP:b1, 0:b1, DDX:b2>>
    /// <<0:b4, CDI:b4>>
    VcomAndDataIntervalSetting = 0x50,
    /// TCON Setting, source to gate and gate to source non-overlap period
    TconSetting = 0x60,
    /// Resolution Setting
    ///
    /// <<HRES:u16>> <<VRES:u16>>, big endian, HRES multiple of 8
    ResolutionSetting = 0x61,
    /// Get Status, also latches the BUSY_N output
    GetStatus = 0x71,
}

impl Command {
    /// Wire value of the opcode.
    pub const fn addr(self) -> u8 {
        self as u8
    }
}
