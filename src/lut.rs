//! Waveform Look Up Table(LUT), which defines the display driving waveform settings.
//!
//! With `REG = 1` in panel setting the UC8179 takes its waveform from registers
//! instead of OTP. In KW mode there is one table per transition plus VCOM:
//!
//! | register | table |
//! |---|---|
//! | 0x20 | LUTC, VCOM |
//! | 0x21 | LUTWW, white to white |
//! | 0x22 | LUTKW, black to white |
//! | 0x23 | LUTWK, white to black |
//! | 0x24 | LUTKK, black to black |
//!
//! # Group layout
//!
//! Each table is 7 groups of 6 bytes:
//!
//! <<LEVEL_SEL:u8, TP_A:u8, TP_B:u8, TP_C:u8, TP_D:u8, RP:u8>>
//!
//! - LEVEL_SEL packs four 2 bit voltage selects, one per phase A..D
//!   - 00 – GND
//!   - 01 – VDH
//!   - 10 – VDL
//!   - 11 - floating
//! - TP[n] is the phase length in frames, 0 skips the phase.
//! - RP is the group repeat count, 0 skips the group.
//!
//! For LUTC the LEVEL_SEL byte selects VCOM_DC / VDH+VCOM_DC / VDL+VCOM_DC.

use crate::command::Command;

/// Bytes per LUT register table
pub const LUT_LEN: usize = 42;

/// A full waveform: every LUT register and the table written to it, in transmission order.
#[derive(Clone, Copy, Debug)]
pub struct Waveform {
    pub tables: &'static [(Command, &'static [u8; LUT_LEN])],
}

impl Waveform {
    /// Total payload bytes, excluding the command bytes.
    pub fn payload_len(&self) -> usize {
        self.tables.len() * LUT_LEN
    }
}

#[rustfmt::skip]
const LUT_VCOM: [u8; LUT_LEN] = [
    0x00, 0x0F, 0x0F, 0x00, 0x00, 0x01,
    0x00, 0x0F, 0x01, 0x0F, 0x01, 0x02,
    0x00, 0x0F, 0x0F, 0x00, 0x00, 0x01,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

#[rustfmt::skip]
const LUT_WW: [u8; LUT_LEN] = [
    0x10, 0x0F, 0x0F, 0x00, 0x00, 0x01,
    0x84, 0x0F, 0x01, 0x0F, 0x01, 0x02,
    0x20, 0x0F, 0x0F, 0x00, 0x00, 0x01,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

// black to white
#[rustfmt::skip]
const LUT_KW: [u8; LUT_LEN] = [
    0x10, 0x0F, 0x0F, 0x00, 0x00, 0x01,
    0x84, 0x0F, 0x01, 0x0F, 0x01, 0x02,
    0x20, 0x0F, 0x0F, 0x00, 0x00, 0x01,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

// white to black
#[rustfmt::skip]
const LUT_WK: [u8; LUT_LEN] = [
    0x80, 0x0F, 0x0F, 0x00, 0x00, 0x01,
    0x84, 0x0F, 0x01, 0x0F, 0x01, 0x02,
    0x40, 0x0F, 0x0F, 0x00, 0x00, 0x01,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

#[rustfmt::skip]
const LUT_KK: [u8; LUT_LEN] = [
    0x80, 0x0F, 0x0F, 0x00, 0x00, 0x01,
    0x84, 0x0F, 0x01, 0x0F, 0x01, 0x02,
    0x40, 0x0F, 0x0F, 0x00, 0x00, 0x01,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

/// LUT for full update.
pub const LUT_FULL_REFRESH: Waveform = Waveform {
    tables: &[
        (Command::LutVcom, &LUT_VCOM),
        (Command::LutWhiteToWhite, &LUT_WW),
        (Command::LutBlackToWhite, &LUT_KW),
        (Command::LutWhiteToBlack, &LUT_WK),
        (Command::LutBlackToBlack, &LUT_KK),
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_refresh_registers_in_order() {
        let regs = LUT_FULL_REFRESH.tables.iter().map(|(c, _)| c.addr());
        assert!(regs.eq([0x20, 0x21, 0x22, 0x23, 0x24]));
        assert_eq!(LUT_FULL_REFRESH.payload_len(), 5 * 42);
    }

    #[test]
    fn test_unused_groups_are_skipped() {
        // groups 3..7 must have RP = 0 so the controller never runs them
        for (_, table) in LUT_FULL_REFRESH.tables {
            for group in table.chunks(6).skip(3) {
                assert_eq!(group[5], 0);
            }
        }
    }
}
