//! This module defines value types shared by the transaction engine and the radio layer.

use core::{
    fmt::{Display, Formatter, Result},
    write,
};

use bitfield_struct::bitfield;

/// The number of bytes used for every pipe address (SETUP_AW register).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AddressWidth {
    /// 3 byte addresses
    Bytes3,
    /// 4 byte addresses
    Bytes4,
    /// 5 byte addresses
    Bytes5,
}

impl AddressWidth {
    pub(crate) const fn into_bits(self) -> u8 {
        match self {
            AddressWidth::Bytes3 => 1,
            AddressWidth::Bytes4 => 2,
            AddressWidth::Bytes5 => 3,
        }
    }

    pub(crate) const fn from_bits(value: u8) -> Self {
        match value & 3 {
            1 => AddressWidth::Bytes3,
            2 => AddressWidth::Bytes4,
            _ => AddressWidth::Bytes5,
        }
    }

    /// The address length in bytes.
    pub const fn len(self) -> usize {
        self.into_bits() as usize + 2
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for AddressWidth {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{} bytes", self.len())
    }
}

impl Display for AddressWidth {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{} bytes", self.len())
    }
}

/// The possible states of a FIFO.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FifoState {
    /// Represent the state of a FIFO when it is full.
    Full,
    /// Represent the state of a FIFO when it is empty.
    Empty,
    /// Represent the state of a FIFO when it is not full but not empty either.
    Occupied,
}

#[cfg(feature = "defmt")]
impl defmt::Format for FifoState {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            FifoState::Empty => defmt::write!(fmt, "Empty"),
            FifoState::Full => defmt::write!(fmt, "Full"),
            FifoState::Occupied => defmt::write!(fmt, "Occupied"),
        }
    }
}

impl Display for FifoState {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            FifoState::Empty => write!(f, "Empty"),
            FifoState::Full => write!(f, "Full"),
            FifoState::Occupied => write!(f, "Occupied"),
        }
    }
}

/// The radio's STATUS register, as shifted out with the first byte of every command.
///
/// To instantiate an object with flags that have different values:
/// ```
/// use rf24_dma::StatusFlags;
/// let flags = StatusFlags::default() // all flags are false
///     .with_rx_dr(true); // assert only `rx_dr` flags
/// ```
/// Use [`StatusFlags::default`] to instantiate all flags set to false.
/// Use [`StatusFlags::new`] to instantiate all IRQ flags set to true.
#[bitfield(u8, new = false, order = Msb)]
pub struct StatusFlags {
    #[bits(1)]
    _padding: u8,

    /// A flag to describe if RX Data Ready to read.
    #[bits(1, access = RO)]
    pub rx_dr: bool,

    /// A flag to describe if TX Data Sent.
    #[bits(1, access = RO)]
    pub tx_ds: bool,

    /// A flag to describe if TX Data Failed (maximum number of retries reached).
    #[bits(1, access = RO)]
    pub tx_df: bool,

    /// The pipe number of the payload at the top of the RX FIFO (7 means the RX FIFO is empty).
    #[bits(3, access = RO)]
    pub rx_pipe: u8,

    /// Is the TX FIFO full?
    #[bits(1, access = RO)]
    pub tx_full: bool,
}

#[cfg(feature = "defmt")]
impl defmt::Format for StatusFlags {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "StatusFlags rx_dr: {}, tx_ds: {}, tx_df: {}",
            self.rx_dr(),
            self.tx_ds(),
            self.tx_df()
        )
    }
}

impl StatusFlags {
    /// A mask to isolate only the IRQ flags. Useful for STATUS and CONFIG registers.
    pub(crate) const IRQ_MASK: u8 = 0x70;

    /// A convenience constructor similar to [`StatusFlags::default`] except
    /// all IRQ fields are set to `true`.
    pub fn new() -> Self {
        Self::from_bits(Self::IRQ_MASK)
    }

    /// A flag to describe if RX Data Ready to read.
    pub fn with_rx_dr(self, flag: bool) -> Self {
        let new_val = self.into_bits() & !(1 << Self::RX_DR_OFFSET);
        Self::from_bits(new_val | ((flag as u8) << Self::RX_DR_OFFSET))
    }

    /// A flag to describe if TX Data Sent.
    pub fn with_tx_ds(self, flag: bool) -> Self {
        let new_val = self.into_bits() & !(1 << Self::TX_DS_OFFSET);
        Self::from_bits(new_val | ((flag as u8) << Self::TX_DS_OFFSET))
    }

    /// A flag to describe if TX Data Failed.
    pub fn with_tx_df(self, flag: bool) -> Self {
        let new_val = self.into_bits() & !(1 << Self::TX_DF_OFFSET);
        Self::from_bits(new_val | ((flag as u8) << Self::TX_DF_OFFSET))
    }
}

impl Display for StatusFlags {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(
            f,
            "StatusFlags rx_dr: {}, tx_ds: {}, tx_df: {}",
            self.rx_dr(),
            self.tx_ds(),
            self.tx_df()
        )
    }
}

#[cfg(test)]
mod test {
    use super::{AddressWidth, FifoState, StatusFlags};
    extern crate std;
    use std::{format, string::String};

    fn display_fifo_state(param: FifoState, expected: &str) -> bool {
        format!("{param}") == expected
    }

    #[test]
    fn fifo_state_display() {
        assert!(display_fifo_state(FifoState::Empty, "Empty"));
        assert!(display_fifo_state(FifoState::Full, "Full"));
        assert!(display_fifo_state(FifoState::Occupied, "Occupied"));
    }

    #[test]
    fn address_width_bits() {
        for width in [AddressWidth::Bytes3, AddressWidth::Bytes4, AddressWidth::Bytes5] {
            assert_eq!(AddressWidth::from_bits(width.into_bits()), width);
        }
        assert_eq!(AddressWidth::Bytes3.into_bits(), 1);
        assert_eq!(AddressWidth::Bytes5.len(), 5);
        assert_eq!(format!("{}", AddressWidth::Bytes4), String::from("4 bytes"));
    }

    #[test]
    fn display_flags() {
        assert_eq!(
            format!("{}", StatusFlags::default()),
            String::from("StatusFlags rx_dr: false, tx_ds: false, tx_df: false")
        );
    }

    fn set_flags(rx_dr: bool, tx_ds: bool, tx_df: bool) {
        let flags = StatusFlags::default()
            .with_rx_dr(rx_dr)
            .with_tx_ds(tx_ds)
            .with_tx_df(tx_df);
        assert_eq!(flags.rx_dr(), rx_dr);
        assert_eq!(flags.tx_ds(), tx_ds);
        assert_eq!(flags.tx_df(), tx_df);
    }

    #[test]
    fn flags_0x50() {
        set_flags(true, false, true);
    }

    #[test]
    fn flags_0x20() {
        set_flags(false, true, false);
    }

    #[cfg(feature = "defmt")]
    #[test]
    fn defmt_format_on_every_target() {
        fn is_format<T: defmt::Format>() {}
        is_format::<AddressWidth>();
        is_format::<FifoState>();
        is_format::<StatusFlags>();
        is_format::<crate::Config>();
        is_format::<crate::Feature>();
        is_format::<crate::spi::DmaDirection>();
        is_format::<crate::SpiError<core::convert::Infallible>>();
        is_format::<crate::Nrf24Error<()>>();
    }

    #[test]
    fn decode_status_byte() {
        // RX_DR with a payload from pipe 3 and a full TX FIFO
        let flags = StatusFlags::from_bits(0x47);
        assert!(flags.rx_dr());
        assert!(!flags.tx_ds());
        assert_eq!(flags.rx_pipe(), 3);
        assert!(flags.tx_full());
        assert_eq!(StatusFlags::new().into_bits(), 0x70);
    }
}
