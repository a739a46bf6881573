use bitfield_struct::bitfield;

/// The CONFIG register.
///
/// ```
/// use rf24_dma::Config;
/// // 16 bit CRC, powered up as a receiver, RX_DR shown on the IRQ pin only
/// let config = Config::new()
///     .with_mask_tx_ds(true)
///     .with_mask_max_rt(true)
///     .with_crc_enabled(true)
///     .with_crc_2_bytes(true)
///     .with_power(true)
///     .with_prim_rx(true);
/// assert_eq!(config.into_bits(), 0x3F);
/// ```
#[bitfield(u8, order = Msb)]
#[derive(PartialEq, Eq)]
pub struct Config {
    #[bits(1)]
    _padding: u8,

    /// Hide the "RX Data Ready" event from the IRQ pin.
    pub mask_rx_dr: bool,

    /// Hide the "TX Data Sent" event from the IRQ pin.
    pub mask_tx_ds: bool,

    /// Hide the "maximum retransmits reached" event from the IRQ pin.
    pub mask_max_rt: bool,

    /// Enable CRC (forced on while auto-ack is enabled on any pipe).
    pub crc_enabled: bool,

    /// Use a 2 byte CRC instead of 1 byte.
    pub crc_2_bytes: bool,

    /// PWR_UP
    pub power: bool,

    /// PRIM_RX: primary receiver when set, primary transmitter otherwise.
    pub prim_rx: bool,
}

#[cfg(feature = "defmt")]
impl defmt::Format for Config {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "Config({=u8:#x})", self.into_bits())
    }
}

/// The FEATURE register.
#[bitfield(u8, order = Msb)]
#[derive(PartialEq, Eq)]
pub struct Feature {
    #[bits(5)]
    _padding: u8,

    /// EN_DPL: allow dynamic payload lengths (see also the DYNPD register).
    pub dynamic_payloads: bool,

    /// EN_ACK_PAY: allow payloads attached to ACK packets.
    pub ack_payloads: bool,

    /// EN_DYN_ACK: allow the per-packet no-ack flag.
    pub dynamic_ack: bool,
}

#[cfg(feature = "defmt")]
impl defmt::Format for Feature {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "Feature dynamic_payloads: {}, ack_payloads: {}, dynamic_ack: {}",
            self.dynamic_payloads(),
            self.ack_payloads(),
            self.dynamic_ack()
        )
    }
}
