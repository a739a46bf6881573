use crate::{
    radio::{Nrf24, Nrf24Error},
    spi::SpiHandler,
    AddressWidth, StatusFlags,
};

use super::registers;

/// RF_SETUP after reset: 2Mbps, 0dBm.
const RF_SETUP_DEFAULT: u8 = 0x0F;
const RX_ADDR_P0_DEFAULT: u8 = 0xE7;
const RX_ADDR_P1_DEFAULT: u8 = 0xC2;

impl<SPI> Nrf24<SPI>
where
    SPI: SpiHandler,
{
    /// Put the radio back into a known state: powered down, all pipes closed,
    /// FIFOs empty, no pending IRQ, 3 byte addresses and no features.
    ///
    /// The default pipe 0 and pipe 1 addresses are written while all pipes are
    /// closed and before any payload width. No pipe is opened again; see
    /// [`Nrf24::set_rx_pipes()`].
    pub fn reset(&mut self) -> Result<(), Nrf24Error<SPI::Error>> {
        #[cfg(feature = "defmt")]
        defmt::trace!("resetting nRF24L01");
        for address in [
            registers::CONFIG,
            registers::EN_AA,
            registers::EN_RXADDR,
            registers::SETUP_RETR,
            registers::RF_CH,
        ] {
            self.write_register(address, 0)?;
        }
        self.set_address_width(AddressWidth::Bytes3)?;
        self.write_register(registers::RF_SETUP, RF_SETUP_DEFAULT)?;
        self.flush_tx()?;
        self.flush_rx()?;
        self.clear_status_flags(StatusFlags::new())?;

        let mut address = [RX_ADDR_P0_DEFAULT; 6];
        self.set_rx_address(0, &mut address)?;
        let mut address = [RX_ADDR_P1_DEFAULT; 6];
        self.set_rx_address(1, &mut address)?;

        for pipe in 0..6 {
            self.set_payload_length(pipe, 0)?;
        }
        self.set_dynamic_payloads(0)?;
        self.write_register(registers::FEATURE, 0)
    }
}
