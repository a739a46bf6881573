use crate::{
    radio::{Feature, Nrf24, Nrf24Error, MAX_PAYLOAD_LEN},
    spi::SpiHandler,
    AddressWidth,
};

use super::registers;

/// Only the 6 pipes' bits of EN_AA, EN_RXADDR and DYNPD exist.
const PIPES_MASK: u8 = 0x3F;

impl<SPI> Nrf24<SPI>
where
    SPI: SpiHandler,
{
    /// Set the length of every pipe address (SETUP_AW).
    pub fn set_address_width(&mut self, width: AddressWidth) -> Result<(), Nrf24Error<SPI::Error>> {
        self.write_register(registers::SETUP_AW, width.into_bits())
    }

    /// Get the configured length of every pipe address.
    pub fn address_width(&mut self) -> Result<AddressWidth, Nrf24Error<SPI::Error>> {
        self.read_register(registers::SETUP_AW)
            .map(AddressWidth::from_bits)
    }

    /// Set the address that `pipe` listens on to `address[1..]`.
    ///
    /// `address[0]` is overwritten with the command byte. The address should
    /// match the configured [`AddressWidth`] for pipes 0 and 1. Pipes 2 to 5
    /// share the upper bytes of pipe 1's address and only take one byte.
    pub fn set_rx_address(
        &mut self,
        pipe: u8,
        address: &mut [u8],
    ) -> Result<(), Nrf24Error<SPI::Error>> {
        let pipe = Self::check_pipe(pipe)?;
        self.write_multi_register(registers::RX_ADDR_P0 + pipe, address)
    }

    /// Set the address packets are sent to to `address[1..]`.
    ///
    /// `address[0]` is overwritten with the command byte. To receive auto-ack
    /// packets, pipe 0 must listen on the same address.
    pub fn set_tx_address(&mut self, address: &mut [u8]) -> Result<(), Nrf24Error<SPI::Error>> {
        self.write_multi_register(registers::TX_ADDR, address)
    }

    /// Set the static payload length of `pipe` (RX_PW_Px).
    ///
    /// A `length` of 0 disables the pipe.
    pub fn set_payload_length(
        &mut self,
        pipe: u8,
        length: u8,
    ) -> Result<(), Nrf24Error<SPI::Error>> {
        let pipe = Self::check_pipe(pipe)?;
        if length as usize > MAX_PAYLOAD_LEN {
            return Err(Nrf24Error::InvalidLength);
        }
        self.write_register(registers::RX_PW_P0 + pipe, length)
    }

    /// Enable dynamic payload lengths on the pipes set in `pipes` (DYNPD),
    /// e.g. `1 << 4` for pipe 4 only.
    ///
    /// Also needs [`Feature::dynamic_payloads`](fn@Feature::dynamic_payloads).
    pub fn set_dynamic_payloads(&mut self, pipes: u8) -> Result<(), Nrf24Error<SPI::Error>> {
        self.write_register(registers::DYNPD, pipes & PIPES_MASK)
    }

    /// Enable auto-acknowledgement on the pipes set in `pipes` (EN_AA).
    pub fn set_auto_ack(&mut self, pipes: u8) -> Result<(), Nrf24Error<SPI::Error>> {
        self.write_register(registers::EN_AA, pipes & PIPES_MASK)
    }

    /// Open the pipes set in `pipes` for receiving (EN_RXADDR); all others are closed.
    pub fn set_rx_pipes(&mut self, pipes: u8) -> Result<(), Nrf24Error<SPI::Error>> {
        self.write_register(registers::EN_RXADDR, pipes & PIPES_MASK)
    }

    /// Write the FEATURE register.
    pub fn set_features(&mut self, features: Feature) -> Result<(), Nrf24Error<SPI::Error>> {
        self.write_register(registers::FEATURE, features.into_bits())
    }
}

/////////////////////////////////////////////////////////////////////////////////
/// unit tests
#[cfg(test)]
mod test {
    extern crate std;
    use super::registers;
    use crate::{
        radio::{Feature, Nrf24Error},
        test::{mk_radio, write_frame, Nrf24Model},
        AddressWidth,
    };
    use std::vec;

    #[test]
    fn address_width() {
        let model = Nrf24Model::new();
        let (mut radio, _backplane) = mk_radio(&model);
        radio.set_address_width(AddressWidth::Bytes4).unwrap();
        assert_eq!(model.borrow().frames, vec![vec![0x23, 2]]);
        assert_eq!(radio.address_width(), Ok(AddressWidth::Bytes4));
        radio.set_address_width(AddressWidth::Bytes3).unwrap();
        assert_eq!(radio.address_width(), Ok(AddressWidth::Bytes3));
    }

    #[test]
    fn rx_address() {
        let model = Nrf24Model::new();
        let (mut radio, _backplane) = mk_radio(&model);
        let mut address = [0u8, b'1', b'N', b'o', b'd', b'e'];
        radio.set_rx_address(1, &mut address).unwrap();
        assert_eq!(address[0], 0x2B);
        let mut lsb = [0u8, b'2'];
        radio.set_rx_address(5, &mut lsb).unwrap();
        assert_eq!(lsb[0], 0x2F);

        let model = model.borrow();
        assert_eq!(model.register_bytes(registers::RX_ADDR_P1), *b"1Node");
        assert_eq!(model.register(registers::RX_ADDR_P1 + 4), b'2');
        drop(model);

        assert_eq!(
            radio.set_rx_address(6, &mut address),
            Err(Nrf24Error::InvalidPipe(6))
        );
    }

    #[test]
    fn tx_address() {
        let model = Nrf24Model::new();
        let (mut radio, _backplane) = mk_radio(&model);
        let mut address = [0xFFu8, 0xE7, 0xE7, 0xE7];
        radio.set_tx_address(&mut address).unwrap();
        assert_eq!(model.borrow().frames, vec![vec![0x30, 0xE7, 0xE7, 0xE7]]);
    }

    #[test]
    fn payload_length() {
        let model = Nrf24Model::new();
        let (mut radio, _backplane) = mk_radio(&model);
        radio.set_payload_length(3, 32).unwrap();
        assert_eq!(model.borrow().frames, vec![vec![0x34, 32]]);
        assert_eq!(
            radio.set_payload_length(3, 33),
            Err(Nrf24Error::InvalidLength)
        );
        assert_eq!(
            radio.set_payload_length(7, 1),
            Err(Nrf24Error::InvalidPipe(7))
        );
        assert_eq!(model.borrow().frames.len(), 1);
    }

    #[test]
    fn pipe_masks() {
        let model = Nrf24Model::new();
        let (mut radio, _backplane) = mk_radio(&model);
        radio.set_dynamic_payloads(1 << 4).unwrap();
        radio.set_auto_ack(0xFF).unwrap();
        radio.set_rx_pipes(0b11).unwrap();
        assert_eq!(
            model.borrow().frames,
            vec![
                write_frame(registers::DYNPD, &[0x10]),
                write_frame(registers::EN_AA, &[0x3F]),
                write_frame(registers::EN_RXADDR, &[0x03]),
            ]
        );
        assert_eq!(model.borrow().frames[0][0], 0x3C);
    }

    #[test]
    fn features() {
        let model = Nrf24Model::new();
        let (mut radio, _backplane) = mk_radio(&model);
        let features = Feature::new()
            .with_dynamic_payloads(true)
            .with_ack_payloads(true);
        radio.set_features(features).unwrap();
        assert_eq!(model.borrow().frames, vec![vec![0x3D, 6]]);
    }
}
