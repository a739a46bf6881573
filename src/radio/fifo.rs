use crate::{
    radio::{Nrf24, Nrf24Error, MAX_PAYLOAD_LEN},
    spi::SpiHandler,
    FifoState, StatusFlags,
};

use super::{commands, mnemonics, registers};

impl<SPI> Nrf24<SPI>
where
    SPI: SpiHandler,
{
    /// Use this to discard all 3 layers in the radio's TX FIFO.
    pub fn flush_tx(&mut self) -> Result<(), Nrf24Error<SPI::Error>> {
        self.command(commands::FLUSH_TX)
    }

    /// Use this to discard all 3 layers in the radio's RX FIFO.
    pub fn flush_rx(&mut self) -> Result<(), Nrf24Error<SPI::Error>> {
        self.command(commands::FLUSH_RX)
    }

    /// Put `payload[1..]` into the TX FIFO.
    ///
    /// `payload[0]` is overwritten with the command byte. If `no_ack` is set,
    /// the packet is sent without asking the receiver for an acknowledgement
    /// (requires [`Feature::dynamic_ack`](fn@crate::Feature::dynamic_ack)).
    pub fn write_payload(
        &mut self,
        payload: &mut [u8],
        no_ack: bool,
    ) -> Result<(), Nrf24Error<SPI::Error>> {
        Self::prepare_payload(payload, no_ack)?;
        self.spi
            .write_transaction(payload)
            .map_err(Nrf24Error::Spi)
    }

    /// Like [`Nrf24::write_payload()`], but returns as soon as the transfer started.
    ///
    /// # Safety
    /// `payload` must stay alive and untouched until [`Nrf24::wait()`] returns
    /// or another command has been issued.
    pub unsafe fn start_write_payload(
        &mut self,
        payload: &mut [u8],
        no_ack: bool,
    ) -> Result<(), Nrf24Error<SPI::Error>> {
        Self::prepare_payload(payload, no_ack)?;
        self.spi
            .start_write_transaction(payload)
            .map_err(Nrf24Error::Spi)
    }

    fn prepare_payload(payload: &mut [u8], no_ack: bool) -> Result<(), Nrf24Error<SPI::Error>> {
        Self::check_buffer(payload, MAX_PAYLOAD_LEN)?;
        payload[0] = if no_ack {
            commands::W_TX_PAYLOAD_NO_ACK
        } else {
            commands::W_TX_PAYLOAD
        };
        Ok(())
    }

    /// Load `payload[1..]` to be attached to the next ACK packet sent on `pipe`.
    ///
    /// `payload[0]` is overwritten with the command byte. Requires
    /// [`Feature::ack_payloads`](fn@crate::Feature::ack_payloads) and dynamic
    /// payloads on `pipe`.
    pub fn write_ack_payload(
        &mut self,
        payload: &mut [u8],
        pipe: u8,
    ) -> Result<(), Nrf24Error<SPI::Error>> {
        let pipe = Self::check_pipe(pipe)?;
        Self::check_buffer(payload, MAX_PAYLOAD_LEN)?;
        payload[0] = commands::W_ACK_PAYLOAD | pipe;
        self.spi
            .write_transaction(payload)
            .map_err(Nrf24Error::Spi)
    }

    /// Pop the top of the RX FIFO into `buffer[1..]`.
    ///
    /// `buffer[0]` is overwritten with the command byte and then with the
    /// STATUS register's value, which is also returned.
    pub fn read_payload(
        &mut self,
        buffer: &mut [u8],
    ) -> Result<StatusFlags, Nrf24Error<SPI::Error>> {
        Self::check_buffer(buffer, MAX_PAYLOAD_LEN)?;
        buffer[0] = commands::R_RX_PAYLOAD;
        self.spi
            .read_transaction_in_place(buffer)
            .map_err(Nrf24Error::Spi)?;
        Ok(StatusFlags::from_bits(buffer[0]))
    }

    /// Like [`Nrf24::read_payload()`], but returns as soon as the transfer started.
    ///
    /// Once [`Nrf24::wait()`] returns, `buffer[0]` holds the STATUS byte and
    /// `buffer[1..]` the payload.
    ///
    /// # Safety
    /// `buffer` must stay alive and must not be accessed until [`Nrf24::wait()`]
    /// returns.
    pub unsafe fn start_read_payload(
        &mut self,
        buffer: &mut [u8],
    ) -> Result<(), Nrf24Error<SPI::Error>> {
        Self::check_buffer(buffer, MAX_PAYLOAD_LEN)?;
        buffer[0] = commands::R_RX_PAYLOAD;
        self.spi
            .start_read_transaction_in_place(buffer)
            .map_err(Nrf24Error::Spi)
    }

    /// The length of the payload at the top of the RX FIFO.
    ///
    /// Only meaningful while dynamic payloads are enabled. A result over 32
    /// means the payload is corrupt and the RX FIFO should be flushed.
    pub fn get_payload_length(&mut self) -> Result<u8, Nrf24Error<SPI::Error>> {
        let mut buf = [commands::R_RX_PL_WID, 0];
        self.spi
            .read_transaction_in_place(&mut buf)
            .map_err(Nrf24Error::Spi)?;
        Ok(buf[1])
    }

    /// Re-send the last transmitted payload on every subsequent CE pulse.
    pub fn reuse_tx_payload(&mut self) -> Result<(), Nrf24Error<SPI::Error>> {
        self.command(commands::REUSE_TX_PL)
    }

    /// Describe the TX FIFO if `about_tx` is `true`, the RX FIFO otherwise.
    pub fn fifo_state(&mut self, about_tx: bool) -> Result<FifoState, Nrf24Error<SPI::Error>> {
        let value = self.read_register(registers::FIFO_STATUS)?;
        let (empty, full) = if about_tx {
            (mnemonics::TX_EMPTY, mnemonics::TX_FULL)
        } else {
            (mnemonics::RX_EMPTY, mnemonics::RX_FULL)
        };
        if value & empty != 0 {
            Ok(FifoState::Empty)
        } else if value & full != 0 {
            Ok(FifoState::Full)
        } else {
            Ok(FifoState::Occupied)
        }
    }
}

/////////////////////////////////////////////////////////////////////////////////
/// unit tests
#[cfg(test)]
mod test {
    extern crate std;
    use super::{commands, registers, FifoState};
    use crate::{
        radio::Nrf24Error,
        test::{mk_radio, Nrf24Model},
    };
    use std::{boxed::Box, vec};

    #[test]
    fn flush() {
        let model = Nrf24Model::new();
        model.borrow_mut().push_rx(1, &[1, 2, 3]);
        model.borrow_mut().tx_fifo.push((vec![9], false));
        let (mut radio, _backplane) = mk_radio(&model);
        radio.flush_tx().unwrap();
        radio.flush_rx().unwrap();
        let model = model.borrow();
        assert_eq!(model.frames, vec![vec![0xE1], vec![0xE2]]);
        assert!(model.tx_fifo.is_empty());
        assert!(model.rx_fifo.is_empty());
    }

    #[test]
    fn write_payload_opcode() {
        let model = Nrf24Model::new();
        let (mut radio, _backplane) = mk_radio(&model);

        let mut payload = [0u8, b'h', b'e', b'l', b'o'];
        radio.write_payload(&mut payload, true).unwrap();
        assert_eq!(payload[0], 0xB0);

        let mut payload = [0u8, b'h', b'e', b'l', b'o'];
        radio.write_payload(&mut payload, false).unwrap();
        assert_eq!(payload[0], 0xA0);

        let model = model.borrow();
        assert_eq!(
            model.tx_fifo,
            vec![(b"helo".to_vec(), true), (b"helo".to_vec(), false)]
        );
    }

    #[test]
    fn write_payload_limits() {
        let model = Nrf24Model::new();
        let (mut radio, _backplane) = mk_radio(&model);
        let mut full = [0xAAu8; 33];
        radio.write_payload(&mut full, false).unwrap();
        let mut too_long = [0u8; 34];
        assert_eq!(
            radio.write_payload(&mut too_long, false),
            Err(Nrf24Error::InvalidLength)
        );
        let mut empty = [0u8; 1];
        assert_eq!(
            radio.write_payload(&mut empty, false),
            Err(Nrf24Error::InvalidLength)
        );
        assert_eq!(model.borrow().tx_fifo.len(), 1);
        assert_eq!(model.borrow().tx_fifo[0].0.len(), 32);
    }

    #[test]
    fn start_write_payload() {
        let model = Nrf24Model::new();
        let (mut radio, backplane) = mk_radio(&model);
        let payload: &'static mut [u8] = Box::leak(Box::new([0u8, 1, 2, 3]));
        unsafe { radio.start_write_payload(payload, false) }.unwrap();
        assert!(backplane.cs_low());
        assert!(radio.is_busy());
        radio.wait().unwrap();
        assert!(!backplane.cs_low());
        assert_eq!(model.borrow().tx_fifo, vec![(vec![1, 2, 3], false)]);
    }

    #[test]
    fn write_ack_payload() {
        let model = Nrf24Model::new();
        let (mut radio, _backplane) = mk_radio(&model);
        let mut payload = [0u8, 0xAC, 0x4B];
        radio.write_ack_payload(&mut payload, 3).unwrap();
        assert_eq!(payload[0], 0b1010_1011);
        assert_eq!(model.borrow().ack_payloads, vec![(3, vec![0xAC, 0x4B])]);
        assert_eq!(
            radio.write_ack_payload(&mut payload, 6),
            Err(Nrf24Error::InvalidPipe(6))
        );
    }

    #[test]
    fn read_payload() {
        let model = Nrf24Model::new();
        model.borrow_mut().push_rx(2, &[10, 20, 30, 40]);
        let (mut radio, _backplane) = mk_radio(&model);

        assert_eq!(radio.get_payload_length().unwrap(), 4);
        let mut buffer = [0xFFu8; 5];
        let status = radio.read_payload(&mut buffer).unwrap();
        assert_eq!(&buffer[1..], &[10, 20, 30, 40]);
        assert!(status.rx_dr());
        assert_eq!(status.rx_pipe(), 2);

        let model = model.borrow();
        assert!(model.rx_fifo.is_empty());
        assert_eq!(
            model.frames,
            vec![
                vec![commands::R_RX_PL_WID, 0],
                // the frame is sent in place: opcode, then the stale buffer contents
                vec![commands::R_RX_PAYLOAD, 0xFF, 0xFF, 0xFF, 0xFF],
            ]
        );
    }

    #[test]
    fn start_read_payload() {
        let model = Nrf24Model::new();
        model.borrow_mut().push_rx(5, &[7, 8]);
        let (mut radio, backplane) = mk_radio(&model);
        let mut buffer = [0u8; 3];
        unsafe { radio.start_read_payload(&mut buffer) }.unwrap();
        assert!(backplane.cs_low());
        radio.wait().unwrap();
        assert!(!backplane.cs_low());
        assert_eq!(&buffer[1..], &[7, 8]);
        assert_eq!(buffer[0] & 0x0E, 5 << 1);
        assert!(backplane.violations().is_empty());
    }

    #[test]
    fn reuse_tx_payload() {
        let model = Nrf24Model::new();
        let (mut radio, _backplane) = mk_radio(&model);
        radio.reuse_tx_payload().unwrap();
        assert!(model.borrow().reuse_tx);
    }

    #[test]
    fn fifo_state() {
        let model = Nrf24Model::new();
        let (mut radio, _backplane) = mk_radio(&model);
        assert_eq!(radio.fifo_state(true), Ok(FifoState::Empty));
        assert_eq!(radio.fifo_state(false), Ok(FifoState::Empty));

        model.borrow_mut().push_rx(0, &[1]);
        let mut payload = [0u8, 1];
        radio.write_payload(&mut payload, false).unwrap();
        assert_eq!(radio.fifo_state(true), Ok(FifoState::Occupied));
        assert_eq!(radio.fifo_state(false), Ok(FifoState::Occupied));

        model.borrow_mut().push_rx(0, &[2]);
        model.borrow_mut().push_rx(0, &[3]);
        for _ in 0..2 {
            radio.write_payload(&mut payload, false).unwrap();
        }
        assert_eq!(radio.fifo_state(true), Ok(FifoState::Full));
        assert_eq!(radio.fifo_state(false), Ok(FifoState::Full));
        assert_eq!(model.borrow().frames.last(), Some(&vec![registers::FIFO_STATUS, 0]));
    }
}
