//! The nRF24L01 command layer.
//!
//! [`Nrf24`] encodes the radio's SPI command protocol on top of any
//! [`SpiHandler`]. It keeps no copy of the radio's state: every getter reads
//! the chip, every setter writes it, and the caller owns the power/mode
//! sequencing.
//!
//! ## Scratch byte convention
//! Operations that send a caller-provided buffer (addresses, payloads) write
//! the command byte into element 0 of that buffer and send it in place.
//! Callers reserve that slot; its previous contents are lost.
//! ```ignore
//! let mut address = [0, 0xE7, 0xE7, 0xE7, 0xE7, 0xE7];
//! radio.set_tx_address(&mut address)?; // address[0] is now 0x30
//! ```
use core::fmt::{Display, Formatter, Result as FmtResult};

use crate::spi::SpiHandler;

mod bit_fields;
pub use bit_fields::{Config, Feature};
mod config;
mod constants;
pub use constants::{commands, mnemonics, registers};
mod fifo;
mod pipe;
mod reset;
mod status;

/// The largest payload the radio's FIFOs hold.
pub const MAX_PAYLOAD_LEN: usize = 32;

/// An collection of error types to describe a rejected or failed command.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Nrf24Error<SPI> {
    /// Represents a SPI transaction error.
    Spi(SPI),
    /// The register address does not fit in a command byte.
    InvalidRegister(u8),
    /// The radio has pipes 0 through 5 only.
    InvalidPipe(u8),
    /// A buffer is too short to hold the command byte and data,
    /// or longer than the radio accepts.
    InvalidLength,
}

impl<SPI> Display for Nrf24Error<SPI> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Nrf24Error::Spi(_) => write!(f, "SPI transaction failed"),
            Nrf24Error::InvalidRegister(address) => {
                write!(f, "invalid register address {address:#04x}")
            }
            Nrf24Error::InvalidPipe(pipe) => write!(f, "invalid pipe {pipe}"),
            Nrf24Error::InvalidLength => write!(f, "invalid buffer length"),
        }
    }
}

#[cfg(feature = "defmt")]
impl<SPI> defmt::Format for Nrf24Error<SPI> {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Nrf24Error::Spi(_) => defmt::write!(fmt, "Spi"),
            Nrf24Error::InvalidRegister(address) => {
                defmt::write!(fmt, "InvalidRegister({=u8:#x})", address)
            }
            Nrf24Error::InvalidPipe(pipe) => defmt::write!(fmt, "InvalidPipe({})", pipe),
            Nrf24Error::InvalidLength => defmt::write!(fmt, "InvalidLength"),
        }
    }
}

/// A stateless encoder of nRF24L01 SPI commands.
pub struct Nrf24<SPI> {
    spi: SPI,
}

impl<SPI> Nrf24<SPI>
where
    SPI: SpiHandler,
{
    /// Issue commands over `spi`.
    ///
    /// The radio's chip-select pin is owned by `spi`. The CE pin is not
    /// touched by this layer.
    pub fn new(spi: SPI) -> Self {
        Self { spi }
    }

    /// Give back the SPI handler.
    pub fn release(self) -> SPI {
        self.spi
    }

    /// Is a non-blocking transaction still shifting data?
    pub fn is_busy(&self) -> bool {
        self.spi.is_busy()
    }

    /// Wait for a transaction started without blocking to complete.
    pub fn wait(&mut self) -> Result<(), Nrf24Error<SPI::Error>> {
        self.spi.wait().map_err(Nrf24Error::Spi)
    }

    fn check_register(address: u8) -> Result<u8, Nrf24Error<SPI::Error>> {
        if address > registers::MAX {
            return Err(Nrf24Error::InvalidRegister(address));
        }
        Ok(address)
    }

    fn check_pipe(pipe: u8) -> Result<u8, Nrf24Error<SPI::Error>> {
        if pipe > 5 {
            return Err(Nrf24Error::InvalidPipe(pipe));
        }
        Ok(pipe)
    }

    /// Check that `buf` holds the scratch byte plus between 1 and `max_data` bytes.
    fn check_buffer(buf: &[u8], max_data: usize) -> Result<(), Nrf24Error<SPI::Error>> {
        if buf.len() < 2 || buf.len() > max_data + 1 {
            return Err(Nrf24Error::InvalidLength);
        }
        Ok(())
    }

    /// Send a command that has no data bytes.
    fn command(&mut self, command: u8) -> Result<(), Nrf24Error<SPI::Error>> {
        self.spi
            .write_transaction(&[command])
            .map_err(Nrf24Error::Spi)
    }

    /// Read a single byte register.
    pub fn read_register(&mut self, address: u8) -> Result<u8, Nrf24Error<SPI::Error>> {
        let mut buf = [commands::R_REGISTER | Self::check_register(address)?, 0];
        self.spi
            .read_transaction_in_place(&mut buf)
            .map_err(Nrf24Error::Spi)?;
        Ok(buf[1])
    }

    /// Read a multi-byte register (e.g. a pipe address) into `buf[1..]`.
    ///
    /// `buf[0]` is overwritten with the command byte and then with the STATUS
    /// register's value.
    pub fn read_multi_register(
        &mut self,
        address: u8,
        buf: &mut [u8],
    ) -> Result<(), Nrf24Error<SPI::Error>> {
        let address = Self::check_register(address)?;
        Self::check_buffer(buf, 5)?;
        buf[0] = commands::R_REGISTER | address;
        self.spi
            .read_transaction_in_place(buf)
            .map_err(Nrf24Error::Spi)
    }

    /// Write a single byte register.
    pub fn write_register(&mut self, address: u8, value: u8) -> Result<(), Nrf24Error<SPI::Error>> {
        let buf = [commands::W_REGISTER | Self::check_register(address)?, value];
        self.spi.write_transaction(&buf).map_err(Nrf24Error::Spi)
    }

    /// Write `bytes[1..]` to a multi-byte register (e.g. a pipe address).
    ///
    /// `bytes[0]` is overwritten with the command byte.
    pub fn write_multi_register(
        &mut self,
        address: u8,
        bytes: &mut [u8],
    ) -> Result<(), Nrf24Error<SPI::Error>> {
        let address = Self::check_register(address)?;
        Self::check_buffer(bytes, 5)?;
        bytes[0] = commands::W_REGISTER | address;
        self.spi.write_transaction(bytes).map_err(Nrf24Error::Spi)
    }
}
