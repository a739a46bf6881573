//! The SPI transaction engine.
//!
//! [`SpiHandler`] is the seam between the radio command layer and whatever
//! moves bytes over the bus. [`DmaSpi`] is the DMA-driven implementation.
use core::fmt::{Display, Formatter, Result as FmtResult};

mod dma;
pub use dma::DmaSpi;
mod peripherals;
pub use peripherals::{DmaChannel, DmaDirection, SpiPeripheral};
pub mod stm32f1;

/// An collection of error types to describe failed SPI transactions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SpiError<CS> {
    /// A previous non-blocking transaction is still shifting data.
    ///
    /// Nothing was written to the peripheral.
    Busy,
    /// The bus did not report idle within the configured spin limit.
    ///
    /// See [`DmaSpi::with_spin_limit()`].
    Timeout,
    /// A buffer was empty, longer than a DMA channel can count,
    /// or a receive buffer was longer than its transmit buffer.
    InvalidLength,
    /// Represents a chip-select output error.
    ChipSelect(CS),
}

impl<CS> Display for SpiError<CS> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            SpiError::Busy => write!(f, "transaction already in flight"),
            SpiError::Timeout => write!(f, "transaction timed out"),
            SpiError::InvalidLength => write!(f, "invalid transfer length"),
            SpiError::ChipSelect(_) => write!(f, "chip-select output failed"),
        }
    }
}

#[cfg(feature = "defmt")]
impl<CS> defmt::Format for SpiError<CS> {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            SpiError::Busy => defmt::write!(fmt, "Busy"),
            SpiError::Timeout => defmt::write!(fmt, "Timeout"),
            SpiError::InvalidLength => defmt::write!(fmt, "InvalidLength"),
            SpiError::ChipSelect(_) => defmt::write!(fmt, "ChipSelect"),
        }
    }
}

/// A half-duplex command/response SPI provider framed by a chip-select line.
///
/// Blocking transactions return only after every byte was shifted and the bus
/// is idle. Non-blocking transactions return as soon as the transfer is
/// started; see [`SpiHandler::wait()`].
///
/// Implementations are single-owner and not re-entrant: they must not be
/// shared between thread mode and an interrupt handler without a
/// critical section around every call.
pub trait SpiHandler {
    type Error;

    /// Enable DMA requests for the given directions and program the channels.
    ///
    /// Call this once, after the peripheral clocks are enabled and before any transaction.
    fn configure(&mut self, rx_dma: bool, tx_dma: bool);

    /// Shift out all of `data`, discarding whatever is shifted in.
    fn write_transaction(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Shift out `wr_data` while shifting the response into `rx_buffer`.
    ///
    /// The clock only runs while transmitting, so `wr_data` must be at least as
    /// long as `rx_buffer`. Pad it with `0x00` for each byte to receive.
    fn read_transaction(
        &mut self,
        wr_data: &[u8],
        rx_buffer: &mut [u8],
    ) -> Result<(), Self::Error>;

    /// Shift out `buf` and replace its contents with the bytes shifted in.
    fn read_transaction_in_place(&mut self, buf: &mut [u8]) -> Result<(), Self::Error>;

    /// Start shifting out `data` and return immediately.
    ///
    /// # Safety
    /// The transfer keeps reading `data` after this returns. The caller must
    /// keep it alive and unmodified until [`SpiHandler::wait()`] returns or a
    /// later transaction has started.
    unsafe fn start_write_transaction(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Start a full-duplex transfer and return immediately.
    ///
    /// # Safety
    /// The transfer keeps reading `wr_data` and writing `rx_buffer` after this
    /// returns. The caller must keep both alive and must not access
    /// `rx_buffer` until [`SpiHandler::wait()`] returns.
    unsafe fn start_read_transaction(
        &mut self,
        wr_data: &[u8],
        rx_buffer: &mut [u8],
    ) -> Result<(), Self::Error>;

    /// Start an in-place full-duplex transfer and return immediately.
    ///
    /// # Safety
    /// The transfer keeps reading and overwriting `buf` after this returns.
    /// The caller must keep it alive and must not access it until
    /// [`SpiHandler::wait()`] returns.
    unsafe fn start_read_transaction_in_place(
        &mut self,
        buf: &mut [u8],
    ) -> Result<(), Self::Error>;

    /// Busy-wait for a transaction started without blocking, then release the bus.
    ///
    /// Does nothing if no transaction is in flight.
    fn wait(&mut self) -> Result<(), Self::Error>;

    /// Is the SPI controller shifting data right now?
    fn is_busy(&self) -> bool;
}
