use core::sync::atomic::{compiler_fence, Ordering};

use embedded_hal::digital::OutputPin;

use super::{DmaChannel, DmaDirection, SpiError, SpiHandler, SpiPeripheral};

#[derive(Clone, Copy, Debug, PartialEq)]
enum Pending {
    Write,
    Read,
}

/// A [`SpiHandler`] that offloads every byte to a pair of DMA channels.
///
/// The chip-select pin (`cs_pin`) is driven low for the whole transaction and
/// released only after the bus has been observed idle with nothing left to
/// transfer.
pub struct DmaSpi<SPI, TX, RX, CS> {
    spi: SPI,
    tx_dma: TX,
    rx_dma: RX,
    cs_pin: CS,
    spin_limit: Option<u32>,
    in_flight: Option<Pending>,
}

impl<SPI, TX, RX, CS> DmaSpi<SPI, TX, RX, CS>
where
    SPI: SpiPeripheral,
    TX: DmaChannel,
    RX: DmaChannel,
    CS: OutputPin,
{
    /// Bind a SPI controller, its transmit and receive DMA channels and the
    /// chip-select pin.
    ///
    /// The peripherals are not touched until [`SpiHandler::configure()`] is called.
    pub fn new(spi: SPI, tx_dma: TX, rx_dma: RX, cs_pin: CS) -> Self {
        Self {
            spi,
            tx_dma,
            rx_dma,
            cs_pin,
            spin_limit: None,
            in_flight: None,
        }
    }

    /// Give up waiting on a blocking transaction after `polls` busy-flag polls.
    ///
    /// By default the engine spins until the hardware reports completion,
    /// which never happens if the peripheral is misconfigured.
    pub fn with_spin_limit(mut self, polls: u32) -> Self {
        self.spin_limit = Some(polls);
        self
    }

    /// Return the peripheral handles.
    pub fn release(self) -> (SPI, TX, RX, CS) {
        (self.spi, self.tx_dma, self.rx_dma, self.cs_pin)
    }

    /// Is a transaction started without blocking still awaiting [`SpiHandler::wait()`]?
    pub fn in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    fn is_transferring(&self, pending: Pending) -> bool {
        self.spi.is_busy()
            || self.tx_dma.remaining() != 0
            || (pending == Pending::Read && self.rx_dma.remaining() != 0)
    }

    fn spin(&mut self, pending: Pending) -> Result<(), SpiError<CS::Error>> {
        let mut polls = 0u32;
        while self.is_transferring(pending) {
            if let Some(limit) = self.spin_limit {
                polls += 1;
                if polls >= limit {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("SPI transaction timed out after {} polls", polls);
                    self.abort()?;
                    return Err(SpiError::Timeout);
                }
            }
            core::hint::spin_loop();
        }
        Ok(())
    }

    fn abort(&mut self) -> Result<(), SpiError<CS::Error>> {
        self.tx_dma.disable();
        self.rx_dma.disable();
        self.in_flight = None;
        self.cs_pin.set_high().map_err(SpiError::ChipSelect)?;
        let _ = self.spi.read_data();
        Ok(())
    }

    /// Wait for the transfer to drain, then release chip-select.
    fn finish(&mut self, pending: Pending) -> Result<(), SpiError<CS::Error>> {
        self.spin(pending)?;
        compiler_fence(Ordering::Acquire);
        self.in_flight = None;
        self.cs_pin.set_high().map_err(SpiError::ChipSelect)?;
        // clear RXNE: a write or the tail of a short read left a byte unread
        let _ = self.spi.read_data();
        Ok(())
    }

    /// Reject a new transaction while the previous one is still moving data.
    fn begin(&mut self) -> Result<(), SpiError<CS::Error>> {
        if let Some(pending) = self.in_flight {
            if self.is_transferring(pending) {
                #[cfg(feature = "defmt")]
                defmt::warn!("SPI transaction rejected: previous transfer in flight");
                return Err(SpiError::Busy);
            }
            self.finish(pending)?;
        }
        Ok(())
    }

    fn count(len: usize) -> Result<u16, SpiError<CS::Error>> {
        match u16::try_from(len) {
            Ok(count) if count > 0 => Ok(count),
            _ => Err(SpiError::InvalidLength),
        }
    }

    fn launch_write(&mut self, data: &[u8]) -> Result<(), SpiError<CS::Error>> {
        let count = Self::count(data.len())?;
        self.begin()?;
        self.cs_pin.set_high().map_err(SpiError::ChipSelect)?;
        self.tx_dma.disable();
        self.rx_dma.disable();
        self.tx_dma.set_memory(data.as_ptr(), count);
        self.cs_pin.set_low().map_err(SpiError::ChipSelect)?;
        compiler_fence(Ordering::Release);
        self.tx_dma.enable();
        self.in_flight = Some(Pending::Write);
        Ok(())
    }

    fn launch_read(
        &mut self,
        wr_data: *const u8,
        wr_len: usize,
        rx_buffer: *mut u8,
        rx_len: usize,
    ) -> Result<(), SpiError<CS::Error>> {
        let wr_count = Self::count(wr_len)?;
        let rx_count = Self::count(rx_len)?;
        if rx_count > wr_count {
            return Err(SpiError::InvalidLength);
        }
        self.begin()?;
        self.cs_pin.set_high().map_err(SpiError::ChipSelect)?;
        self.tx_dma.disable();
        self.rx_dma.disable();
        self.tx_dma.set_memory(wr_data, wr_count);
        self.rx_dma.set_memory(rx_buffer as *const u8, rx_count);
        self.cs_pin.set_low().map_err(SpiError::ChipSelect)?;
        compiler_fence(Ordering::Release);
        self.tx_dma.enable();
        self.rx_dma.enable();
        self.in_flight = Some(Pending::Read);
        Ok(())
    }
}

impl<SPI, TX, RX, CS> SpiHandler for DmaSpi<SPI, TX, RX, CS>
where
    SPI: SpiPeripheral,
    TX: DmaChannel,
    RX: DmaChannel,
    CS: OutputPin,
{
    type Error = SpiError<CS::Error>;

    fn configure(&mut self, rx_dma: bool, tx_dma: bool) {
        self.spi.enable_dma_requests(rx_dma, tx_dma);
        let data_register = self.spi.data_register_address();
        self.tx_dma
            .configure(DmaDirection::MemoryToPeripheral, data_register);
        self.rx_dma
            .configure(DmaDirection::PeripheralToMemory, data_register);
        #[cfg(feature = "defmt")]
        defmt::trace!("SPI DMA requests enabled: rx {}, tx {}", rx_dma, tx_dma);
    }

    fn write_transaction(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.launch_write(data)?;
        self.finish(Pending::Write)
    }

    fn read_transaction(
        &mut self,
        wr_data: &[u8],
        rx_buffer: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.launch_read(
            wr_data.as_ptr(),
            wr_data.len(),
            rx_buffer.as_mut_ptr(),
            rx_buffer.len(),
        )?;
        self.finish(Pending::Read)
    }

    fn read_transaction_in_place(&mut self, buf: &mut [u8]) -> Result<(), Self::Error> {
        // Both channels walk the same buffer; each byte is sent before its
        // reply overwrites it.
        let len = buf.len();
        let ptr = buf.as_mut_ptr();
        self.launch_read(ptr as *const u8, len, ptr, len)?;
        self.finish(Pending::Read)
    }

    unsafe fn start_write_transaction(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.launch_write(data)
    }

    unsafe fn start_read_transaction(
        &mut self,
        wr_data: &[u8],
        rx_buffer: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.launch_read(
            wr_data.as_ptr(),
            wr_data.len(),
            rx_buffer.as_mut_ptr(),
            rx_buffer.len(),
        )
    }

    unsafe fn start_read_transaction_in_place(
        &mut self,
        buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        let len = buf.len();
        let ptr = buf.as_mut_ptr();
        self.launch_read(ptr as *const u8, len, ptr, len)
    }

    fn wait(&mut self) -> Result<(), Self::Error> {
        match self.in_flight {
            Some(pending) => self.finish(pending),
            None => Ok(()),
        }
    }

    fn is_busy(&self) -> bool {
        self.spi.is_busy()
    }
}
