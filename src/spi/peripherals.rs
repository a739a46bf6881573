//! The peripheral handles consumed by [`DmaSpi`](crate::spi::DmaSpi).
//!
//! These traits describe only what the transaction engine needs from the
//! hardware. An implementation for the STM32F1 lives in
//! [`stm32f1`](mod@crate::spi::stm32f1); hosted tests use a simulated backplane.

/// The direction of a DMA channel's transfers.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DmaDirection {
    /// Read from memory, write to the peripheral (SPI transmit).
    MemoryToPeripheral,
    /// Read from the peripheral, write to memory (SPI receive).
    PeripheralToMemory,
}

/// A SPI controller whose data register is serviced by DMA.
pub trait SpiPeripheral {
    /// Enable the DMA request lines of the controller for the given directions.
    ///
    /// Directions passed as `false` are left untouched.
    fn enable_dma_requests(&mut self, rx: bool, tx: bool);

    /// The bus address of the controller's data register.
    fn data_register_address(&self) -> usize;

    /// Is the controller currently shifting a frame in or out?
    fn is_busy(&self) -> bool;

    /// Read the data register, discarding any stale received byte.
    fn read_data(&mut self) -> u8;
}

/// One channel of a DMA controller.
pub trait DmaChannel {
    /// Program the channel for memory-increment transfers between memory and
    /// the fixed `peripheral_address` in the given `direction`.
    fn configure(&mut self, direction: DmaDirection, peripheral_address: usize);

    /// Set the memory side of the next transfer.
    ///
    /// The channel must be disabled when this is called.
    fn set_memory(&mut self, address: *const u8, count: u16);

    /// Start servicing requests.
    fn enable(&mut self);

    /// Stop servicing requests. Any pending count is abandoned.
    fn disable(&mut self);

    /// The number of transfers still pending.
    fn remaining(&self) -> u16;
}
