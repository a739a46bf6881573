use crate::{
    radio::{Nrf24, Nrf24Error},
    spi::SpiHandler,
    StatusFlags,
};

use super::{commands, registers};

impl<SPI> Nrf24<SPI>
where
    SPI: SpiHandler,
{
    /// Get the STATUS register by sending a NOP.
    pub fn status(&mut self) -> Result<StatusFlags, Nrf24Error<SPI::Error>> {
        let mut buf = [commands::NOP];
        self.spi
            .read_transaction_in_place(&mut buf)
            .map_err(Nrf24Error::Spi)?;
        Ok(StatusFlags::from_bits(buf[0]))
    }

    /// Reset the IRQ flags that are set in `flags`.
    ///
    /// Use [`StatusFlags::new()`] to clear all of them. Flags that are `false`
    /// in `flags` are left untouched.
    pub fn clear_status_flags(&mut self, flags: StatusFlags) -> Result<(), Nrf24Error<SPI::Error>> {
        self.write_register(registers::STATUS, flags.into_bits() & StatusFlags::IRQ_MASK)
    }
}
