use embedded_hal::delay::DelayNs;

use crate::{
    radio::{Config, Nrf24, Nrf24Error},
    spi::SpiHandler,
};

use super::registers;

/// Tpd2stby, worst case with an external clock per the 1.0 datasheet.
const POWER_UP_DELAY_US: u32 = 5000;

impl<SPI> Nrf24<SPI>
where
    SPI: SpiHandler,
{
    /// Write the CONFIG register as is.
    pub fn set_config(&mut self, config: Config) -> Result<(), Nrf24Error<SPI::Error>> {
        self.write_register(registers::CONFIG, config.into_bits())
    }

    /// Read the CONFIG register.
    pub fn config(&mut self) -> Result<Config, Nrf24Error<SPI::Error>> {
        self.read_register(registers::CONFIG).map(Config::from_bits)
    }

    /// Write `config` with the PWR_UP bit set, then wait for the radio to
    /// reach standby.
    ///
    /// The CE pin must stay low until this returns.
    pub fn power_up<DELAY: DelayNs>(
        &mut self,
        config: Config,
        delay: &mut DELAY,
    ) -> Result<(), Nrf24Error<SPI::Error>> {
        self.set_config(config.with_power(true))?;
        delay.delay_us(POWER_UP_DELAY_US);
        Ok(())
    }

    /// Write `config` with the PWR_UP bit cleared.
    ///
    /// In power down mode the radio draws about 900nA and keeps its register values.
    pub fn power_down(&mut self, config: Config) -> Result<(), Nrf24Error<SPI::Error>> {
        self.set_config(config.with_power(false))
    }

    /// Select the RF channel, 2400 + `channel` MHz. Values over 125 are clamped.
    pub fn set_channel(&mut self, channel: u8) -> Result<(), Nrf24Error<SPI::Error>> {
        self.write_register(registers::RF_CH, channel.min(125))
    }

    /// Configure automatic retransmission (SETUP_RETR).
    ///
    /// `delay` is in steps of 250us starting at 250us, `count` is the number
    /// of retries. Both are clamped to 15.
    pub fn set_auto_retries(&mut self, delay: u8, count: u8) -> Result<(), Nrf24Error<SPI::Error>> {
        self.write_register(registers::SETUP_RETR, count.min(15) | (delay.min(15) << 4))
    }
}
