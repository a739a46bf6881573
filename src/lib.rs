#![no_std]
#![doc = include_str!("../README.md")]
//!
//! ## Transaction API
//!
//! - [`DmaSpi::new()`](fn@crate::spi::DmaSpi::new)
//! - [`DmaSpi::with_spin_limit()`](fn@crate::spi::DmaSpi::with_spin_limit)
//! - [`SpiHandler::configure()`](fn@crate::spi::SpiHandler::configure)
//! - [`SpiHandler::write_transaction()`](fn@crate::spi::SpiHandler::write_transaction)
//! - [`SpiHandler::read_transaction()`](fn@crate::spi::SpiHandler::read_transaction)
//! - [`SpiHandler::read_transaction_in_place()`]
//! - [`SpiHandler::start_write_transaction()`](fn@crate::spi::SpiHandler::start_write_transaction)
//! - [`SpiHandler::start_read_transaction()`](fn@crate::spi::SpiHandler::start_read_transaction)
//! - [`SpiHandler::wait()`](fn@crate::spi::SpiHandler::wait)
//! - [`SpiHandler::is_busy()`](fn@crate::spi::SpiHandler::is_busy)
//!
//! ## Radio API
//!
//! - [`Nrf24::new()`](fn@crate::radio::Nrf24::new)
//! - [`Nrf24::reset()`](fn@crate::radio::Nrf24::reset)
//! - [`Nrf24::read_register()`](fn@crate::radio::Nrf24::read_register)
//! - [`Nrf24::write_register()`](fn@crate::radio::Nrf24::write_register)
//! - [`Nrf24::read_multi_register()`](fn@crate::radio::Nrf24::read_multi_register)
//! - [`Nrf24::write_multi_register()`](fn@crate::radio::Nrf24::write_multi_register)
//! - [`Nrf24::write_payload()`](fn@crate::radio::Nrf24::write_payload)
//! - [`Nrf24::write_ack_payload()`](fn@crate::radio::Nrf24::write_ack_payload)
//! - [`Nrf24::read_payload()`](fn@crate::radio::Nrf24::read_payload)
//! - [`Nrf24::get_payload_length()`](fn@crate::radio::Nrf24::get_payload_length)
//! - [`Nrf24::flush_tx()`](fn@crate::radio::Nrf24::flush_tx)
//! - [`Nrf24::flush_rx()`](fn@crate::radio::Nrf24::flush_rx)
//! - [`Nrf24::status()`](fn@crate::radio::Nrf24::status)
//! - [`Nrf24::clear_status_flags()`](fn@crate::radio::Nrf24::clear_status_flags)
//! - [`Nrf24::fifo_state()`](fn@crate::radio::Nrf24::fifo_state)
//!
//! ## Configuration API
//!
//! - [`Nrf24::set_config()`](fn@crate::radio::Nrf24::set_config)
//! - [`Nrf24::power_up()`](fn@crate::radio::Nrf24::power_up)
//! - [`Nrf24::power_down()`](fn@crate::radio::Nrf24::power_down)
//! - [`Nrf24::set_channel()`](fn@crate::radio::Nrf24::set_channel)
//! - [`Nrf24::set_auto_retries()`](fn@crate::radio::Nrf24::set_auto_retries)
//! - [`Nrf24::set_address_width()`](fn@crate::radio::Nrf24::set_address_width)
//! - [`Nrf24::set_rx_address()`](fn@crate::radio::Nrf24::set_rx_address)
//! - [`Nrf24::set_tx_address()`](fn@crate::radio::Nrf24::set_tx_address)
//! - [`Nrf24::set_rx_pipes()`](fn@crate::radio::Nrf24::set_rx_pipes)
//! - [`Nrf24::set_auto_ack()`](fn@crate::radio::Nrf24::set_auto_ack)
//! - [`Nrf24::set_payload_length()`](fn@crate::radio::Nrf24::set_payload_length)
//! - [`Nrf24::set_dynamic_payloads()`](fn@crate::radio::Nrf24::set_dynamic_payloads)
//! - [`Nrf24::set_features()`](fn@crate::radio::Nrf24::set_features)

mod types;
pub use types::{AddressWidth, FifoState, StatusFlags};
pub mod radio;
pub mod spi;
#[doc(inline)]
pub use radio::{Config, Feature, Nrf24, Nrf24Error};
#[doc(inline)]
pub use spi::{DmaSpi, SpiError, SpiHandler};
