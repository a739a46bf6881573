//! Register-level [`SpiPeripheral`] and [`DmaChannel`] implementations for the STM32F1.
//!
//! On the STM32F1, SPI1 requests are routed to DMA1 channel 2 (RX) and
//! channel 3 (TX):
//! ```ignore
//! let spi = unsafe { Spi::spi1() };
//! let tx_dma = unsafe { DmaStream::dma1_channel(3) };
//! let rx_dma = unsafe { DmaStream::dma1_channel(2) };
//! let mut engine = DmaSpi::new(spi, tx_dma, rx_dma, cs_pin);
//! engine.configure(true, true);
//! ```
//! Peripheral clocks, pin modes and the SPI controller's CR1 (baud rate,
//! master mode) must be set up beforehand.
use tock_registers::{
    interfaces::{ReadWriteable, Readable, Writeable},
    register_bitfields, register_structs,
    registers::{ReadOnly, ReadWrite},
};

use super::{DmaChannel, DmaDirection, SpiPeripheral};

/// Base address of SPI1.
pub const SPI1_BASE: usize = 0x4001_3000;
/// Base address of SPI2.
pub const SPI2_BASE: usize = 0x4000_3800;
/// Base address of DMA1.
pub const DMA1_BASE: usize = 0x4002_0000;

register_structs! {
    /// Serial peripheral interface
    pub SpiRegisters {
        /// control register 1
        (0x00 => cr1: ReadWrite<u32>),
        /// control register 2
        (0x04 => cr2: ReadWrite<u32, CR2::Register>),
        /// status register
        (0x08 => sr: ReadWrite<u32, SR::Register>),
        /// data register
        (0x0C => dr: ReadWrite<u32>),
        /// CRC polynomial register
        (0x10 => crcpr: ReadWrite<u32>),
        /// RX CRC register
        (0x14 => rxcrcr: ReadOnly<u32>),
        /// TX CRC register
        (0x18 => txcrcr: ReadOnly<u32>),
        /// I2S configuration register
        (0x1C => i2scfgr: ReadWrite<u32>),
        /// I2S prescaler register
        (0x20 => i2spr: ReadWrite<u32>),
        (0x24 => @END),
    }
}

register_structs! {
    /// One channel of a DMA controller
    pub DmaChannelRegisters {
        /// channel configuration register
        (0x00 => ccr: ReadWrite<u32, CCR::Register>),
        /// channel number of data register
        (0x04 => cndtr: ReadWrite<u32, CNDTR::Register>),
        /// channel peripheral address register
        (0x08 => cpar: ReadWrite<u32>),
        /// channel memory address register
        (0x0C => cmar: ReadWrite<u32>),
        (0x10 => @END),
    }
}

register_bitfields![u32,
    CR2 [
        /// Tx buffer empty interrupt enable
        TXEIE OFFSET(7) NUMBITS(1) [],
        /// RX buffer not empty interrupt enable
        RXNEIE OFFSET(6) NUMBITS(1) [],
        /// Error interrupt enable
        ERRIE OFFSET(5) NUMBITS(1) [],
        /// SS output enable
        SSOE OFFSET(2) NUMBITS(1) [],
        /// Tx buffer DMA enable
        TXDMAEN OFFSET(1) NUMBITS(1) [],
        /// Rx buffer DMA enable
        RXDMAEN OFFSET(0) NUMBITS(1) []
    ],
    SR [
        /// Busy flag
        BSY OFFSET(7) NUMBITS(1) [],
        /// Overrun flag
        OVR OFFSET(6) NUMBITS(1) [],
        /// Mode fault
        MODF OFFSET(5) NUMBITS(1) [],
        /// CRC error flag
        CRCERR OFFSET(4) NUMBITS(1) [],
        /// Underrun flag
        UDR OFFSET(3) NUMBITS(1) [],
        /// Channel side
        CHSIDE OFFSET(2) NUMBITS(1) [],
        /// Transmit buffer empty
        TXE OFFSET(1) NUMBITS(1) [],
        /// Receive buffer not empty
        RXNE OFFSET(0) NUMBITS(1) []
    ],
    CCR [
        /// Memory to memory mode
        MEM2MEM OFFSET(14) NUMBITS(1) [],
        /// Channel priority level
        PL OFFSET(12) NUMBITS(2) [
            Low = 0,
            Medium = 1,
            High = 2,
            VeryHigh = 3
        ],
        /// Memory size
        MSIZE OFFSET(10) NUMBITS(2) [],
        /// Peripheral size
        PSIZE OFFSET(8) NUMBITS(2) [],
        /// Memory increment mode
        MINC OFFSET(7) NUMBITS(1) [],
        /// Peripheral increment mode
        PINC OFFSET(6) NUMBITS(1) [],
        /// Circular mode
        CIRC OFFSET(5) NUMBITS(1) [],
        /// Data transfer direction
        DIR OFFSET(4) NUMBITS(1) [
            FromPeripheral = 0,
            FromMemory = 1
        ],
        /// Transfer error interrupt enable
        TEIE OFFSET(3) NUMBITS(1) [],
        /// Half transfer interrupt enable
        HTIE OFFSET(2) NUMBITS(1) [],
        /// Transfer complete interrupt enable
        TCIE OFFSET(1) NUMBITS(1) [],
        /// Channel enable
        EN OFFSET(0) NUMBITS(1) []
    ],
    CNDTR [
        /// Number of data to transfer
        NDT OFFSET(0) NUMBITS(16) []
    ]
];

/// A SPI controller.
pub struct Spi {
    registers: &'static SpiRegisters,
}

impl Spi {
    /// Wrap an already mapped register block.
    pub const fn new(registers: &'static SpiRegisters) -> Self {
        Self { registers }
    }

    /// SPI1.
    ///
    /// # Safety
    /// The caller must be the only owner of SPI1.
    pub unsafe fn spi1() -> Self {
        Self::new(&*(SPI1_BASE as *const SpiRegisters))
    }

    /// SPI2.
    ///
    /// # Safety
    /// The caller must be the only owner of SPI2.
    pub unsafe fn spi2() -> Self {
        Self::new(&*(SPI2_BASE as *const SpiRegisters))
    }
}

impl SpiPeripheral for Spi {
    fn enable_dma_requests(&mut self, rx: bool, tx: bool) {
        if rx {
            self.registers.cr2.modify(CR2::RXDMAEN::SET);
        }
        if tx {
            self.registers.cr2.modify(CR2::TXDMAEN::SET);
        }
    }

    fn data_register_address(&self) -> usize {
        &self.registers.dr as *const ReadWrite<u32> as usize
    }

    fn is_busy(&self) -> bool {
        self.registers.sr.is_set(SR::BSY)
    }

    fn read_data(&mut self) -> u8 {
        self.registers.dr.get() as u8
    }
}

/// A channel of DMA1.
pub struct DmaStream {
    registers: &'static DmaChannelRegisters,
}

impl DmaStream {
    /// Wrap an already mapped register block.
    pub const fn new(registers: &'static DmaChannelRegisters) -> Self {
        Self { registers }
    }

    /// DMA1 channel `channel` (1 through 7).
    ///
    /// # Safety
    /// The caller must be the only owner of the channel, and `channel` must be in range.
    pub unsafe fn dma1_channel(channel: u8) -> Self {
        let offset = 0x08 + 0x14 * (channel as usize - 1);
        Self::new(&*((DMA1_BASE + offset) as *const DmaChannelRegisters))
    }
}

impl DmaChannel for DmaStream {
    fn configure(&mut self, direction: DmaDirection, peripheral_address: usize) {
        let dir = match direction {
            DmaDirection::MemoryToPeripheral => CCR::DIR::FromMemory,
            DmaDirection::PeripheralToMemory => CCR::DIR::FromPeripheral,
        };
        self.registers.ccr.modify(CCR::MINC::SET + dir);
        self.registers.cpar.set(peripheral_address as u32);
    }

    fn set_memory(&mut self, address: *const u8, count: u16) {
        self.registers.cmar.set(address as usize as u32);
        self.registers.cndtr.write(CNDTR::NDT.val(count as u32));
    }

    fn enable(&mut self) {
        self.registers.ccr.modify(CCR::EN::SET);
    }

    fn disable(&mut self) {
        self.registers.ccr.modify(CCR::EN::CLEAR);
    }

    fn remaining(&self) -> u16 {
        self.registers.cndtr.read(CNDTR::NDT) as u16
    }
}
