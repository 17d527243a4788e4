//! USART driver glue for STM32L4
//!
//! TX goes through any `embedded-io` writer (the blocking embassy
//! `UartTx`). RX is read one byte at a time from the USART2 interrupt, so
//! it only needs a non-blocking poll plus the RXNE interrupt enable that the
//! blocking embassy driver does not expose.

use embassy_stm32::mode::Blocking;
use embassy_stm32::pac;
use embassy_stm32::usart::{self, Error as UsartError, UartRx};
use embedded_hal_nb::serial::Read;
use lumen_hal::uart::{DataBits, Parity, StopBits};
use lumen_hal::{UartConfig, UartTx};

/// Translate a `lumen_hal::UartConfig` into the embassy driver config
pub fn usart_config(config: &UartConfig) -> usart::Config {
    let mut out = usart::Config::default();
    out.baudrate = config.baudrate;
    out.data_bits = match config.data_bits {
        DataBits::Seven => usart::DataBits::DataBits7,
        DataBits::Eight => usart::DataBits::DataBits8,
        DataBits::Nine => usart::DataBits::DataBits9,
    };
    out.parity = match config.parity {
        Parity::None => usart::Parity::ParityNone,
        Parity::Even => usart::Parity::ParityEven,
        Parity::Odd => usart::Parity::ParityOdd,
    };
    out.stop_bits = match config.stop_bits {
        StopBits::One => usart::StopBits::STOP1,
        StopBits::Two => usart::StopBits::STOP2,
    };
    out
}

/// Error from UART operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UartBusError {
    /// Framing error
    Framing,
    /// Noise error
    Noise,
    /// Overrun error
    Overrun,
    /// Parity error
    Parity,
    /// Other error
    Other,
}

impl From<UsartError> for UartBusError {
    fn from(e: UsartError) -> Self {
        match e {
            UsartError::Framing => UartBusError::Framing,
            UsartError::Noise => UartBusError::Noise,
            UsartError::Overrun => UartBusError::Overrun,
            UsartError::Parity => UartBusError::Parity,
            _ => UartBusError::Other,
        }
    }
}

/// Transmit half as a `lumen_hal::UartTx`
pub struct SerialTx<W> {
    writer: W,
}

impl<W> SerialTx<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn free(self) -> W {
        self.writer
    }
}

impl<W> UartTx for SerialTx<W>
where
    W: embedded_io::Write,
    W::Error: Into<UartBusError>,
{
    type Error = UartBusError;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.writer.write_all(data).map_err(Into::into)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.writer.flush().map_err(Into::into)
    }
}

/// USART2 receive half, polled from the RX interrupt
pub struct Usart2Rx {
    rx: UartRx<'static, Blocking>,
}

impl Usart2Rx {
    /// Wrap the blocking receiver; the caller guarantees it belongs to USART2
    pub fn new(rx: UartRx<'static, Blocking>) -> Self {
        Self { rx }
    }

    /// Raise the USART2 interrupt whenever a byte is received
    pub fn listen(&mut self) {
        pac::USART2.cr1().modify(|w| w.set_rxneie(true));
    }

    /// Read the received byte, if any
    ///
    /// Line errors (overrun, framing, noise, parity) are cleared by the
    /// driver and reported here; the offending byte is not returned.
    pub fn try_read(&mut self) -> Result<Option<u8>, UartBusError> {
        match Read::read(&mut self.rx) {
            Ok(byte) => Ok(Some(byte)),
            Err(nb::Error::WouldBlock) => Ok(None),
            Err(nb::Error::Other(e)) => Err(e.into()),
        }
    }
}
