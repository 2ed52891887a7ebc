//! Implementation of `embedded-io` traits for [`Pl011`].

use crate::mmio::RegisterAccess;
use crate::registers::Flag;
use crate::uart::Pl011;
use crate::Error;
use embedded_io::{ErrorKind, ErrorType, Read, ReadReady, Write, WriteReady};

impl embedded_io::Error for Error {
    fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidPin(_) => ErrorKind::InvalidInput,
        }
    }
}

impl<M: RegisterAccess> ErrorType for Pl011<M> {
    type Error = Error;
}

impl<M: RegisterAccess> Write for Pl011<M> {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        self.send_bytes(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Pl011::flush(self);
        Ok(())
    }
}

impl<M: RegisterAccess> WriteReady for Pl011<M> {
    fn write_ready(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.flags().contains(Flag::TXFF))
    }
}

impl<M: RegisterAccess> Read for Pl011<M> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        if buf.is_empty() {
            return Ok(0);
        }
        buf[0] = self.recv();
        let mut read_length = 1;
        // Drain whatever else already arrived without blocking again.
        while read_length < buf.len() {
            match self.try_recv() {
                Some(byte) => {
                    buf[read_length] = byte;
                    read_length += 1;
                }
                None => break,
            }
        }
        Ok(read_length)
    }
}

impl<M: RegisterAccess> ReadReady for Pl011<M> {
    fn read_ready(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.flags().contains(Flag::RXFE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mmio::fake::FakeMmio;
    use crate::registers::{UART0_DR, UART0_FR};
    use crate::TxPacing;

    #[test]
    fn read_returns_available_bytes() {
        let mmio = FakeMmio::new();
        let state = mmio.state.clone();
        {
            let mut state = state.lock().unwrap();
            // Two bytes waiting, then the FIFO runs dry.
            state.script_reads(UART0_FR, &[0, 0, Flag::RXFE.bits()]);
            state.script_reads(UART0_DR, &[b'a' as u32, b'b' as u32]);
        }
        let mut uart = Pl011::new(mmio, TxPacing::default());

        let mut buf = [0u8; 8];
        assert_eq!(uart.read(&mut buf), Ok(2));
        assert_eq!(&buf[..2], b"ab");
    }

    #[test]
    fn write_sends_whole_buffer() {
        let mmio = FakeMmio::new();
        let state = mmio.state.clone();
        let mut uart = Pl011::new(mmio, TxPacing::default());

        assert_eq!(uart.write(b"pl011"), Ok(5));
        assert_eq!(state.lock().unwrap().writes_to(UART0_DR).len(), 5);
    }

    #[test]
    fn readiness_follows_flag_register() {
        let mmio = FakeMmio::new();
        let state = mmio.state.clone();
        state.lock().unwrap().script_reads(
            UART0_FR,
            &[
                (Flag::RXFE | Flag::TXFF).bits(),
                (Flag::RXFE | Flag::TXFF).bits(),
                0,
                0,
            ],
        );
        let mut uart = Pl011::new(mmio, TxPacing::default());

        assert_eq!(uart.read_ready(), Ok(false));
        assert_eq!(uart.write_ready(), Ok(false));
        assert_eq!(uart.read_ready(), Ok(true));
        assert_eq!(uart.write_ready(), Ok(true));
    }
}
