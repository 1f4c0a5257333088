use crate::constants::{ACCEPT_POLL_MS, DEFAULT_SERIAL_TIMEOUT_MS};
use crate::error::RadarError;
use crate::session::Termination;
use crate::time::sleep_ms;
use log::info;
use serialport::SerialPort;
use std::io::{self, Read};
use std::net::{TcpListener, TcpStream};
use std::time::Duration;

/// What a single read produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReadOutcome {
    /// `n` bytes were written to the front of the buffer.
    Data(usize),
    /// Nothing arrived before the read timeout.
    Idle,
    /// The peer closed the stream.
    Closed,
}

pub fn read_chunk<R: Read + ?Sized>(
    reader: &mut R,
    buffer: &mut [u8],
) -> io::Result<ReadOutcome> {
    match reader.read(buffer) {
        Ok(0) => Ok(ReadOutcome::Closed),
        Ok(n) => Ok(ReadOutcome::Data(n)),
        Err(e)
            if matches!(
                e.kind(),
                io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut | io::ErrorKind::Interrupted
            ) =>
        {
            Ok(ReadOutcome::Idle)
        }
        Err(e) => Err(e),
    }
}

/// Opens a serial device that prints the measurement lines.
///
/// Serial reads always need a timeout; `read_timeout` falls back to one
/// second.
pub fn open_serial(
    port_name: &str,
    baud_rate: u32,
    read_timeout: Option<Duration>,
) -> Result<Box<dyn SerialPort>, RadarError> {
    let timeout = read_timeout.unwrap_or(Duration::from_millis(DEFAULT_SERIAL_TIMEOUT_MS));
    let port = serialport::new(port_name, baud_rate)
        .timeout(timeout)
        .open()?;
    info!("Opened \"{}\" at {} baud", port_name, baud_rate);
    Ok(port)
}

/// Waits for one connection on `listener`.
///
/// The listener is polled so that `termination` is honored while waiting.
/// Returns `None` when terminated before a peer connected.
pub fn accept_one(
    listener: &TcpListener,
    termination: &Termination,
    read_timeout: Option<Duration>,
) -> Result<Option<TcpStream>, RadarError> {
    listener.set_nonblocking(true)?;
    info!("Waiting for a connection on {}", listener.local_addr()?);
    loop {
        if termination.is_terminated() {
            return Ok(None);
        }
        match listener.accept() {
            Ok((stream, peer)) => {
                stream.set_nonblocking(false)?;
                stream.set_read_timeout(read_timeout)?;
                info!("Connected to {}", peer);
                return Ok(Some(stream));
            }
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => sleep_ms(ACCEPT_POLL_MS),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
}
