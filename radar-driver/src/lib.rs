mod config;
mod constants;
mod error;
mod framer;
mod numeric;
mod parser;
mod render;
mod session;
mod sweep;
mod time;
mod transport;

use log::info;
use std::net::{TcpListener, ToSocketAddrs};

pub use crate::config::RadarConfig;
pub use crate::error::{Field, FramingError, ParseError, RadarError};
pub use crate::framer::LineFramer;
pub use crate::numeric::polar_to_cartesian;
pub use crate::parser::parse_message;
pub use crate::render::{RenderDriver, RenderSurface, SweepIndicator};
pub use crate::session::{
    run_session, termination_channel, SessionCounters, SessionEnd, SessionReport, Termination,
    Terminator,
};
pub use crate::sweep::{SweepBuffer, SweepEvent};
pub use crate::transport::{accept_one, open_serial, read_chunk, ReadOutcome};
pub use radar_data::{Measurement, Sweep};

/// Function to receive one session over TCP.
/// # Arguments
///
/// * `address` - Address to listen on, such as `0.0.0.0:1500`.
/// * `surface` - Canvas the sweep is drawn on. Closed when the call returns.
///
/// Returns `Ok(None)` when terminated before a sensor connected.
pub fn run_tcp_radar<A, S>(
    address: A,
    surface: &mut S,
    config: &RadarConfig,
    termination: &Termination,
) -> Result<Option<SessionReport>, RadarError>
where
    A: ToSocketAddrs,
    S: RenderSurface,
{
    let listener = match TcpListener::bind(address) {
        Ok(listener) => listener,
        Err(e) => {
            surface.close();
            return Err(e.into());
        }
    };
    serve_once(&listener, surface, config, termination)
}

/// Accepts one connection on `listener` and runs a session on it.
pub fn serve_once<S: RenderSurface>(
    listener: &TcpListener,
    surface: &mut S,
    config: &RadarConfig,
    termination: &Termination,
) -> Result<Option<SessionReport>, RadarError> {
    let stream = match accept_one(listener, termination, config.read_timeout) {
        Ok(Some(stream)) => stream,
        Ok(None) => {
            info!("Terminated while waiting for a connection");
            surface.close();
            return Ok(None);
        }
        Err(e) => {
            surface.close();
            return Err(e);
        }
    };
    run_session(stream, surface, config, termination).map(Some)
}

/// Function to receive one session from a serial device.
/// # Arguments
///
/// * `port_name` - Serial port name such as `/dev/ttyACM0`.
/// * `baud_rate` - Baud rate of the sensor board.
pub fn run_serial_radar<S: RenderSurface>(
    port_name: &str,
    baud_rate: u32,
    surface: &mut S,
    config: &RadarConfig,
    termination: &Termination,
) -> Result<SessionReport, RadarError> {
    let port = match open_serial(port_name, baud_rate, config.read_timeout) {
        Ok(port) => port,
        Err(e) => {
            surface.close();
            return Err(e);
        }
    };
    run_session(port, surface, config, termination)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::testing::RecordingSurface;
    use crate::time::sleep_ms;
    use serialport::{SerialPort, TTYPort};
    use std::io::Write;
    use std::net::TcpStream;
    use std::time::Duration;

    fn test_config() -> RadarConfig {
        RadarConfig {
            sweep_capacity: 3,
            frame_pause: Duration::ZERO,
            read_timeout: Some(Duration::from_millis(20)),
            ..Default::default()
        }
    }

    #[test]
    fn test_serve_once() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let address = listener.local_addr().unwrap();
        let sensor = std::thread::spawn(move || {
            let mut stream = TcpStream::connect(address).unwrap();
            stream.write_all(b"Angle: 0, Distance: 50cm\nAngle: 1").unwrap();
            stream.flush().unwrap();
            sleep_ms(30);
            stream
                .write_all(b"0, Distance: 48cm\nheartbeat\nAngle: x, Distance: 1cm\n")
                .unwrap();
        });

        let mut surface = RecordingSurface::default();
        let (_terminator, termination) = termination_channel();
        let report = serve_once(&listener, &mut surface, &test_config(), &termination)
            .unwrap()
            .unwrap();
        sensor.join().unwrap();

        assert_eq!(report.end, SessionEnd::PeerClosed);
        assert_eq!(report.counters.accepted, 2);
        assert_eq!(report.counters.ignored, 1);
        assert_eq!(report.counters.rejected, 1);
        assert_eq!(surface.points.1, vec![50., 48.]);
        assert!(surface.closed);
    }

    #[test]
    fn test_serve_once_terminated() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let mut surface = RecordingSurface::default();
        let (terminator, termination) = termination_channel();
        terminator.terminate();

        let report = serve_once(&listener, &mut surface, &test_config(), &termination).unwrap();
        assert!(report.is_none());
        assert!(surface.closed);
    }

    #[test]
    fn test_run_tcp_radar_bind_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let address = listener.local_addr().unwrap();
        let mut surface = RecordingSurface::default();
        let (_terminator, termination) = termination_channel();

        let result = run_tcp_radar(address, &mut surface, &test_config(), &termination);
        assert!(matches!(result, Err(RadarError::IoError(_))));
        assert!(surface.closed);
    }

    #[test]
    fn test_run_serial_radar() {
        let (mut master, slave) = TTYPort::pair().expect("Unable to create ptty pair");
        master
            .write(b"Angle: 0, Distance: 10cm\nAngle: 10, Distance: 11cm\n")
            .unwrap();
        sleep_ms(10);

        let name = slave.name().unwrap();
        let mut surface = RecordingSurface {
            quit_after_pauses: Some(3),
            ..Default::default()
        };
        let (_terminator, termination) = termination_channel();
        let report =
            run_serial_radar(&name, 115200, &mut surface, &test_config(), &termination).unwrap();

        assert_eq!(report.end, SessionEnd::Cancelled);
        assert_eq!(report.counters.accepted, 2);
        assert_eq!(surface.points.1, vec![10., 11.]);
        assert!(surface.closed);
        drop(slave);
    }

    #[test]
    fn test_run_serial_radar_missing_port() {
        let mut surface = RecordingSurface::default();
        let (_terminator, termination) = termination_channel();
        let result = run_serial_radar(
            "/dev/this-port-does-not-exist",
            115200,
            &mut surface,
            &test_config(),
            &termination,
        );
        assert!(matches!(result, Err(RadarError::SerialError(_))));
        assert!(surface.closed);
    }
}
