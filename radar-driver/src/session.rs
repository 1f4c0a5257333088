use crate::config::RadarConfig;
use crate::error::RadarError;
use crate::framer::LineFramer;
use crate::parser::parse_message;
use crate::render::{RenderDriver, RenderSurface};
use crate::sweep::{SweepBuffer, SweepEvent};
use crate::transport::{read_chunk, ReadOutcome};
use crossbeam_channel::{bounded, Receiver, Sender};
use log::{debug, error, info, trace, warn};
use std::cell::Cell;
use std::io::Read;

/// Sending half of a cancellation signal. Cheap to clone and safe to use
/// from a signal handler thread.
#[derive(Clone, Debug)]
pub struct Terminator {
    tx: Sender<bool>,
}

/// Receiving half of a cancellation signal, checked once per cycle.
#[derive(Debug)]
pub struct Termination {
    rx: Receiver<bool>,
    fired: Cell<bool>,
}

pub fn termination_channel() -> (Terminator, Termination) {
    let (tx, rx) = bounded(10);
    (
        Terminator { tx },
        Termination {
            rx,
            fired: Cell::new(false),
        },
    )
}

impl Terminator {
    pub fn terminate(&self) {
        // a full channel already carries a pending request
        let _ = self.tx.try_send(true);
    }
}

impl Termination {
    /// Once fired, stays fired. Dropping every `Terminator` does not fire.
    pub fn is_terminated(&self) -> bool {
        if !self.fired.get() && do_terminate(&self.rx) {
            self.fired.set(true);
        }
        self.fired.get()
    }
}

pub(crate) fn do_terminate(terminator_rx: &Receiver<bool>) -> bool {
    terminator_rx.try_recv().unwrap_or(false)
}

/// Why a session ended without error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEnd {
    /// The peer closed the connection.
    PeerClosed,
    /// Cancelled through a [`Terminator`] or by the surface's quit request.
    Cancelled,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionCounters {
    pub bytes_read: usize,
    /// Complete messages produced by the framer, including empty ones.
    pub messages: usize,
    pub accepted: usize,
    pub rejected: usize,
    /// Messages without measurement markers.
    pub ignored: usize,
    pub sweeps_completed: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionReport {
    pub end: SessionEnd,
    pub counters: SessionCounters,
}

/// Runs the receive/render loop on one connection until the peer closes,
/// the session is cancelled, or a fatal error occurs.
///
/// The surface is closed and the connection dropped on every path.
pub fn run_session<R, S>(
    mut connection: R,
    surface: &mut S,
    config: &RadarConfig,
    termination: &Termination,
) -> Result<SessionReport, RadarError>
where
    R: Read,
    S: RenderSurface,
{
    info!(
        "Session started. Sweep capacity = {}, max range = {}.",
        config.sweep_capacity, config.max_range
    );
    let result = receive(&mut connection, surface, config, termination);
    surface.close();
    drop(connection);

    match &result {
        Ok(report) => info!("Session ended: {:?}. {:?}", report.end, report.counters),
        Err(e) => error!("Session aborted: {e}"),
    }
    result
}

fn receive<R, S>(
    connection: &mut R,
    surface: &mut S,
    config: &RadarConfig,
    termination: &Termination,
) -> Result<SessionReport, RadarError>
where
    R: Read,
    S: RenderSurface,
{
    config.validate()?;

    let mut framer = LineFramer::new();
    let mut buffer = SweepBuffer::new(config.sweep_capacity);
    let mut renderer = RenderDriver::new(
        config.max_range,
        config.sweep_indicator,
        config.frame_pause,
    );
    let mut chunk = vec![0u8; config.chunk_size];
    let mut counters = SessionCounters::default();

    loop {
        if termination.is_terminated() {
            info!("Termination requested");
            return Ok(report(SessionEnd::Cancelled, counters));
        }
        if surface.quit_requested() {
            info!("Quit requested by the render surface");
            return Ok(report(SessionEnd::Cancelled, counters));
        }

        match read_chunk(connection, &mut chunk)? {
            ReadOutcome::Closed => return Ok(report(SessionEnd::PeerClosed, counters)),
            ReadOutcome::Idle => (),
            ReadOutcome::Data(n) => {
                counters.bytes_read += n;
                for message in framer.push(&chunk[..n])? {
                    counters.messages += 1;
                    handle_message(&message, &mut buffer, &mut renderer, surface, &mut counters);
                }
            }
        }

        renderer.render(buffer.sweep(), surface);
    }
}

fn handle_message<S: RenderSurface>(
    message: &str,
    buffer: &mut SweepBuffer,
    renderer: &mut RenderDriver<S::Line>,
    surface: &mut S,
    counters: &mut SessionCounters,
) {
    match parse_message(message) {
        Ok(Some(measurement)) => {
            counters.accepted += 1;
            if let SweepEvent::Reset { completed } = buffer.push(measurement) {
                debug!("Sweep #{completed} completed, starting a new one");
                counters.sweeps_completed = completed;
                renderer.clear_overlay(surface);
            }
        }
        Ok(None) => {
            counters.ignored += 1;
            trace!("Ignored message {:?}", message);
        }
        Err(e) => {
            counters.rejected += 1;
            warn!("Discarded message {:?}: {e}", message);
        }
    }
}

fn report(end: SessionEnd, counters: SessionCounters) -> SessionReport {
    SessionReport { end, counters }
}
