use clap::Parser;
use radar_driver::termination_channel;
use std::io::Write;
use std::net::TcpStream;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(about = "Emits a sweeping stream of fake radar measurements over TCP.")]
struct Args {
    /// Address of the radar receiver.
    #[arg(long, default_value = "127.0.0.1:1500")]
    address: String,
    /// Angle step between two measurements in degrees.
    #[arg(long, default_value_t = 10)]
    step: i32,
    /// Pause between two measurements.
    #[arg(long, default_value_t = 50)]
    interval_ms: u64,
    /// Number of half rotations to emit. Runs until interrupted when unset.
    #[arg(long)]
    sweeps: Option<usize>,
}

/// Angles of one back-and-forth servo rotation, 0 -> 180 -> 0.
fn sweep_angles(step: i32) -> Vec<i32> {
    let forward: Vec<i32> = (0..=180).step_by(step as usize).collect();
    let backward = forward.iter().rev().skip(1).copied();
    forward.iter().copied().chain(backward).collect()
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    if args.step <= 0 {
        log::error!("The angle step must be positive.");
        std::process::exit(1);
    }

    let (terminator, termination) = termination_channel();
    if let Err(e) = ctrlc::set_handler(move || terminator.terminate()) {
        log::warn!("Failed to set the Ctrl-C handler: {e}");
    }

    let mut stream = match TcpStream::connect(&args.address) {
        Ok(stream) => stream,
        Err(e) => {
            log::error!("Failed to connect to {}: {e}", args.address);
            std::process::exit(1);
        }
    };
    log::info!("Connected to {}", args.address);

    let angles = sweep_angles(args.step);
    let half = angles.len() / 2 + 1;
    let mut index: u64 = 0;
    let mut sent_sweeps = 0;
    for (i, angle) in angles.iter().cycle().enumerate() {
        if termination.is_terminated() || args.sweeps.is_some_and(|n| sent_sweeps >= n) {
            break;
        }
        let theta = (*angle as f64).to_radians();
        let distance = 40. + 30. * f64::sin(2. * theta + (index as f64) * 0.05);
        let line = format!("Angle: {}, Distance: {:.1}cm\n", angle, distance);
        if let Err(e) = stream.write_all(line.as_bytes()) {
            log::error!("Failed to send: {e}");
            std::process::exit(1);
        }
        index += 1;
        if (i + 1) % angles.len() == half || (i + 1) % angles.len() == 0 {
            sent_sweeps += 1;
        }
        std::thread::sleep(Duration::from_millis(args.interval_ms));
    }
    log::info!("Sent {} measurements", index);
}
