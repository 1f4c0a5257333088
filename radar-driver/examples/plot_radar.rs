use clap::Parser;
use piston_window::{EventLoop, PistonWindow, Window, WindowSettings};
use plotters::drawing::IntoDrawingArea;
use plotters::prelude::{ChartBuilder, Circle, LineSeries, BLACK, GREEN, RED, WHITE};
use plotters::style::Color;
use plotters_piston::{draw_piston_window, PistonBackend};
use radar_driver::{
    polar_to_cartesian, run_serial_radar, run_tcp_radar, termination_channel, RadarConfig,
    RenderSurface, SweepIndicator,
};
use std::collections::BTreeMap;
use std::error::Error;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(about = "Receives sweep radar measurements and plots them.")]
struct Args {
    /// Address to listen on for the sensor connection.
    #[arg(long, default_value = "0.0.0.0:1500")]
    bind: String,
    /// Read from a serial device such as /dev/ttyACM0 instead of TCP.
    #[arg(long)]
    serial: Option<String>,
    #[arg(long, default_value_t = 115200)]
    baud_rate: u32,
    /// Points per sweep before the display is reset.
    #[arg(long, default_value_t = 19)]
    sweep_capacity: usize,
    /// Display range in cm.
    #[arg(long, default_value_t = 100.)]
    max_range: f64,
    /// Move the sweep line with the latest measurement.
    #[arg(long)]
    follow: bool,
    #[arg(long, default_value_t = 250)]
    read_timeout_ms: u64,
}

const FPS: u64 = 60;
const N_RINGS: usize = 4;

/// Half-disc radar display drawn with plotters on a piston window.
struct PistonSurface {
    window: PistonWindow,
    max_range: f64,
    points: Vec<(f64, f64)>,
    lines: BTreeMap<u64, [(f64, f64); 2]>,
    next_line: u64,
    indicator: Option<[(f64, f64); 2]>,
    window_closed: bool,
}

impl PistonSurface {
    fn new(max_range: f64) -> PistonSurface {
        let mut window: PistonWindow = WindowSettings::new("Sweep radar", [1000, 520])
            .build()
            .unwrap();
        window.set_max_fps(FPS);
        PistonSurface {
            window,
            max_range,
            points: Vec::new(),
            lines: BTreeMap::new(),
            next_line: 0,
            indicator: None,
            window_closed: false,
        }
    }
}

fn radial_segment(angle_radian: f64, from: f64, to: f64) -> [(f64, f64); 2] {
    [
        polar_to_cartesian(angle_radian, from),
        polar_to_cartesian(angle_radian, to),
    ]
}

impl RenderSurface for PistonSurface {
    type Line = u64;

    fn restore_background(&mut self) {
        // the background is repainted from scratch on every blit
        self.indicator = None;
    }

    fn set_points(&mut self, angles_radian: &[f64], distances: &[f64]) {
        self.points = angles_radian
            .iter()
            .zip(distances.iter())
            .map(|(a, d)| polar_to_cartesian(*a, *d))
            .collect();
    }

    fn draw_line(&mut self, angle_radian: f64, from: f64, to: f64) -> u64 {
        let id = self.next_line;
        self.next_line += 1;
        self.lines.insert(id, radial_segment(angle_radian, from, to));
        id
    }

    fn remove_line(&mut self, line: u64) {
        self.lines.remove(&line);
    }

    fn set_sweep_indicator(&mut self, angle_radian: Option<f64>, max_range: f64) {
        self.indicator = angle_radian.map(|a| radial_segment(a, 0., max_range));
    }

    fn blit(&mut self) {
        let PistonSurface {
            window,
            max_range,
            points,
            lines,
            indicator,
            ..
        } = self;
        let r = *max_range;
        let draw = |b: PistonBackend| -> Result<(), Box<dyn Error>> {
            let root = b.into_drawing_area();
            root.fill(&BLACK)?;

            let mut cc = ChartBuilder::on(&root).build_cartesian_2d(-r..r, 0.0..r)?;

            for ring in 1..=N_RINGS {
                let radius = r * (ring as f64) / (N_RINGS as f64);
                let arc = (0..=180).map(|d| polar_to_cartesian((d as f64).to_radians(), radius));
                cc.draw_series(LineSeries::new(arc, &WHITE.mix(0.3)))?;
            }
            for segment in lines.values() {
                cc.draw_series(LineSeries::new(segment.iter().copied(), &GREEN.mix(0.5)))?;
            }
            if let Some(segment) = indicator {
                cc.draw_series(LineSeries::new(segment.iter().copied(), &WHITE))?;
            }
            cc.draw_series(
                points
                    .iter()
                    .map(|(x, y)| Circle::new((*x, *y), 6, RED.mix(0.5).filled())),
            )?;
            Ok(())
        };
        if draw_piston_window(window, draw).is_none() {
            self.window_closed = true;
        }
    }

    fn pause(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }

    fn quit_requested(&self) -> bool {
        self.window_closed
    }

    fn close(&mut self) {
        self.window.set_should_close(true);
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = RadarConfig {
        sweep_capacity: args.sweep_capacity,
        max_range: args.max_range,
        read_timeout: Some(Duration::from_millis(args.read_timeout_ms)),
        sweep_indicator: if args.follow {
            SweepIndicator::FollowLatest
        } else {
            SweepIndicator::default()
        },
        ..Default::default()
    };

    let (terminator, termination) = termination_channel();
    if let Err(e) = ctrlc::set_handler(move || terminator.terminate()) {
        log::warn!("Failed to set the Ctrl-C handler: {e}");
    }

    let mut surface = PistonSurface::new(config.max_range);
    let result = match &args.serial {
        Some(port_name) => run_serial_radar(
            port_name,
            args.baud_rate,
            &mut surface,
            &config,
            &termination,
        )
        .map(Some),
        None => run_tcp_radar(args.bind.as_str(), &mut surface, &config, &termination),
    };

    match result {
        Ok(Some(report)) => println!("{:?}", report),
        Ok(None) => println!("No sensor connected."),
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    }
}
