use crate::constants::DEFAULT_INDICATOR_DEGREE;
use crate::numeric::degree_to_radian;
use radar_data::Sweep;
use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Polar canvas that supports incremental redraw.
///
/// Angles are in radian, radii in the unit of the measurements.
pub trait RenderSurface {
    /// Handle of a drawn line, used to remove it later.
    type Line;

    /// Restores the clean background saved when the surface was set up.
    fn restore_background(&mut self);
    /// Replaces the point markers.
    fn set_points(&mut self, angles_radian: &[f64], distances: &[f64]);
    /// Draws a radial segment at `angle_radian` from `from` to `to`.
    fn draw_line(&mut self, angle_radian: f64, from: f64, to: f64) -> Self::Line;
    fn remove_line(&mut self, line: Self::Line);
    /// Moves the sweep position indicator, or hides it with `None`.
    fn set_sweep_indicator(&mut self, angle_radian: Option<f64>, max_range: f64);
    /// Composites the changed region.
    fn blit(&mut self);
    /// Lets the windowing layer process events for at most `duration`.
    fn pause(&mut self, duration: Duration);
    fn quit_requested(&self) -> bool;
    fn close(&mut self);
}

/// Where the sweep position indicator is drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SweepIndicator {
    Hidden,
    /// Static line at the given angle in degrees.
    Fixed(f64),
    /// Tracks the angle of the latest measurement.
    FollowLatest,
}

impl Default for SweepIndicator {
    fn default() -> Self {
        SweepIndicator::Fixed(DEFAULT_INDICATOR_DEGREE)
    }
}

/// Draws the sweep buffer onto a [`RenderSurface`] once per read cycle.
#[derive(Debug)]
pub struct RenderDriver<L> {
    lines: Vec<L>,
    max_range: f64,
    indicator: SweepIndicator,
    frame_pause: Duration,
}

impl<L> RenderDriver<L> {
    pub fn new(max_range: f64, indicator: SweepIndicator, frame_pause: Duration) -> Self {
        RenderDriver {
            lines: Vec::new(),
            max_range,
            indicator,
            frame_pause,
        }
    }

    pub fn render<S>(&mut self, sweep: &Sweep, surface: &mut S)
    where
        S: RenderSurface<Line = L>,
    {
        surface.restore_background();
        surface.set_points(&sweep.angles_radian, &sweep.distances);

        self.clear_overlay(surface);
        for (angle, distance) in sweep.angles_radian.iter().zip(sweep.distances.iter()) {
            let line = surface.draw_line(*angle, *distance, self.max_range);
            self.lines.push(line);
        }

        let indicator = match self.indicator {
            SweepIndicator::Hidden => None,
            SweepIndicator::Fixed(degree) => Some(degree_to_radian(degree)),
            SweepIndicator::FollowLatest => sweep.latest_angle_radian(),
        };
        surface.set_sweep_indicator(indicator, self.max_range);

        surface.blit();
        surface.pause(self.frame_pause);
    }

    /// Removes every radial line drawn for the previous sweep.
    pub fn clear_overlay<S>(&mut self, surface: &mut S)
    where
        S: RenderSurface<Line = L>,
    {
        for line in self.lines.drain(..) {
            surface.remove_line(line);
        }
    }

    /// Number of radial lines currently on the surface.
    pub fn n_lines(&self) -> usize {
        self.lines.len()
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{Call, RecordingSurface};
    use super::*;

    fn sweep_of(points: &[(f64, f64)]) -> Sweep {
        let mut sweep = Sweep::new();
        for (degree, distance) in points {
            sweep.angles_degree.push(*degree as i32);
            sweep.angles_radian.push(degree_to_radian(*degree));
            sweep.distances.push(*distance);
        }
        sweep
    }

    fn driver(indicator: SweepIndicator) -> RenderDriver<u64> {
        RenderDriver::new(100., indicator, Duration::from_millis(0))
    }

    #[test]
    fn test_render_cycle_order() {
        let mut surface = RecordingSurface::default();
        let mut driver = driver(SweepIndicator::Hidden);
        driver.render(&sweep_of(&[(0., 50.), (10., 48.)]), &mut surface);

        assert_eq!(
            surface.calls,
            vec![
                Call::RestoreBackground,
                Call::SetPoints(2),
                Call::DrawLine(0),
                Call::DrawLine(1),
                Call::SweepIndicator(None),
                Call::Blit,
                Call::Pause,
            ]
        );
        assert_eq!(surface.points.1, vec![50., 48.]);
        assert_eq!(driver.n_lines(), 2);
    }

    #[test]
    fn test_render_replaces_previous_lines() {
        let mut surface = RecordingSurface::default();
        let mut driver = driver(SweepIndicator::Hidden);
        driver.render(&sweep_of(&[(0., 50.)]), &mut surface);
        driver.render(&sweep_of(&[(0., 50.), (10., 48.)]), &mut surface);

        assert_eq!(surface.live_lines.len(), 2);
        assert!(!surface.live_lines.contains(&0));
        assert!(surface.calls.contains(&Call::RemoveLine(0)));
        assert_eq!(driver.n_lines(), 2);
    }

    #[test]
    fn test_clear_overlay() {
        let mut surface = RecordingSurface::default();
        let mut driver = driver(SweepIndicator::Hidden);
        driver.render(&sweep_of(&[(0., 1.), (10., 2.), (20., 3.)]), &mut surface);
        assert_eq!(surface.live_lines.len(), 3);

        driver.clear_overlay(&mut surface);
        assert!(surface.live_lines.is_empty());
        assert_eq!(driver.n_lines(), 0);

        // nothing left to remove on the next frame
        driver.render(&Sweep::new(), &mut surface);
        assert!(surface.live_lines.is_empty());
    }

    #[test]
    fn test_sweep_indicator() {
        let sweep = sweep_of(&[(0., 1.), (30., 2.)]);

        let mut surface = RecordingSurface::default();
        driver(SweepIndicator::default()).render(&sweep, &mut surface);
        assert!(surface
            .calls
            .contains(&Call::SweepIndicator(Some(degree_to_radian(90.)))));

        let mut surface = RecordingSurface::default();
        driver(SweepIndicator::FollowLatest).render(&sweep, &mut surface);
        assert!(surface
            .calls
            .contains(&Call::SweepIndicator(Some(degree_to_radian(30.)))));

        let mut surface = RecordingSurface::default();
        driver(SweepIndicator::FollowLatest).render(&Sweep::new(), &mut surface);
        assert!(surface.calls.contains(&Call::SweepIndicator(None)));
    }
}
