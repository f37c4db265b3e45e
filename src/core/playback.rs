//! Frame timing for animating a precomputed run.
//!
//! The trajectories are never touched here; playback only decides which
//! sample index is on screen and which indices leave a persistent marker.

/// Which frames leave a persistent position marker behind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MarkerSchedule {
    stride: usize,
}

impl MarkerSchedule {
    /// Rounds the interval to whole frames so 0.15 s at 0.05 s steps is every third frame.
    pub fn new(marker_interval_s: f64, time_step_s: f64) -> Self {
        let frames = (marker_interval_s / time_step_s).round();
        let stride = if frames.is_finite() && frames >= 1.0 {
            frames as usize
        } else {
            1
        };
        Self { stride }
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn is_marker_frame(&self, index: usize) -> bool {
        index % self.stride == 0
    }

    pub fn marker_indices(&self, len: usize) -> impl Iterator<Item = usize> {
        (0..len).step_by(self.stride)
    }

    /// Markers already laid down once frame `current` is on screen.
    pub fn markers_through(&self, current: usize) -> impl Iterator<Item = usize> {
        (0..=current).step_by(self.stride)
    }
}

/// Real-time cursor over `frame_count` frames, one frame per `time_step_s` seconds.
#[derive(Clone, Debug, PartialEq)]
pub struct Playback {
    frame_count: usize,
    time_step_s: f64,
    frame: usize,
    accumulator_s: f64,
    paused: bool,
}

impl Playback {
    pub fn new(frame_count: usize, time_step_s: f64) -> Self {
        Self {
            frame_count,
            time_step_s,
            frame: 0,
            accumulator_s: 0.0,
            paused: false,
        }
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_finished(&self) -> bool {
        self.frame_count == 0 || self.frame + 1 >= self.frame_count
    }

    /// Simulated time of the frame currently shown.
    pub fn elapsed_s(&self) -> f64 {
        self.frame as f64 * self.time_step_s
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    pub fn restart(&mut self) {
        self.frame = 0;
        self.accumulator_s = 0.0;
        self.paused = false;
    }

    /// Feeds elapsed wall-clock time scaled by `speed` and returns the frame to draw.
    pub fn advance(&mut self, real_dt_s: f64, speed: f64) -> usize {
        if self.paused || self.is_finished() || !(self.time_step_s > 0.0) {
            return self.frame;
        }

        self.accumulator_s += (real_dt_s * speed).max(0.0);
        let steps = (self.accumulator_s / self.time_step_s).floor();
        if steps >= 1.0 {
            self.accumulator_s -= steps * self.time_step_s;
            let last = self.frame_count - 1;
            self.frame = self.frame.saturating_add(steps as usize).min(last);
            if self.frame == last {
                self.accumulator_s = 0.0;
            }
        }
        self.frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_stride_follows_interval() {
        assert_eq!(MarkerSchedule::new(0.2, 0.05).stride(), 4);
        assert_eq!(MarkerSchedule::new(0.15, 0.05).stride(), 3);
        assert_eq!(MarkerSchedule::new(1.0, 0.05).stride(), 20);
    }

    #[test]
    fn marker_stride_never_drops_to_zero() {
        assert_eq!(MarkerSchedule::new(0.01, 0.05).stride(), 1);
        assert_eq!(MarkerSchedule::new(0.2, 0.0).stride(), 1);
    }

    #[test]
    fn marker_indices_start_at_launch() {
        let schedule = MarkerSchedule::new(0.2, 0.05);
        let indices: Vec<usize> = schedule.marker_indices(10).collect();
        assert_eq!(indices, vec![0, 4, 8]);
        assert!(schedule.is_marker_frame(8));
        assert!(!schedule.is_marker_frame(9));
        assert_eq!(schedule.markers_through(5).collect::<Vec<_>>(), vec![0, 4]);
    }

    #[test]
    fn playback_advances_one_frame_per_step() {
        let mut playback = Playback::new(100, 0.05);

        assert_eq!(playback.advance(0.02, 1.0), 0);
        assert_eq!(playback.advance(0.04, 1.0), 1);
        assert_eq!(playback.advance(0.25, 1.0), 6);
        assert!((playback.elapsed_s() - 0.3).abs() < 1e-12);
    }

    #[test]
    fn playback_speed_scales_real_time() {
        let mut playback = Playback::new(100, 0.05);
        assert_eq!(playback.advance(0.05, 2.0), 2);
    }

    #[test]
    fn playback_stops_on_last_frame() {
        let mut playback = Playback::new(10, 0.05);
        assert_eq!(playback.advance(5.0, 1.0), 9);
        assert!(playback.is_finished());
        assert_eq!(playback.advance(1.0, 1.0), 9);
    }

    #[test]
    fn paused_playback_holds_its_frame() {
        let mut playback = Playback::new(10, 0.05);
        playback.advance(0.1, 1.0);
        playback.toggle_pause();
        assert_eq!(playback.advance(1.0, 1.0), 2);

        playback.restart();
        assert_eq!(playback.frame(), 0);
        assert!(!playback.is_paused());
    }

    #[test]
    fn empty_run_is_already_finished() {
        let mut playback = Playback::new(0, 0.05);
        assert!(playback.is_finished());
        assert_eq!(playback.advance(1.0, 1.0), 0);
    }
}
