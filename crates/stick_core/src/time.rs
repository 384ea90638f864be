use std::time::Instant;

const FPS_SAMPLE_COUNT: usize = 60;

/// Fixed-timestep accumulator. The driver feeds it frame time, then drains
/// whole `fixed_dt` slices with `should_step()`; each slice is one game tick.
pub struct TimeState {
    pub fixed_dt: f64,
    pub max_accumulator: f64,
    accumulator: f64,
    pub total_time: f64,
    pub fixed_step_count: u64,
    pub frame_count: u64,
    pub steps_this_frame: u32,
    pub real_dt: f64,
    last_instant: Instant,

    fps_samples: [f64; FPS_SAMPLE_COUNT],
    fps_sample_index: usize,
    pub smoothed_fps: f64,
}

impl TimeState {
    pub fn new() -> Self {
        Self::with_fixed_dt(1.0 / 60.0)
    }

    pub fn with_fixed_dt(fixed_dt: f64) -> Self {
        Self {
            fixed_dt,
            max_accumulator: fixed_dt.max(0.25),
            accumulator: 0.0,
            total_time: 0.0,
            fixed_step_count: 0,
            frame_count: 0,
            steps_this_frame: 0,
            real_dt: 0.0,
            last_instant: Instant::now(),
            fps_samples: [fixed_dt; FPS_SAMPLE_COUNT],
            fps_sample_index: 0,
            smoothed_fps: 1.0 / fixed_dt,
        }
    }

    /// Start a frame using wall-clock time since the previous frame.
    pub fn begin_frame(&mut self) {
        let now = Instant::now();
        let real_dt = now.duration_since(self.last_instant).as_secs_f64();
        self.last_instant = now;
        self.begin_frame_with(real_dt);
    }

    /// Start a frame with a caller-supplied delta (headless and replay runs).
    pub fn begin_frame_with(&mut self, real_dt: f64) {
        self.real_dt = real_dt;

        // Spiral-of-death cap
        if self.real_dt > self.max_accumulator {
            log::warn!(
                "Frame took {:.1}ms, capping accumulator to {}ms",
                self.real_dt * 1000.0,
                self.max_accumulator * 1000.0
            );
            self.real_dt = self.max_accumulator;
        }

        self.accumulator += self.real_dt;
        self.steps_this_frame = 0;
        self.frame_count += 1;

        self.fps_samples[self.fps_sample_index] = self.real_dt;
        self.fps_sample_index = (self.fps_sample_index + 1) % FPS_SAMPLE_COUNT;
        let avg_dt: f64 = self.fps_samples.iter().sum::<f64>() / FPS_SAMPLE_COUNT as f64;
        self.smoothed_fps = if avg_dt > 0.0 { 1.0 / avg_dt } else { 0.0 };
    }

    pub fn should_step(&mut self) -> bool {
        if self.accumulator >= self.fixed_dt {
            self.accumulator -= self.fixed_dt;
            self.total_time += self.fixed_dt;
            self.fixed_step_count += 1;
            self.steps_this_frame += 1;
            true
        } else {
            false
        }
    }
}

impl Default for TimeState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(time: &mut TimeState) -> u32 {
        let mut steps = 0;
        while time.should_step() {
            steps += 1;
        }
        steps
    }

    #[test]
    fn one_fixed_dt_frame_yields_one_step() {
        let mut time = TimeState::with_fixed_dt(0.5);
        time.begin_frame_with(0.5);
        assert_eq!(drain(&mut time), 1);
        assert_eq!(time.steps_this_frame, 1);
        assert_eq!(time.fixed_step_count, 1);
    }

    #[test]
    fn short_frames_accumulate_into_a_step() {
        let mut time = TimeState::with_fixed_dt(0.5);
        time.begin_frame_with(0.25);
        assert_eq!(drain(&mut time), 0);
        assert_eq!(time.steps_this_frame, 0);
        time.begin_frame_with(0.25);
        assert_eq!(drain(&mut time), 1);
    }

    #[test]
    fn long_frame_is_capped() {
        let mut time = TimeState::with_fixed_dt(0.0625);
        time.begin_frame_with(10.0);
        assert_eq!(time.real_dt, 0.25);
        assert_eq!(drain(&mut time), 4);
    }

    #[test]
    fn smoothed_fps_starts_at_nominal_rate() {
        let time = TimeState::new();
        assert!((time.smoothed_fps - 60.0).abs() < 1e-6);
    }
}
