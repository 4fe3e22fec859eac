pub struct FrameCounter {
    // Instant of the previous update call, for the frame delta.
    last_frame_instant: web_time::Instant,
    // Instant of the last time we printed the frame time.
    last_printed_instant: web_time::Instant,
    // Number of frames since the last time we printed the frame time.
    frame_count: u32,
}

impl FrameCounter {
    pub fn new() -> Self {
        let now = web_time::Instant::now();
        Self {
            last_frame_instant: now,
            last_printed_instant: now,
            frame_count: 0,
        }
    }

    /// Advances the counter and returns the seconds elapsed since the
    /// previous frame.
    pub fn update(&mut self) -> f32 {
        self.frame_count += 1;
        let new_instant = web_time::Instant::now();
        let delta_secs = (new_instant - self.last_frame_instant).as_secs_f32();
        self.last_frame_instant = new_instant;

        let elapsed_secs = (new_instant - self.last_printed_instant).as_secs_f32();
        if elapsed_secs > 1.0 {
            let elapsed_ms = elapsed_secs * 1000.0;
            let frame_time = elapsed_ms / self.frame_count as f32;
            let fps = self.frame_count as f32 / elapsed_secs;
            log::info!("Frame time {:.2}ms ({:.1} FPS)", frame_time, fps);

            self.last_printed_instant = new_instant;
            self.frame_count = 0;
        }

        delta_secs
    }
}
