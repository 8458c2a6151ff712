pub trait Animation<T> {
    fn advance_frames(&mut self, frames: usize);
    fn current_frame(&self) -> T;
    fn is_over(&self) -> bool;
}

/// Drives an animation from wall-clock time at 60 frames per second.
pub struct FloatAnimator<T, A: Animation<T>> {
    begin_at: f64,
    elapsed_frames: usize,
    pub animation: A,
    phantom: std::marker::PhantomData<T>,
}

impl<T, A: Animation<T>> FloatAnimator<T, A> {
    pub fn new(animation: A) -> Self {
        FloatAnimator {
            begin_at: js_sys::Date::now(),
            elapsed_frames: 0,
            animation,
            phantom: std::marker::PhantomData,
        }
    }

    pub fn animate(&mut self) {
        let elapsed = js_sys::Date::now() - self.begin_at;
        let frames = (elapsed / 1000.0 * 60.0).floor() as usize;
        let frame_delta = frames.saturating_sub(self.elapsed_frames);
        self.elapsed_frames = frames;

        if frame_delta > 0 {
            self.animation.advance_frames(frame_delta);
        }
    }

    pub fn frame(&self) -> T {
        self.animation.current_frame()
    }

    pub fn is_over(&self) -> bool {
        self.animation.is_over()
    }
}

/// Whole milliseconds of wall-clock time between ticks, without drift.
pub struct FrameClock {
    begin_at: f64,
    elapsed_ms: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        FrameClock {
            begin_at: js_sys::Date::now(),
            elapsed_ms: 0,
        }
    }

    pub fn tick(&mut self) -> u64 {
        let elapsed = (js_sys::Date::now() - self.begin_at).max(0.).floor() as u64;
        let delta = elapsed.saturating_sub(self.elapsed_ms);
        self.elapsed_ms = elapsed;
        delta
    }
}

/// Eases a displayed counter toward its target, a quarter of the gap per
/// frame.
pub struct NumberAnimator {
    target: i64,
    current: i64,
}

impl NumberAnimator {
    pub fn new(target: i64) -> Self {
        NumberAnimator { target, current: 0 }
    }

    pub fn set_target(&mut self, target: i64) {
        self.target = target;
    }

    /// Snaps to the target without easing.
    pub fn reset(&mut self, target: i64) {
        self.target = target;
        self.current = target;
    }
}

impl Animation<i64> for NumberAnimator {
    fn advance_frames(&mut self, frames: usize) {
        for _ in 0..frames {
            let gap = self.target - self.current;
            self.current += (gap + gap.signum() * 3) / 4;
        }
    }

    fn current_frame(&self) -> i64 {
        self.current
    }

    fn is_over(&self) -> bool {
        self.current == self.target
    }
}
