const FRAMES: [&str; 4] = ["|", "/", "-", "\\"];

/// Indeterminate progress indicator, advanced once per tick.
#[derive(Debug, Default, Clone, Copy)]
pub struct Spinner {
    frame: usize,
}

impl Spinner {
    pub fn tick(&mut self) {
        self.frame = (self.frame + 1) % FRAMES.len();
    }

    pub fn frame(&self) -> &'static str {
        FRAMES[self.frame]
    }
}
