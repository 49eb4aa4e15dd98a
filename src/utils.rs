use std::time::Instant;

use log::info;

pub struct Timer(Instant);

impl Timer {
    pub fn new() -> Self {
        Self(Instant::now())
    }
    pub fn reset(&mut self) {
        self.0 = Instant::now();
    }
    pub fn log(&mut self, msg: &str) {
        info!("[{}ms] {}", self.0.elapsed().as_millis(), msg);
        self.reset();
    }
}
