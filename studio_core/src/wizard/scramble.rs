//! Label reveal effect: glyphs settle left to right into the final text.

use rand::{rngs::StdRng, Rng, SeedableRng};
use std::time::Duration;

pub const DIGIT_GLYPHS: &str = "0123456789";
pub const ALPHANUMERIC_GLYPHS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Interval between frames.
pub const TICK_INTERVAL: Duration = Duration::from_millis(30);

/// Frames needed to lock one more character.
const TICKS_PER_CHAR: usize = 3;

pub struct ScrambleText {
    target: Vec<char>,
    glyphs: Vec<char>,
    display: String,
    ticks: usize,
    running: bool,
    rng: StdRng,
}

impl ScrambleText {
    pub fn new(text: &str, glyphs: &str) -> Self {
        Self::with_rng(text, glyphs, StdRng::from_entropy())
    }

    pub fn with_seed(text: &str, glyphs: &str, seed: u64) -> Self {
        Self::with_rng(text, glyphs, StdRng::seed_from_u64(seed))
    }

    fn with_rng(text: &str, glyphs: &str, rng: StdRng) -> Self {
        let glyphs: Vec<char> = glyphs.chars().collect();
        Self {
            target: text.chars().collect(),
            glyphs: if glyphs.is_empty() {
                DIGIT_GLYPHS.chars().collect()
            } else {
                glyphs
            },
            display: text.to_string(),
            ticks: 0,
            running: false,
            rng,
        }
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn revealed(&self) -> usize {
        self.ticks.div_ceil(TICKS_PER_CHAR).min(self.target.len())
    }

    /// Focus: restart the reveal from a fully scrambled label.
    pub fn start(&mut self) {
        self.ticks = 0;
        self.running = !self.target.is_empty();
        self.render();
    }

    /// Advances one frame. Returns whether more frames are needed.
    pub fn tick(&mut self) -> bool {
        if !self.running {
            return false;
        }

        self.render();
        if self.revealed() >= self.target.len() {
            self.running = false;
        }
        self.ticks += 1;
        self.running
    }

    /// Blur: show the final text immediately.
    pub fn reset(&mut self) {
        self.running = false;
        self.ticks = 0;
        self.display = self.target.iter().collect();
    }

    fn render(&mut self) {
        let revealed = self.revealed();
        let mut frame = String::with_capacity(self.target.len());
        for (index, c) in self.target.iter().enumerate() {
            if index < revealed {
                frame.push(*c);
            } else {
                let glyph = self.glyphs[self.rng.gen_range(0..self.glyphs.len())];
                frame.push(glyph);
            }
        }
        self.display = frame;
    }
}
