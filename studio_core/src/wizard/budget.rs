use crate::config::BudgetConfig;
use crate::models::BUDGET_SKIP_SENTINEL;

/// Bounded budget slider with an explicit skip flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetSlider {
    min: u32,
    max: u32,
    step: u32,
    value: u32,
    skipped: bool,
}

impl BudgetSlider {
    pub fn new(config: BudgetConfig) -> Self {
        let mut slider = Self {
            min: config.min,
            max: config.max.max(config.min),
            step: config.step.max(1),
            value: config.min,
            skipped: false,
        };
        slider.value = slider.snap(config.default);
        slider
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn is_skipped(&self) -> bool {
        self.skipped
    }

    pub fn range(&self) -> (u32, u32, u32) {
        (self.min, self.max, self.step)
    }

    /// Clamps into range and rounds to the nearest step. Clears the skip flag.
    pub fn set(&mut self, value: u32) -> u32 {
        self.skipped = false;
        self.value = self.snap(value);
        self.value
    }

    pub fn skip(&mut self) {
        self.skipped = true;
    }

    /// The value written into `budget_bracket`.
    pub fn bracket(&self) -> String {
        if self.skipped {
            BUDGET_SKIP_SENTINEL.to_string()
        } else {
            format_currency(self.value)
        }
    }

    /// Position of the thumb in `0.0..=1.0`.
    pub fn fill_fraction(&self) -> f32 {
        if self.max == self.min {
            return 0.0;
        }
        (self.value - self.min) as f32 / (self.max - self.min) as f32
    }

    fn snap(&self, value: u32) -> u32 {
        let (min, max, step) = (self.min as u64, self.max as u64, self.step as u64);
        let offset = value.clamp(self.min, self.max) as u64 - min;
        let steps = (offset + step / 2) / step;
        // Bounded by `max`, so the narrowing cannot truncate.
        (min + steps * step).min(max) as u32
    }
}

/// `10000` -> `"$10,000"`.
pub fn format_currency(value: u32) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("${}", grouped)
}
