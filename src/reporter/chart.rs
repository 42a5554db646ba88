use crate::config::ChartConfig;
use crate::model::{RenderError, StoredRecord};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bar {
    pub label: String,
    pub value: u64,
}

/// Everything needed to draw the bar chart, independent of the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub bars: Vec<Bar>,
}

impl ChartSpec {
    /// One bar per row, in row order.
    pub fn from_records(records: &[StoredRecord], config: &ChartConfig) -> Self {
        Self {
            title: config.title.clone(),
            x_label: config.x_label.clone(),
            y_label: config.y_label.clone(),
            bars: records
                .iter()
                .map(|r| Bar {
                    label: r.country_name.clone(),
                    value: r.number_of_foreigners,
                })
                .collect(),
        }
    }

    pub fn max_value(&self) -> u64 {
        self.bars.iter().map(|b| b.value).max().unwrap_or(0)
    }
}

pub trait ChartRenderer {
    fn render(&self, chart: &ChartSpec) -> Result<(), RenderError>;
}

/// Step of the form 1, 2 or 5 × 10^k that splits `max` into at most `target` intervals.
pub fn nice_step(max: u64, target: u64) -> u64 {
    let target = target.max(1);
    if max == 0 {
        return 1;
    }
    let raw = max.div_ceil(target);
    let mut magnitude = 1u64;
    while magnitude <= raw / 10 {
        magnitude *= 10;
    }
    for factor in [1, 2, 5, 10] {
        let step = magnitude.saturating_mul(factor);
        if step >= raw {
            return step;
        }
    }
    magnitude.saturating_mul(10)
}

/// Tick values from 0 up to the first multiple of the step covering `max`.
pub fn y_ticks(max: u64, target: u64) -> Vec<u64> {
    let step = nice_step(max, target);
    let top = max.div_ceil(step).max(1) * step;
    (0..=top / step).map(|i| i * step).collect()
}

/// Thousands-separated rendering used for tick and hover labels.
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
