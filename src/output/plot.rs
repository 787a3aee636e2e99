//! Horizontal bar chart rendering
//!
//! The report hands bucketed data to a [`HistogramRenderer`] and prints
//! whatever lines come back. [`AsciiBarChart`] is the built-in renderer:
//! one line per bucket with its range, its count, and a bar scaled to the
//! fullest bucket. Output is plain ASCII so it survives any log collector.
//!
//! ```text
//! [1.0240e6, 1.1264e6)  [ 12]  ****************************************
//! [1.1264e6, 1.2288e6)  [  3]  **********
//! ```

/// Renders `(counts, edges)` into text lines
///
/// `edges` has one more element than `counts`; bucket `i` spans
/// `edges[i]..edges[i + 1]`.
pub trait HistogramRenderer {
    fn render(&self, counts: &[u64], edges: &[f64]) -> Vec<String>;
}

/// Default bar width in characters for the fullest bucket
pub const DEFAULT_BAR_WIDTH: usize = 40;

/// ASCII horizontal bar chart
#[derive(Debug, Clone, Copy)]
pub struct AsciiBarChart {
    bar_width: usize,
    bar_char: char,
}

impl AsciiBarChart {
    pub fn new(bar_width: usize) -> Self {
        Self {
            bar_width,
            bar_char: '*',
        }
    }
}

impl Default for AsciiBarChart {
    fn default() -> Self {
        Self::new(DEFAULT_BAR_WIDTH)
    }
}

impl HistogramRenderer for AsciiBarChart {
    fn render(&self, counts: &[u64], edges: &[f64]) -> Vec<String> {
        if counts.is_empty() || edges.len() != counts.len() + 1 {
            return Vec::new();
        }

        let max_count = counts.iter().copied().max().unwrap_or(0).max(1);
        let count_width = max_count.to_string().len();
        let last = counts.len() - 1;

        counts
            .iter()
            .enumerate()
            .map(|(i, &count)| {
                let bar_len = ((count as f64 / max_count as f64) * self.bar_width as f64).round() as usize;
                let close = if i == last { ']' } else { ')' };
                format!(
                    "[{:.4e}, {:.4e}{}  [{:>width$}]  {}",
                    edges[i],
                    edges[i + 1],
                    close,
                    count,
                    self.bar_char.to_string().repeat(bar_len),
                    width = count_width
                )
                .trim_end()
                .to_string()
            })
            .collect()
    }
}
