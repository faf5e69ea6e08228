//! ASCII line chart for terminals.

use std::io::Write;

use cb_common::{Error, Result};

use super::{Chart, RenderSink};

const MARK: char = '*';
const GRID_MARK: char = '.';
const LABEL_WIDTH: usize = 10;

/// Draws charts as text onto any writer.
#[derive(Debug)]
pub struct TerminalSink<W: Write> {
    out: W,
    width: usize,
    height: usize,
    color: bool,
}

impl<W: Write> TerminalSink<W> {
    /// `width` and `height` size the plot area in characters.
    pub fn new(out: W, width: usize, height: usize) -> Self {
        Self {
            out,
            width,
            height,
            color: false,
        }
    }

    /// Wrap the series marks in ANSI color codes.
    pub fn with_color(mut self, enabled: bool) -> Self {
        self.color = enabled;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn mark(&self, color: &str) -> String {
        match ansi_code(color).filter(|_| self.color) {
            Some(code) => format!("\x1b[{code}m{MARK}\x1b[0m"),
            None => MARK.to_string(),
        }
    }
}

fn ansi_code(color: &str) -> Option<u8> {
    match color.to_ascii_lowercase().as_str() {
        "black" => Some(30),
        "red" => Some(31),
        "green" => Some(32),
        "yellow" => Some(33),
        "blue" => Some(34),
        "magenta" => Some(35),
        "cyan" => Some(36),
        _ => None,
    }
}

/// Short tick label: fixed point for ordinary values, scientific for tiny ones.
fn tick(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude == 0.0 || (1e-3..1e4).contains(&magnitude) {
        format!("{value:.4}")
    } else {
        format!("{value:.2e}")
    }
}

fn scale(value: f64, (lo, hi): (f64, f64), cells: usize) -> usize {
    let t = ((value - lo) / (hi - lo)).clamp(0.0, 1.0);
    (t * (cells - 1) as f64).round() as usize
}

/// Plot-area cells; row 0 is the top.
fn rasterize(chart: &Chart<'_>, width: usize, height: usize) -> Vec<Vec<bool>> {
    let x_range = chart.x_range();
    let y_range = chart.y_range();
    let mut cells = vec![vec![false; width]; height];
    let mut prev: Option<(usize, usize)> = None;

    for (&x, &y) in chart.x.iter().zip(chart.y) {
        let col = scale(x, x_range, width);
        let row = height - 1 - scale(y, y_range, height);
        match prev {
            Some((pc, pr)) => {
                let (dc, dr) = (col as f64 - pc as f64, row as f64 - pr as f64);
                let steps = dc.abs().max(dr.abs()) as usize;
                for s in 0..=steps {
                    let f = if steps == 0 { 0.0 } else { s as f64 / steps as f64 };
                    let c = (pc as f64 + dc * f).round() as usize;
                    let r = (pr as f64 + dr * f).round() as usize;
                    cells[r][c] = true;
                }
            }
            None => cells[row][col] = true,
        }
        prev = Some((col, row));
    }
    cells
}

/// Place `labels` at `positions` on a line `width` characters wide.
fn tick_line(labels: &[(usize, String)], width: usize) -> String {
    let mut line = vec![' '; width + LABEL_WIDTH];
    let mut cursor = 0;
    for (pos, label) in labels {
        let len = label.chars().count();
        let start = pos.saturating_sub(len / 2).max(cursor).min(line.len().saturating_sub(len));
        if start < cursor {
            continue;
        }
        for (i, ch) in label.chars().enumerate() {
            line[start + i] = ch;
        }
        cursor = start + len + 1;
    }
    line.into_iter().collect::<String>().trim_end().to_string()
}

impl<W: Write> RenderSink for TerminalSink<W> {
    fn render(&mut self, chart: &Chart<'_>) -> Result<()> {
        chart.validate()?;
        if self.width < 2 || self.height < 2 {
            return Err(Error::Render(format!(
                "plot area {}x{} is too small",
                self.width, self.height
            )));
        }

        let (width, height) = (self.width, self.height);
        let cells = rasterize(chart, width, height);
        let (y_lo, y_hi) = chart.y_range();
        let (x_lo, x_hi) = chart.x_range();
        let mark = self.mark(chart.color);

        writeln!(self.out, "{}", chart.title)?;
        writeln!(self.out, "{}", chart.y_label)?;

        for (r, row) in cells.iter().enumerate() {
            let label = if r == 0 {
                tick(y_hi)
            } else if r == height / 2 {
                tick((y_lo + y_hi) / 2.0)
            } else {
                String::new()
            };
            let mut line = format!("{label:>w$} |", w = LABEL_WIDTH - 2);
            for (c, &hit) in row.iter().enumerate() {
                if hit {
                    line.push_str(&mark);
                } else if chart.grid && (c % (width / 4).max(1) == 0 || r % (height / 4).max(1) == 0) {
                    line.push(GRID_MARK);
                } else {
                    line.push(' ');
                }
            }
            writeln!(self.out, "{}", line.trim_end())?;
        }

        writeln!(
            self.out,
            "{:>w$} +{}",
            tick(y_lo),
            "-".repeat(width),
            w = LABEL_WIDTH - 2
        )?;
        let ticks = [
            (LABEL_WIDTH, tick(x_lo)),
            (LABEL_WIDTH + width / 2, tick((x_lo + x_hi) / 2.0)),
            (LABEL_WIDTH + width - 1, tick(x_hi)),
        ];
        writeln!(self.out, "{}", tick_line(&ticks, width))?;
        let pad = LABEL_WIDTH + width.saturating_sub(chart.x_label.chars().count()) / 2;
        writeln!(self.out, "{}{}", " ".repeat(pad), chart.x_label)?;
        writeln!(self.out, "{}{} {}", " ".repeat(LABEL_WIDTH), mark, chart.legend)?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chart<'a>(x: &'a [f64], y: &'a [f64]) -> Chart<'a> {
        Chart {
            title: "Title",
            x_label: "Theta (Coin Bias)",
            y_label: "Probability Density",
            legend: "Posterior",
            color: "blue",
            x,
            y,
            grid: false,
        }
    }

    fn render(chart: &Chart<'_>, width: usize, height: usize, color: bool) -> String {
        let mut sink = TerminalSink::new(Vec::new(), width, height).with_color(color);
        sink.render(chart).unwrap();
        String::from_utf8(sink.into_inner()).unwrap()
    }

    #[test]
    fn output_has_labels_and_legend() {
        let out = render(&chart(&[0.0, 0.5, 1.0], &[0.0, 1.0, 0.0]), 40, 10, false);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Title");
        assert_eq!(lines[1], "Probability Density");
        // title, y label, 10 rows, axis, ticks, x label, legend
        assert_eq!(lines.len(), 16);
        assert!(lines[14].trim() == "Theta (Coin Bias)");
        assert!(lines[15].ends_with("* Posterior"));
        assert!(!out.contains('\x1b'));
    }

    #[test]
    fn peak_lands_on_top_row_mid_column() {
        let out = render(&chart(&[0.0, 0.5, 1.0], &[0.0, 1.0, 0.0]), 41, 10, false);
        let top = out.lines().nth(2).unwrap();
        let marked: Vec<usize> = top
            .chars()
            .skip(LABEL_WIDTH)
            .enumerate()
            .filter(|(_, c)| *c == MARK)
            .map(|(i, _)| i)
            .collect();
        assert!(marked.contains(&20), "{marked:?}");
        assert!(marked.iter().all(|c| (19..=21).contains(c)), "{marked:?}");
    }

    #[test]
    fn line_is_connected_between_points() {
        let out = render(&chart(&[0.0, 1.0], &[0.0, 1.0]), 20, 10, false);
        // Every plot row carries part of the diagonal.
        for row in out.lines().skip(2).take(10) {
            assert!(row.contains(MARK), "row without mark: {row:?}");
        }
    }

    #[test]
    fn color_wraps_marks() {
        let out = render(&chart(&[0.0, 1.0], &[1.0, 1.0]), 20, 5, true);
        assert!(out.contains("\x1b[34m*\x1b[0m"));
    }

    #[test]
    fn grid_marks_fill_background() {
        let mut c = chart(&[0.0, 1.0], &[1.0, 1.0]);
        c.grid = true;
        let out = render(&c, 20, 8, false);
        assert!(out.contains(GRID_MARK));
    }

    #[test]
    fn rejects_tiny_area_and_bad_series() {
        let x = [0.0, 1.0];
        let y = [0.5, 0.5];
        let mut sink = TerminalSink::new(Vec::new(), 1, 10);
        assert!(matches!(sink.render(&chart(&x, &y)), Err(Error::Render(_))));

        let mut sink = TerminalSink::new(Vec::new(), 20, 10);
        assert!(sink.render(&chart(&x, &[0.5])).is_err());
    }

    #[test]
    fn tick_formats() {
        assert_eq!(tick(0.0), "0.0000");
        assert_eq!(tick(0.5), "0.5000");
        assert_eq!(tick(0.00025), "2.50e-4");
    }
}
