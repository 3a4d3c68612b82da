//! Terminal rendering of the bedtime trend chart
//!
//! Draws a [`BedtimeSeries`] as a connected line chart on a character grid:
//! dates run left to right, later bedtimes sit higher.

use colored::*;
use sleeplog_core::{format_bedtime, BedtimeSeries};

const TITLE: &str = "Bedtime trend";
const MARKER: char = '●';
const LINE: char = '·';
/// `HH:MM` plus a space and the axis glyph
const Y_LABEL_WIDTH: usize = 7;
const MINUTES_PER_DAY: f64 = 1440.0;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Cell {
    Empty,
    Line,
    Marker,
    Label(char),
}

/// Render `series` into a `width` x `height` block of text.
///
/// `height` counts plot rows only; title and axis rows are added on top.
pub fn render_chart(series: &BedtimeSeries, width: usize, height: usize) -> String {
    let cols = width.saturating_sub(Y_LABEL_WIDTH).max(2);
    let rows = height.max(2);
    let (y_lo, y_hi) = y_bounds(series);

    let to_row = |minutes: u32| -> usize {
        let frac = (y_hi - minutes as f64) / (y_hi - y_lo);
        (frac * (rows - 1) as f64).round() as usize
    };
    let span = series.span_hours().max(1) as f64;
    let to_col = |offset_hours: i64| -> usize {
        ((offset_hours as f64 / span) * (cols - 1) as f64).round() as usize
    };

    let positions: Vec<(usize, usize)> = series
        .points
        .iter()
        .map(|p| (to_col(series.offset_hours(p.date)), to_row(p.minutes())))
        .collect();

    let mut grid = vec![vec![Cell::Empty; cols]; rows];

    for pair in positions.windows(2) {
        draw_segment(&mut grid, pair[0], pair[1]);
    }
    for (point, &(col, row)) in series.points.iter().zip(&positions) {
        if row > 0 {
            place_label(&mut grid[row - 1], col, &format_bedtime(point.bedtime));
        }
    }
    for &(col, row) in &positions {
        grid[row][col] = Cell::Marker;
    }

    let mut out = String::new();
    out.push_str(&format!(
        "{}\n",
        format!("{:^width$}", TITLE, width = width).bold().blue()
    ));
    out.push_str(&format!("{}\n", "Bedtime".dimmed()));

    let label_every = (rows / 4).max(1);
    for (row, cells) in grid.iter().enumerate() {
        let prefix = if row % label_every == 0 || row == rows - 1 {
            let minutes = y_hi - (row as f64 / (rows - 1) as f64) * (y_hi - y_lo);
            format!("{} ┤", minutes_label(minutes))
        } else {
            format!("{:>5} │", "")
        };
        out.push_str(&prefix);
        out.push_str(&render_cells(cells));
        out.push('\n');
    }

    out.push_str(&format!("{:>5} └{}\n", "", "─".repeat(cols)));

    let mut date_row = vec![Cell::Empty; cols];
    for (point, &(col, _)) in series.points.iter().zip(&positions) {
        place_label(&mut date_row, col, &point.date.format("%m/%d").to_string());
    }
    out.push_str(&format!("{:>5}  {}\n", "", render_cells(&date_row)));
    out.push_str(&format!("{:>width$}", "Date", width = width).dimmed().to_string());

    out
}

/// Padded y range in minutes since midnight
fn y_bounds(series: &BedtimeSeries) -> (f64, f64) {
    let (min, max) = series.minute_range();
    let (min, max) = (min as f64, max as f64);
    let pad = ((max - min) / 10.0).max(if min == max { 30.0 } else { 5.0 });
    let lo = (min - pad).max(0.0);
    let hi = (max + pad).min(MINUTES_PER_DAY - 1.0);
    (lo, hi)
}

fn minutes_label(minutes: f64) -> String {
    let total = minutes.round().clamp(0.0, MINUTES_PER_DAY - 1.0) as u32;
    format!("{:02}:{:02}", total / 60, total % 60)
}

fn draw_segment(grid: &mut [Vec<Cell>], from: (usize, usize), to: (usize, usize)) {
    let (c0, r0) = (from.0 as i64, from.1 as i64);
    let (c1, r1) = (to.0 as i64, to.1 as i64);
    let steps = (c1 - c0).abs().max((r1 - r0).abs());
    if steps == 0 {
        return;
    }
    for i in 0..=steps {
        let c = c0 + (c1 - c0) * i / steps;
        let r = r0 + ((r1 - r0) as f64 * i as f64 / steps as f64).round() as i64;
        let cell = &mut grid[r as usize][c as usize];
        if *cell == Cell::Empty {
            *cell = Cell::Line;
        }
    }
}

/// Write `text` centred on `col` if the span is free; skip otherwise.
fn place_label(row: &mut [Cell], col: usize, text: &str) {
    let len = text.chars().count();
    if len > row.len() {
        return;
    }
    let start = col.saturating_sub(len / 2).min(row.len() - len);
    let span = start..start + len;
    let free = row[span.clone()].iter().all(|c| *c == Cell::Empty)
        && (start == 0 || !is_label(row[start - 1]))
        && row.get(span.end).map_or(true, |c| !is_label(*c));
    if !free {
        return;
    }
    for (cell, ch) in row[span].iter_mut().zip(text.chars()) {
        *cell = Cell::Label(ch);
    }
}

fn is_label(cell: Cell) -> bool {
    matches!(cell, Cell::Label(_))
}

fn render_cells(cells: &[Cell]) -> String {
    let mut line = String::new();
    for cell in cells {
        match cell {
            Cell::Empty => line.push(' '),
            Cell::Line => line.push_str(&LINE.to_string().blue().to_string()),
            Cell::Marker => line.push_str(&MARKER.to_string().red().bold().to_string()),
            Cell::Label(ch) => line.push_str(&ch.to_string().blue().to_string()),
        }
    }
    line.trim_end().to_string()
}
