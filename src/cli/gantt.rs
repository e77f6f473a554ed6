//! Terminal rendering of a [`ScheduleOutline`].
//!
//! Each row is a fixed-width label block followed by a character strip that
//! maps `0..=100` timeline positions onto columns.

use colored::Colorize;
use console::{pad_str, Alignment};

use crate::core::milestone::MilestoneKind;
use crate::core::outline::{MilestoneRow, OutlineRow, PhaseRow, ScheduleOutline, ZoneRow};
use crate::core::timeline::Bar;

const NAME_WIDTH: usize = 26;
const STRIP_WIDTH: usize = 60;

/// Glyph set; the plain set is pure ASCII.
#[derive(Debug, Clone, Copy)]
pub struct Glyphs {
    done: char,
    todo: char,
    today: char,
    milestone: char,
    tick: char,
    branch: &'static str,
    icons: bool,
    color: bool,
}

impl Glyphs {
    pub const UNICODE: Self = Self {
        done: '█',
        todo: '░',
        today: '│',
        milestone: '◆',
        tick: '┊',
        branch: "├",
        icons: true,
        color: true,
    };

    pub const PLAIN: Self = Self {
        done: '#',
        todo: '-',
        today: '|',
        milestone: '*',
        tick: ':',
        branch: "-",
        icons: false,
        color: false,
    };
}

/// Render the whole outline as lines of text.
pub fn render(outline: &ScheduleOutline, glyphs: Glyphs) -> Vec<String> {
    let mut lines = vec![header(outline, glyphs)];
    let today = column(outline.today_position);

    for row in &outline.rows {
        match row {
            OutlineRow::Milestone(m) => lines.push(milestone_line(m, today, glyphs)),
            OutlineRow::Phase(p) => {
                lines.push(phase_line(p, today, glyphs));
                lines.extend(p.zones.iter().map(|z| zone_line(z, today, glyphs)));
            }
        }
    }
    lines
}

fn header(outline: &ScheduleOutline, glyphs: Glyphs) -> String {
    let mut strip = vec![' '; STRIP_WIDTH];
    let mut next_free = 0;
    for tick in &outline.timeline.ticks {
        let Some(col) = column(tick.position) else {
            continue;
        };
        if col < next_free || col + tick.label.len() > STRIP_WIDTH {
            if col >= next_free {
                strip[col] = glyphs.tick;
            }
            continue;
        }
        for (offset, ch) in tick.label.chars().enumerate() {
            strip[col + offset] = ch;
        }
        next_free = col + tick.label.len() + 1;
    }
    let strip: String = strip.into_iter().collect();
    format!("{} {:>5} {:>4} {}", " ".repeat(NAME_WIDTH), "days", "%", strip)
}

fn phase_line(phase: &PhaseRow, today: Option<usize>, glyphs: Glyphs) -> String {
    let label = if glyphs.icons && !phase.icon.is_empty() {
        format!("{} {}", phase.icon, phase.name)
    } else {
        phase.name.clone()
    };
    let strip = bar_strip(&phase.bar, phase.progress, today, glyphs);
    let line = format!(
        "{} {:>5} {:>3}% {}",
        pad(&label, NAME_WIDTH),
        phase.duration_days,
        phase.progress,
        strip
    );
    paint(line, phase.critical, phase.progress, glyphs, true)
}

fn zone_line(zone: &ZoneRow, today: Option<usize>, glyphs: Glyphs) -> String {
    let label = format!("  {} {} ({})", glyphs.branch, zone.label, zone.count);
    let strip = bar_strip(&zone.bar, zone.progress, today, glyphs);
    let line = format!(
        "{} {:>5} {:>3}% {}",
        pad(&label, NAME_WIDTH),
        zone.duration_days,
        zone.progress,
        strip
    );
    paint(line, zone.critical, zone.progress, glyphs, false)
}

fn milestone_line(milestone: &MilestoneRow, today: Option<usize>, glyphs: Glyphs) -> String {
    let mut strip = empty_strip(today, glyphs);
    if let Some(col) = column(milestone.position) {
        strip[col] = glyphs.milestone;
    }
    let label = format!("{} {}", glyphs.milestone, milestone.name);
    let line = format!(
        "{} {:>10} {}",
        pad(&label, NAME_WIDTH),
        milestone.date.format("%m-%d"),
        strip.into_iter().collect::<String>()
    );
    if !glyphs.color {
        return line;
    }
    match milestone.kind {
        MilestoneKind::Start => line.green().to_string(),
        MilestoneKind::End => line.red().to_string(),
        MilestoneKind::Other => line.blue().to_string(),
    }
}

fn bar_strip(bar: &Bar, progress: u8, today: Option<usize>, glyphs: Glyphs) -> String {
    let mut strip = empty_strip(today, glyphs);
    let width = STRIP_WIDTH as f64;
    let start = ((bar.left / 100.0) * width).floor().clamp(0.0, width - 1.0) as usize;
    let len = ((bar.width / 100.0) * width).round().max(1.0) as usize;
    let end = (start + len).min(STRIP_WIDTH);
    let filled = start + ((end - start) as f64 * f64::from(progress) / 100.0).round() as usize;
    for (i, cell) in strip.iter_mut().enumerate().take(end).skip(start) {
        *cell = if i < filled { glyphs.done } else { glyphs.todo };
    }
    strip.into_iter().collect()
}

fn empty_strip(today: Option<usize>, glyphs: Glyphs) -> Vec<char> {
    let mut strip = vec![' '; STRIP_WIDTH];
    if let Some(col) = today {
        strip[col] = glyphs.today;
    }
    strip
}

/// Strip column for a timeline position, `None` when off the strip.
fn column(position: f64) -> Option<usize> {
    if !(0.0..=100.0).contains(&position) {
        return None;
    }
    Some(((position / 100.0) * (STRIP_WIDTH - 1) as f64).round() as usize)
}

fn pad(text: &str, width: usize) -> String {
    pad_str(text, width, Alignment::Left, Some("…")).into_owned()
}

fn paint(line: String, critical: bool, progress: u8, glyphs: Glyphs, bold: bool) -> String {
    if !glyphs.color {
        return line;
    }
    let colored = if critical {
        line.red()
    } else if progress >= 100 {
        line.green()
    } else if progress > 0 {
        line.normal()
    } else {
        line.dimmed()
    };
    if bold { colored.bold().to_string() } else { colored.to_string() }
}
