//! Terminal rendering - ranking table, share charts and countdown lines

use std::io::{self, Write};

use bank_core::InflationRate;
use bank_runtime::{ChartSlice, LedgerSnapshot, Presenter};
use bank_time::TimerDisplay;

const BAR_WIDTH: usize = 20;

/// Seconds left at which every tick is announced
const FINAL_COUNT: u32 = 5;

/// Presenter writing plain text to a terminal
pub struct TerminalPresenter<W: Write + Send> {
    out: W,
}

impl TerminalPresenter<io::Stdout> {
    pub fn stdout() -> Self {
        TerminalPresenter { out: io::stdout() }
    }
}

impl<W: Write + Send> TerminalPresenter<W> {
    #[cfg(test)]
    pub fn new(out: W) -> Self {
        TerminalPresenter { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> Presenter for TerminalPresenter<W> {
    fn render_ledger(&mut self, snapshot: &LedgerSnapshot) -> io::Result<()> {
        writeln!(self.out)?;
        self.out.write_all(render_table(snapshot).as_bytes())?;
        self.out
            .write_all(render_chart("Wealth", &snapshot.wealth_chart()).as_bytes())?;
        self.out
            .write_all(render_chart("Ans. Questions", &snapshot.answered_chart()).as_bytes())?;
        self.out.flush()
    }

    fn render_timer(&mut self, display: TimerDisplay) -> io::Result<()> {
        // Minute marks and the final seconds only
        if display.remaining % 60 == 0 || display.remaining <= FINAL_COUNT {
            writeln!(
                self.out,
                "⏳ Inflation in {} [{}]",
                display.text(),
                bar(display.fill())
            )?;
            self.out.flush()?;
        }
        Ok(())
    }

    fn render_inflation(&mut self, rate: InflationRate) -> io::Result<()> {
        writeln!(self.out, "\n📈 Inflation! Every balance grew by {rate}")?;
        self.out.flush()
    }
}

/// Ranking table in ledger order
pub fn render_table(snapshot: &LedgerSnapshot) -> String {
    let mut text = String::new();
    if snapshot.is_empty() {
        text.push_str("(no groups yet - add one with /add <name>)\n");
        return text;
    }

    let width = snapshot
        .rows
        .iter()
        .map(|g| g.name.as_str().chars().count())
        .max()
        .unwrap_or(0)
        .max("Group Name".len());

    text.push_str(&format!(
        "{:<width$} │ {:>4} │ {:>14} │ {:>10}\n",
        "Group Name", "Rank", "Ans. Questions", "Wealth"
    ));
    text.push_str(&"─".repeat(width + 39));
    text.push('\n');
    for group in &snapshot.rows {
        text.push_str(&format!(
            "{:<width$} │ {:>4} │ {:>14} │ {:>10}\n",
            group.name.as_str(),
            group.rank,
            group.answered,
            group.wealth
        ));
    }
    text
}

/// One proportional chart as labelled bars
pub fn render_chart(title: &str, slices: &[ChartSlice]) -> String {
    let mut text = format!("{title} Chart\n");
    if slices.is_empty() {
        text.push_str("  (nothing to chart)\n");
        return text;
    }

    let width = slices
        .iter()
        .map(|s| s.name.chars().count())
        .max()
        .unwrap_or(0);
    for slice in slices {
        text.push_str(&format!(
            "  {:<width$} [{}] {:>6}\n",
            slice.name,
            bar(slice.percent / 100.0),
            slice.label()
        ));
    }
    text
}

/// Fixed-width bar filled to `fraction` (clamped to `0.0..=1.0`)
fn bar(fraction: f64) -> String {
    let filled = (fraction.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    use bank_core::{Group, GroupName};

    fn snapshot() -> LedgerSnapshot {
        let group = |name: &str, rank, answered, wealth| Group {
            name: GroupName::new(name).unwrap(),
            rank,
            answered,
            wealth,
        };
        LedgerSnapshot {
            rows: vec![group("Red", 2, 1, 25), group("Blue", 1, 3, 75)],
        }
    }

    #[test]
    fn test_table_rows_in_order() {
        let table = render_table(&snapshot());
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Group Name"));
        assert!(lines[2].starts_with("Red"));
        assert!(lines[3].starts_with("Blue"));
        assert!(lines[3].trim_end().ends_with("75"));
    }

    #[test]
    fn test_empty_table() {
        assert!(render_table(&LedgerSnapshot::default()).contains("no groups"));
    }

    #[test]
    fn test_chart_bars() {
        let chart = render_chart("Wealth", &snapshot().wealth_chart());
        let lines: Vec<&str> = chart.lines().collect();
        assert_eq!(lines[0], "Wealth Chart");
        assert!(lines[1].contains("25.0%"));
        assert_eq!(lines[1].matches('█').count(), 5);
        assert_eq!(lines[2].matches('█').count(), 15);
    }

    #[test]
    fn test_timer_announcements() {
        let mut presenter = TerminalPresenter::new(Vec::new());
        for remaining in [120, 90, 60, 6, 5, 0] {
            presenter
                .render_timer(TimerDisplay { remaining, total: 120 })
                .unwrap();
        }
        let out = String::from_utf8(presenter.into_inner()).unwrap();
        let announced: Vec<&str> = out.lines().collect();
        assert_eq!(announced.len(), 4);
        assert!(announced[0].starts_with("⏳ Inflation in 02:00 ["));
        assert!(announced[1].starts_with("⏳ Inflation in 01:00 ["));
        assert!(announced[2].starts_with("⏳ Inflation in 00:05 ["));
        assert!(announced[3].starts_with("⏳ Inflation in 00:00 ["));

        // gauge shows remaining / total
        let filled: Vec<usize> = announced.iter().map(|l| l.matches('█').count()).collect();
        assert_eq!(filled, vec![20, 10, 1, 0]);
    }

    #[test]
    fn test_ledger_render_includes_both_charts() {
        let mut presenter = TerminalPresenter::new(Vec::new());
        presenter.render_ledger(&snapshot()).unwrap();
        let out = String::from_utf8(presenter.into_inner()).unwrap();
        assert!(out.contains("Wealth Chart"));
        assert!(out.contains("Ans. Questions Chart"));
    }
}
