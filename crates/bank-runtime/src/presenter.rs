//! Presentation seam
//!
//! After every ledger mutation the controller hands presenters a full
//! snapshot; after every tick it hands them the countdown display. Rendering
//! is best effort: a failing presenter is logged and otherwise ignored.

use std::io;
use std::sync::Arc;

use bank_core::{Group, InflationRate};
use bank_ledger::Ledger;
use bank_time::TimerDisplay;
use parking_lot::Mutex;

/// Ordered rows with freshly computed ranks
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LedgerSnapshot {
    pub rows: Vec<Group>,
}

/// One group's share of a proportional chart
#[derive(Clone, Debug, PartialEq)]
pub struct ChartSlice {
    pub name: String,
    pub value: i64,
    /// Share of the chart total, in percent
    pub percent: f64,
}

impl ChartSlice {
    /// Percentage to one decimal place, e.g. `"42.5%"`
    pub fn label(&self) -> String {
        format!("{:.1}%", self.percent)
    }
}

impl LedgerSnapshot {
    pub fn of(ledger: &Ledger) -> Self {
        LedgerSnapshot {
            rows: ledger.groups().to_vec(),
        }
    }

    /// Proportional breakdown by wealth
    pub fn wealth_chart(&self) -> Vec<ChartSlice> {
        chart(self.rows.iter().map(|g| (g, g.wealth)))
    }

    /// Proportional breakdown by answered questions
    pub fn answered_chart(&self) -> Vec<ChartSlice> {
        chart(self.rows.iter().map(|g| (g, g.answered as i64)))
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Non-positive values carry no share. An all-zero column has no slices.
fn chart<'a>(values: impl Iterator<Item = (&'a Group, i64)>) -> Vec<ChartSlice> {
    let values: Vec<(&Group, i64)> = values.map(|(g, v)| (g, v.max(0))).collect();
    let total: f64 = values.iter().map(|(_, v)| *v as f64).sum();
    if total <= 0.0 {
        return Vec::new();
    }

    values
        .into_iter()
        .map(|(group, value)| ChartSlice {
            name: group.name.to_string(),
            value,
            percent: value as f64 * 100.0 / total,
        })
        .collect()
}

/// Presentation collaborator
pub trait Presenter: Send {
    /// Re-render the table and both charts
    fn render_ledger(&mut self, snapshot: &LedgerSnapshot) -> io::Result<()>;

    /// Show the countdown
    fn render_timer(&mut self, display: TimerDisplay) -> io::Result<()>;

    /// An inflation event just changed every balance
    fn render_inflation(&mut self, _rate: InflationRate) -> io::Result<()> {
        Ok(())
    }
}

/// Everything a [`RecordingPresenter`] has been shown
#[derive(Debug, Default)]
pub struct Recorded {
    pub snapshots: Vec<LedgerSnapshot>,
    pub timer: Vec<TimerDisplay>,
    pub inflations: Vec<InflationRate>,
}

/// Presenter that keeps what it is shown, readable from another owner
#[derive(Clone, Debug, Default)]
pub struct RecordingPresenter {
    recorded: Arc<Mutex<Recorded>>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared view of the recording
    pub fn recorded(&self) -> Arc<Mutex<Recorded>> {
        Arc::clone(&self.recorded)
    }
}

impl Presenter for RecordingPresenter {
    fn render_ledger(&mut self, snapshot: &LedgerSnapshot) -> io::Result<()> {
        self.recorded.lock().snapshots.push(snapshot.clone());
        Ok(())
    }

    fn render_timer(&mut self, display: TimerDisplay) -> io::Result<()> {
        self.recorded.lock().timer.push(display);
        Ok(())
    }

    fn render_inflation(&mut self, rate: InflationRate) -> io::Result<()> {
        self.recorded.lock().inflations.push(rate);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use bank_core::{Amount, GroupName};

    fn snapshot(rows: &[(&str, i64, u32)]) -> LedgerSnapshot {
        let mut ledger = Ledger::new();
        for &(name, wealth, answered) in rows {
            ledger.add_group(GroupName::new(name).unwrap()).unwrap();
            ledger.withdraw(name, Amount(-wealth)).unwrap();
            for _ in 0..answered {
                ledger.deposit(name, Amount::ZERO).unwrap();
            }
        }
        LedgerSnapshot::of(&ledger)
    }

    #[test]
    fn test_wealth_chart_shares() {
        let snap = snapshot(&[("A", 300, 0), ("B", 100, 0)]);
        let chart = snap.wealth_chart();
        assert_eq!(chart.len(), 2);
        assert_eq!(chart[0].label(), "75.0%");
        assert_eq!(chart[1].label(), "25.0%");
    }

    #[test]
    fn test_answered_chart_shares() {
        let snap = snapshot(&[("A", 0, 1), ("B", 0, 2)]);
        let labels: Vec<String> = snap.answered_chart().iter().map(|s| s.label()).collect();
        assert_eq!(labels, vec!["33.3%", "66.7%"]);
    }

    #[test]
    fn test_debt_has_no_share() {
        let snap = snapshot(&[("A", 50, 0), ("B", -50, 0)]);
        let chart = snap.wealth_chart();
        assert_eq!(chart[0].percent, 100.0);
        assert_eq!(chart[1].percent, 0.0);
    }

    #[test]
    fn test_all_zero_chart_is_empty() {
        let snap = snapshot(&[("A", 0, 0), ("B", 0, 0)]);
        assert!(snap.wealth_chart().is_empty());
        assert!(snap.answered_chart().is_empty());
        assert!(LedgerSnapshot::default().wealth_chart().is_empty());
    }

    #[test]
    fn test_recording_presenter_shares_state() {
        let mut presenter = RecordingPresenter::new();
        let recorded = presenter.recorded();
        presenter
            .render_timer(TimerDisplay { remaining: 3, total: 5 })
            .unwrap();
        assert_eq!(recorded.lock().timer.len(), 1);
    }
}
