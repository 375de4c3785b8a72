use crate::domain::entities::alert::{AlertLog, Dispatch};
use crate::domain::entities::history::HistoryBuffer;
use crate::domain::entities::process::ProcessInfo;
use crate::domain::entities::sample::Sample;

/// Read-only artifacts the monitor exposes after each cycle.
#[derive(Debug, Clone, Copy)]
pub struct CycleView<'a> {
    pub sample: &'a Sample,
    pub history: &'a HistoryBuffer,
    pub processes: &'a [ProcessInfo],
    pub alert_log: &'a AlertLog,
    pub last_dispatch: &'a Dispatch,
}

/// Anything that shows the monitor's state to a human.
pub trait DisplaySurface {
    fn render(&mut self, view: &CycleView<'_>);
}
