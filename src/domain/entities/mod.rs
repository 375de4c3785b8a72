pub mod alert;
pub mod history;
pub mod process;
pub mod sample;

pub use alert::{AlertCondition, AlertLog, AlertRecord, Dispatch, DispatchOutcome};
pub use history::HistoryBuffer;
pub use process::ProcessInfo;
pub use sample::Sample;
