pub mod aggregate;
pub mod bucket;
pub mod calendar;
pub mod classifier;
pub mod dashboard;
pub mod salary;

pub use classifier::{LedgerClassifier, MarkerClassifier};
pub use dashboard::Dashboard;
