pub mod fitness;
pub mod payload;
pub mod period;

pub use fitness::{Activity, ActivitySelection};
pub use period::{Granularity, Period};
