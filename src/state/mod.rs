pub mod clock;
pub mod reducers;
pub mod store;
pub mod summary;

pub use clock::{AlertStamper, Clock, FixedClock, SystemClock};
pub use reducers::{reduce, BudgetAction, Persistence, Transition};
pub use store::{load_initial, BudgetStore};
pub use summary::{BudgetSummary, CategoryUsage, UsageStatus};
