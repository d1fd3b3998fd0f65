//! Financial context aggregation and the chat prompt built around it.

pub mod context;
pub mod fetch;
pub mod period;
pub mod prompt;

pub use context::{build_context, FinanceContext};
pub use fetch::{load_snapshot, FinanceSnapshot};
pub use period::{resolve, PeriodDescriptor, ResolvedPeriod};
pub use prompt::{build_messages, HISTORY_TURNS};
