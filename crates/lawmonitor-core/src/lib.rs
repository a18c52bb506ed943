pub mod action;
pub mod change;
pub mod content;
pub mod keyword;
pub mod law;
pub mod log;

mod error;

pub use action::{ActionItem, ActionStatus, IllegalTransition, NewAction, Priority};
pub use change::{Change, ChangeType, NewChange};
pub use content::{ContentDiff, diff_lines, fingerprint, normalize_content};
pub use error::UnknownVariant;
pub use keyword::{Keyword, NewKeyword};
pub use law::{Law, LawDetail, LawSummary};
pub use log::{LogType, MonitoringLog, NewLog};
