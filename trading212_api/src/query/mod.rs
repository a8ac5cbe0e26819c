mod common;
pub use self::common::{Query, QueryCommon};

mod history;
pub use self::history::HistoryQuery;
