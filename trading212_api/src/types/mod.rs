mod account;
pub use self::account::{AccountSummary, Cash, Investments};

mod instrument;
pub use self::instrument::{ExchangeMetadata, Instrument, InstrumentRef, TimeEvent, WorkingSchedule};

mod order;
pub use self::order::{
    LimitOrderRequest, MarketOrderRequest, Order, OrderSide, OrderType, StopLimitOrderRequest,
    StopOrderRequest, TimeInForce,
};

mod position;
pub use self::position::{Position, WalletImpact};

mod history;
pub use self::history::{
    DataIncluded, Dividend, Fill, FillWalletImpact, HistoricalOrder, Report, ReportId,
    ReportRequest, Tax, Transaction,
};

mod pie;
pub use self::pie::{
    DividendCashAction, DividendDetails, PieDetails, PieInstrument, PieIssue, PieMetaRequest,
    PieRequest, PieResult, PieSettings, PieSummary,
};
