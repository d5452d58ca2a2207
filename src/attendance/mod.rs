pub mod clock;
pub mod ledger;
pub mod session;
pub mod ticker;

pub use clock::{LocalClock, SessionClock, WallClock};
pub use ledger::Ledger;
pub use session::{SessionContext, SessionRegistry, SessionStatus};
pub use ticker::{TICK_PERIOD, Ticker};
