pub mod filter;
pub mod session;

pub use filter::{FilterMode, FilterState};
pub use session::{FetchOutcome, RaceSession, RequestTicket};
