//! In-memory sportsbook session: American-odds conversion, a bet slip with
//! straight and parlay payouts, placement into a newest-first history, and
//! the static game catalog the slip picks from.

pub mod api;
pub mod catalog;
pub mod error;
pub mod history;
pub mod leaderboard;
pub mod odds;
pub mod payout;
pub mod settings;
pub mod slip;
pub mod sportsbook;

pub use crate::sportsbook::Sportsbook;
