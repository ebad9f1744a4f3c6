//! Bot module - Telegram side of the language system.
//!
//! - `dispatcher` - Shared state and handler schema
//! - `participant` - Telegram user as a preference holder
//! - `menu` - Inline keyboard language menus
//! - `presence` - Users who blocked the bot

pub mod dispatcher;
mod menu;
mod participant;
mod presence;
mod runtime;

pub use dispatcher::{AppState, ThrottledBot, build_dispatcher};
pub use runtime::run;
