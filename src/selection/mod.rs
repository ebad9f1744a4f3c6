//! Language selection.
//!
//! - `workflow` - Listing, waiting for a choice, committing it
//! - `pending` - Open menus waiting for a button press
//! - `trigger` - Chat commands that start the workflow

mod pending;
mod trigger;
mod workflow;

pub use pending::{CALLBACK_PREFIX, PendingMenus, callback_data, parse_callback_data};
pub use trigger::{LANGUAGE_COMMANDS, should_trigger};
pub use workflow::{
    LanguageMenu, MenuOption, MenuPresenter, MenuResponse, SelectionOutcome, SelectionWorkflow,
};
