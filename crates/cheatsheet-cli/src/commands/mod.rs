//! Command implementations for the cheatsheet CLI
//!
//! Each command lives in its own submodule and exposes an `execute`
//! function taking the opened library.

mod delete;
mod export;
mod import;
mod list;
mod new;
mod rename;
mod search;
mod show;

pub use delete::execute as delete_cheatsheet;
pub use export::{execute as export_cheatsheet, execute_all as export_all};
pub use import::execute as import;
pub use list::execute as list_cheatsheets;
pub use new::execute as new_cheatsheet;
pub use rename::execute as rename_cheatsheet;
pub use search::execute as search;
pub use show::execute as show_cheatsheet;
