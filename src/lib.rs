pub mod actions;
pub mod console;
pub mod cursor_list;
pub mod drafts;
pub mod error;
pub mod logging;
pub mod model;
pub mod page;
pub mod remote;
pub mod session;
pub mod store;
pub mod tui;
