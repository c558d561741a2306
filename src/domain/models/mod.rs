mod action;
mod author;
mod backend;
mod document;
mod entry;
mod event;
mod loading;
mod message;
mod session;
mod slash_commands;
mod textarea;

pub use action::*;
pub use author::*;
pub use backend::*;
pub use document::*;
pub use entry::*;
pub use event::*;
pub use loading::*;
pub use message::*;
pub use session::*;
pub use slash_commands::*;
pub use textarea::*;
