pub mod actions;
mod answer_service;
mod app_state;
mod bubble;
mod bubble_list;
mod document_loader;
pub mod events;
mod scroll;

pub use answer_service::*;
pub use app_state::*;
pub use bubble::*;
pub use bubble_list::*;
pub use document_loader::*;
pub use scroll::*;
