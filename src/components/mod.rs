//! UI Components

mod delete_button;
mod header_bar;
mod todo_modal;
mod todo_table;

pub use delete_button::DeleteButton;
pub use header_bar::HeaderBar;
pub use todo_modal::TodoModal;
pub use todo_table::TodoTable;
