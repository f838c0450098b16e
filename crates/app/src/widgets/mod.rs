//! Reusable widgets shared by the dashboard tabs and panels.

pub mod badges;
pub mod drag_drop;
pub mod file_picker;

pub use badges::{badge, card, marked_line, secondary_badge};
pub use drag_drop::DragDropHandler;
pub use file_picker::{model_file_from_path, ModelFilePicker};
