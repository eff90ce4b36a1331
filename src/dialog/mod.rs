//! Interactive dialogs the host opens in response to dialog results

mod model_delete;
mod model_select;
mod picker;

pub use model_delete::{ModelDeleteDialog, delete_saved_model};
pub use model_select::ModelSelectDialog;
pub use picker::PickerState;
