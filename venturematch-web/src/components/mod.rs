pub(crate) mod form_field;
pub(crate) mod header_nav_item;
pub(crate) mod image_input;
pub(crate) mod loading;
pub(crate) mod panel;
pub(crate) mod resource_panel;
pub(crate) mod user_dropdown;

// Re-export components for convenience
pub use form_field::{CheckboxField, ErrorAlert, TextField, setter};
pub use image_input::ImageInput;
pub use loading::Loading;
pub use panel::{PanelView, ResourcePanel, draft_field};
pub use resource_panel::{PanelHandle, use_resource_panel};
