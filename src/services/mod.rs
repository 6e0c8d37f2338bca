pub mod create_service;
pub mod server_service;

// Re-export commonly used items
pub use create_service::{
    parse_selection, validate_submission, CreateController, OptionCache, RenderedSelectors,
    SelectorField, SubmitError,
};
pub use server_service::{action_label, perform_server_action, status_display};
