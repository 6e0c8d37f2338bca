pub mod app_state;
pub mod create_form;
pub mod select_option;
pub mod selection_state;
pub mod server_view;
pub mod service_entry;

pub use app_state::{AppState, SharedController};
pub use create_form::{CreateForm, CreateRequest};
pub use select_option::{option_views, SelectOption, SelectOptionView};
pub use selection_state::{NetworkTagFilter, SelectionState};
pub use server_view::{ServerRow, ServerView};
pub use service_entry::ServiceEntry;
