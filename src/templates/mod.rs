pub mod create_confirm_template;
pub mod create_page_template;
pub mod servers_page_template;

pub use create_confirm_template::{CreateConfirmTemplate, HiddenField, SummaryRow};
pub use create_page_template::CreatePageTemplate;
pub use servers_page_template::ServersPageTemplate;
