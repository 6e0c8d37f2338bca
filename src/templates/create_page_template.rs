use askama::Template;

use crate::models::SelectOptionView;

#[derive(Template)]
#[template(path = "create.html")]
pub struct CreatePageTemplate {
    pub api_hostname: String,
    pub base_url: String,
    pub flash_messages: Vec<String>,
    pub has_flash_messages: bool,
    pub services: Vec<SelectOptionView>,
    pub azones: Vec<SelectOptionView>,
    pub flavors: Vec<SelectOptionView>,
    pub images: Vec<SelectOptionView>,
    pub networks: Vec<SelectOptionView>,
    pub tag_options: Vec<SelectOptionView>,
    pub quota_id: String,
    pub pay_type: String,
    pub period: String,
}
