use askama::Template;

pub struct SummaryRow {
    pub label: String,
    pub value: String,
}

pub struct HiddenField {
    pub name: String,
    pub value: String,
}

#[derive(Template)]
#[template(path = "create_confirm.html")]
pub struct CreateConfirmTemplate {
    pub api_hostname: String,
    pub base_url: String,
    pub flash_messages: Vec<String>,
    pub has_flash_messages: bool,
    pub rows: Vec<SummaryRow>,
    pub hidden_fields: Vec<HiddenField>,
    pub confirm_url: String,
    pub cancel_url: String,
}
