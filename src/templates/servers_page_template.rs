use askama::Template;

use crate::models::ServerRow;

#[derive(Template)]
#[template(path = "servers.html")]
pub struct ServersPageTemplate<'a> {
    pub api_hostname: String,
    pub base_url: String,
    pub flash_messages: Vec<String>,
    pub has_flash_messages: bool,
    pub servers: &'a [ServerRow],
}
