use chrono::{DateTime, Local};

use crate::services::server_service::status_display;

/// A server as returned by the listing endpoint.
#[derive(Clone, Debug)]
pub struct ServerView {
    pub id: String,
    pub name: String,
    pub vcpus: i64,
    pub ram_gib: i64,
    pub ipv4: String,
    pub image: String,
    pub creation_time: String,
    pub remarks: String,
    pub status: i64,
}

/// Listing row ready for the template or the CLI table: status mapped to a
/// label and style class, creation time rendered in local time.
#[derive(Clone, Debug)]
pub struct ServerRow {
    pub id: String,
    pub name: String,
    pub spec_display: String,
    pub ipv4: String,
    pub image: String,
    pub created_display: String,
    pub remarks: String,
    pub status_label: String,
    pub status_class: String,
}

impl ServerRow {
    pub fn from_view(view: &ServerView) -> Self {
        let (status_label, status_class) = status_display(view.status);
        ServerRow {
            id: view.id.clone(),
            name: view.name.clone(),
            spec_display: format!("vCPU:{}/RAM:{}GB", view.vcpus, view.ram_gib),
            ipv4: view.ipv4.clone(),
            image: view.image.clone(),
            created_display: local_time_display(&view.creation_time),
            remarks: view.remarks.clone(),
            status_label: status_label.to_string(),
            status_class: status_class.to_string(),
        }
    }
}

fn local_time_display(iso: &str) -> String {
    match DateTime::parse_from_rfc3339(iso) {
        Ok(dt) => dt.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
        Err(_) => iso.to_string(),
    }
}
