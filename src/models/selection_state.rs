/// Current value of each dropdown on the creation form. Mutated only by form
/// events or a successful selector refresh; lives for the session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionState {
    /// Selected service endpoint id; 0 means none.
    pub service_id: i64,
    pub azone_id: String,
    pub flavor_id: String,
    pub image_id: String,
    pub network_id: String,
    pub network_tag: NetworkTagFilter,
}

impl SelectionState {
    pub fn service(&self) -> Option<i64> {
        (self.service_id > 0).then_some(self.service_id)
    }

    /// Cache key for the selectors scoped to (service, zone). The zone part
    /// may be empty, matching a zone-less selection.
    pub fn zone_scoped_key(&self) -> String {
        format!("{}_{}", self.service_id, self.azone_id)
    }

    /// Cache key for the availability-zone selector itself.
    pub fn service_key(&self) -> String {
        self.service_id.to_string()
    }
}

/// Presentation filter over the rendered network options. Filtering never
/// touches the network: it only hides options already on the page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NetworkTagFilter {
    #[default]
    All,
    PublicOnly,
    PrivateOnly,
}

impl NetworkTagFilter {
    pub fn from_param(value: &str) -> Self {
        match value {
            "1" => NetworkTagFilter::PublicOnly,
            "2" => NetworkTagFilter::PrivateOnly,
            _ => NetworkTagFilter::All,
        }
    }

    pub fn as_param(&self) -> &'static str {
        match self {
            NetworkTagFilter::All => "",
            NetworkTagFilter::PublicOnly => "1",
            NetworkTagFilter::PrivateOnly => "2",
        }
    }

    pub fn allows(&self, public: bool) -> bool {
        match self {
            NetworkTagFilter::All => true,
            NetworkTagFilter::PublicOnly => public,
            NetworkTagFilter::PrivateOnly => !public,
        }
    }

    /// The filtering states drop the current selection; "show all" keeps it.
    pub fn clears_selection(&self) -> bool {
        !matches!(self, NetworkTagFilter::All)
    }
}
