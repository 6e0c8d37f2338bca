use std::collections::HashMap;
use std::future::Future;

use thiserror::Error;

use crate::api::{ApiError, ComputeApi, CreateOutcome};
use crate::models::{CreateForm, CreateRequest, SelectOption, SelectionState};
use crate::utils::parse_positive_id;

/// The four dependent dropdowns of the creation form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SelectorField {
    Azone,
    Flavor,
    Image,
    Network,
}

impl SelectorField {
    /// The zone, image and network selectors are emptied on screen before a
    /// cache miss goes to the network; the flavor list is only replaced once
    /// the fetch succeeds.
    fn clears_before_fetch(&self) -> bool {
        !matches!(self, SelectorField::Flavor)
    }
}

/// Per-field option cache keyed by the selection the options were fetched
/// for. An entry, once populated, is never invalidated within the session;
/// the staleness horizon is the session's lifetime.
#[derive(Default)]
pub struct OptionCache {
    entries: HashMap<(SelectorField, String), Vec<SelectOption>>,
}

impl OptionCache {
    pub fn get(&self, field: SelectorField, key: &str) -> Option<&Vec<SelectOption>> {
        self.entries.get(&(field, key.to_string()))
    }

    pub fn insert(&mut self, field: SelectorField, key: String, options: Vec<SelectOption>) {
        self.entries.insert((field, key), options);
    }

    pub fn contains(&self, field: SelectorField, key: &str) -> bool {
        self.entries.contains_key(&(field, key.to_string()))
    }
}

/// The current option list of each selector; what the page shows.
#[derive(Default, Clone)]
pub struct RenderedSelectors {
    pub azones: Vec<SelectOption>,
    pub flavors: Vec<SelectOption>,
    pub images: Vec<SelectOption>,
    pub networks: Vec<SelectOption>,
}

impl RenderedSelectors {
    pub fn get(&self, field: SelectorField) -> &[SelectOption] {
        match field {
            SelectorField::Azone => &self.azones,
            SelectorField::Flavor => &self.flavors,
            SelectorField::Image => &self.images,
            SelectorField::Network => &self.networks,
        }
    }

    fn set(&mut self, field: SelectorField, options: Vec<SelectOption>) {
        match field {
            SelectorField::Azone => self.azones = options,
            SelectorField::Flavor => self.flavors = options,
            SelectorField::Image => self.images = options,
            SelectorField::Network => self.networks = options,
        }
    }

    fn clear(&mut self, field: SelectorField) {
        self.set(field, Vec::new());
    }
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("A creation request is already in flight.")]
    InFlight,
    #[error("{0}")]
    Api(#[from] ApiError),
}

/// Keeps the four interdependent dropdowns of the creation form consistent
/// with the upstream selections, resolving each from its cache or with a
/// single fetch, and gates submission of the assembled request. One
/// controller exists per form session.
#[derive(Default)]
pub struct CreateController {
    selection: SelectionState,
    cache: OptionCache,
    rendered: RenderedSelectors,
    submit_in_flight: bool,
}

impl CreateController {
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn rendered(&self) -> &RenderedSelectors {
        &self.rendered
    }

    pub fn cache(&self) -> &OptionCache {
        &self.cache
    }

    /// Display label of a currently rendered option.
    pub fn label_for(&self, field: SelectorField, value: &str) -> Option<String> {
        self.rendered
            .get(field)
            .iter()
            .find(|opt| opt.value == value)
            .map(|opt| opt.label.clone())
    }

    /// First page view of the form: zone, flavor and network selectors are
    /// resolved for the selected service; the image selector starts empty
    /// because image choices depend on the flavor.
    pub async fn initial_load(
        &mut self,
        selection: SelectionState,
        api: &impl ComputeApi,
    ) -> Vec<String> {
        let mut alerts = Vec::new();
        self.selection = selection;
        self.selection.image_id.clear();
        self.resolve_azones(api, &mut alerts).await;
        self.rendered.clear(SelectorField::Image);
        self.resolve_flavors(api, &mut alerts).await;
        self.resolve_networks(api, &mut alerts).await;
        alerts
    }

    /// Apply one round-trip of the form: diff the posted selection against
    /// the current one and run the transitions of whichever upstream field
    /// changed. Returns the user-facing messages of any failed refresh.
    pub async fn handle_form_event(
        &mut self,
        incoming: SelectionState,
        api: &impl ComputeApi,
    ) -> Vec<String> {
        let mut alerts = Vec::new();
        let previous = std::mem::replace(&mut self.selection, incoming);

        if self.selection.service_id != previous.service_id {
            self.on_service_changed(api, &mut alerts).await;
        } else {
            if self.selection.azone_id != previous.azone_id {
                self.on_azone_changed(api, &mut alerts).await;
            }
            if self.selection.flavor_id != previous.flavor_id {
                self.on_flavor_changed(api, &mut alerts).await;
            }
        }
        if self.selection.network_tag != previous.network_tag {
            self.on_network_tag_changed();
        }
        alerts
    }

    /// Service endpoint changed: the zone and network selectors re-resolve
    /// against the new service and the image selector is cleared outright
    /// (image choices wait for a flavor). The flavor list is left as it is.
    async fn on_service_changed(&mut self, api: &impl ComputeApi, alerts: &mut Vec<String>) {
        self.selection.azone_id.clear();
        self.selection.image_id.clear();
        self.selection.network_id.clear();
        self.resolve_azones(api, alerts).await;
        self.rendered.clear(SelectorField::Image);
        self.resolve_networks(api, alerts).await;
    }

    /// Availability zone changed: only the network selector re-resolves, for
    /// the (service, zone) key.
    async fn on_azone_changed(&mut self, api: &impl ComputeApi, alerts: &mut Vec<String>) {
        self.selection.network_id.clear();
        self.resolve_networks(api, alerts).await;
    }

    /// Flavor changed: the image selector re-resolves. The flavor id goes to
    /// the backend as a query filter but is not part of the cache key, so
    /// flavors under the same zone share one cached image list.
    async fn on_flavor_changed(&mut self, api: &impl ComputeApi, alerts: &mut Vec<String>) {
        self.selection.image_id.clear();
        self.resolve_images(api, alerts).await;
    }

    /// Network tag filter changed: a pure presentation toggle, no I/O. The
    /// filtering states drop the current network selection.
    fn on_network_tag_changed(&mut self) {
        if self.selection.network_tag.clears_selection() {
            self.selection.network_id.clear();
        }
    }

    async fn resolve_azones(&mut self, api: &impl ComputeApi, alerts: &mut Vec<String>) {
        let Some(service_id) = self.selection.service() else {
            return;
        };
        let key = self.selection.service_key();
        let result = self
            .resolve_and_render(SelectorField::Azone, key, || api.azones(service_id))
            .await;
        if let Err(e) = result {
            alerts.push(format!("Failed to load availability zones: {}", e));
        }
    }

    async fn resolve_flavors(&mut self, api: &impl ComputeApi, alerts: &mut Vec<String>) {
        let Some(service_id) = self.selection.service() else {
            return;
        };
        let key = self.selection.zone_scoped_key();
        let result = self
            .resolve_and_render(SelectorField::Flavor, key, || api.flavors(service_id))
            .await;
        if let Err(e) = result {
            alerts.push(format!("Failed to load configuration data: {}", e));
        }
    }

    async fn resolve_images(&mut self, api: &impl ComputeApi, alerts: &mut Vec<String>) {
        let Some(service_id) = self.selection.service() else {
            return;
        };
        let key = self.selection.zone_scoped_key();
        let flavor_id = self.selection.flavor_id.clone();
        let result = self
            .resolve_and_render(SelectorField::Image, key, || api.images(service_id, &flavor_id))
            .await;
        if let Err(e) = result {
            alerts.push(format!("Failed to load image data: {}", e));
        }
    }

    async fn resolve_networks(&mut self, api: &impl ComputeApi, alerts: &mut Vec<String>) {
        let Some(service_id) = self.selection.service() else {
            return;
        };
        let key = self.selection.zone_scoped_key();
        let azone_id = self.selection.azone_id.clone();
        let result = self
            .resolve_and_render(SelectorField::Network, key, || {
                api.networks(service_id, Some(&azone_id))
            })
            .await;
        if let Err(e) = result {
            alerts.push(format!("Failed to load network data: {}", e));
        }
    }

    /// Resolve one selector: a cache hit renders the stored options without
    /// touching the network; a miss issues exactly one fetch and stores the
    /// result under the key before the event completes.
    async fn resolve_and_render<F, Fut>(
        &mut self,
        field: SelectorField,
        key: String,
        fetch: F,
    ) -> Result<(), ApiError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<SelectOption>, ApiError>>,
    {
        if let Some(options) = self.cache.get(field, &key).cloned() {
            self.rendered.set(field, options);
            return Ok(());
        }
        if field.clears_before_fetch() {
            self.rendered.clear(field);
        }
        let options = fetch().await?;
        self.rendered.set(field, options.clone());
        self.cache.insert(field, key, options);
        Ok(())
    }

    /// Mark a submission as in flight; the counterpart of disabling the
    /// submit control. Fails when one is already running.
    pub fn begin_submission(&mut self) -> Result<(), SubmitError> {
        if self.submit_in_flight {
            return Err(SubmitError::InFlight);
        }
        self.submit_in_flight = true;
        Ok(())
    }

    /// Re-enable submission, whatever the outcome was.
    pub fn finish_submission(&mut self) {
        self.submit_in_flight = false;
    }

    pub fn submit_in_flight(&self) -> bool {
        self.submit_in_flight
    }

    /// One creation request per confirmed submission, guarded against
    /// duplicates while in flight; the guard is cleared on success and
    /// failure alike.
    pub async fn submit_creation(
        &mut self,
        api: &impl ComputeApi,
        request: &CreateRequest,
    ) -> Result<CreateOutcome, SubmitError> {
        self.begin_submission()?;
        let result = api.create_server(request).await;
        self.finish_submission();
        result.map_err(SubmitError::Api)
    }
}

/// Read the posted selection out of the form query. `None` when the query
/// carries no selection at all (a plain navigation to the page).
pub fn parse_selection(query: &HashMap<String, String>) -> Option<SelectionState> {
    query.get("service_id")?;
    let field = |name: &str| query.get(name).map(|s| s.trim().to_string()).unwrap_or_default();
    Some(SelectionState {
        service_id: parse_positive_id(&field("service_id")),
        azone_id: field("azone_id"),
        flavor_id: field("flavor_id"),
        image_id: field("image_id"),
        network_id: field("network_id"),
        network_tag: crate::models::NetworkTagFilter::from_param(&field("network_tag")),
    })
}

/// Check the assembled creation request. Required fields block submission
/// with a user-facing message; optional fields are dropped when unset, and
/// the billing period only applies to prepaid requests.
pub fn validate_submission(form: &CreateForm) -> Result<CreateRequest, String> {
    let service_id = parse_positive_id(&form.service_id);
    if service_id <= 0 {
        return Err("Please select a service endpoint.".to_string());
    }
    let network_id = form.network_id.trim();
    if network_id.is_empty() {
        return Err("Please select a network.".to_string());
    }
    let image_id = form.image_id.trim();
    if image_id.is_empty() {
        return Err("Please select a system image.".to_string());
    }
    let flavor_id = form.flavor_id.trim();
    if flavor_id.is_empty() {
        return Err("Please select a configuration.".to_string());
    }

    let pay_type = non_empty(&form.pay_type);
    let period = if pay_type.as_deref() == Some("prepaid") {
        form.period.trim().parse::<i64>().ok()
    } else {
        None
    };

    Ok(CreateRequest {
        service_id,
        network_id: network_id.to_string(),
        image_id: image_id.to_string(),
        flavor_id: flavor_id.to_string(),
        quota_id: non_empty(&form.quota_id),
        azone_id: non_empty(&form.azone_id),
        pay_type,
        period,
    })
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_form() -> CreateForm {
        CreateForm {
            service_id: "1".into(),
            network_id: "n1".into(),
            image_id: "i1".into(),
            flavor_id: "f1".into(),
            ..CreateForm::default()
        }
    }

    #[test]
    fn accepts_complete_form_without_optionals() {
        let req = validate_submission(&complete_form()).unwrap();
        assert_eq!(req.service_id, 1);
        assert_eq!(req.quota_id, None);
        assert_eq!(req.azone_id, None);
        assert_eq!(req.pay_type, None);
        assert_eq!(req.period, None);
    }

    #[test]
    fn rejects_missing_required_fields() {
        let mut form = complete_form();
        form.service_id = "0".into();
        assert!(validate_submission(&form).is_err());

        let mut form = complete_form();
        form.network_id = "".into();
        assert!(validate_submission(&form).is_err());

        let mut form = complete_form();
        form.image_id = " ".into();
        assert!(validate_submission(&form).is_err());

        let mut form = complete_form();
        form.flavor_id = "".into();
        assert!(validate_submission(&form).is_err());
    }

    #[test]
    fn rejects_non_numeric_service() {
        let mut form = complete_form();
        form.service_id = "east".into();
        assert!(validate_submission(&form).is_err());
    }

    #[test]
    fn strips_period_unless_prepaid() {
        let mut form = complete_form();
        form.pay_type = "postpaid".into();
        form.period = "12".into();
        let req = validate_submission(&form).unwrap();
        assert_eq!(req.pay_type.as_deref(), Some("postpaid"));
        assert_eq!(req.period, None);

        form.pay_type = "prepaid".into();
        let req = validate_submission(&form).unwrap();
        assert_eq!(req.period, Some(12));
    }

    #[test]
    fn unset_optionals_are_dropped_from_the_payload() {
        let req = validate_submission(&complete_form()).unwrap();
        let body = serde_json::to_value(&req).unwrap();
        let obj = body.as_object().unwrap();
        assert!(!obj.contains_key("quota_id"));
        assert!(!obj.contains_key("azone_id"));
        assert!(!obj.contains_key("period"));
        assert_eq!(obj["service_id"], 1);
    }

    #[test]
    fn parse_selection_requires_a_service_param() {
        let mut query = HashMap::new();
        assert!(parse_selection(&query).is_none());
        query.insert("service_id".to_string(), "2".to_string());
        query.insert("network_tag".to_string(), "1".to_string());
        let sel = parse_selection(&query).unwrap();
        assert_eq!(sel.service_id, 2);
        assert_eq!(sel.network_tag, crate::models::NetworkTagFilter::PublicOnly);
    }
}
