use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use cirrus::api::{ApiError, ComputeApi, CreateOutcome};
use cirrus::models::{CreateForm, CreateRequest, NetworkTagFilter, SelectOption, SelectionState};
use cirrus::services::{validate_submission, CreateController, SelectorField, SubmitError};

enum CreateReply {
    Created,
    Accepted,
    Fail(u16, String),
}

/// Scripted backend double that counts every fetch and records the queries
/// the controller sends.
struct MockCompute {
    azone_calls: AtomicUsize,
    flavor_calls: AtomicUsize,
    image_calls: AtomicUsize,
    network_calls: AtomicUsize,
    create_calls: AtomicUsize,
    image_queries: Mutex<Vec<(i64, String)>>,
    network_queries: Mutex<Vec<(i64, Option<String>)>>,
    create_reply: CreateReply,
    fail_networks: bool,
}

impl Default for MockCompute {
    fn default() -> Self {
        MockCompute {
            azone_calls: AtomicUsize::new(0),
            flavor_calls: AtomicUsize::new(0),
            image_calls: AtomicUsize::new(0),
            network_calls: AtomicUsize::new(0),
            create_calls: AtomicUsize::new(0),
            image_queries: Mutex::new(Vec::new()),
            network_queries: Mutex::new(Vec::new()),
            create_reply: CreateReply::Created,
            fail_networks: false,
        }
    }
}

#[async_trait]
impl ComputeApi for MockCompute {
    async fn azones(&self, service_id: i64) -> Result<Vec<SelectOption>, ApiError> {
        self.azone_calls.fetch_add(1, Ordering::SeqCst);
        Ok(vec![SelectOption::new("z1", format!("zone-1 of service {}", service_id))])
    }

    async fn flavors(&self, _service_id: i64) -> Result<Vec<SelectOption>, ApiError> {
        self.flavor_calls.fetch_add(1, Ordering::SeqCst);
        Ok(vec![
            SelectOption::new("f1", "vCPU:2/RAM:4GB"),
            SelectOption::new("f2", "vCPU:4/RAM:8GB"),
        ])
    }

    async fn images(&self, service_id: i64, flavor_id: &str) -> Result<Vec<SelectOption>, ApiError> {
        self.image_calls.fetch_add(1, Ordering::SeqCst);
        self.image_queries
            .lock()
            .unwrap()
            .push((service_id, flavor_id.to_string()));
        Ok(vec![SelectOption::new("i1", "CentOS Stream 9")])
    }

    async fn networks(
        &self,
        service_id: i64,
        azone_id: Option<&str>,
    ) -> Result<Vec<SelectOption>, ApiError> {
        self.network_calls.fetch_add(1, Ordering::SeqCst);
        self.network_queries
            .lock()
            .unwrap()
            .push((service_id, azone_id.map(|z| z.to_string())));
        if self.fail_networks {
            return Err(ApiError::Api {
                status: 500,
                message: "network backend down".to_string(),
            });
        }
        Ok(vec![
            SelectOption::tagged("n1", "public-net", true),
            SelectOption::tagged("n2", "private-net", false),
        ])
    }

    async fn create_server(&self, _request: &CreateRequest) -> Result<CreateOutcome, ApiError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        match &self.create_reply {
            CreateReply::Created => Ok(CreateOutcome::Created),
            CreateReply::Accepted => Ok(CreateOutcome::Accepted),
            CreateReply::Fail(status, message) => Err(ApiError::Api {
                status: *status,
                message: message.clone(),
            }),
        }
    }
}

fn selection(service: i64, azone: &str, flavor: &str) -> SelectionState {
    SelectionState {
        service_id: service,
        azone_id: azone.to_string(),
        flavor_id: flavor.to_string(),
        ..SelectionState::default()
    }
}

fn valid_request() -> CreateRequest {
    validate_submission(&CreateForm {
        service_id: "1".into(),
        network_id: "n1".into(),
        image_id: "i1".into(),
        flavor_id: "f1".into(),
        ..CreateForm::default()
    })
    .unwrap()
}

#[tokio::test]
async fn initial_load_resolves_everything_but_images() {
    let api = MockCompute::default();
    let mut controller = CreateController::default();

    let alerts = controller.initial_load(selection(1, "", ""), &api).await;
    assert!(alerts.is_empty());

    assert_eq!(api.azone_calls.load(Ordering::SeqCst), 1);
    assert_eq!(api.flavor_calls.load(Ordering::SeqCst), 1);
    assert_eq!(api.network_calls.load(Ordering::SeqCst), 1);
    assert_eq!(api.image_calls.load(Ordering::SeqCst), 0);

    assert!(!controller.rendered().azones.is_empty());
    assert!(controller.rendered().images.is_empty());

    // Results are stored under their keys before the event completes.
    assert!(controller.cache().contains(SelectorField::Azone, "1"));
    assert!(controller.cache().contains(SelectorField::Flavor, "1_"));
    assert!(controller.cache().contains(SelectorField::Network, "1_"));
}

#[tokio::test]
async fn cached_keys_render_without_a_fetch() {
    let api = MockCompute::default();
    let mut controller = CreateController::default();
    controller.initial_load(selection(1, "", ""), &api).await;

    // Switching to a new service fetches for the new keys...
    controller.handle_form_event(selection(2, "", ""), &api).await;
    assert_eq!(api.azone_calls.load(Ordering::SeqCst), 2);
    assert_eq!(api.network_calls.load(Ordering::SeqCst), 2);

    // ...and switching back replays the cache without network traffic.
    controller.handle_form_event(selection(1, "", ""), &api).await;
    assert_eq!(api.azone_calls.load(Ordering::SeqCst), 2);
    assert_eq!(api.network_calls.load(Ordering::SeqCst), 2);
    assert!(!controller.rendered().azones.is_empty());
}

#[tokio::test]
async fn image_fetch_waits_for_a_flavor_and_carries_it_as_filter() {
    let api = MockCompute::default();
    let mut controller = CreateController::default();

    controller.initial_load(selection(1, "", ""), &api).await;
    assert_eq!(api.image_calls.load(Ordering::SeqCst), 0);
    assert!(controller.rendered().images.is_empty());

    controller.handle_form_event(selection(1, "", "f1"), &api).await;
    assert_eq!(api.image_calls.load(Ordering::SeqCst), 1);
    assert_eq!(
        *api.image_queries.lock().unwrap(),
        vec![(1, "f1".to_string())]
    );
    assert!(!controller.rendered().images.is_empty());
}

#[tokio::test]
async fn image_cache_shared_across_flavors() {
    let api = MockCompute::default();
    let mut controller = CreateController::default();
    controller.initial_load(selection(1, "", ""), &api).await;
    controller.handle_form_event(selection(1, "", "f1"), &api).await;

    // The flavor is a query filter but not part of the image cache key, so
    // the second flavor replays the list fetched for the first one.
    controller.handle_form_event(selection(1, "", "f2"), &api).await;
    assert_eq!(api.image_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn azone_change_refreshes_only_the_network_selector() {
    let api = MockCompute::default();
    let mut controller = CreateController::default();
    controller.initial_load(selection(1, "", ""), &api).await;

    controller.handle_form_event(selection(1, "z1", ""), &api).await;

    assert_eq!(api.azone_calls.load(Ordering::SeqCst), 1);
    assert_eq!(api.flavor_calls.load(Ordering::SeqCst), 1);
    assert_eq!(api.image_calls.load(Ordering::SeqCst), 0);
    assert_eq!(api.network_calls.load(Ordering::SeqCst), 2);
    assert_eq!(
        api.network_queries.lock().unwrap().last().unwrap(),
        &(1, Some("z1".to_string()))
    );
    assert!(controller.cache().contains(SelectorField::Network, "1_z1"));
}

#[tokio::test]
async fn service_change_resets_dependent_selections_but_keeps_the_flavor() {
    let api = MockCompute::default();
    let mut controller = CreateController::default();
    controller.initial_load(selection(1, "", ""), &api).await;

    // The form still carries the stale zone/network/image values when the
    // service select fires; the controller drops them.
    let mut incoming = selection(2, "z1", "f1");
    incoming.network_id = "n1".to_string();
    incoming.image_id = "i1".to_string();
    controller.handle_form_event(incoming, &api).await;

    let sel = controller.selection();
    assert_eq!(sel.service_id, 2);
    assert_eq!(sel.azone_id, "");
    assert_eq!(sel.network_id, "");
    assert_eq!(sel.image_id, "");
    assert_eq!(sel.flavor_id, "f1");
    assert!(controller.rendered().images.is_empty());
    assert!(controller.cache().contains(SelectorField::Azone, "2"));
    assert!(controller.cache().contains(SelectorField::Network, "2_"));
}

#[tokio::test]
async fn failed_refresh_surfaces_a_message_and_caches_nothing() {
    let api = MockCompute {
        fail_networks: true,
        ..MockCompute::default()
    };
    let mut controller = CreateController::default();

    let alerts = controller.initial_load(selection(1, "", ""), &api).await;
    assert_eq!(alerts.len(), 1);
    assert!(alerts[0].contains("Failed to load network data"));
    assert!(alerts[0].contains("network backend down"));

    assert!(controller.rendered().networks.is_empty());
    assert!(!controller.cache().contains(SelectorField::Network, "1_"));
    // The other selectors resolved independently.
    assert!(!controller.rendered().azones.is_empty());
}

#[tokio::test]
async fn network_tag_filter_clears_selection_without_io() {
    let api = MockCompute::default();
    let mut controller = CreateController::default();
    controller.initial_load(selection(1, "", ""), &api).await;

    // Pick a network, then narrow the filter: the selection is dropped and
    // nothing is fetched.
    let mut incoming = selection(1, "", "");
    incoming.network_id = "n2".to_string();
    controller.handle_form_event(incoming.clone(), &api).await;
    assert_eq!(controller.selection().network_id, "n2");

    incoming.network_tag = NetworkTagFilter::PublicOnly;
    let fetches_before = api.network_calls.load(Ordering::SeqCst);
    controller.handle_form_event(incoming.clone(), &api).await;
    assert_eq!(controller.selection().network_id, "");
    assert_eq!(api.network_calls.load(Ordering::SeqCst), fetches_before);

    // Widening back to "all" keeps whatever is selected.
    incoming.network_id = "n1".to_string();
    controller.handle_form_event(incoming.clone(), &api).await;
    incoming.network_tag = NetworkTagFilter::All;
    controller.handle_form_event(incoming, &api).await;
    assert_eq!(controller.selection().network_id, "n1");
}

#[test]
fn tag_filter_visibility_matches_the_three_states() {
    assert!(NetworkTagFilter::All.allows(true));
    assert!(NetworkTagFilter::All.allows(false));
    assert!(NetworkTagFilter::PublicOnly.allows(true));
    assert!(!NetworkTagFilter::PublicOnly.allows(false));
    assert!(!NetworkTagFilter::PrivateOnly.allows(true));
    assert!(NetworkTagFilter::PrivateOnly.allows(false));
}

#[tokio::test]
async fn successful_submission_reports_created_and_reenables() {
    let api = MockCompute::default();
    let mut controller = CreateController::default();

    let outcome = controller.submit_creation(&api, &valid_request()).await.unwrap();
    assert_eq!(outcome, CreateOutcome::Created);
    assert!(!controller.submit_in_flight());
    assert_eq!(api.create_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn accepted_submission_is_distinct_from_created() {
    let api = MockCompute {
        create_reply: CreateReply::Accepted,
        ..MockCompute::default()
    };
    let mut controller = CreateController::default();

    let outcome = controller.submit_creation(&api, &valid_request()).await.unwrap();
    assert_eq!(outcome, CreateOutcome::Accepted);
}

#[tokio::test]
async fn failed_submission_surfaces_the_server_message_and_reenables() {
    let api = MockCompute {
        create_reply: CreateReply::Fail(409, "vCPU quota exceeded".to_string()),
        ..MockCompute::default()
    };
    let mut controller = CreateController::default();

    let err = controller.submit_creation(&api, &valid_request()).await.unwrap_err();
    assert_eq!(err.to_string(), "vCPU quota exceeded");
    assert!(!controller.submit_in_flight());
}

#[tokio::test]
async fn duplicate_submission_is_blocked_while_in_flight() {
    let api = MockCompute::default();
    let mut controller = CreateController::default();

    controller.begin_submission().unwrap();
    let err = controller.submit_creation(&api, &valid_request()).await.unwrap_err();
    assert!(matches!(err, SubmitError::InFlight));
    assert_eq!(api.create_calls.load(Ordering::SeqCst), 0);

    controller.finish_submission();
    assert!(controller.submit_creation(&api, &valid_request()).await.is_ok());
}

#[tokio::test]
async fn invalid_form_is_blocked_before_any_network_traffic() {
    let api = MockCompute::default();
    let form = CreateForm {
        service_id: "0".into(),
        network_id: "n1".into(),
        image_id: "i1".into(),
        flavor_id: "f1".into(),
        ..CreateForm::default()
    };
    assert!(validate_submission(&form).is_err());
    assert_eq!(api.create_calls.load(Ordering::SeqCst), 0);
}
