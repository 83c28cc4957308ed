//! Fake backends for integration tests
//!
//! Each fake keeps its records behind a mutex and answers every request a
//! console can send, so tests observe real round trips: writes mutate the
//! fake and the console's refetch sees the result.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use chrono::Utc;
use serde::Serialize;
use serde_json::json;
use wiremock::matchers::any;
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};
use asset_desk::config::ApiConfig;
use asset_desk::models::{
    Applicant, Asset, AssetStatus, AssignAssetRequest, CreateAssetRequest, CreateUserRequest,
    UpdateApplicantStatusRequest, UpdateAssetRequest, User,
};
use asset_desk::utils::helpers::parse_backend_timestamp;
use asset_desk::{ApprovalConsole, InventoryApi, InventoryConsole, ParticipantsApi};
use super::init_test_env;

fn json_response<T: Serialize>(status: u16, body: &T) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(body)
}

fn message(status: u16, text: &str) -> ResponseTemplate {
    json_response(status, &json!({ "message": text }))
}

fn detail(status: u16, text: &str) -> ResponseTemplate {
    json_response(status, &json!({ "detail": text }))
}

/// Extract the uploaded file name and contents from a single-part multipart body
fn multipart_file(body: &[u8]) -> Option<(String, String)> {
    let text = String::from_utf8_lossy(body);
    let start = text.find("filename=\"")? + "filename=\"".len();
    let end = start + text[start..].find('"')?;
    let file_name = text[start..end].to_string();

    let content_start = end + text[end..].find("\r\n\r\n")? + 4;
    let content_end = content_start + text[content_start..].rfind("\r\n--")?;
    Some((file_name, text[content_start..content_end].to_string()))
}

/// Split CSV text into header-keyed rows; quoting is not supported
fn csv_rows(content: &str) -> Vec<HashMap<String, String>> {
    let mut lines = content.lines().filter(|line| !line.trim().is_empty());
    let headers: Vec<String> = match lines.next() {
        Some(header) => header.split(',').map(|h| h.trim().to_string()).collect(),
        None => return Vec::new(),
    };
    lines
        .map(|line| {
            headers
                .iter()
                .cloned()
                .zip(line.split(',').map(|cell| cell.trim().to_string()))
                .collect()
        })
        .collect()
}

#[derive(Default)]
struct InventoryState {
    users: Vec<User>,
    assets: Vec<Asset>,
    next_user_id: i64,
    next_asset_id: i64,
    user_assets_delay: Option<Duration>,
}

impl InventoryState {
    fn user(&self, user_id: i64) -> Option<&User> {
        self.users.iter().find(|user| user.id == user_id)
    }

    fn asset_mut(&mut self, asset_id: i64) -> Option<&mut Asset> {
        self.assets.iter_mut().find(|asset| asset.id == asset_id)
    }

    /// Assets as the list endpoint returns them, with the assignee embedded
    fn assets_view(&self) -> Vec<Asset> {
        self.assets
            .iter()
            .cloned()
            .map(|mut asset| {
                asset.assigned_user = asset
                    .assigned_user_id
                    .and_then(|user_id| self.user(user_id).cloned());
                asset
            })
            .collect()
    }

    fn insert_user(&mut self, name: &str, email: &str, department: &str) -> i64 {
        self.next_user_id += 1;
        let id = self.next_user_id;
        self.users.push(User {
            id,
            name: name.to_string(),
            email: email.to_string(),
            department: department.to_string(),
            created_at: Some(Utc::now()),
        });
        id
    }

    fn insert_asset(&mut self, request: &CreateAssetRequest, status: AssetStatus) -> i64 {
        self.next_asset_id += 1;
        let id = self.next_asset_id;
        self.assets.push(Asset {
            id,
            name: request.name.clone(),
            asset_tag: request.asset_tag.clone(),
            category: request.category.clone(),
            description: request.description.clone(),
            serial_number: request.serial_number.clone(),
            purchase_date: parse_backend_timestamp(&request.purchase_date),
            status,
            assigned_user_id: None,
            assigned_at: None,
            created_at: Some(Utc::now()),
            assigned_user: None,
        });
        id
    }

    fn create_user(&mut self, request: CreateUserRequest) -> ResponseTemplate {
        if self.users.iter().any(|user| user.email == request.email) {
            return detail(400, "Email already registered");
        }
        let id = self.insert_user(&request.name, &request.email, &request.department);
        json_response(200, &self.user(id))
    }

    fn delete_user(&mut self, user_id: i64) -> ResponseTemplate {
        if self.user(user_id).is_none() {
            return detail(404, "User not found");
        }
        for asset in self.assets.iter_mut().filter(|a| a.assigned_user_id == Some(user_id)) {
            asset.assigned_user_id = None;
            asset.assigned_at = None;
            asset.status = AssetStatus::Available;
        }
        self.users.retain(|user| user.id != user_id);
        message(200, "User deleted successfully")
    }

    fn create_asset(&mut self, request: CreateAssetRequest) -> ResponseTemplate {
        if parse_backend_timestamp(&request.purchase_date).is_none() {
            return detail(422, "Invalid purchase_date");
        }
        if self.assets.iter().any(|asset| asset.asset_tag == request.asset_tag) {
            return detail(400, "Asset tag already exists");
        }
        let id = self.insert_asset(&request, AssetStatus::Available);
        let created = self.assets_view().into_iter().find(|asset| asset.id == id);
        json_response(200, &created)
    }

    fn update_asset(&mut self, asset_id: i64, request: UpdateAssetRequest) -> ResponseTemplate {
        let Some(asset) = self.asset_mut(asset_id) else {
            return detail(404, "Asset not found");
        };
        asset.name = request.name;
        asset.category = request.category;
        asset.description = request.description;
        asset.serial_number = request.serial_number;
        asset.status = request.status;
        let updated = asset.clone();
        json_response(200, &updated)
    }

    fn assign(&mut self, request: AssignAssetRequest) -> ResponseTemplate {
        if self.user(request.user_id).is_none() {
            return detail(404, "User not found");
        }
        let Some(asset) = self.asset_mut(request.asset_id) else {
            return detail(404, "Asset not found");
        };
        if asset.status != AssetStatus::Available {
            return detail(400, "Asset is not available");
        }
        asset.status = AssetStatus::Assigned;
        asset.assigned_user_id = Some(request.user_id);
        asset.assigned_at = Some(Utc::now());
        message(200, "Asset assigned successfully")
    }

    fn unassign(&mut self, asset_id: i64) -> ResponseTemplate {
        let Some(asset) = self.asset_mut(asset_id) else {
            return detail(404, "Asset not found");
        };
        asset.status = AssetStatus::Available;
        asset.assigned_user_id = None;
        asset.assigned_at = None;
        message(200, "Asset unassigned successfully")
    }

    fn import(&mut self, collection: &str, request: &Request) -> ResponseTemplate {
        let Some((file_name, content)) = multipart_file(&request.body) else {
            return detail(422, "Missing file");
        };
        if !file_name.ends_with(".csv") {
            return detail(400, "File must be a CSV");
        }

        let rows = csv_rows(&content);
        let mut imported = 0;
        for row in &rows {
            let field = |key: &str| row.get(key).cloned().unwrap_or_default();
            match collection {
                "users" => {
                    let email = field("email");
                    if email.is_empty() || self.users.iter().any(|user| user.email == email) {
                        continue;
                    }
                    self.insert_user(&field("name"), &email, &field("department"));
                }
                _ => {
                    let request = CreateAssetRequest {
                        name: field("name"),
                        asset_tag: field("asset_tag"),
                        category: field("category"),
                        description: field("description"),
                        serial_number: field("serial_number"),
                        purchase_date: field("purchase_date"),
                    };
                    if request.asset_tag.is_empty()
                        || self.assets.iter().any(|asset| asset.asset_tag == request.asset_tag)
                    {
                        continue;
                    }
                    let status = serde_json::from_value(json!(field("status")))
                        .unwrap_or(AssetStatus::Available);
                    self.insert_asset(&request, status);
                }
            }
            imported += 1;
        }
        message(200, &format!("Imported {} {}", imported, collection))
    }

    fn export(&self, collection: &str) -> ResponseTemplate {
        let mut csv = String::new();
        if collection == "users" {
            csv.push_str("id,name,email,department\n");
            for user in &self.users {
                csv.push_str(&format!("{},{},{},{}\n", user.id, user.name, user.email, user.department));
            }
        } else {
            csv.push_str("id,name,asset_tag,category,status\n");
            for asset in &self.assets {
                csv.push_str(&format!(
                    "{},{},{},{},{}\n",
                    asset.id, asset.name, asset.asset_tag, asset.category, asset.status
                ));
            }
        }
        ResponseTemplate::new(200)
            .insert_header("content-type", "text/csv")
            .set_body_string(csv)
    }
}

/// Stateful stand-in for the inventory service
#[derive(Clone, Default)]
pub struct FakeInventory {
    state: Arc<Mutex<InventoryState>>,
}

impl FakeInventory {
    pub fn seed_user(&self, name: &str, email: &str, department: &str) -> i64 {
        self.state.lock().unwrap().insert_user(name, email, department)
    }

    pub fn seed_asset(&self, name: &str, asset_tag: &str) -> i64 {
        let request = CreateAssetRequest {
            name: name.to_string(),
            asset_tag: asset_tag.to_string(),
            category: "Electronics".to_string(),
            description: format!("{} description", name),
            serial_number: format!("SN-{}", asset_tag),
            purchase_date: "2024-01-10T00:00:00.000Z".to_string(),
        };
        self.state.lock().unwrap().insert_asset(&request, AssetStatus::Available)
    }

    /// Put an asset straight into the assigned state
    pub fn seed_assignment(&self, asset_id: i64, user_id: i64) {
        let mut state = self.state.lock().unwrap();
        if let Some(asset) = state.asset_mut(asset_id) {
            asset.status = AssetStatus::Assigned;
            asset.assigned_user_id = Some(user_id);
            asset.assigned_at = Some(Utc::now());
        }
    }

    pub fn set_status(&self, asset_id: i64, status: AssetStatus) {
        if let Some(asset) = self.state.lock().unwrap().asset_mut(asset_id) {
            asset.status = status;
        }
    }

    pub fn users(&self) -> Vec<User> {
        self.state.lock().unwrap().users.clone()
    }

    pub fn assets(&self) -> Vec<Asset> {
        self.state.lock().unwrap().assets_view()
    }

    pub fn asset(&self, asset_id: i64) -> Option<Asset> {
        self.assets().into_iter().find(|asset| asset.id == asset_id)
    }

    /// Hold back every user-assets response by `delay`
    pub fn delay_user_assets(&self, delay: Duration) {
        self.state.lock().unwrap().user_assets_delay = Some(delay);
    }
}

fn parse_id(raw: &str) -> Option<i64> {
    raw.parse().ok()
}

impl Respond for FakeInventory {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let mut state = self.state.lock().unwrap();
        let path = request.url.path().trim_matches('/').to_string();
        let segments: Vec<&str> = path.split('/').collect();

        match (request.method.as_str(), segments.as_slice()) {
            ("GET", ["users"]) => json_response(200, &state.users),
            ("POST", ["users"]) => match request.body_json::<CreateUserRequest>() {
                Ok(body) => state.create_user(body),
                Err(_) => detail(422, "Invalid body"),
            },
            ("GET", ["users", id]) => match parse_id(id).and_then(|id| state.user(id).cloned()) {
                Some(user) => json_response(200, &user),
                None => detail(404, "User not found"),
            },
            ("DELETE", ["users", id]) => match parse_id(id) {
                Some(id) => state.delete_user(id),
                None => detail(422, "Invalid id"),
            },
            ("GET", ["users", id, "assets"]) => {
                let assets: Vec<Asset> = match parse_id(id) {
                    Some(id) => state
                        .assets_view()
                        .into_iter()
                        .filter(|asset| asset.assigned_user_id == Some(id))
                        .collect(),
                    None => return detail(422, "Invalid id"),
                };
                let response = json_response(200, &assets);
                match state.user_assets_delay {
                    Some(delay) => response.set_delay(delay),
                    None => response,
                }
            }
            ("GET", ["assets"]) => json_response(200, &state.assets_view()),
            ("POST", ["assets"]) => match request.body_json::<CreateAssetRequest>() {
                Ok(body) => state.create_asset(body),
                Err(_) => detail(422, "Invalid body"),
            },
            ("POST", ["assets", "assign"]) => match request.body_json::<AssignAssetRequest>() {
                Ok(body) => state.assign(body),
                Err(_) => detail(422, "Invalid body"),
            },
            ("GET", ["assets", id]) => {
                let found = parse_id(id)
                    .and_then(|id| state.assets_view().into_iter().find(|asset| asset.id == id));
                match found {
                    Some(asset) => json_response(200, &asset),
                    None => detail(404, "Asset not found"),
                }
            }
            ("PUT", ["assets", id]) => match (parse_id(id), request.body_json::<UpdateAssetRequest>()) {
                (Some(id), Ok(body)) => state.update_asset(id, body),
                _ => detail(422, "Invalid request"),
            },
            ("DELETE", ["assets", id]) => match parse_id(id) {
                Some(id) if state.assets.iter().any(|asset| asset.id == id) => {
                    state.assets.retain(|asset| asset.id != id);
                    message(200, "Asset deleted successfully")
                }
                _ => detail(404, "Asset not found"),
            },
            ("POST", ["assets", id, "unassign"]) => match parse_id(id) {
                Some(id) => state.unassign(id),
                None => detail(422, "Invalid id"),
            },
            ("POST", ["import", collection]) => {
                let collection = collection.to_string();
                state.import(&collection, request)
            }
            ("GET", ["export", collection]) => state.export(collection),
            _ => detail(404, "Not Found"),
        }
    }
}

#[derive(Default)]
struct ParticipantsState {
    applicants: Vec<Applicant>,
    detail_delays: HashMap<String, Duration>,
}

/// Stateful stand-in for the participants service
#[derive(Clone, Default)]
pub struct FakeParticipants {
    state: Arc<Mutex<ParticipantsState>>,
}

impl FakeParticipants {
    pub fn seed(&self, applicant: Applicant) {
        self.state.lock().unwrap().applicants.push(applicant);
    }

    pub fn applicant(&self, id: &str) -> Option<Applicant> {
        self.state
            .lock()
            .unwrap()
            .applicants
            .iter()
            .find(|applicant| applicant.id == id)
            .cloned()
    }

    /// Hold back the detail response of one applicant by `delay`
    pub fn delay_detail(&self, id: &str, delay: Duration) {
        self.state
            .lock()
            .unwrap()
            .detail_delays
            .insert(id.to_string(), delay);
    }
}

impl Respond for FakeParticipants {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let mut state = self.state.lock().unwrap();
        let path = request.url.path().trim_matches('/').to_string();
        let segments: Vec<&str> = path.split('/').collect();

        match (request.method.as_str(), segments.as_slice()) {
            ("GET", ["api", "participants"]) => json_response(200, &state.applicants),
            ("GET", ["api", "participants", id]) => {
                let found = state.applicants.iter().find(|a| a.id == *id).cloned();
                match found {
                    Some(applicant) => {
                        let response = json_response(200, &applicant);
                        match state.detail_delays.get(*id) {
                            Some(delay) => response.set_delay(*delay),
                            None => response,
                        }
                    }
                    None => message(404, "Participant not found"),
                }
            }
            ("PUT", ["api", "participants", id]) => {
                let Ok(body) = request.body_json::<UpdateApplicantStatusRequest>() else {
                    return message(400, "Invalid body");
                };
                match state.applicants.iter_mut().find(|a| a.id == *id) {
                    Some(applicant) => {
                        applicant.verification_status = body.verification_status;
                        let updated = applicant.clone();
                        json_response(200, &updated)
                    }
                    None => message(404, "Participant not found"),
                }
            }
            _ => message(404, "Not Found"),
        }
    }
}

fn api_config(server: &MockServer) -> ApiConfig {
    ApiConfig {
        api_base_url: server.uri(),
        timeout_seconds: 5,
    }
}

async fn recorded(server: &MockServer, method: &str, path: &str) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|r| r.method.as_str() == method && r.url.path() == path)
        .count()
}

/// Inventory fake mounted on its own mock server
pub struct InventoryHarness {
    pub server: MockServer,
    pub backend: FakeInventory,
}

impl InventoryHarness {
    pub async fn start() -> Self {
        Self::start_with(Vec::new()).await
    }

    /// Mount `overrides` ahead of the fake so they answer first
    pub async fn start_with(overrides: Vec<Mock>) -> Self {
        init_test_env();
        let server = MockServer::start().await;
        for mock in overrides {
            mock.mount(&server).await;
        }
        let backend = FakeInventory::default();
        Mock::given(any()).respond_with(backend.clone()).mount(&server).await;
        Self { server, backend }
    }

    pub fn config(&self) -> ApiConfig {
        api_config(&self.server)
    }

    pub fn console(&self) -> InventoryConsole {
        InventoryConsole::new(InventoryApi::new(&self.config()).expect("client builds"))
    }

    pub async fn requests_to(&self, method: &str, path: &str) -> usize {
        recorded(&self.server, method, path).await
    }

    pub async fn request_count(&self) -> usize {
        self.server.received_requests().await.unwrap_or_default().len()
    }
}

/// Participants fake mounted on its own mock server
pub struct ParticipantsHarness {
    pub server: MockServer,
    pub backend: FakeParticipants,
}

impl ParticipantsHarness {
    pub async fn start() -> Self {
        Self::start_with(Vec::new()).await
    }

    pub async fn start_with(overrides: Vec<Mock>) -> Self {
        init_test_env();
        let server = MockServer::start().await;
        for mock in overrides {
            mock.mount(&server).await;
        }
        let backend = FakeParticipants::default();
        Mock::given(any()).respond_with(backend.clone()).mount(&server).await;
        Self { server, backend }
    }

    pub fn config(&self) -> ApiConfig {
        api_config(&self.server)
    }

    pub fn console(&self) -> ApprovalConsole {
        ApprovalConsole::new(ParticipantsApi::new(&self.config()).expect("client builds"))
    }

    pub async fn requests_to(&self, method: &str, path: &str) -> usize {
        recorded(&self.server, method, path).await
    }

    pub async fn request_count(&self) -> usize {
        self.server.received_requests().await.unwrap_or_default().len()
    }
}
