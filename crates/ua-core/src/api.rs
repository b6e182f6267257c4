//! REST API port, its reqwest adapter, and the form's request flows

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ApiConfig;
use crate::dto::{CodeDto, UserDto};
use crate::form::CodesState;
use crate::notify::Notifier;
use crate::{ApiError, ApiResult};

pub const CODES_PATH: &str = "/codes";
pub const USERS_PATH: &str = "/users";

/// Status and decoded body of a completed request.
///
/// Non-2xx responses are still `Ok`; callers decide what counts as success.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub data: Value,
}

impl ApiResponse {
    pub fn new(status: u16, data: Value) -> Self {
        Self { status, data }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Request function used by the form and page components
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait ApiService {
    async fn get(&self, path: &str) -> ApiResult<ApiResponse>;

    async fn post(&self, path: &str, body: &Value) -> ApiResult<ApiResponse>;
}

/// [`ApiService`] over a shared `reqwest::Client`
#[derive(Debug, Clone)]
pub struct HttpApiService {
    base_url: String,
    client: reqwest::Client,
}

impl HttpApiService {
    pub fn new(config: &ApiConfig) -> ApiResult<Self> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        reqwest::Url::parse(&base_url)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", base_url, e)))?;

        let builder = reqwest::Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(std::time::Duration::from_secs(config.timeout_secs));
        let client = builder.build()?;

        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn into_response(response: reqwest::Response) -> ApiResult<ApiResponse> {
        let status = response.status().as_u16();
        let text = response.text().await?;
        let data = if text.is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or(Value::String(text))
        };
        Ok(ApiResponse { status, data })
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl ApiService for HttpApiService {
    async fn get(&self, path: &str) -> ApiResult<ApiResponse> {
        let url = self.url(path);
        debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;
        Self::into_response(response).await
    }

    async fn post(&self, path: &str, body: &Value) -> ApiResult<ApiResponse> {
        let url = self.url(path);
        debug!("POST {}", url);
        let response = self.client.post(&url).json(body).send().await?;
        Self::into_response(response).await
    }
}

/// Fetches the reference code list; only HTTP 200 counts as success
pub async fn fetch_codes<A>(api: &A) -> ApiResult<Vec<CodeDto>>
where
    A: ApiService + ?Sized,
{
    let response = api.get(CODES_PATH).await?;
    if response.status != 200 {
        return Err(ApiError::Status {
            status: response.status,
        });
    }
    Ok(serde_json::from_value(response.data)?)
}

/// Mount-time load for the user form.
///
/// Failures are reported through `notifier` exactly once and never
/// propagated; the form keeps rendering with no options.
pub async fn load_codes<A, N>(api: &A, notifier: &N) -> CodesState
where
    A: ApiService + ?Sized,
    N: Notifier + ?Sized,
{
    match fetch_codes(api).await {
        Ok(codes) => {
            debug!("Loaded {} codes", codes.len());
            CodesState::Ready(codes)
        }
        Err(e) => {
            let message = e.to_string();
            warn!("Failed to load codes: {}", message);
            notifier.error(&message);
            CodesState::Failed(message)
        }
    }
}

/// Loads one user record, normalized through [`UserDto`]'s defaults
pub async fn fetch_user<A>(api: &A, id: &str) -> ApiResult<UserDto>
where
    A: ApiService + ?Sized,
{
    let response = api.get(&user_path(id)?).await?;
    if response.status != 200 {
        return Err(ApiError::Status {
            status: response.status,
        });
    }
    Ok(serde_json::from_value(response.data)?)
}

/// `/users/{id}` with `id` percent-encoded as a single path segment
fn user_path(id: &str) -> ApiResult<String> {
    // dot segments would be dropped by the URL parser rather than escaped
    if matches!(id, "" | "." | "..") {
        return Err(ApiError::InvalidUrl(format!("invalid user id {:?}", id)));
    }

    let mut url = reqwest::Url::parse("http://localhost/")
        .map_err(|e| ApiError::InvalidUrl(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| ApiError::InvalidUrl(format!("invalid user id {:?}", id)))?
        .clear()
        .push(USERS_PATH.trim_start_matches('/'))
        .push(id);
    Ok(url.path().to_string())
}

async fn post_user<A>(api: &A, user: &UserDto) -> ApiResult<()>
where
    A: ApiService + ?Sized,
{
    let body = serde_json::to_value(user)?;
    let response = api.post(USERS_PATH, &body).await?;
    if !response.is_success() {
        return Err(ApiError::Status {
            status: response.status,
        });
    }
    Ok(())
}

/// Posts `user` to the backend and reports the outcome as a toast
pub async fn submit_user<A, N>(api: &A, notifier: &N, user: &UserDto) -> bool
where
    A: ApiService + ?Sized,
    N: Notifier + ?Sized,
{
    match post_user(api, user).await {
        Ok(()) => {
            notifier.success("User saved");
            true
        }
        Err(e) => {
            warn!("Failed to save user {}: {}", user.id, e);
            notifier.error(&e.to_string());
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{FieldErrors, FieldView, FormMode, PositionView, UserField};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct StubApi {
        status: u16,
        data: Value,
        unreachable: Option<String>,
        gets: AtomicUsize,
        paths: Mutex<Vec<String>>,
        posts: Mutex<Vec<(String, Value)>>,
    }

    impl StubApi {
        fn replying(status: u16, data: Value) -> Self {
            Self {
                status,
                data,
                unreachable: None,
                gets: AtomicUsize::new(0),
                paths: Mutex::new(Vec::new()),
                posts: Mutex::new(Vec::new()),
            }
        }

        /// Every GET fails before a response arrives
        fn unreachable(message: &str) -> Self {
            Self {
                unreachable: Some(message.to_string()),
                ..Self::replying(0, Value::Null)
            }
        }
    }

    #[async_trait]
    impl ApiService for StubApi {
        async fn get(&self, path: &str) -> ApiResult<ApiResponse> {
            self.gets.fetch_add(1, Ordering::SeqCst);
            self.paths.lock().unwrap().push(path.to_string());
            if let Some(message) = &self.unreachable {
                return Err(ApiError::InvalidUrl(message.clone()));
            }
            Ok(ApiResponse::new(self.status, self.data.clone()))
        }

        async fn post(&self, path: &str, body: &Value) -> ApiResult<ApiResponse> {
            self.posts
                .lock()
                .unwrap()
                .push((path.to_string(), body.clone()));
            Ok(ApiResponse::new(self.status, Value::Null))
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        calls: Mutex<Vec<(&'static str, String)>>,
    }

    impl RecordingNotifier {
        fn calls(&self) -> Vec<(&'static str, String)> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, level: &'static str, message: &str) {
            self.calls.lock().unwrap().push((level, message.to_string()));
        }
    }

    impl Notifier for RecordingNotifier {
        fn info(&self, message: &str) {
            self.record("info", message);
        }

        fn success(&self, message: &str) {
            self.record("success", message);
        }

        fn error(&self, message: &str) {
            self.record("error", message);
        }

        fn remove_all(&self) {
            self.record("remove_all", "");
        }
    }

    fn four_codes() -> Value {
        json!([
            {"id": "1", "name": "Engineer", "type": "POSITION"},
            {"id": "2", "name": "Designer", "type": "POSITION"},
            {"id": "3", "name": "Manager", "type": "POSITION"},
            {"id": "4", "name": "Analyst", "type": "POSITION"},
        ])
    }

    #[tokio::test]
    async fn test_load_codes_success() {
        let api = StubApi::replying(200, four_codes());
        let notifier = RecordingNotifier::default();

        let state = load_codes(&api, &notifier).await;

        let options = state.options();
        assert_eq!(options.len(), 4);
        let labels: Vec<_> = options.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, vec!["Engineer", "Designer", "Manager", "Analyst"]);
        let values: Vec<_> = options.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(values, vec!["1", "2", "3", "4"]);
        assert_eq!(api.gets.load(Ordering::SeqCst), 1);
        assert!(notifier.calls().is_empty());
    }

    #[tokio::test]
    async fn test_load_codes_failure_reports_once() {
        let api = StubApi::replying(500, json!({"message": "boom"}));
        let notifier = RecordingNotifier::default();

        let state = load_codes(&api, &notifier).await;

        assert_eq!(
            state,
            CodesState::Failed("Request failed with status code 500".to_string())
        );
        assert!(state.options().is_empty());
        assert_eq!(
            notifier.calls(),
            vec![("error", "Request failed with status code 500".to_string())]
        );
        assert_eq!(api.gets.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_mounted_view_mode_form_with_four_codes() {
        let api = StubApi::replying(200, four_codes());
        let notifier = RecordingNotifier::default();
        let user = UserDto::from_partial(Some(crate::PartialUser {
            name: Some("John Doe".to_string()),
            email: Some("john.doe@example.com".to_string()),
            phone: Some("1234567890".to_string()),
            address: Some("123 Main St".to_string()),
            code: Some("1".to_string()),
            ..Default::default()
        }));
        let errors = FieldErrors::new();

        let codes = load_codes(&api, &notifier).await;

        let name = FieldView::new(UserField::Name, &user, FormMode::View, &errors);
        assert_eq!(name.value, "John Doe");
        assert!(name.read_only);

        let position = PositionView::new(&user, FormMode::View, &errors, &codes);
        assert_eq!(position.value, "1");
        assert_eq!(position.options.len(), 4);
        assert!(position.disabled);
        assert_eq!(api.paths.lock().unwrap().clone(), vec![CODES_PATH.to_string()]);
    }

    #[tokio::test]
    async fn test_load_codes_transport_error_reports_once() {
        let api = StubApi::unreachable("Network Error");
        let notifier = RecordingNotifier::default();

        let state = load_codes(&api, &notifier).await;

        assert_eq!(state, CodesState::Failed("Invalid URL: Network Error".to_string()));
        assert!(state.options().is_empty());
        assert_eq!(
            notifier.calls(),
            vec![("error", "Invalid URL: Network Error".to_string())]
        );
        assert_eq!(api.gets.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_recording_notifier_keeps_remove_all() {
        let notifier = RecordingNotifier::default();
        notifier.error("Network Error");
        notifier.remove_all();

        assert_eq!(
            notifier.calls(),
            vec![
                ("error", "Network Error".to_string()),
                ("remove_all", String::new()),
            ]
        );
    }

    #[tokio::test]
    async fn test_non_200_success_status_is_failure() {
        let api = StubApi::replying(204, Value::Null);
        let err = fetch_codes(&api).await.unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 204 }));
    }

    #[tokio::test]
    async fn test_malformed_codes_body() {
        let api = StubApi::replying(200, json!({"codes": []}));
        let notifier = RecordingNotifier::default();

        let state = load_codes(&api, &notifier).await;

        assert!(matches!(state, CodesState::Failed(_)));
        let calls = notifier.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "error");
        assert!(calls[0].1.starts_with("Invalid response body"));
    }

    #[tokio::test]
    async fn test_submit_user_posts_and_toasts() {
        let api = StubApi::replying(201, Value::Null);
        let notifier = RecordingNotifier::default();
        let user = UserDto {
            id: "42".to_string(),
            name: "John Doe".to_string(),
            email: "john.doe@example.com".to_string(),
            ..Default::default()
        };

        assert!(submit_user(&api, &notifier, &user).await);

        let posts = api.posts.lock().unwrap().clone();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].0, USERS_PATH);
        assert_eq!(posts[0].1["name"], "John Doe");
        assert_eq!(posts[0].1["phone"], Value::Null);
        assert_eq!(notifier.calls(), vec![("success", "User saved".to_string())]);
    }

    #[tokio::test]
    async fn test_submit_user_failure() {
        let api = StubApi::replying(422, Value::Null);
        let notifier = RecordingNotifier::default();

        assert!(!submit_user(&api, &notifier, &UserDto::default()).await);
        assert_eq!(
            notifier.calls(),
            vec![("error", "Request failed with status code 422".to_string())]
        );
    }

    #[tokio::test]
    async fn test_fetch_user_normalizes_payload() {
        let api = StubApi::replying(200, json!({"id": "7", "name": "Jane", "code": "XYZ123"}));

        let user = fetch_user(&api, "7").await.unwrap();

        assert_eq!(user.id, "7");
        assert_eq!(user.code, "XYZ123");
        assert_eq!(user.email, "");
        assert_eq!(user.phone, None);
    }

    #[tokio::test]
    async fn test_fetch_user_not_found() {
        let api = StubApi::replying(404, Value::Null);
        let err = fetch_user(&api, "missing").await.unwrap_err();
        assert_eq!(err.to_string(), "Request failed with status code 404");
    }

    #[tokio::test]
    async fn test_fetch_user_escapes_id_segment() {
        let api = StubApi::replying(200, json!({"id": "7"}));

        fetch_user(&api, "7").await.unwrap();
        fetch_user(&api, "../admin").await.unwrap();
        fetch_user(&api, "a b?c").await.unwrap();

        assert_eq!(
            api.paths.lock().unwrap().clone(),
            vec![
                "/users/7".to_string(),
                "/users/..%2Fadmin".to_string(),
                "/users/a%20b%3Fc".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_fetch_user_rejects_dot_segments() {
        let api = StubApi::replying(200, json!({}));

        for id in ["", ".", ".."] {
            let err = fetch_user(&api, id).await.unwrap_err();
            assert!(matches!(err, ApiError::InvalidUrl(_)));
        }
        assert_eq!(api.gets.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_http_service_joins_paths() {
        let api = HttpApiService::new(&ApiConfig::with_base_url("http://localhost:8080/api/")).unwrap();
        assert_eq!(api.base_url(), "http://localhost:8080/api");
        assert_eq!(api.url(CODES_PATH), "http://localhost:8080/api/codes");
        assert_eq!(api.url("users"), "http://localhost:8080/api/users");
    }

    #[test]
    fn test_http_service_rejects_relative_base() {
        let err = HttpApiService::new(&ApiConfig::with_base_url("/api")).unwrap_err();
        assert!(matches!(err, ApiError::InvalidUrl(_)));
    }
}
