//! Admin API client: one method per admin server endpoint.
//!
//! Every method is a single round trip. Nothing here retries: saves and
//! broadcasts change server state and must only be repeated by the user.

use crate::config::Config;
use crate::error::{AdminError, AdminResult};
use crate::translations::{LanguageDictionary, TranslationSet};
use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Name of the cookie carrying the admin session
pub const SESSION_COOKIE: &str = "admin_session";

/// Longest response body quoted in an error message
const MAX_ERROR_BODY: usize = 200;

#[derive(Debug, Serialize)]
struct BroadcastRequest<'a> {
    message: &'a str,
}

/// Outcome of a broadcast as reported by the server
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BroadcastReply {
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Deserialize)]
struct LogsResponse {
    success: bool,
    #[serde(default)]
    logs: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TranslationsResponse {
    success: bool,
    #[serde(default)]
    translations: Option<TranslationSet>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Serialize)]
struct UpdateTranslationRequest<'a> {
    language: &'a str,
    data: &'a LanguageDictionary,
}

#[derive(Debug, Deserialize)]
struct StatusResponse {
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// HTTP client bound to one admin server and one session.
#[derive(Debug, Clone)]
pub struct AdminClient {
    http: reqwest::Client,
    base_url: Url,
    cookies: Arc<Jar>,
}

impl AdminClient {
    pub fn new(config: &Config) -> AdminResult<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            AdminError::Validation(format!("invalid admin URL '{}': {}", config.base_url, e))
        })?;

        let cookies = Arc::new(Jar::default());
        if let Some(session) = &config.session_cookie {
            cookies.add_cookie_str(&format!("{}={}; Path=/", SESSION_COOKIE, session), &base_url);
        }

        // Makes the server answer auth failures with JSON 401 instead of the login page
        let mut headers = HeaderMap::new();
        headers.insert("X-Requested-With", HeaderValue::from_static("XMLHttpRequest"));

        let http = reqwest::Client::builder()
            .timeout(config.http_timeout())
            .default_headers(headers)
            .cookie_provider(cookies.clone())
            .build()?;

        Ok(Self {
            http,
            base_url,
            cookies,
        })
    }

    fn url(&self, path: &str) -> AdminResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| AdminError::Validation(format!("invalid endpoint path '{}': {}", path, e)))
    }

    /// Whether the cookie store currently holds a session cookie
    pub fn has_session(&self) -> bool {
        self.cookies
            .cookies(&self.base_url)
            .and_then(|value| value.to_str().map(str::to_owned).ok())
            .map(|value| {
                value
                    .split(';')
                    .any(|pair| pair.trim().starts_with(&format!("{}=", SESSION_COOKIE)))
            })
            .unwrap_or(false)
    }

    /// Submit the login form; the server sets the session cookie on success.
    pub async fn login(&self, username: &str, password: &str) -> AdminResult<()> {
        info!("Logging in to admin panel as {}", username);

        let response = self
            .http
            .post(self.url("/login")?)
            .form(&[("username", username), ("password", password)])
            .send()
            .await?;

        debug!("Login response: HTTP {}", response.status());

        if !self.has_session() {
            warn!("Login rejected for {}", username);
            return Err(AdminError::AuthExpired);
        }

        info!("Admin session established");
        Ok(())
    }

    pub async fn fetch_translations(&self) -> AdminResult<TranslationSet> {
        info!("Fetching translations");

        let response = self.http.get(self.url("/admin/translations")?).send().await?;
        let body: TranslationsResponse = read_json(response).await?;

        match (body.success, body.translations) {
            (true, Some(translations)) => {
                info!("Loaded translations for {} languages", translations.len());
                Ok(translations)
            }
            (true, None) => Err(AdminError::Server(
                "response did not contain translations".to_string(),
            )),
            (false, _) => Err(server_failure(body.error)),
        }
    }

    /// Post the full dictionary of one language. Returns the server's message.
    pub async fn save_translations(
        &self,
        language: &str,
        dictionary: &LanguageDictionary,
    ) -> AdminResult<String> {
        info!("Saving {} translations for '{}'", dictionary.len(), language);

        let request = UpdateTranslationRequest {
            language,
            data: dictionary,
        };

        let response = self
            .http
            .post(self.url("/admin/translations/update")?)
            .json(&request)
            .send()
            .await?;
        let body: StatusResponse = read_json(response).await?;

        if body.success {
            info!("Translations for '{}' saved", language);
            Ok(body.message.unwrap_or_default())
        } else {
            Err(server_failure(body.error))
        }
    }

    pub async fn restart_service(&self) -> AdminResult<()> {
        info!("Requesting bot restart");

        let response = self
            .http
            .post(self.url("/admin/restart-bot")?)
            .header("Content-Type", "application/json")
            .send()
            .await?;
        let body: StatusResponse = read_json(response).await?;

        if body.success {
            info!("Bot restarted");
            Ok(())
        } else {
            Err(server_failure(body.error))
        }
    }

    /// Fetch the `lines` most recent log lines as raw text.
    pub async fn fetch_logs(&self, lines: u32) -> AdminResult<String> {
        debug!("Fetching {} log lines", lines);

        let response = self
            .http
            .get(self.url("/admin/logs")?)
            .query(&[("lines", lines)])
            .send()
            .await?;
        let body: LogsResponse = read_json(response).await?;

        if body.success {
            Ok(body.logs.unwrap_or_default())
        } else {
            Err(server_failure(body.error))
        }
    }

    pub async fn broadcast_message(&self, text: &str) -> AdminResult<BroadcastReply> {
        info!("Sending broadcast ({} chars)", text.chars().count());

        let response = self
            .http
            .post(self.url("/admin/broadcast")?)
            .json(&BroadcastRequest { message: text })
            .send()
            .await?;
        let reply: BroadcastReply = read_json(response).await?;

        if reply.success {
            info!("Broadcast delivered: {}", reply.message);
        } else {
            warn!("Broadcast failed: {}", reply.message);
        }

        Ok(reply)
    }
}

/// Decode a JSON body, mapping 401 to `AuthExpired` and garbage to `Server`.
async fn read_json<T: DeserializeOwned>(response: Response) -> AdminResult<T> {
    let status = response.status();

    if status == StatusCode::UNAUTHORIZED {
        warn!("Admin session expired (HTTP 401)");
        return Err(AdminError::AuthExpired);
    }

    let body = response.text().await?;

    serde_json::from_str(&body).map_err(|e| {
        warn!("Unexpected admin response (HTTP {}): {}", status, e);
        AdminError::Server(format!("HTTP {}: {}", status, truncate(body.trim())))
    })
}

fn server_failure(error: Option<String>) -> AdminError {
    AdminError::Server(
        error
            .filter(|e| !e.is_empty())
            .unwrap_or_else(|| "unknown server error".to_string()),
    )
}

fn truncate(text: &str) -> String {
    if text.chars().count() <= MAX_ERROR_BODY {
        return text.to_string();
    }
    let cut: String = text.chars().take(MAX_ERROR_BODY).collect();
    format!("{}...", cut)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::{
        matchers::{body_json, body_string, header, method, path, query_param},
        Mock, MockServer, ResponseTemplate,
    };

    // ==================== Helper Functions ====================

    fn create_test_config(base_url: &str) -> Config {
        Config {
            base_url: base_url.to_string(),
            session_cookie: Some("authenticated".to_string()),
            username: None,
            password: None,
            http_timeout_secs: 5,
            log_lines: 100,
        }
    }

    fn create_client(server: &MockServer) -> AdminClient {
        AdminClient::new(&create_test_config(&server.uri())).expect("client should build")
    }

    /// A client pointed at a port nothing listens on
    fn create_unreachable_client() -> AdminClient {
        AdminClient::new(&create_test_config("http://127.0.0.1:9")).expect("client should build")
    }

    // ==================== Construction Tests ====================

    #[test]
    fn test_new_rejects_invalid_url() {
        let err = AdminClient::new(&create_test_config("not a url")).unwrap_err();
        assert!(matches!(err, AdminError::Validation(_)));
    }

    #[test]
    fn test_configured_cookie_is_a_session() {
        let client = AdminClient::new(&create_test_config("http://localhost:8081")).unwrap();
        assert!(client.has_session());
    }

    #[test]
    fn test_no_cookie_no_session() {
        let mut config = create_test_config("http://localhost:8081");
        config.session_cookie = None;
        let client = AdminClient::new(&config).unwrap();
        assert!(!client.has_session());
    }

    // ==================== Translations Tests ====================

    #[tokio::test]
    async fn test_fetch_translations_success_preserves_order() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/admin/translations"))
            .and(header("X-Requested-With", "XMLHttpRequest"))
            .and(header("cookie", "admin_session=authenticated"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"success": true, "translations": {"ru": {"b": "Б", "a": "А"}, "en": {"b": "B"}}}"#,
            ))
            .mount(&server)
            .await;

        let set = create_client(&server)
            .fetch_translations()
            .await
            .expect("Should fetch translations");

        assert_eq!(set.keys().collect::<Vec<_>>(), vec!["ru", "en"]);
        assert_eq!(set["ru"].keys().collect::<Vec<_>>(), vec!["b", "a"]);
    }

    #[tokio::test]
    async fn test_fetch_translations_401_is_auth_expired() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/admin/translations"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(json!({"success": false, "error": "Authentication required"})),
            )
            .mount(&server)
            .await;

        let err = create_client(&server).fetch_translations().await.unwrap_err();
        assert!(err.is_auth_expired());
    }

    #[tokio::test]
    async fn test_fetch_translations_server_failure_is_verbatim() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/admin/translations"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": false,
                "translations": null,
                "error": "failed to read translations directory"
            })))
            .mount(&server)
            .await;

        let err = create_client(&server).fetch_translations().await.unwrap_err();
        assert_eq!(err.to_string(), "failed to read translations directory");
    }

    #[tokio::test]
    async fn test_fetch_translations_malformed_body_is_server_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/admin/translations"))
            .respond_with(ResponseTemplate::new(500).set_body_string("Template error"))
            .mount(&server)
            .await;

        let err = create_client(&server).fetch_translations().await.unwrap_err();
        match err {
            AdminError::Server(msg) => {
                assert!(msg.contains("500"), "should mention status: {}", msg);
                assert!(msg.contains("Template error"));
            }
            other => panic!("expected server error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_translations_connection_error_is_network() {
        let err = create_unreachable_client().fetch_translations().await.unwrap_err();
        assert!(matches!(err, AdminError::Network(_)));
    }

    #[tokio::test]
    async fn test_save_translations_posts_language_and_data() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/admin/translations/update"))
            .and(body_json(json!({"language": "en", "data": {"greeting": "Hi"}})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "message": "Переводы для языка en успешно обновлены"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let mut data = LanguageDictionary::new();
        data.insert("greeting".to_string(), "Hi".to_string());

        let message = create_client(&server)
            .save_translations("en", &data)
            .await
            .expect("Should save");

        assert_eq!(message, "Переводы для языка en успешно обновлены");
    }

    #[tokio::test]
    async fn test_save_translations_failure() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/admin/translations/update"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": false,
                "error": "failed to write translation file"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let err = create_client(&server)
            .save_translations("en", &LanguageDictionary::new())
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "failed to write translation file");
    }

    // ==================== Restart Tests ====================

    #[tokio::test]
    async fn test_restart_service_success() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/admin/restart-bot"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
            .expect(1)
            .mount(&server)
            .await;

        create_client(&server)
            .restart_service()
            .await
            .expect("Should restart");
    }

    #[tokio::test]
    async fn test_restart_service_failure_carries_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/admin/restart-bot"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": false,
                "error": "container not found",
                "message": "Ошибка при перезапуске бота"
            })))
            .mount(&server)
            .await;

        let err = create_client(&server).restart_service().await.unwrap_err();
        assert_eq!(err.to_string(), "container not found");
    }

    // ==================== Logs Tests ====================

    #[tokio::test]
    async fn test_fetch_logs_sends_line_count() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/admin/logs"))
            .and(query_param("lines", "50"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"success": true, "logs": "line 1\nline 2"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let logs = create_client(&server).fetch_logs(50).await.expect("Should fetch logs");
        assert_eq!(logs, "line 1\nline 2");
    }

    #[tokio::test]
    async fn test_fetch_logs_server_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/admin/logs"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"success": false, "error": "disk full"})),
            )
            .mount(&server)
            .await;

        let err = create_client(&server).fetch_logs(50).await.unwrap_err();
        assert!(matches!(err, AdminError::Server(ref msg) if msg == "disk full"));
    }

    // ==================== Broadcast Tests ====================

    #[tokio::test]
    async fn test_broadcast_message_returns_reply() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/admin/broadcast"))
            .and(body_json(json!({"message": "Hello everyone"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "message": "Сообщение отправлено 10 из 10 пользователей"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let reply = create_client(&server)
            .broadcast_message("Hello everyone")
            .await
            .expect("Should broadcast");

        assert!(reply.success);
        assert_eq!(reply.message, "Сообщение отправлено 10 из 10 пользователей");
    }

    #[tokio::test]
    async fn test_broadcast_message_failure_is_a_reply() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/admin/broadcast"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": false,
                "message": "Ошибка получения пользователей"
            })))
            .mount(&server)
            .await;

        let reply = create_client(&server)
            .broadcast_message("Hello")
            .await
            .expect("Structured failure is still a reply");

        assert!(!reply.success);
        assert_eq!(reply.message, "Ошибка получения пользователей");
    }

    // ==================== Login Tests ====================

    #[tokio::test]
    async fn test_login_stores_session_cookie() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/login"))
            .and(body_string("username=admin&password=secret"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("set-cookie", "admin_session=authenticated; Path=/; HttpOnly"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let mut config = create_test_config(&server.uri());
        config.session_cookie = None;
        let client = AdminClient::new(&config).unwrap();

        client.login("admin", "secret").await.expect("Should log in");
        assert!(client.has_session());
    }

    #[tokio::test]
    async fn test_login_without_cookie_is_rejected() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/login"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>Неверный логин или пароль</html>"))
            .mount(&server)
            .await;

        let mut config = create_test_config(&server.uri());
        config.session_cookie = None;
        let client = AdminClient::new(&config).unwrap();

        let err = client.login("admin", "wrong").await.unwrap_err();
        assert!(err.is_auth_expired());
    }

    // ==================== Helper Tests ====================

    #[test]
    fn test_server_failure_defaults_when_missing() {
        assert_eq!(server_failure(None).to_string(), "unknown server error");
        assert_eq!(server_failure(Some(String::new())).to_string(), "unknown server error");
    }

    #[test]
    fn test_truncate_long_body() {
        let long = "x".repeat(MAX_ERROR_BODY + 10);
        let cut = truncate(&long);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), MAX_ERROR_BODY + 3);
    }
}
