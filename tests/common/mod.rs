use std::sync::Arc;

use axum::{
    body::Body,
    http::{Method, Request},
    middleware, Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;
use uuid::Uuid;

use autoshop_api::{
    auth::{AuthConfig, AuthService, Roles},
    config::AppConfig,
    db, events,
    handlers::AppServices,
    AppState,
};

/// Helper harness for spinning up an application state backed by a
/// throwaway SQLite database.
pub struct TestApp {
    router: Router,
    pub state: AppState,
    token: String,
    auth_service: Arc<AuthService>,
    _event_task: tokio::task::JoinHandle<()>,
    _db_dir: TempDir,
}

impl TestApp {
    /// Construct a new test application with fresh database state.
    pub async fn new() -> Self {
        let db_dir = TempDir::new().expect("create temp dir for test database");
        let db_path = db_dir.path().join("autoshop_test.db");

        let mut cfg = AppConfig::new(
            format!("sqlite://{}?mode=rwc", db_path.display()),
            "test_secret_key_for_testing_purposes_only_padded_to_64_characters",
            "127.0.0.1",
            18_080,
            "test",
        );
        cfg.db_max_connections = 1;
        cfg.db_min_connections = 1;

        let pool = db::establish_connection_from_app_config(&cfg)
            .await
            .expect("failed to create test database");
        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations in tests");

        let db_arc = Arc::new(pool);
        let (event_sender, event_rx) = events::event_channel(256);
        let event_task = tokio::spawn(events::process_events(event_rx));

        let auth_service = Arc::new(AuthService::new(AuthConfig::new(
            cfg.jwt_secret.clone(),
            cfg.jwt_expiration as i64,
        )));
        let token = auth_service
            .generate_token(
                Uuid::new_v4(),
                Some("Test Admin".to_string()),
                vec![Roles::ADMIN.to_string()],
                vec![],
            )
            .expect("issue admin token for tests");

        let services = AppServices::new(db_arc.clone(), Arc::new(event_sender.clone()), &cfg);
        let state = AppState {
            db: db_arc,
            config: cfg,
            event_sender,
            services,
        };

        let auth_for_layer = auth_service.clone();
        let api = autoshop_api::api_v1_routes().layer(middleware::from_fn_with_state(
            auth_for_layer,
            |axum::extract::State(auth): axum::extract::State<Arc<AuthService>>,
             mut req: Request<Body>,
             next: axum::middleware::Next| async move {
                req.extensions_mut().insert(auth);
                next.run(req).await
            },
        ));
        let router = Router::new().nest("/api/v1", api).with_state(state.clone());

        Self {
            router,
            state,
            token,
            auth_service,
            _event_task: event_task,
            _db_dir: db_dir,
        }
    }

    /// Access the bearer token for the default admin user.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Issue a token with specific roles and permissions.
    #[allow(dead_code)]
    pub fn token_with(&self, roles: &[&str], permissions: &[&str]) -> String {
        self.auth_service
            .generate_token(
                Uuid::new_v4(),
                None,
                roles.iter().map(|r| r.to_string()).collect(),
                permissions.iter().map(|p| p.to_string()).collect(),
            )
            .expect("issue scoped token for tests")
    }

    /// Send a request against the router with an optional bearer token.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> axum::response::Response {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(tok) = token {
            builder = builder.header("authorization", format!("Bearer {}", tok));
        }

        let body = if let Some(json) = body {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&json).expect("failed to serialize json request body"))
        } else {
            Body::empty()
        };

        let request = builder.body(body).expect("failed to build request");
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router error during test request")
    }

    /// Convenience helper for authenticated JSON requests.
    pub async fn request_authenticated(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> axum::response::Response {
        self.request(method, uri, body, Some(self.token())).await
    }

    /// Create a work order through the API and return its id.
    #[allow(dead_code)]
    pub async fn create_work_order(&self, job_type: &str, description: &str) -> Uuid {
        let response = self
            .request_authenticated(
                Method::POST,
                "/api/v1/work-orders",
                Some(json!({
                    "job_type": job_type,
                    "description": description,
                })),
            )
            .await;
        assert_eq!(response.status(), axum::http::StatusCode::CREATED);
        let body = read_json(response).await;
        Uuid::parse_str(body["data"]["id"].as_str().expect("work order id in response"))
            .expect("work order id is a uuid")
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        self._event_task.abort();
    }
}

/// Collect a response body into JSON.
pub async fn read_json(response: axum::response::Response) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("read response body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("response body is valid json")
}
