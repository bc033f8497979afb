pub mod health;
pub mod pages;

use axum::{
    routing::{get, post},
    Router,
};
use tower_cookies::CookieManagerLayer;

use crate::auth::handlers as auth;
use crate::bookmarks::handlers as bookmarks;
use crate::catalog::handlers as catalog;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::index_handler))
        .route("/health", get(health::health_handler))
        // Catalog
        .route("/api/roadmap", get(catalog::handle_get_roadmap))
        .route("/api/search", get(catalog::handle_search))
        .route("/api/export", get(catalog::handle_export))
        // Session
        .route("/api/login", post(auth::handle_login))
        .route("/api/logout", post(auth::handle_logout))
        .route("/api/session", get(auth::handle_session))
        // Bookmarks
        .route("/api/save", post(bookmarks::handle_save))
        .route("/api/saved_roadmaps", get(bookmarks::handle_list_saved))
        .layer(CookieManagerLayer::new())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tempfile::NamedTempFile;
    use tower::ServiceExt;

    use crate::auth::session::signing_key;
    use crate::catalog::CatalogStore;
    use crate::db::test_pool;

    const SECRET: &str = "router-test-secret-with-enough-bytes-in-it";
    const CATALOG: &str = r#"{"CS":{"SE":{"1":{"technical":["Python","Git"],"core":["Math"]},"2":{"core":[],"technical":["Rust"]}}}}"#;

    struct TestApp {
        router: Router,
        // keeps the catalog file alive for the test's duration
        _catalog: NamedTempFile,
    }

    async fn app() -> TestApp {
        let catalog = NamedTempFile::new().unwrap();
        std::fs::write(catalog.path(), CATALOG).unwrap();
        let state = AppState {
            db: test_pool().await,
            catalog: CatalogStore::new(catalog.path()),
            session_key: signing_key(SECRET),
        };
        TestApp {
            router: build_router(state),
            _catalog: catalog,
        }
    }

    impl TestApp {
        async fn send(&self, req: Request<Body>) -> Response {
            self.router.clone().oneshot(req).await.unwrap()
        }

        async fn get(&self, uri: &str, cookie: Option<&str>) -> Response {
            let mut req = Request::get(uri);
            if let Some(cookie) = cookie {
                req = req.header(header::COOKIE, cookie);
            }
            self.send(req.body(Body::empty()).unwrap()).await
        }

        async fn post_json(&self, uri: &str, body: Value, cookie: Option<&str>) -> Response {
            let mut req = Request::post(uri).header(header::CONTENT_TYPE, "application/json");
            if let Some(cookie) = cookie {
                req = req.header(header::COOKIE, cookie);
            }
            self.send(req.body(Body::from(body.to_string())).unwrap())
                .await
        }

        /// Logs in and returns the `name=value` pair to send back as a Cookie header.
        async fn login(&self, email: &str) -> String {
            let res = self.post_json("/api/login", json!({ "email": email }), None).await;
            assert_eq!(res.status(), StatusCode::OK);
            session_cookie(&res).expect("login sets a session cookie")
        }
    }

    fn session_cookie(res: &Response) -> Option<String> {
        res.headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find(|v| v.starts_with("pathfinder_session="))
            .and_then(|v| v.split(';').next())
            .map(str::to_string)
    }

    async fn body_json(res: Response) -> Value {
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn body_text(res: Response) -> String {
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_landing_page_and_health() {
        let app = app().await;

        let res = app.get("/", None).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert!(body_text(res).await.contains("<html"));

        let res = app.get("/health", None).await;
        assert_eq!(body_json(res).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_roadmap_returns_catalog() {
        let app = app().await;
        let res = app.get("/api/roadmap", None).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = body_json(res).await;
        let expected: Value = serde_json::from_str(CATALOG).unwrap();
        assert_eq!(body, expected);
        // authored empty lists are returned as-is
        assert_eq!(body["CS"]["SE"]["2"]["core"], json!([]));
    }

    #[tokio::test]
    async fn test_search() {
        let app = app().await;

        let res = app.get("/api/search?q=git", None).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(
            body_json(res).await,
            json!({
                "results": [{"course": "CS", "branch": "SE", "year": "1", "matched_skill": "Git"}],
                "count": 1
            })
        );

        for uri in ["/api/search", "/api/search?q="] {
            let res = app.get(uri, None).await;
            assert_eq!(res.status(), StatusCode::BAD_REQUEST);
            assert_eq!(body_json(res).await["error"], "No search query provided");
        }
    }

    #[tokio::test]
    async fn test_export_attachment() {
        let app = app().await;

        let res = app.get("/api/export?course=CS&branch=SE&year=1", None).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(
            res.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=Roadmap_CS_SE_Year1.txt"
        );
        assert!(res.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/plain"));

        let first = body_text(res).await;
        let core = first.find("Core Subjects").unwrap();
        let technical = first.find("Technical Skills").unwrap();
        assert!(core < technical);
        assert!(first.contains(" • Math\n"));
        assert!(first.contains(" • Python\n • Git\n"));

        let again = app.get("/api/export?course=CS&branch=SE&year=1", None).await;
        assert_eq!(body_text(again).await, first);
    }

    #[tokio::test]
    async fn test_export_errors() {
        let app = app().await;

        let res = app.get("/api/export?course=CS&branch=SE", None).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        for uri in [
            "/api/export?course=CS&branch=SE&year=9",
            "/api/export?course=CS&branch=AI&year=1",
            "/api/export?course=EE&branch=SE&year=1",
        ] {
            let res = app.get(uri, None).await;
            assert_eq!(res.status(), StatusCode::NOT_FOUND, "{uri}");
        }
    }

    #[tokio::test]
    async fn test_session_lifecycle() {
        let app = app().await;

        let res = app.get("/api/session", None).await;
        assert_eq!(body_json(res).await, json!({ "logged_in": false }));

        let res = app
            .post_json("/api/login", json!({ "email": "ada@example.com" }), None)
            .await;
        let cookie = session_cookie(&res).unwrap();
        assert_eq!(
            body_json(res).await,
            json!({ "success": true, "email": "ada@example.com" })
        );

        let res = app.get("/api/session", Some(&cookie)).await;
        assert_eq!(
            body_json(res).await,
            json!({ "logged_in": true, "email": "ada@example.com" })
        );

        // logout expires the cookie
        let req = Request::post("/api/logout")
            .header(header::COOKIE, &cookie)
            .body(Body::empty())
            .unwrap();
        let res = app.send(req).await;
        assert_eq!(res.status(), StatusCode::OK);
        let cleared = session_cookie(&res).unwrap();
        assert_eq!(cleared, "pathfinder_session=");
        assert_eq!(body_json(res).await, json!({ "success": true }));

        let res = app.get("/api/session", Some(&cleared)).await;
        assert_eq!(body_json(res).await, json!({ "logged_in": false }));
    }

    #[tokio::test]
    async fn test_login_with_cookie_reserved_characters() {
        let app = app().await;
        for email in ["ada;x@example.com", "a,b@example.com", "\"ada\"@example.com"] {
            let cookie = app.login(email).await;
            let res = app.get("/api/session", Some(&cookie)).await;
            assert_eq!(
                body_json(res).await,
                json!({ "logged_in": true, "email": email })
            );
        }
    }

    #[tokio::test]
    async fn test_login_replaces_previous_identity() {
        let app = app().await;
        let ada = app.login("ada@example.com").await;

        let res = app
            .post_json("/api/login", json!({ "email": "grace@example.com" }), Some(&ada))
            .await;
        assert_eq!(res.status(), StatusCode::OK);
        let grace = session_cookie(&res).unwrap();
        assert_ne!(grace, ada);

        let res = app.get("/api/session", Some(&grace)).await;
        assert_eq!(
            body_json(res).await,
            json!({ "logged_in": true, "email": "grace@example.com" })
        );

        // bookmarks now belong to the new identity
        let leaf = json!({ "course": "CS", "branch": "SE", "year": "1" });
        app.post_json("/api/save", leaf.clone(), Some(&grace)).await;
        let res = app.get("/api/saved_roadmaps", Some(&grace)).await;
        assert_eq!(body_json(res).await, json!([leaf]));
        let res = app.get("/api/saved_roadmaps", Some(&ada)).await;
        assert_eq!(body_json(res).await, json!([]));
    }

    #[tokio::test]
    async fn test_bad_json_bodies_use_error_envelope() {
        let app = app().await;

        // no content type
        let req = Request::post("/api/login")
            .body(Body::from(r#"{"email":"ada@example.com"}"#))
            .unwrap();
        let res = app.send(req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body = body_json(res).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["code"], "VALIDATION_ERROR");

        // wrong field type
        let res = app.post_json("/api/login", json!({ "email": 5 }), None).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(res).await["code"], "VALIDATION_ERROR");

        // malformed JSON on an authenticated route
        let cookie = app.login("ada@example.com").await;
        let req = Request::post("/api/save")
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::COOKIE, &cookie)
            .body(Body::from("{not json"))
            .unwrap();
        let res = app.send(req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(res).await["success"], false);
    }

    #[tokio::test]
    async fn test_logout_without_session() {
        let app = app().await;
        let res = app
            .send(Request::post("/api/logout").body(Body::empty()).unwrap())
            .await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body_json(res).await, json!({ "success": true }));
    }

    #[tokio::test]
    async fn test_login_requires_email() {
        let app = app().await;
        for body in [json!({}), json!({ "email": "" })] {
            let res = app.post_json("/api/login", body, None).await;
            assert_eq!(res.status(), StatusCode::BAD_REQUEST);
            assert_eq!(body_json(res).await["error"], "Email is required");
        }
    }

    #[tokio::test]
    async fn test_tampered_cookie_is_anonymous() {
        let app = app().await;
        let res = app
            .get("/api/session", Some("pathfinder_session=ada@example.com"))
            .await;
        assert_eq!(body_json(res).await, json!({ "logged_in": false }));
    }

    #[tokio::test]
    async fn test_bookmarks_require_login() {
        let app = app().await;

        let res = app
            .post_json(
                "/api/save",
                json!({ "course": "CS", "branch": "SE", "year": "1" }),
                None,
            )
            .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(res).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Not logged in");

        let res = app.get("/api/saved_roadmaps", None).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_save_and_list() {
        let app = app().await;
        let cookie = app.login("ada@example.com").await;
        let leaf = json!({ "course": "CS", "branch": "SE", "year": "1" });

        let res = app.post_json("/api/save", leaf.clone(), Some(&cookie)).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(
            body_json(res).await,
            json!({ "success": true, "message": "Roadmap saved to profile!" })
        );

        let res = app.post_json("/api/save", leaf.clone(), Some(&cookie)).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(
            body_json(res).await,
            json!({ "success": false, "error": "Roadmap already saved!" })
        );

        let res = app.get("/api/saved_roadmaps", Some(&cookie)).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body_json(res).await, json!([leaf]));

        // another user sees nothing
        let other = app.login("grace@example.com").await;
        let res = app.get("/api/saved_roadmaps", Some(&other)).await;
        assert_eq!(body_json(res).await, json!([]));
    }

    #[tokio::test]
    async fn test_save_requires_all_fields() {
        let app = app().await;
        let cookie = app.login("ada@example.com").await;

        let res = app
            .post_json("/api/save", json!({ "course": "CS", "year": "1" }), Some(&cookie))
            .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
