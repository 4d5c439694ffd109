//! Router tests
//!
//! Drive the full application (middleware included) with `oneshot` against
//! the in-memory backend.

use std::path::{Path, PathBuf};

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use estate_api::{create_app, create_app_state};
use estate_common::AppConfig;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

const BOUNDARY: &str = "estate-test-boundary";
const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nfake-image-payload";

struct TestApp {
    router: Router,
    uploads: TempDir,
}

impl TestApp {
    async fn new() -> Self {
        Self::with_env(&[]).await
    }

    /// Build the app, overriding configuration keys
    async fn with_env(overrides: &[(&str, &str)]) -> Self {
        let uploads = tempfile::tempdir().unwrap();
        let upload_dir = uploads.path().to_string_lossy().to_string();

        let config = AppConfig::from_lookup(|key| {
            if let Some((_, value)) = overrides.iter().find(|(k, _)| *k == key) {
                return Some(value.to_string());
            }
            match key {
                "DATABASE_URL" => Some("memory://".to_string()),
                "JWT_SECRET" => Some("api-test-secret".to_string()),
                "UPLOAD_DIRECTORY" => Some(upload_dir.clone()),
                "MAX_FILE_SIZE_MB" => Some("1".to_string()),
                "RATE_LIMIT_REQUESTS_PER_SECOND" => Some("1000".to_string()),
                "RATE_LIMIT_BURST" => Some("1000".to_string()),
                _ => None,
            }
        })
        .unwrap();

        let state = create_app_state(config).await.unwrap();
        let router = create_app(state).unwrap();

        Self { router, uploads }
    }

    fn upload_dir(&self) -> &Path {
        self.uploads.path()
    }

    fn stored_files(&self) -> Vec<PathBuf> {
        std::fs::read_dir(self.upload_dir())
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .collect()
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, body)
    }

    async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(request(Method::GET, uri, token, None)).await
    }

    async fn json(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Value,
    ) -> (StatusCode, Value) {
        self.send(request(method, uri, token, Some(body))).await
    }

    /// Register an account and log in, returning `(token, user_id)`
    async fn sign_up(&self, email: &str) -> (String, String) {
        let (status, user) = self
            .json(
                Method::POST,
                "/register",
                None,
                json!({ "name": "Keks", "email": email, "password": "secret1", "type": "pro" }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, login) = self
            .json(
                Method::POST,
                "/login",
                None,
                json!({ "email": email, "password": "secret1" }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);

        (
            login["token"].as_str().unwrap().to_string(),
            user["id"].as_str().unwrap().to_string(),
        )
    }

    async fn create_offer(&self, token: &str, body: Value) -> String {
        let (status, offer) = self.json(Method::POST, "/offers", Some(token), body).await;
        assert_eq!(status, StatusCode::CREATED, "{offer}");
        offer["id"].as_str().unwrap().to_string()
    }
}

fn request(method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Multipart request with one file part per `(content_type, bytes)`
fn multipart(uri: &str, token: &str, field: &str, files: &[(&str, &[u8])]) -> Request<Body> {
    let mut body = Vec::new();
    for (index, (content_type, bytes)) in files.iter().enumerate() {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; \
                 filename=\"file-{index}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

fn offer_body(city: &str, is_premium: bool) -> Value {
    json!({
        "title": "Sunny apartment in the center",
        "description": "A bright apartment with a balcony, two minutes from the old town",
        "city": city,
        "previewImage": "preview.jpg",
        "images": ["1.jpg", "2.jpg", "3.jpg", "4.jpg", "5.jpg", "6.jpg"],
        "isPremium": is_premium,
        "type": "apartment",
        "rooms": 2,
        "guests": 3,
        "price": 180,
        "goods": ["Breakfast", "Air conditioning"],
        "location": { "latitude": 48.85661, "longitude": 2.351499 }
    })
}

#[tokio::test]
async fn test_health_endpoints() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = app.get("/health/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["checks"]["database"], "healthy");
}

#[tokio::test]
async fn test_malformed_id_is_rejected_before_handler() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/offers/not-an-id", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_ID");
    assert_eq!(body["error"]["origin"], "ValidateObjectId");

    let (status, _) = app.get("/offers/123/comments", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_missing_offer_is_not_found() {
    let app = TestApp::new().await;
    let (token, _) = app.sign_up("keks@example.com").await;

    let (status, body) = app.get("/offers/65a1f0c2e4b0a1b2c3d4e5f6", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["origin"], "DocumentExists");

    let (status, _) = app
        .json(
            Method::POST,
            "/offers/65a1f0c2e4b0a1b2c3d4e5f6/comments",
            Some(&token),
            json!({ "text": "Nobody home here", "rating": 3 }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_offer_requires_auth() {
    let app = TestApp::new().await;

    let (status, body) = app
        .json(Method::POST, "/offers", None, offer_body("Paris", true))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["origin"], "PrivateRoute");

    let (status, body) = app
        .json(Method::POST, "/offers", Some("garbage"), offer_body("Paris", true))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["origin"], "PrivateRoute");

    let (_, offers) = app.get("/offers", None).await;
    assert_eq!(offers.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_create_and_fetch_offer() {
    let app = TestApp::new().await;
    let (token, user_id) = app.sign_up("keks@example.com").await;

    let id = app.create_offer(&token, offer_body("Paris", true)).await;

    let (status, offer) = app.get(&format!("/offers/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(offer["id"], id.as_str());
    assert_eq!(offer["authorId"], user_id.as_str());
    assert_eq!(offer["author"]["email"], "keks@example.com");
    assert_eq!(offer["type"], "apartment");
    assert_eq!(offer["commentCount"], 0);
    assert_eq!(offer["images"].as_array().unwrap().len(), 6);

    let (status, offers) = app.get("/offers?limit=10", None).await;
    assert_eq!(status, StatusCode::OK);
    let offers = offers.as_array().unwrap();
    assert_eq!(offers.len(), 1);
    assert_eq!(offers[0]["id"], id.as_str());
    // Previews use the short shape
    assert!(offers[0].get("description").is_none());
}

#[tokio::test]
async fn test_invalid_offer_body_has_details() {
    let app = TestApp::new().await;
    let (token, _) = app.sign_up("keks@example.com").await;

    let mut body = offer_body("Paris", true);
    body["title"] = json!("short");
    body["price"] = json!(5);

    let (status, error) = app.json(Method::POST, "/offers", Some(&token), body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(error["error"]["origin"], "ValidateDto");
    assert!(error["error"]["details"].get("title").is_some());
    assert!(error["error"]["details"].get("price").is_some());

    let mut body = offer_body("Atlantis", true);
    body["city"] = json!("Atlantis");
    let (status, error) = app.json(Method::POST, "/offers", Some(&token), body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["error"]["code"], "INVALID_BODY");
}

#[tokio::test]
async fn test_registration_and_login() {
    let app = TestApp::new().await;
    let (token, user_id) = app.sign_up("keks@example.com").await;

    let (status, body) = app
        .json(
            Method::POST,
            "/register",
            None,
            json!({ "name": "Other", "email": "keks@example.com", "password": "secret2" }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "CONFLICT");

    let (status, _) = app
        .json(
            Method::POST,
            "/login",
            None,
            json!({ "email": "keks@example.com", "password": "wrong-pw" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, user) = app.get("/login", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(user["id"], user_id.as_str());
    assert_eq!(user["type"], "pro");
    assert!(user.get("password").is_none());
    assert!(user.get("passwordHash").is_none());

    let (status, _) = app.get("/login", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_comment_updates_offer_rating() {
    let app = TestApp::new().await;
    let (token, _) = app.sign_up("keks@example.com").await;
    let id = app.create_offer(&token, offer_body("Paris", true)).await;

    for (text, rating) in [("Wonderful stay", 5), ("Pretty good overall", 4)] {
        let (status, comment) = app
            .json(
                Method::POST,
                &format!("/offers/{id}/comments"),
                Some(&token),
                json!({ "text": text, "rating": rating }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(comment["offerId"], id.as_str());
        assert_eq!(comment["author"]["name"], "Keks");
    }

    let (_, offer) = app.get(&format!("/offers/{id}"), None).await;
    assert_eq!(offer["commentCount"], 2);
    assert_eq!(offer["rating"], 4.5);

    let (status, comments) = app.get(&format!("/offers/{id}/comments"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(comments.as_array().unwrap().len(), 2);

    let (status, _) = app
        .json(
            Method::POST,
            &format!("/offers/{id}/comments"),
            Some(&token),
            json!({ "text": "Bad rating value", "rating": 9 }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_only_author_may_edit_or_delete() {
    let app = TestApp::new().await;
    let (owner, _) = app.sign_up("owner@example.com").await;
    let (stranger, _) = app.sign_up("stranger@example.com").await;
    let id = app.create_offer(&owner, offer_body("Paris", true)).await;
    let uri = format!("/offers/{id}");

    let (status, body) = app
        .json(Method::PATCH, &uri, Some(&stranger), json!({ "price": 500 }))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["origin"], "CheckOwner");

    let (status, _) = app
        .send(request(Method::DELETE, &uri, Some(&stranger), None))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, offer) = app
        .json(Method::PATCH, &uri, Some(&owner), json!({ "price": 500 }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(offer["price"], 500);
    assert_eq!(offer["title"], "Sunny apartment in the center");
}

#[tokio::test]
async fn test_delete_offer_cascades_comments() {
    let app = TestApp::new().await;
    let (token, _) = app.sign_up("keks@example.com").await;
    let id = app.create_offer(&token, offer_body("Paris", true)).await;
    let uri = format!("/offers/{id}");

    let (status, _) = app
        .json(
            Method::POST,
            &format!("{uri}/comments"),
            Some(&token),
            json!({ "text": "Soon to be gone", "rating": 2 }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app.send(request(Method::DELETE, &uri, Some(&token), None)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());

    let (status, _) = app.get(&uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = app.get(&format!("{uri}/comments"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_premium_offers_by_city() {
    let app = TestApp::new().await;
    let (token, _) = app.sign_up("keks@example.com").await;

    for _ in 0..4 {
        app.create_offer(&token, offer_body("Paris", true)).await;
    }
    app.create_offer(&token, offer_body("Paris", false)).await;
    app.create_offer(&token, offer_body("Hamburg", true)).await;

    let (status, offers) = app.get("/offers/premium/Paris", None).await;
    assert_eq!(status, StatusCode::OK);
    let offers = offers.as_array().unwrap();
    assert_eq!(offers.len(), 3);
    assert!(offers
        .iter()
        .all(|o| o["city"] == "Paris" && o["isPremium"] == true));

    let (status, body) = app.get("/offers/premium/Atlantis", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["origin"], "OfferController");
}

#[tokio::test]
async fn test_favorite_flag() {
    let app = TestApp::new().await;
    let (token, _) = app.sign_up("keks@example.com").await;
    let id = app.create_offer(&token, offer_body("Paris", false)).await;

    let (status, _) = app.get("/offers/favorite", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, offer) = app
        .send(request(
            Method::PUT,
            &format!("/offers/{id}/favorite/1"),
            Some(&token),
            None,
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(offer["isFavorite"], true);

    let (status, favorites) = app.get("/offers/favorite", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(favorites.as_array().unwrap().len(), 1);

    let (status, _) = app
        .send(request(
            Method::PUT,
            &format!("/offers/{id}/favorite/2"),
            Some(&token),
            None,
        ))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, offer) = app
        .send(request(
            Method::PUT,
            &format!("/offers/{id}/favorite/0"),
            Some(&token),
            None,
        ))
        .await;
    assert_eq!(offer["isFavorite"], false);
}

#[tokio::test]
async fn test_preview_image_upload() {
    let app = TestApp::new().await;
    let (owner, _) = app.sign_up("owner@example.com").await;
    let (stranger, _) = app.sign_up("stranger@example.com").await;
    let id = app.create_offer(&owner, offer_body("Paris", true)).await;
    let uri = format!("/offers/{id}/previewImage");

    // Ownership is checked before the body is read
    let (status, _) = app
        .send(multipart(&uri, &stranger, "previewImage", &[("image/png", PNG_BYTES)]))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(app.stored_files().is_empty());

    let (status, body) = app
        .send(multipart(&uri, &owner, "previewImage", &[("text/plain", b"hello")]))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["origin"], "UploadFile");
    assert!(app.stored_files().is_empty());

    let (status, body) = app
        .send(multipart(&uri, &owner, "avatar", &[("image/png", PNG_BYTES)]))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_UPLOAD");
    assert!(app.stored_files().is_empty());

    let (status, body) = app
        .send(multipart(&uri, &owner, "previewImage", &[("image/png", PNG_BYTES)]))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let name = body["previewImage"].as_str().unwrap().to_string();
    assert!(name.ends_with(".png"));
    assert_eq!(std::fs::read(app.upload_dir().join(&name)).unwrap(), PNG_BYTES);

    let (_, offer) = app.get(&format!("/offers/{id}"), None).await;
    assert_eq!(offer["previewImage"], name.as_str());

    // Stored files are served statically
    let response = app
        .router
        .clone()
        .oneshot(request(Method::GET, &format!("/upload/{name}"), None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_offer_images_upload() {
    let app = TestApp::new().await;
    let (token, _) = app.sign_up("keks@example.com").await;
    let id = app.create_offer(&token, offer_body("Paris", true)).await;

    let (status, body) = app
        .send(multipart(
            &format!("/offers/{id}/offerImages"),
            &token,
            "offerImages",
            &[("image/png", PNG_BYTES), ("image/jpeg", PNG_BYTES)],
        ))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let images = body["images"].as_array().unwrap();
    assert_eq!(images.len(), 6);
    assert!(images[0].as_str().unwrap().ends_with(".png"));
    assert!(images[1].as_str().unwrap().ends_with(".jpg"));
    assert_eq!(images[2], "3.jpg");
    assert_eq!(app.stored_files().len(), 2);

    let seven: Vec<(&str, &[u8])> = (0..7).map(|_| ("image/png", PNG_BYTES)).collect();
    let (status, _) = app
        .send(multipart(
            &format!("/offers/{id}/offerImages"),
            &token,
            "offerImages",
            &seven,
        ))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    // Files written before the rejection are removed again
    assert_eq!(app.stored_files().len(), 2);
}

#[tokio::test]
async fn test_avatar_upload_is_limited_to_own_account() {
    let app = TestApp::new().await;
    let (token, user_id) = app.sign_up("keks@example.com").await;
    let (_, other_id) = app.sign_up("other@example.com").await;

    let (status, _) = app
        .send(multipart(
            &format!("/users/{other_id}/avatar"),
            &token,
            "avatar",
            &[("image/png", PNG_BYTES)],
        ))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .send(multipart(
            &format!("/users/{user_id}/avatar"),
            &token,
            "avatar",
            &[("image/jpeg", PNG_BYTES)],
        ))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let avatar = body["avatar"].as_str().unwrap().to_string();

    let (_, user) = app.get("/login", Some(&token)).await;
    assert_eq!(user["avatar"], avatar.as_str());

    // A new avatar replaces the stored file
    let (status, body) = app
        .send(multipart(
            &format!("/users/{user_id}/avatar"),
            &token,
            "avatar",
            &[("image/png", PNG_BYTES)],
        ))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let replacement = body["avatar"].as_str().unwrap();
    assert_eq!(app.stored_files(), vec![app.upload_dir().join(replacement)]);
}

#[tokio::test]
async fn test_request_id_is_propagated() {
    let app = TestApp::new().await;

    let response = app
        .router
        .clone()
        .oneshot(request(Method::GET, "/offers", None, None))
        .await
        .unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn test_replaced_and_deleted_uploads_are_removed() {
    let app = TestApp::new().await;
    let (token, _) = app.sign_up("keks@example.com").await;
    let id = app.create_offer(&token, offer_body("Paris", true)).await;

    let mut preview = String::new();
    for _ in 0..3 {
        let (status, body) = app
            .send(multipart(
                &format!("/offers/{id}/previewImage"),
                &token,
                "previewImage",
                &[("image/png", PNG_BYTES)],
            ))
            .await;
        assert_eq!(status, StatusCode::CREATED);
        preview = body["previewImage"].as_str().unwrap().to_string();
    }
    assert_eq!(app.stored_files(), vec![app.upload_dir().join(&preview)]);

    let (_, body) = app
        .send(multipart(
            &format!("/offers/{id}/offerImages"),
            &token,
            "offerImages",
            &[("image/png", PNG_BYTES), ("image/png", PNG_BYTES)],
        ))
        .await;
    let first = body["images"][0].as_str().unwrap().to_string();
    let second = body["images"][1].as_str().unwrap().to_string();
    assert_eq!(app.stored_files().len(), 3);

    // Only the first gallery slot is replaced
    let (_, body) = app
        .send(multipart(
            &format!("/offers/{id}/offerImages"),
            &token,
            "offerImages",
            &[("image/jpeg", PNG_BYTES)],
        ))
        .await;
    assert_eq!(body["images"][1], second.as_str());
    assert!(!app.upload_dir().join(&first).exists());
    assert!(app.upload_dir().join(&second).exists());
    assert_eq!(app.stored_files().len(), 3);

    let (status, _) = app
        .send(request(Method::DELETE, &format!("/offers/{id}"), Some(&token), None))
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(app.stored_files().is_empty());
}

#[tokio::test]
async fn test_cors_depends_on_environment() {
    let preflight = || {
        Request::builder()
            .method(Method::OPTIONS)
            .uri("/offers")
            .header(header::ORIGIN, "http://example.com")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
            .body(Body::empty())
            .unwrap()
    };

    let development = TestApp::new().await;
    let response = development.router.clone().oneshot(preflight()).await.unwrap();
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );

    // Production without configured origins allows none
    let production = TestApp::with_env(&[("APP_ENV", "production")]).await;
    let response = production.router.clone().oneshot(preflight()).await.unwrap();
    assert!(!response
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
}
