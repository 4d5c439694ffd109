//! End-to-end tests
//!
//! Each test spawns a server with the in-memory backend and talks to it
//! over HTTP through `EstateClient`.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use std::time::Duration;

use estate_client::{ClientError, NewUser, OfferUpdate};
use estate_core::{City, UserType};
use integration_tests::{
    comment, credentials, new_offer, png, unique_user, TestServer, PNG_BYTES,
};
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;

/// Register and log in a fresh user on `client`
async fn signed_in(client: &estate_client::EstateClient) -> (NewUser, String) {
    let user = unique_user();
    let info = client.register(user.clone()).await.unwrap();
    client.login(&credentials(&user)).await.unwrap();
    (user, info.id)
}

// ============================================================================
// Users
// ============================================================================

#[tokio::test]
async fn test_register_login_check_logout() {
    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.client();

    let mut user = unique_user();
    user.user_type = UserType::Pro;
    let registered = client.register(user.clone()).await.unwrap();
    assert_eq!(registered.email, user.email);
    assert_eq!(registered.user_type, UserType::Pro);
    assert!(!client.is_authenticated());

    let auth = client.login(&credentials(&user)).await.unwrap();
    assert_eq!(auth.user.id, registered.id);
    assert!(auth.expires_in > 0);
    assert_eq!(client.token().as_deref(), Some(auth.token.as_str()));

    let me = client.check_auth().await.unwrap();
    assert_eq!(me, registered);

    client.logout();
    let err = client.check_auth().await.unwrap_err();
    assert!(err.is_unauthorized());
}

#[tokio::test]
async fn test_register_duplicate_and_bad_login() {
    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.client();
    let user = unique_user();

    client.register(user.clone()).await.unwrap();
    let err = client.register(user.clone()).await.unwrap_err();
    assert_eq!(err.status(), Some(409));

    let mut wrong = credentials(&user);
    wrong.password = "not-it".to_string();
    let err = client.login(&wrong).await.unwrap_err();
    assert!(err.is_unauthorized());
    assert!(!client.is_authenticated());
}

#[tokio::test]
async fn test_register_with_avatar() {
    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.client();

    let mut user = unique_user();
    user.avatar = Some(png("me.png"));
    let registered = client.register(user).await.unwrap();

    let avatar = registered.avatar.expect("avatar stored");
    assert!(server.has_upload(&avatar));
    // Avatar upload logs the new user in
    assert_eq!(client.check_auth().await.unwrap().avatar, Some(avatar.clone()));

    let served = reqwest::get(client.upload_url(&avatar)).await.unwrap();
    assert_eq!(served.status().as_u16(), 200);
    assert_eq!(served.bytes().await.unwrap().as_ref(), PNG_BYTES);
}

// ============================================================================
// Offers
// ============================================================================

#[tokio::test]
async fn test_offer_lifecycle() {
    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.client();
    let (_, user_id) = signed_in(&client).await;

    let created = client.create_offer(new_offer(City::Paris, false)).await.unwrap();
    assert_eq!(created.author_id, user_id);
    assert_eq!(created.location, City::Paris.center());

    let listed = client.fetch_offers(Some(10)).await.unwrap();
    assert!(listed.iter().any(|o| o.id == created.id));

    let updated = client
        .update_offer(
            &created.id,
            &OfferUpdate {
                price: Some(999),
                ..OfferUpdate::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.price, 999);
    assert_eq!(updated.title, created.title);

    client.delete_offer(&created.id).await.unwrap();
    let err = client.fetch_offer(&created.id).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_create_offer_with_uploads() {
    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.client();
    signed_in(&client).await;

    let mut offer = new_offer(City::Hamburg, true);
    offer.preview_upload = Some(png("cover.png"));
    offer.image_uploads = vec![png("a.png"), png("b.png")];

    let created = client.create_offer(offer).await.unwrap();
    assert!(server.has_upload(&created.preview_image));
    assert_eq!(created.images.len(), 6);
    assert!(server.has_upload(&created.images[0]));
    assert!(server.has_upload(&created.images[1]));
    assert_eq!(created.images[2], "photo-3.jpg");
}

#[tokio::test]
async fn test_private_routes_need_token() {
    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.client();

    let err = client
        .create_offer(new_offer(City::Paris, false))
        .await
        .unwrap_err();
    assert!(err.is_unauthorized());
    assert!(client.fetch_offers(None).await.unwrap().is_empty());

    let err = client.fetch_favorite_offers().await.unwrap_err();
    assert!(err.is_unauthorized());
}

#[tokio::test]
async fn test_only_author_changes_offer() {
    let server = TestServer::start().await.expect("Failed to start server");
    let owner = server.client();
    let stranger = server.client();
    signed_in(&owner).await;
    signed_in(&stranger).await;

    let offer = owner.create_offer(new_offer(City::Cologne, false)).await.unwrap();

    let err = stranger.delete_offer(&offer.id).await.unwrap_err();
    assert_eq!(err.status(), Some(403));

    let err = stranger
        .upload_preview_image(&offer.id, png("sneaky.png"))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(403));
    assert_eq!(std::fs::read_dir(server.upload_dir()).unwrap().count(), 0);

    assert!(owner.fetch_offer(&offer.id).await.is_ok());
}

#[tokio::test]
async fn test_premium_and_favorites() {
    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.client();
    signed_in(&client).await;

    for _ in 0..4 {
        client.create_offer(new_offer(City::Brussels, true)).await.unwrap();
    }
    let plain = client.create_offer(new_offer(City::Brussels, false)).await.unwrap();

    let premium = client.fetch_premium_offers(City::Brussels).await.unwrap();
    assert_eq!(premium.len(), 3);
    assert!(premium.iter().all(|o| o.is_premium && o.city == City::Brussels));
    assert!(client.fetch_premium_offers(City::Amsterdam).await.unwrap().is_empty());

    let favored = client.set_favorite(&plain.id, true).await.unwrap();
    assert!(favored.is_favorite);
    let favorites = client.fetch_favorite_offers().await.unwrap();
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0].id, plain.id);

    client.set_favorite(&plain.id, false).await.unwrap();
    assert!(client.fetch_favorite_offers().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_replaced_preview_leaves_one_file() {
    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.client();
    signed_in(&client).await;
    let offer = client.create_offer(new_offer(City::Amsterdam, false)).await.unwrap();

    let mut latest = String::new();
    for i in 0..3 {
        latest = client
            .upload_preview_image(&offer.id, png(&format!("cover-{i}.png")))
            .await
            .unwrap();
    }
    assert_eq!(server.upload_count(), 1);
    assert!(server.has_upload(&latest));

    client.delete_offer(&offer.id).await.unwrap();
    assert_eq!(server.upload_count(), 0);
}

/// Poll until the number of upload directory entries satisfies `check`
async fn wait_for_uploads(server: &TestServer, check: impl Fn(usize) -> bool) -> bool {
    for _ in 0..100 {
        if check(server.upload_count()) {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    false
}

#[tokio::test]
async fn test_aborted_upload_leaves_no_files() {
    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.client();
    signed_in(&client).await;
    let offer = client.create_offer(new_offer(City::Paris, false)).await.unwrap();
    let token = client.token().unwrap();

    // One complete image, then a second one that never finishes
    let boundary = "aborted-upload";
    let mut body = Vec::new();
    for name in ["a.png", "b.png"] {
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"offerImages\"; \
                 filename=\"{name}\"\r\nContent-Type: image/png\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(PNG_BYTES);
        if name == "a.png" {
            body.extend_from_slice(b"\r\n");
        }
    }
    let head = format!(
        "POST /offers/{}/offerImages HTTP/1.1\r\nHost: {}\r\n\
         Authorization: Bearer {token}\r\n\
         Content-Type: multipart/form-data; boundary={boundary}\r\n\
         Content-Length: {}\r\n\r\n",
        offer.id,
        server.addr,
        body.len() + 4096,
    );

    let mut stream = TcpStream::connect(server.addr).await.unwrap();
    stream.write_all(head.as_bytes()).await.unwrap();
    stream.write_all(&body).await.unwrap();
    stream.flush().await.unwrap();

    assert!(wait_for_uploads(&server, |count| count > 0).await);
    drop(stream);

    assert!(wait_for_uploads(&server, |count| count == 0).await);
    let offer = client.fetch_offer(&offer.id).await.unwrap();
    assert_eq!(offer.images[0], "photo-1.jpg");
}

// ============================================================================
// Comments
// ============================================================================

#[tokio::test]
async fn test_comments_update_offer() {
    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.client();
    let (user, _) = signed_in(&client).await;
    let offer = client.create_offer(new_offer(City::Dusseldorf, false)).await.unwrap();

    let posted = client
        .post_comment(&offer.id, &comment("Lovely hosts and a quiet street", 5))
        .await
        .unwrap();
    assert_eq!(posted.offer_id, offer.id);
    assert_eq!(posted.author.map(|a| a.email), Some(user.email));

    client
        .post_comment(&offer.id, &comment("Kitchen could be cleaner", 2))
        .await
        .unwrap();

    let comments = client.fetch_comments(&offer.id).await.unwrap();
    assert_eq!(comments.len(), 2);

    let offer = client.fetch_offer(&offer.id).await.unwrap();
    assert_eq!(offer.comment_count, 2);
    assert!((offer.rating - 3.5).abs() < f64::EPSILON);

    let err = client
        .post_comment(&offer.id, &comment("bad", 7))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Api { status: 400, .. }));
}

#[tokio::test]
async fn test_deleting_offer_removes_comments() {
    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.client();
    signed_in(&client).await;
    let offer = client.create_offer(new_offer(City::Paris, false)).await.unwrap();

    client
        .post_comment(&offer.id, &comment("Will vanish with the offer", 3))
        .await
        .unwrap();
    client.delete_offer(&offer.id).await.unwrap();

    let err = client.fetch_comments(&offer.id).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_malformed_ids_are_rejected() {
    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.client();

    let err = client.fetch_offer("123").await.unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert_eq!(err.code(), Some("INVALID_ID"));

    let err = client.fetch_comments("zzzzzzzzzzzzzzzzzzzzzzzz").await.unwrap_err();
    assert_eq!(err.code(), Some("INVALID_ID"));
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_endpoints() {
    let server = TestServer::start().await.expect("Failed to start server");

    for path in ["/health", "/health/ready"] {
        let response = reqwest::get(format!("{}{path}", server.base_url()))
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 200, "{path}");
    }
}
