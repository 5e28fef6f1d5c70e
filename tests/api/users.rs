use users_api_actix::domain::{Lifecycle, User};

use crate::helpers::{assert_user_not_found, spawn_app};

#[tokio::test]
async fn create_then_get_returns_the_stored_user() {
    let app = spawn_app().await;

    let response = app
        .post_user(&serde_json::json!({ "name": "Ada", "email": "ada@x.io" }))
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["id"], 1);
    assert_eq!(body["name"], "Ada");
    assert_eq!(body["email"], "ada@x.io");
    assert!(body["created_at"].is_string());
    assert!(body["updated_at"].is_string());
    assert!(body.get("deleted_at").is_none());

    let created: User = serde_json::from_value(body).unwrap();
    let fetched: User = app.get_user("1").await.json().await.unwrap();
    assert_eq!(fetched, created);
    assert_eq!(fetched.lifecycle, Lifecycle::Active);
}

#[tokio::test]
async fn create_ignores_client_supplied_id_and_timestamps() {
    let app = spawn_app().await;

    let response = app
        .post_user(&serde_json::json!({
            "id": 77,
            "created_at": "2000-01-01T00:00:00Z",
            "name": "Grace",
            "email": "grace@x.io"
        }))
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let user: User = response.json().await.unwrap();
    assert_eq!(user.id, 1);
    assert_ne!(user.created_at.to_rfc3339(), "2000-01-01T00:00:00+00:00");
}

#[tokio::test]
async fn create_without_fields_stores_empty_strings() {
    let app = spawn_app().await;

    let response = app.post_user(&serde_json::json!({})).await;

    assert_eq!(response.status().as_u16(), 200);
    let user: User = response.json().await.unwrap();
    assert_eq!(user.name, "");
    assert_eq!(user.email, "");
}

#[tokio::test]
async fn create_returns_400_for_unparsable_bodies() {
    let app = spawn_app().await;
    let test_cases = [
        ("\"not-json\"", "a JSON string"),
        ("not-json", "bare text"),
        ("{\"name\": ", "truncated JSON"),
        ("{\"name\": 5}", "a number where a string is expected"),
        ("", "an empty body"),
    ];

    for (body, description) in test_cases {
        let response = app.post_raw_user(body).await;

        assert_eq!(
            response.status().as_u16(),
            400,
            "The API did not fail with 400 when the payload was {description}."
        );
        let error: serde_json::Value = response.json().await.unwrap();
        assert!(
            !error["error"].as_str().unwrap_or_default().is_empty(),
            "Missing error message when the payload was {description}."
        );
    }

    let users: Vec<User> = app.get_users().await.json().await.unwrap();
    assert!(users.is_empty());
}

#[tokio::test]
async fn mistyped_generated_fields_are_rejected_with_400() {
    let app = spawn_app().await;
    app.create_user("Ada", "ada@x.io").await;
    let test_cases = [
        (r#"{"id":"abc"}"#, "a string id"),
        (r#"{"id":-1,"name":"A"}"#, "a negative id"),
        (r#"{"created_at":"x","name":"A"}"#, "a malformed created_at"),
        (r#"{"deleted_at":5,"name":"A"}"#, "a numeric deleted_at"),
    ];

    for (body, description) in test_cases {
        let response = app.post_raw_user(body).await;
        assert_eq!(
            response.status().as_u16(),
            400,
            "POST did not fail with 400 when the payload had {description}."
        );

        let response = app.put_raw_user("1", body).await;
        assert_eq!(
            response.status().as_u16(),
            400,
            "PUT did not fail with 400 when the payload had {description}."
        );
    }

    let users: Vec<User> = app.get_users().await.json().await.unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].name, "Ada");
}

#[tokio::test]
async fn well_typed_generated_fields_are_ignored() {
    let app = spawn_app().await;
    let original = app.create_user("Ada", "ada@x.io").await;

    let mut body = serde_json::to_value(&original).unwrap();
    body["id"] = serde_json::json!(500);
    body["name"] = serde_json::json!("Ada Lovelace");
    let updated: User = app.put_user("1", &body).await.json().await.unwrap();

    assert_eq!(updated.id, 1);
    assert_eq!(updated.name, "Ada Lovelace");
    assert_eq!(updated.created_at, original.created_at);
}

#[tokio::test]
async fn null_body_creates_an_empty_user() {
    let app = spawn_app().await;

    let response = app.post_raw_user("null").await;

    assert_eq!(response.status().as_u16(), 200);
    let user: User = response.json().await.unwrap();
    assert_eq!(user.id, 1);
    assert_eq!(user.name, "");
    assert_eq!(user.email, "");
}

#[tokio::test]
async fn list_on_an_empty_store_returns_an_empty_array() {
    let app = spawn_app().await;

    let response = app.get_users().await;

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(response.text().await.unwrap(), "[]");
}

#[tokio::test]
async fn list_returns_every_live_user() {
    let app = spawn_app().await;
    let ada = app.create_user("Ada", "ada@x.io").await;
    let grace = app.create_user("Grace", "grace@x.io").await;

    let users: Vec<User> = app.get_users().await.json().await.unwrap();

    assert_eq!(users, vec![ada, grace]);
}

#[tokio::test]
async fn unknown_or_malformed_ids_return_404() {
    let app = spawn_app().await;
    app.create_user("Ada", "ada@x.io").await;

    for id in ["2", "0", "-1", "abc", "1.0", "99999999999999999999"] {
        assert_user_not_found(app.get_user(id).await).await;
        assert_user_not_found(app.put_user(id, &serde_json::json!({ "name": "x" })).await).await;
        assert_user_not_found(app.delete_user(id).await).await;
    }
}

#[tokio::test]
async fn update_on_unknown_id_is_404_even_with_a_bad_body() {
    let app = spawn_app().await;

    assert_user_not_found(app.put_raw_user("1", "not-json").await).await;
}

#[tokio::test]
async fn update_overwrites_only_the_fields_present() {
    let app = spawn_app().await;
    let original = app.create_user("Ada", "ada@x.io").await;

    let response = app
        .put_user("1", &serde_json::json!({ "name": "Ada Lovelace" }))
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let updated: User = response.json().await.unwrap();
    assert_eq!(updated.id, original.id);
    assert_eq!(updated.name, "Ada Lovelace");
    assert_eq!(updated.email, "ada@x.io");
    assert_eq!(updated.created_at, original.created_at);
    assert!(updated.updated_at > original.updated_at);

    let fetched: User = app.get_user("1").await.json().await.unwrap();
    assert_eq!(fetched, updated);
}

#[tokio::test]
async fn repeated_updates_keep_advancing_updated_at() {
    let app = spawn_app().await;
    let mut previous = app.create_user("Ada", "ada@x.io").await;

    for email in ["a@x.io", "b@x.io", "c@x.io"] {
        let updated: User = app
            .put_user("1", &serde_json::json!({ "email": email }))
            .await
            .json()
            .await
            .unwrap();
        assert_eq!(updated.email, email);
        assert!(updated.updated_at > previous.updated_at);
        previous = updated;
    }
}

#[tokio::test]
async fn update_with_an_unparsable_body_returns_400_and_changes_nothing() {
    let app = spawn_app().await;
    let original = app.create_user("Ada", "ada@x.io").await;

    let response = app.put_raw_user("1", "{\"email\": [] }").await;

    assert_eq!(response.status().as_u16(), 400);
    let error: serde_json::Value = response.json().await.unwrap();
    assert!(!error["error"].as_str().unwrap().is_empty());

    let fetched: User = app.get_user("1").await.json().await.unwrap();
    assert_eq!(fetched, original);
}

#[tokio::test]
async fn delete_hides_the_user_from_get_and_list() {
    let app = spawn_app().await;
    let ada = app.create_user("Ada", "ada@x.io").await;
    let grace = app.create_user("Grace", "grace@x.io").await;

    let response = app.delete_user(&ada.id.to_string()).await;

    assert_eq!(response.status().as_u16(), 204);
    assert!(response.text().await.unwrap().is_empty());

    assert_user_not_found(app.get_user("1").await).await;
    assert_user_not_found(app.delete_user("1").await).await;
    assert_user_not_found(app.put_user("1", &serde_json::json!({ "name": "x" })).await).await;

    let users: Vec<User> = app.get_users().await.json().await.unwrap();
    assert_eq!(users, vec![grace]);
}

#[tokio::test]
async fn ids_are_never_reused_after_delete() {
    let app = spawn_app().await;
    app.create_user("Ada", "ada@x.io").await;
    app.delete_user("1").await;

    let next = app.create_user("Grace", "grace@x.io").await;

    assert_eq!(next.id, 2);
}

#[tokio::test]
async fn create_get_delete_get_round_trip() {
    let app = spawn_app().await;

    let created = app.create_user("Ada", "ada@x.io").await;
    assert_eq!(created.id, 1);

    let response = app.get_user("1").await;
    assert_eq!(response.status().as_u16(), 200);
    let fetched: User = response.json().await.unwrap();
    assert_eq!(fetched, created);

    assert_eq!(app.delete_user("1").await.status().as_u16(), 204);
    assert_user_not_found(app.get_user("1").await).await;
}
