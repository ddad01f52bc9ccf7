mod common;

use axum::http::StatusCode;
use common::{
    activity_messages, check_in, login, send, setup_test_app, setup_test_app_with_sessions,
};
use pickup_config::SessionConfig;
use serde_json::json;

#[tokio::test]
async fn test_list_teachers_hides_pins() {
    let (app, _) = setup_test_app();
    let (status, body) = send(&app, "GET", "/api/teachers", None, None).await;

    assert_eq!(status, StatusCode::OK);
    let teachers = body.as_array().unwrap();
    assert_eq!(teachers.len(), 5);
    assert!(teachers.iter().any(|t| t["name"] == "Mrs. Johnson"
        && t["grade"] == "3rd Grade"
        && t["room"] == "Room 2A"));
    for pin in ["1111", "2222", "3333", "4444", "5555"] {
        assert!(!body.to_string().contains(pin));
    }
}

#[tokio::test]
async fn test_login_success() {
    let (app, _) = setup_test_app();
    let (status, body) = send(
        &app,
        "POST",
        "/api/teachers/login",
        Some(json!({ "pin": "3333" })),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["token"].is_string());
    assert_eq!(body["teacher"]["name"], "Mrs. Johnson");
    assert_eq!(
        activity_messages(&app).await,
        vec!["Teacher Mrs. Johnson logged into pickup portal"]
    );
}

#[tokio::test]
async fn test_login_invalid_pin() {
    let (app, _) = setup_test_app();
    let (status, body) = send(
        &app,
        "POST",
        "/api/teachers/login",
        Some(json!({ "pin": "0000" })),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid PIN");
    assert!(activity_messages(&app).await.is_empty());
}

#[tokio::test]
async fn test_login_empty_pin_rejected() {
    let (app, _) = setup_test_app();
    let (status, body) = send(
        &app,
        "POST",
        "/api/teachers/login",
        Some(json!({ "pin": "" })),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "pin is required");
}

#[tokio::test]
async fn test_me_requires_session() {
    let (app, _) = setup_test_app();

    let (status, body) = send(&app, "GET", "/api/teachers/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Missing authorization header");

    let (status, _) = send(&app, "GET", "/api/teachers/me", None, Some("not-a-token")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app,
        "GET",
        "/api/teachers/me",
        None,
        Some("6f1d8a3e-0c2b-4f43-9a57-6f0e3c1b2d4a"),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_returns_signed_in_teacher() {
    let (app, _) = setup_test_app();
    let token = login(&app, "5555").await;

    let (status, body) = send(&app, "GET", "/api/teachers/me", None, Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "name": "Mr. Williams", "grade": "5th Grade", "room": "Room 1B" }));
}

#[tokio::test]
async fn test_my_queue_only_shows_own_class() {
    let (app, _) = setup_test_app();
    check_in(&app, "Sarah Johnson", &["Emma Rodriguez"], "car_line").await;
    check_in(&app, "Michael Chen", &["Liam Chen", "Sophie Chen"], "walk_up").await;
    check_in(&app, "Pat Lee", &["Michael Thompson", "Ryan Lee"], "car_line").await;
    check_in(&app, "Kim Callaway", &["Kohaan Callaway"], "walk_up").await;

    let token = login(&app, "3333").await;
    let (status, body) = send(&app, "GET", "/api/teachers/me/queue", None, Some(&token)).await;

    assert_eq!(status, StatusCode::OK);
    let queue = body.as_array().unwrap();
    assert_eq!(queue.len(), 2);
    assert!(queue
        .iter()
        .all(|r| r["assigned_teacher_label"] == "Mrs. Johnson"));
}

#[tokio::test]
async fn test_my_students() {
    let (app, _) = setup_test_app();
    let token = login(&app, "5555").await;

    let (status, body) = send(&app, "GET", "/api/teachers/me/students", None, Some(&token)).await;
    assert_eq!(status, StatusCode::OK);

    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Alexander Park", "Liam Chen", "Sophie Chen"]);
}

#[tokio::test]
async fn test_logout_ends_session() {
    let (app, _) = setup_test_app();
    let token = login(&app, "2222").await;

    let (status, body) = send(&app, "POST", "/api/teachers/logout", None, Some(&token)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());

    let (status, _) = send(&app, "GET", "/api/teachers/me/queue", None, Some(&token)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    assert_eq!(
        activity_messages(&app).await[0],
        "Teacher Ms. Davis logged out of pickup portal"
    );
}

#[tokio::test]
async fn test_concurrent_sessions_are_independent() {
    let (app, _) = setup_test_app();
    let johnson = login(&app, "3333").await;
    let williams = login(&app, "5555").await;
    assert_ne!(johnson, williams);

    send(&app, "POST", "/api/teachers/logout", None, Some(&johnson)).await;

    let (status, body) = send(&app, "GET", "/api/teachers/me", None, Some(&williams)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Mr. Williams");
}

#[tokio::test]
async fn test_session_token_expires() {
    let (app, clock) = setup_test_app_with_sessions(SessionConfig {
        ttl_minutes: 60,
        max_per_teacher: 5,
    });
    let token = login(&app, "3333").await;

    clock.advance_minutes(59);
    let (status, _) = send(&app, "GET", "/api/teachers/me", None, Some(&token)).await;
    assert_eq!(status, StatusCode::OK);

    clock.advance_minutes(1);
    let (status, _) = send(&app, "GET", "/api/teachers/me", None, Some(&token)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let fresh = login(&app, "3333").await;
    let (status, _) = send(&app, "GET", "/api/teachers/me", None, Some(&fresh)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_repeated_logins_drop_oldest_token() {
    let (app, clock) = setup_test_app_with_sessions(SessionConfig {
        ttl_minutes: 480,
        max_per_teacher: 2,
    });
    let mut tokens = Vec::new();
    for _ in 0..3 {
        tokens.push(login(&app, "3333").await);
        clock.advance_seconds(1);
    }
    let other = login(&app, "1111").await;

    let (status, _) = send(&app, "GET", "/api/teachers/me", None, Some(&tokens[0])).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    for token in [&tokens[1], &tokens[2], &other] {
        let (status, _) = send(&app, "GET", "/api/teachers/me", None, Some(token)).await;
        assert_eq!(status, StatusCode::OK);
    }
}
