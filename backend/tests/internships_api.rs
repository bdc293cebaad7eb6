//! Internship listing and the admin-only create/delete surface against a
//! real database. Skipped unless `TEST_DATABASE_URL` is set.

mod support;

use axum::http::StatusCode;
use serde_json::json;
use talent_bridge_backend::{models::user::UserRole, router::build_router};
use tower::ServiceExt;

#[tokio::test]
async fn internship_management() {
    let Some(state) = support::db_state().await else {
        return;
    };
    let admin = support::seed_user(&state, "Admin", "admin@talent.test", UserRole::Admin).await;
    let user = support::seed_user(&state, "Asha", "asha@talent.test", UserRole::User).await;
    let admin_cookie = support::session_cookie(&admin);
    let user_cookie = support::session_cookie(&user);
    let app = build_router(state);

    let posting = json!({
        "title": "Backend Intern",
        "company": "Acme",
        "description": "Build services"
    });

    // Listings are public; mutation is admin-only.
    let response = app
        .clone()
        .oneshot(support::post_json("/api/internships", None, &posting))
        .await
        .expect("create anonymous");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .clone()
        .oneshot(support::post_json(
            "/api/internships",
            Some(&user_cookie),
            &posting,
        ))
        .await
        .expect("create as user");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // A single object is accepted as a one-element batch.
    let response = app
        .clone()
        .oneshot(support::post_json(
            "/api/internships",
            Some(&admin_cookie),
            &posting,
        ))
        .await
        .expect("create as admin");
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = support::body_json(response).await;
    assert_eq!(body["inserted"], 1);
    let first_id = body["data"][0]["id"].as_str().expect("id").to_string();
    assert_eq!(body["data"][0]["location"], "Remote");
    assert_eq!(body["data"][0]["stipend"], "Unpaid");

    // Re-posting a title replaces the earlier row instead of duplicating it.
    let response = app
        .clone()
        .oneshot(support::post_json(
            "/api/internships",
            Some(&admin_cookie),
            &json!([
                {
                    "title": "Backend Intern",
                    "company": "Acme",
                    "description": "Build services, revised",
                    "location": "Bengaluru"
                },
                {
                    "title": "Data Intern",
                    "company": "Acme",
                    "description": "Analyze things",
                    "skillsRequired": ["python"]
                }
            ]),
        ))
        .await
        .expect("create batch");
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = support::body_json(response).await;
    assert_eq!(body["inserted"], 2);

    let response = app
        .clone()
        .oneshot(support::get("/api/internships", None))
        .await
        .expect("list");
    assert_eq!(response.status(), StatusCode::OK);
    let body = support::body_json(response).await;
    assert_eq!(body["count"], 2);
    let titles: Vec<&str> = body["data"]
        .as_array()
        .expect("data array")
        .iter()
        .filter_map(|row| row["title"].as_str())
        .collect();
    assert_eq!(
        titles.iter().filter(|t| **t == "Backend Intern").count(),
        1
    );
    let backend = body["data"]
        .as_array()
        .expect("data array")
        .iter()
        .find(|row| row["title"] == "Backend Intern")
        .expect("backend row");
    assert_ne!(backend["id"], json!(first_id));
    assert_eq!(backend["location"], "Bengaluru");

    // Featured caps the listing at three.
    let response = app
        .clone()
        .oneshot(support::post_json(
            "/api/internships",
            Some(&admin_cookie),
            &json!([
                { "title": "Design Intern", "company": "Acme", "description": "Design" },
                { "title": "QA Intern", "company": "Acme", "description": "Test" }
            ]),
        ))
        .await
        .expect("create more");
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(support::get("/api/internships/featured", None))
        .await
        .expect("featured");
    let body = support::body_json(response).await;
    assert_eq!(body["count"], 3);

    // Malformed payloads name the required fields; blank ones fail
    // validation.
    let response = app
        .clone()
        .oneshot(support::post_json(
            "/api/internships",
            Some(&admin_cookie),
            &json!({ "company": "Acme" }),
        ))
        .await
        .expect("create missing title");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .clone()
        .oneshot(support::post_json(
            "/api/internships",
            Some(&admin_cookie),
            &json!({ "title": "", "company": "Acme", "description": "x" }),
        ))
        .await
        .expect("create blank title");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = support::body_json(response).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");

    // Deletion: admin-only, 404 once gone.
    let backend_id = backend["id"].as_str().expect("backend id").to_string();
    let delete_uri = format!("/api/internships/{}", backend_id);

    let response = app
        .clone()
        .oneshot(support::delete(&delete_uri, Some(&user_cookie)))
        .await
        .expect("delete as user");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .clone()
        .oneshot(support::delete(&delete_uri, Some(&admin_cookie)))
        .await
        .expect("delete as admin");
    assert_eq!(response.status(), StatusCode::OK);
    let body = support::body_json(response).await;
    assert_eq!(body["ok"], true);

    let response = app
        .oneshot(support::delete(&delete_uri, Some(&admin_cookie)))
        .await
        .expect("delete again");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
