mod common;

use actix_web::test;
use serde_json::json;

use common::TestApp;

#[actix_rt::test]
async fn test_generate_returns_synthesized_itinerary() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/itinerary/generate")
        .set_json(&json!({
            "destination": "Delhi",
            "duration": "2 days",
            "budget": "₹8000",
            "adults": 2,
            "children": 0
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);

    let days = body["data"]["days"].as_array().unwrap();
    assert_eq!(days.len(), 2);

    let first = &days[0]["activities"][0];
    assert!(first["title"]
        .as_str()
        .unwrap()
        .to_lowercase()
        .contains("pickup"));

    let last_day_activities = days[1]["activities"].as_array().unwrap();
    let last = last_day_activities.last().unwrap();
    assert!(last["title"]
        .as_str()
        .unwrap()
        .to_lowercase()
        .contains("drop"));

    // No repeated (title, location) pair outside the bracketing entries,
    // which are always each day's first and last activity.
    let mut seen = std::collections::HashSet::new();
    for day in days {
        let activities = day["activities"].as_array().unwrap();
        for activity in &activities[1..activities.len() - 1] {
            let key = format!(
                "{}|{}",
                activity["title"].as_str().unwrap().to_lowercase(),
                activity["location"].as_str().unwrap().to_lowercase()
            );
            assert!(seen.insert(key), "duplicate activity in itinerary");
        }
    }

    assert_eq!(body["data"]["generation"]["source"], "synthesized");
    assert_eq!(body["data"]["totalTravelers"], 2);
}

#[actix_rt::test]
async fn test_generate_rejects_oversized_party() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/itinerary/generate")
        .set_json(&json!({
            "destination": "Goa",
            "duration": "3 days",
            "adults": 10,
            "children": 5
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
}

#[actix_rt::test]
async fn test_generate_custom_applies_overrides() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/itinerary/generate-custom")
        .set_json(&json!({
            "tripDetails": {
                "destination": "Jaipur",
                "duration": "2 days",
                "adults": 2
            },
            "customizations": {
                "duration": "4 days"
            }
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["days"].as_array().unwrap().len(), 4);
    assert_eq!(body["data"]["destination"], "Jaipur");
}

#[actix_rt::test]
async fn test_regenerate_defaults_to_three_days() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/itinerary/regenerate")
        .set_json(&json!({ "destination": "Mumbai" }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["days"].as_array().unwrap().len(), 3);
}

#[actix_rt::test]
async fn test_health_reports_status() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert!(body["services"]["ai_generation"].is_string());
}
