//! Form submission against a mocked relay

use serde_json::json;
use storygen::api::RelayClient;
use storygen::app::{App, ValidationError};
use storygen::events::AppEvent;
use storygen::preferences::PreferenceKind;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> RelayClient {
    RelayClient::new(server.uri(), 5).unwrap()
}

/// Run the same submit path the terminal UI uses, but awaited inline.
async fn submit(app: &mut App, client: &RelayClient) -> Result<(), ValidationError> {
    let request = app.begin_submit()?;
    let event = AppEvent::generate(client, &request).await;
    app.handle_event(event);
    Ok(())
}

#[tokio::test]
async fn test_valid_submit_sends_exactly_one_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .and(body_json(json!({
            "prompt": "castle",
            "mood": "Dark",
            "length": "",
            "style": "",
            "genre": "Fantasy",
            "tone": "",
            "setting": ""
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "story": "A tale." })))
        .expect(1)
        .mount(&server)
        .await;

    let mut app = App::new();
    app.set_prompt("castle");
    app.toggle(PreferenceKind::Mood, "Dark");
    app.toggle(PreferenceKind::Genre, "Fantasy");

    submit(&mut app, &client_for(&server)).await.unwrap();

    assert_eq!(app.story, "A tale.");
    assert!(app.error.is_none());
    assert!(!app.is_loading);
    assert_eq!(app.analytics.stories_generated, 1);
    assert_eq!(app.analytics.last_genre, "Fantasy");
}

#[tokio::test]
async fn test_empty_submit_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "story": "x" })))
        .expect(0)
        .mount(&server)
        .await;

    let mut app = App::new();
    let result = submit(&mut app, &client_for(&server)).await;

    assert_eq!(result, Err(ValidationError::Empty));
    assert_eq!(
        app.error.as_deref(),
        Some("Please enter a prompt or select preferences")
    );
}

#[tokio::test]
async fn test_relay_500_shows_generic_error_and_keeps_story() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({ "error": "Failed to generate story" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut app = App::new();
    app.story = "Earlier story".to_string();
    app.set_prompt("castle");

    submit(&mut app, &client_for(&server)).await.unwrap();

    assert_eq!(app.error.as_deref(), Some("Failed to generate story"));
    assert_eq!(app.story, "Earlier story");
    assert!(!app.is_loading);
    assert_eq!(app.analytics.stories_generated, 0);
}

#[tokio::test]
async fn test_error_payload_with_ok_status_is_a_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "error": "Quota reached" })))
        .expect(1)
        .mount(&server)
        .await;

    let mut app = App::new();
    app.set_prompt("castle");

    submit(&mut app, &client_for(&server)).await.unwrap();

    assert_eq!(app.error.as_deref(), Some("Quota reached"));
    assert!(app.story.is_empty());
}

#[tokio::test]
async fn test_ok_reply_without_story_is_a_failure() {
    for reply in [json!({}), json!({ "story": null }), json!({ "story": "" })] {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(reply))
            .expect(1)
            .mount(&server)
            .await;

        let mut app = App::new();
        app.story = "Earlier story".to_string();
        app.set_prompt("castle");

        submit(&mut app, &client_for(&server)).await.unwrap();

        assert_eq!(app.error.as_deref(), Some("Failed to generate story"));
        assert_eq!(app.story, "Earlier story");
        assert!(!app.is_loading);
        assert_eq!(app.analytics.stories_generated, 0);
    }
}

#[tokio::test]
async fn test_unreachable_relay_is_a_network_error() {
    let client = RelayClient::new("http://127.0.0.1:9".to_string(), 5).unwrap();

    let mut app = App::new();
    app.toggle(PreferenceKind::Tone, "Playful");

    submit(&mut app, &client).await.unwrap();

    assert_eq!(app.error.as_deref(), Some("Could not reach the story relay"));
    assert!(!app.is_loading);
}

#[tokio::test]
async fn test_randomized_form_submits_all_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "story": "Random." })))
        .expect(1)
        .mount(&server)
        .await;

    let mut app = App::new();
    app.randomize();
    let request = app.begin_submit().unwrap();
    for kind in PreferenceKind::ALL {
        assert!(request.preferences.get(kind).is_set());
    }

    let event = AppEvent::generate(&client_for(&server), &request).await;
    assert_eq!(event, AppEvent::StoryReady("Random.".to_string()));
}
