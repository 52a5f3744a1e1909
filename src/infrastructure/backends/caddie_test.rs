use anyhow::bail;
use anyhow::Result;
use tokio::sync::mpsc;

use super::Caddie;
use super::ErrorResponse;
use super::QueryResponse;
use crate::domain::models::Author;
use crate::domain::models::Backend;
use crate::domain::models::BackendPrompt;
use crate::domain::models::BackendResponse;
use crate::domain::models::Event;

impl Caddie {
    fn with_url(url: String) -> Caddie {
        return Caddie {
            url,
            timeout: "200".to_string(),
        };
    }
}

fn to_res(event: Option<Event>) -> Result<BackendResponse> {
    let res = match event.unwrap() {
        Event::BackendPromptResponse(res) => res,
        _ => bail!("Wrong type from recv"),
    };

    return Ok(res);
}

#[tokio::test]
async fn it_successfully_health_checks() {
    let mut server = mockito::Server::new();
    let mock = server.mock("GET", "/").with_status(200).create();

    let backend = Caddie::with_url(server.url());
    let res = backend.health_check().await;

    assert!(res.is_ok());
    mock.assert();
}

#[tokio::test]
async fn it_health_checks_against_services_without_a_root_route() {
    let mut server = mockito::Server::new();
    let mock = server.mock("GET", "/").with_status(404).create();

    let backend = Caddie::with_url(server.url());
    let res = backend.health_check().await;

    assert!(res.is_ok());
    mock.assert();
}

#[tokio::test]
async fn it_fails_health_checks_without_a_url() {
    let backend = Caddie::with_url("".to_string());
    let res = backend.health_check().await;

    assert!(res.is_err());
}

#[tokio::test]
async fn it_gets_batched_completions() -> Result<()> {
    let body = serde_json::to_string(&QueryResponse {
        response: Some("Use a 7 iron".to_string()),
        final_response: None,
    })?;

    let prompt = BackendPrompt::new("What club for 150 yards?".to_string());

    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/api/query")
        .with_status(200)
        .with_body(body)
        .create();

    let (tx, mut rx) = mpsc::unbounded_channel::<Event>();

    let backend = Caddie::with_url(server.url());
    backend.get_completion(prompt, &tx).await?;

    mock.assert();

    let first_recv = to_res(rx.recv().await)?;
    let second_recv = to_res(rx.recv().await)?;

    assert_eq!(first_recv.author, Author::Caddie);
    assert_eq!(first_recv.text, "Use a 7 iron".to_string());
    assert!(!first_recv.done);

    assert_eq!(second_recv.text, "".to_string());
    assert!(second_recv.done);

    return Ok(());
}

#[tokio::test]
async fn it_streams_completion_fragments_in_order() -> Result<()> {
    let first_line = serde_json::to_string(&QueryResponse {
        response: Some("Use a ".to_string()),
        final_response: None,
    })?;

    let second_line = serde_json::to_string(&QueryResponse {
        response: None,
        final_response: Some("7 iron".to_string()),
    })?;

    let body = [first_line, second_line].join("\n");
    let prompt = BackendPrompt::new("What club for 150 yards?".to_string());

    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/api/query")
        .with_status(200)
        .with_body(body)
        .create();

    let (tx, mut rx) = mpsc::unbounded_channel::<Event>();

    let backend = Caddie::with_url(server.url());
    backend.get_completion(prompt, &tx).await?;

    mock.assert();

    let first_recv = to_res(rx.recv().await)?;
    let second_recv = to_res(rx.recv().await)?;
    let third_recv = to_res(rx.recv().await)?;

    assert_eq!(first_recv.text, "Use a ".to_string());
    assert!(!first_recv.done);

    assert_eq!(second_recv.text, "7 iron".to_string());
    assert!(!second_recv.done);

    assert_eq!(third_recv.text, "".to_string());
    assert!(third_recv.done);

    return Ok(());
}

#[tokio::test]
async fn it_degrades_unparseable_fragments_to_raw_text() -> Result<()> {
    let prompt = BackendPrompt::new("Anyone there?".to_string());

    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/api/query")
        .with_status(200)
        .with_body("Fore!")
        .create();

    let (tx, mut rx) = mpsc::unbounded_channel::<Event>();

    let backend = Caddie::with_url(server.url());
    backend.get_completion(prompt, &tx).await?;

    mock.assert();

    let first_recv = to_res(rx.recv().await)?;
    assert_eq!(first_recv.text, "Fore!".to_string());
    assert!(!first_recv.done);

    return Ok(());
}

#[tokio::test]
async fn it_sends_the_placeholder_when_no_fields_are_present() -> Result<()> {
    let prompt = BackendPrompt::new("Anyone there?".to_string());

    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/api/query")
        .with_status(200)
        .with_body("{}")
        .create();

    let (tx, mut rx) = mpsc::unbounded_channel::<Event>();

    let backend = Caddie::with_url(server.url());
    backend.get_completion(prompt, &tx).await?;

    mock.assert();

    let first_recv = to_res(rx.recv().await)?;
    assert_eq!(first_recv.text, "No response received".to_string());
    assert!(first_recv.done);

    return Ok(());
}

#[tokio::test]
async fn it_surfaces_structured_error_payloads() -> Result<()> {
    let body = serde_json::to_string(&ErrorResponse {
        error: "server down".to_string(),
    })?;

    let prompt = BackendPrompt::new("What club for 150 yards?".to_string());

    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/api/query")
        .with_status(500)
        .with_body(body)
        .create();

    let (tx, _rx) = mpsc::unbounded_channel::<Event>();

    let backend = Caddie::with_url(server.url());
    let res = backend.get_completion(prompt, &tx).await;

    mock.assert();

    assert!(res.is_err());
    assert_eq!(res.unwrap_err().to_string(), "server down");

    return Ok(());
}

#[tokio::test]
async fn it_falls_back_to_generic_status_errors() -> Result<()> {
    let prompt = BackendPrompt::new("What club for 150 yards?".to_string());

    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/api/query")
        .with_status(500)
        .with_body("the caddie tripped")
        .create();

    let (tx, _rx) = mpsc::unbounded_channel::<Event>();

    let backend = Caddie::with_url(server.url());
    let res = backend.get_completion(prompt, &tx).await;

    mock.assert();

    assert!(res.is_err());
    assert_eq!(res.unwrap_err().to_string(), "HTTP error! status: 500");

    return Ok(());
}
