use std::net::SocketAddr;
use std::time::Duration;

use hosted_agent::agents;
use hosted_agent::config::WeatherConfig;
use hosted_agent::core::RunnerBuilder;
use hosted_agent_service::{MessageRole, RunStatus, ToolCallRequest};
use hosted_agent_test_service::{RunStep, TestAgentService};
use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Serves one canned Weatherstack response on a local port.
async fn spawn_weather_stub(body: String) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();

        // Drain the request head before answering.
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        loop {
            let count = socket.read(&mut buf).await.unwrap();
            if count == 0 {
                break;
            }
            request.extend_from_slice(&buf[..count]);
            if request.windows(4).any(|window| window == b"\r\n\r\n") {
                break;
            }
        }

        let response = format!(
            "HTTP/1.1 200 OK\r\n\
             Content-Type: application/json\r\n\
             Content-Length: {}\r\n\
             Connection: close\r\n\
             \r\n\
             {}",
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
    });

    addr
}

fn weather_config(api_url: String) -> WeatherConfig {
    WeatherConfig {
        api_key: "test-key".to_owned(),
        api_url,
        timeout: Duration::from_secs(5),
    }
}

#[tokio::test]
async fn test_weather_prompt_end_to_end() {
    let body = json!({
        "location": {
            "name": "Seattle",
            "country": "United States of America",
            "localtime": "2025-05-01 09:00"
        },
        "current": {
            "temperature": 15,
            "humidity": 80,
            "weather_descriptions": ["Cloudy"]
        }
    })
    .to_string();
    let addr = spawn_weather_stub(body).await;

    let registry =
        agents::weather::registry(weather_config(format!("http://{addr}")))
            .unwrap();

    let service = TestAgentService::default();
    service.push_step(RunStep::Status(RunStatus::Queued));
    service.push_step(RunStep::RequiresAction(vec![ToolCallRequest {
        id: "call-1".to_owned(),
        name: "get_weatherstack_weather".to_owned(),
        arguments: json!({ "location": "Seattle" }),
    }]));
    service.push_step(RunStep::Status(RunStatus::InProgress));
    service.push_step(RunStep::Status(RunStatus::Completed));

    let runner = RunnerBuilder::with_service(service.clone())
        .with_registry(registry)
        .poll_interval(Duration::from_millis(1))
        .build();

    let request = agents::weather::interaction(
        "test-model",
        "What's the weather like in Seattle today?",
        None,
        true,
    );
    let outcome = runner.run_interaction(request).await.unwrap();
    assert!(outcome.is_completed());

    // The submitted tool output becomes the assistant's reply.
    let assistant = outcome
        .messages
        .iter()
        .find(|message| message.role == MessageRole::Assistant)
        .expect("an assistant message should be present");
    assert!(assistant.text.contains("15.0°C"));
    assert!(assistant.text.contains("humidity 80%"));
    assert!(assistant.text.to_lowercase().contains("cloudy"));

    // The user turn went in first.
    assert_eq!(outcome.messages[0].role, MessageRole::User);
    assert_eq!(
        outcome.messages[0].text,
        "What's the weather like in Seattle today?"
    );

    // The declared tool matches the registered handler.
    let created = service.created_agents();
    assert_eq!(created.len(), 1);
    assert_eq!(
        created[0].tools[0].function_name(),
        Some("get_weatherstack_weather")
    );

    // The auto-delete flag issued exactly one delete call.
    assert_eq!(service.deleted_agents().len(), 1);
}

#[tokio::test]
async fn test_agent_is_kept_without_auto_delete() {
    let registry = agents::weather::registry(weather_config(
        "http://127.0.0.1:1".to_owned(),
    ))
    .unwrap();

    let service = TestAgentService::default();
    service.push_step(RunStep::Status(RunStatus::Completed));

    let runner = RunnerBuilder::with_service(service.clone())
        .with_registry(registry)
        .poll_interval(Duration::from_millis(1))
        .build();

    let request = agents::weather::interaction(
        "test-model",
        "What's the weather like in Seattle today?",
        None,
        false,
    );
    let outcome = runner.run_interaction(request).await.unwrap();

    assert!(outcome.is_completed());
    assert!(service.deleted_agents().is_empty());
}
