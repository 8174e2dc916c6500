use anyhow::Result;
use phone_explorer::{router, LibPhoneNumberUtil};
use serde_json::Value;
use std::sync::Arc;
use tokio::net::TcpListener;

/// 在隨機埠啟動伺服器，回傳 base URL
async fn spawn_server(expose_error_messages: bool) -> Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let app = router(Arc::new(LibPhoneNumberUtil::new()), expose_error_messages);

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    Ok(format!("http://{}", addr))
}

async fn get_json(url: &str) -> Result<(u16, Value)> {
    let response = reqwest::get(url).await?;
    let status = response.status().as_u16();
    let body = response.json::<Value>().await?;
    Ok((status, body))
}

#[tokio::test]
async fn test_hello_returns_constant_payload() -> Result<()> {
    let base = spawn_server(true).await?;

    let (status, body) = get_json(&format!("{}/api/hello", base)).await?;
    assert_eq!(status, 200);
    assert_eq!(body["success"], Value::Bool(true));
    assert_eq!(body["data"]["name"], "John Doe");

    let (_, with_query) = get_json(&format!("{}/api/hello?name=Jane", base)).await?;
    assert_eq!(with_query, body);

    let response = reqwest::Client::new()
        .post(format!("{}/api/hello", base))
        .send()
        .await?;
    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(response.json::<Value>().await?, body);
    Ok(())
}

#[tokio::test]
async fn test_parse_us_number() -> Result<()> {
    let base = spawn_server(true).await?;

    let (status, body) = get_json(&format!(
        "{}/api/parse?number=202-456-1414&region=US",
        base
    ))
    .await?;

    assert_eq!(status, 200);
    assert_eq!(body["success"], Value::Bool(true));
    let phone = &body["data"]["phoneNumber"];
    assert_eq!(phone["countryCodeOrDefault"], 1);
    assert_eq!(phone["nationalNumberOrDefault"], 2024561414u64);
    assert_eq!(phone["hasExtension"], Value::Bool(false));
    assert_eq!(phone["hasRawInput"], Value::Bool(false));

    assert!(phone["extension"].is_null());

    let object = phone.as_object().expect("phoneNumber is an object");
    assert_eq!(object.len(), 32);
    for field in [
        "countryCode",
        "nationalNumber",
        "extension",
        "italianLeadingZero",
        "numberOfLeadingZeros",
        "rawInput",
        "countryCodeSource",
        "preferredDomesticCarrierCode",
    ] {
        let mut chars = field.chars();
        let first = chars.next().unwrap().to_ascii_uppercase();
        let has_key = format!("has{}{}", first, chars.as_str());
        assert!(object.contains_key(field), "missing {}", field);
        assert_eq!(
            object[&has_key].as_bool(),
            Some(!object[field].is_null()),
            "{} must match presence of {}",
            has_key,
            field
        );
        assert!(object.contains_key(&format!("{}OrDefault", field)));
        assert!(object.contains_key(&format!("{}Count", field)));
    }
    Ok(())
}

#[tokio::test]
async fn test_parse_rejected_number_is_still_200() -> Result<()> {
    let base = spawn_server(true).await?;

    let (status, body) = get_json(&format!(
        "{}/api/parse?number=not-a-number&region=US",
        base
    ))
    .await?;

    assert_eq!(status, 200);
    assert_eq!(body["success"], Value::Bool(false));
    assert_eq!(body["data"]["error"]["kind"], "invalid-number");
    assert!(body["data"]["error"]["message"].is_string());
    Ok(())
}

#[tokio::test]
async fn test_parse_uses_first_query_value() -> Result<()> {
    let base = spawn_server(true).await?;

    let (_, body) = get_json(&format!(
        "{}/api/parse?number=202-456-1414&number=not-a-number&region=US",
        base
    ))
    .await?;
    assert_eq!(body["success"], Value::Bool(true));

    let (_, body) = get_json(&format!(
        "{}/api/parse?number=not-a-number&number=202-456-1414&region=US",
        base
    ))
    .await?;
    assert_eq!(body["success"], Value::Bool(false));
    Ok(())
}

#[tokio::test]
async fn test_post_ignores_query_parameters() -> Result<()> {
    let base = spawn_server(true).await?;

    let response = reqwest::Client::new()
        .post(format!("{}/api/parse?number=202-456-1414&region=US", base))
        .send()
        .await?;

    assert_eq!(response.status().as_u16(), 200);
    let body = response.json::<Value>().await?;
    assert_eq!(body["success"], Value::Bool(false));
    assert_eq!(body["data"]["error"]["kind"], "invalid-number");
    Ok(())
}

#[tokio::test]
async fn test_parse_is_idempotent() -> Result<()> {
    let base = spawn_server(true).await?;
    let url = format!("{}/api/parse?number=202-456-1414&region=US", base);

    let (_, first) = get_json(&url).await?;
    let (_, second) = get_json(&url).await?;
    assert_eq!(first, second);
    Ok(())
}

#[tokio::test]
async fn test_parse_and_keep_raw_input() -> Result<()> {
    let base = spawn_server(true).await?;

    let (_, body) = get_json(&format!(
        "{}/api/parse-and-keep-raw-input?number=202-456-1414&region=US",
        base
    ))
    .await?;

    let phone = &body["data"]["phoneNumber"];
    assert_eq!(body["success"], Value::Bool(true));
    assert_eq!(phone["rawInput"], "202-456-1414");
    assert_eq!(phone["hasRawInput"], Value::Bool(true));
    assert_eq!(phone["rawInputCount"], 1);
    assert_eq!(phone["countryCodeSource"], 20);
    Ok(())
}

#[tokio::test]
async fn test_format_endpoint() -> Result<()> {
    let base = spawn_server(true).await?;

    let (_, body) = get_json(&format!(
        "{}/api/format?number=202-456-1414&region=US",
        base
    ))
    .await?;
    assert_eq!(body["success"], Value::Bool(true));
    assert_eq!(body["data"]["format"], "e164");
    assert_eq!(body["data"]["formatted"], "+12024561414");

    let (status, body) = get_json(&format!(
        "{}/api/format?number=202-456-1414&region=US&format=fancy",
        base
    ))
    .await?;
    assert_eq!(status, 200);
    assert_eq!(body["success"], Value::Bool(false));
    assert_eq!(body["data"]["error"]["kind"], "invalid-argument");
    Ok(())
}

#[tokio::test]
async fn test_hidden_error_messages() -> Result<()> {
    let base = spawn_server(false).await?;

    let (_, body) = get_json(&format!("{}/api/parse?number=not-a-number", base)).await?;
    assert_eq!(body["success"], Value::Bool(false));
    assert_eq!(
        body["data"]["error"]["message"],
        "The phone number could not be parsed"
    );
    Ok(())
}

#[tokio::test]
async fn test_healthz() -> Result<()> {
    let base = spawn_server(true).await?;

    let (status, body) = get_json(&format!("{}/healthz", base)).await?;
    assert_eq!(status, 200);
    assert_eq!(body["ok"], Value::Bool(true));
    Ok(())
}

#[tokio::test]
async fn test_graceful_shutdown() -> Result<()> {
    use phone_explorer::app::server::serve_with_shutdown;
    use std::time::Duration;

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let app = router(Arc::new(LibPhoneNumberUtil::new()), true);
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

    let handle = tokio::spawn(serve_with_shutdown(
        listener,
        app,
        async move {
            let _ = shutdown_rx.await;
        },
        Duration::from_secs(5),
    ));

    let (status, _) = get_json(&format!("http://{}/healthz", addr)).await?;
    assert_eq!(status, 200);

    let _ = shutdown_tx.send(());
    let result = tokio::time::timeout(Duration::from_secs(10), handle).await??;
    assert!(result.is_ok());
    Ok(())
}
