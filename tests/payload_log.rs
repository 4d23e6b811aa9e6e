use cloudfn::testing::SharedBuffer;
use cloudfn::{CloudEvent, EventType, PayloadLog, Result, Runtime};
use serde_json::json;

#[tokio::test]
async fn test_payload_is_logged_once_per_delivery() -> Result {
    let mut rt = Runtime::<EventType>::default();
    let buffer = SharedBuffer::default();

    let sink = buffer.clone();
    rt.register(
        "update-wqi-value",
        move |_ctx| PayloadLog::new(sink),
        &[EventType::new("wqi.reading")],
    )?;

    rt.start().await?;
    rt.deliver(CloudEvent::new("wqi.reading", "//sensors/river-7").with_data(json!({"wqi": 42})))
        .await?;
    rt.stop().await?;

    assert_eq!(buffer.lines(), vec![r#"{"wqi":42}"#]);
    Ok(())
}

#[tokio::test]
async fn test_empty_payload_is_logged_as_null() -> Result {
    let mut rt = Runtime::<EventType>::default();
    let buffer = SharedBuffer::default();

    let sink = buffer.clone();
    rt.register(
        "update-wqi-value",
        move |_ctx| PayloadLog::new(sink),
        &[EventType::new("wqi.reading")],
    )?;

    rt.start().await?;
    rt.deliver(CloudEvent::new("wqi.reading", "//sensors/river-7")).await?;
    rt.stop().await?;

    assert_eq!(buffer.lines(), vec!["null"]);
    Ok(())
}

#[tokio::test]
async fn test_repeated_deliveries_log_independent_identical_lines() -> Result {
    let mut rt = Runtime::<EventType>::default();
    let buffer = SharedBuffer::default();

    let sink = buffer.clone();
    rt.register(
        "update-wqi-value",
        move |_ctx| PayloadLog::new(sink),
        &[EventType::new("wqi.reading")],
    )?;

    let event =
        CloudEvent::new("wqi.reading", "//sensors/river-7").with_data(json!({"wqi": 42}));

    rt.start().await?;
    rt.deliver(event.clone()).await?;
    rt.deliver(event).await?;
    rt.stop().await?;

    let lines = buffer.lines();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], lines[1]);
    Ok(())
}
