use cloudfn::testing::{Collector, Records};
use cloudfn::{Broadcast, CloudEvent, Error, EventType, Result, Runtime};
use serde_json::json;

fn reading(wqi: u32) -> CloudEvent {
    CloudEvent::new("wqi.reading", "//sensors/river-7").with_data(json!({ "wqi": wqi }))
}

#[tokio::test]
async fn test_broadcast_delivers_to_every_function() -> Result {
    let mut rt = Runtime::default();
    let first = Records::default();
    let second = Records::default();

    let records = first.clone();
    rt.register("first", move |_ctx| Collector::new(records), &[Broadcast])?;
    let records = second.clone();
    rt.register("second", move |_ctx| Collector::new(records), &[Broadcast])?;

    rt.start().await?;
    rt.deliver(reading(42)).await?;
    rt.stop().await?;

    assert_eq!(first.len().await, 1);
    assert_eq!(second.len().await, 1);
    Ok(())
}

#[tokio::test]
async fn test_event_type_routing_filters_deliveries() -> Result {
    let mut rt = Runtime::<EventType>::default();
    let records = Records::default();

    let r = records.clone();
    rt.register(
        "update-wqi-value",
        move |_ctx| Collector::new(r),
        &[EventType::new("wqi.reading")],
    )?;

    rt.start().await?;
    rt.deliver(reading(42)).await?;
    rt.deliver(CloudEvent::new("billing.invoice", "//billing")).await?;
    rt.stop().await?;

    let recorded = records.snapshot().await;
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].event.ty, "wqi.reading");
    Ok(())
}

#[tokio::test]
async fn test_identical_deliveries_are_independent() -> Result {
    let mut rt = Runtime::default();
    let records = Records::default();

    let r = records.clone();
    rt.register("collector", move |_ctx| Collector::new(r), &[Broadcast])?;

    rt.start().await?;
    rt.deliver(reading(42)).await?;
    rt.deliver(reading(42)).await?;
    rt.stop().await?;

    let recorded = records.snapshot().await;
    assert_eq!(recorded.len(), 2);
    assert_eq!(recorded[0].event.data, recorded[1].event.data);
    // Each delivery carries its own identity
    assert_ne!(recorded[0].meta.id(), recorded[1].meta.id());
    Ok(())
}

#[tokio::test]
async fn test_stop_processes_queued_deliveries_first() -> Result {
    let mut rt = Runtime::default();
    let records = Records::default();

    let r = records.clone();
    rt.register("collector", move |_ctx| Collector::new(r), &[Broadcast])?;

    rt.start().await?;
    for wqi in 0..20 {
        rt.deliver(reading(wqi)).await?;
    }
    rt.stop().await?;

    assert_eq!(records.len().await, 20);
    Ok(())
}

#[tokio::test]
async fn test_duplicate_function_name_is_rejected() -> Result {
    let mut rt = Runtime::default();
    rt.register_fn("fn1", |_delivery| Ok(()), &[Broadcast])?;
    let result = rt.register_fn("fn1", |_delivery| Ok(()), &[Broadcast]);
    assert!(matches!(result, Err(Error::FunctionAlreadyExists(_))));
    Ok(())
}

#[tokio::test]
async fn test_registration_after_start_is_rejected() -> Result {
    let mut rt = Runtime::default();
    rt.register_fn("fn1", |_delivery| Ok(()), &[Broadcast])?;
    rt.start().await?;
    // Let the dispatcher task take ownership of its loop
    tokio::task::yield_now().await;

    let result = rt.register_fn("fn2", |_delivery| Ok(()), &[Broadcast]);
    assert!(matches!(result, Err(Error::DispatcherAlreadyStarted)));
    Ok(())
}

#[tokio::test]
async fn test_handler_failure_surfaces_on_shutdown() {
    let mut rt = Runtime::default();
    rt.register_fn(
        "failing",
        |_delivery| Err(Error::External("unprintable payload".into())),
        &[Broadcast],
    )
    .unwrap();

    rt.start().await.unwrap();
    rt.deliver(reading(42)).await.unwrap();
    assert!(rt.stop().await.is_err());
}
