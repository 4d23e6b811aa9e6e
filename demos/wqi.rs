use cloudfn::{CloudEvent, EventType, Result, Runtime};
use serde_json::json;

#[tokio::main]
async fn main() -> Result {
    tracing_subscriber::fmt().init();

    let mut rt = Runtime::<EventType>::default();

    // Register a function for the wqi.reading trigger. It only logs the
    // payload; pushing the value to a downstream system would go here.
    rt.register_fn(
        "update-wqi-value",
        |delivery| {
            println!("{}", delivery.event.data_json());
            Ok(())
        },
        &[EventType::new("wqi.reading")],
    )?;

    // Start the dispatcher and inject an event
    rt.start().await?;
    rt.deliver(
        CloudEvent::new("wqi.reading", "//sensors/river-7").with_data(json!({ "wqi": 42 })),
    )
    .await?;

    // Graceful shutdown (it processes all deliveries already in the queue)
    rt.stop().await
}
