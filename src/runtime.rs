use std::sync::{
    Arc,
    atomic::AtomicBool,
};

use tokio::{
    sync::{
        Mutex,
        mpsc::{Sender, channel},
    },
    task::JoinSet,
};
use tokio_util::sync::CancellationToken;

use crate::{
    Broadcast, CloudEvent, Config, Context, Delivery, Error, FnHandler, FunctionId, Handler,
    Result, Trigger,
    internal::{Dispatcher, FunctionTask, Route},
};

/// Coordinates registered functions and the dispatcher, and owns the
/// top-level runtime.
///
/// - Register functions with `register(name, |ctx| Handler, triggers)` or
///   `register_fn(name, closure, triggers)`.
/// - `start()` spawns the dispatcher loop and returns immediately (non-blocking).
/// - `deliver(event)` injects an inbound event.
/// - `join()` awaits all function tasks to finish; typically used after `start()`.
/// - `run()` combines `start()` and `join()`, blocking until shutdown.
/// - `stop()` graceful shutdown; lets functions consume in-flight deliveries.
///
/// See also: [`Handler`], [`Context`], [`Trigger`].
pub struct Runtime<T: Trigger = Broadcast> {
    config: Arc<Config>,
    dispatcher: Arc<Mutex<Dispatcher<T>>>,
    pub(crate) sender: Sender<Arc<Delivery>>,
    tasks: JoinSet<Result<()>>,
    cancel_token: Arc<CancellationToken>,
    dispatcher_cancel_token: Arc<CancellationToken>,
}

impl<T: Trigger> Runtime<T> {
    /// Create a new runtime with the given configuration.
    pub fn new(config: Config) -> Self {
        let config = Arc::new(config);
        let (tx, rx) = channel::<Arc<Delivery>>(config.channel_size);
        let cancel_token = Arc::new(CancellationToken::new());
        let dispatcher_cancel_token = Arc::new(CancellationToken::new());
        let dispatcher = Dispatcher::new(rx, dispatcher_cancel_token.clone());
        Self {
            dispatcher: Arc::new(Mutex::new(dispatcher)),
            config,
            sender: tx,
            tasks: JoinSet::new(),
            cancel_token,
            dispatcher_cancel_token,
        }
    }

    /// Register a new function with a factory that receives a [`Context`].
    ///
    /// The `name` identifies the function in metadata and suppresses
    /// self-routing. `triggers` declare which deliveries the function
    /// receives. Fails once the dispatcher has started or when the name is
    /// already taken.
    pub fn register<H, F>(&mut self, name: &str, factory: F, triggers: &[T]) -> Result<()>
    where
        H: Handler,
        F: FnOnce(Context) -> H,
    {
        let mut dispatcher = self
            .dispatcher
            .try_lock()
            .map_err(|_| Error::DispatcherAlreadyStarted)?;

        let (tx, rx) = channel::<Arc<Delivery>>(self.config.channel_size);
        let id = FunctionId::new(Arc::from(name));

        let route = Route::new(id.clone(), triggers.iter().cloned().collect(), tx);
        dispatcher.add_route(route)?;

        let ctx = Context::new(id, self.sender.clone(), Arc::new(AtomicBool::new(true)));
        let mut task = FunctionTask {
            handler: factory(ctx.clone()),
            receiver: rx,
            ctx,
            max_events_per_tick: self.config.max_events_per_tick,
            cancel_token: self.cancel_token.clone(),
        };

        self.tasks.spawn(async move { task.run().await });
        tracing::debug!(function = name, "Function registered");

        Ok(())
    }

    /// Register a plain closure as a function; see [`FnHandler`].
    pub fn register_fn<F>(&mut self, name: &str, f: F, triggers: &[T]) -> Result<()>
    where
        F: FnMut(&Delivery) -> Result<()> + Send + 'static,
    {
        self.register(name, move |_ctx| FnHandler::new(f), triggers)
    }

    /// Start the dispatcher loop in a background task. This returns immediately.
    pub async fn start(&mut self) -> Result<()> {
        let dispatcher = self.dispatcher.clone();
        self.tasks
            .spawn(async move { dispatcher.lock().await.run().await });
        Ok(())
    }

    /// Waits until at least one of the function tasks completes then
    /// triggers a shutdown if not already requested.
    pub async fn join(&mut self) -> Result<()> {
        while let Some(res) = self.tasks.join_next().await {
            if !self.cancel_token.is_cancelled() {
                self.stop().await?;
                break;
            }
            res??;
        }
        Ok(())
    }

    /// Convenience method to start and then await completion of all tasks.
    /// Blocks until shutdown.
    pub async fn run(&mut self) -> Result<()> {
        self.start().await?;
        self.join().await
    }

    /// Inject an inbound event into the dispatcher.
    pub async fn deliver(&self, event: CloudEvent) -> Result<()> {
        self.sender
            .send(Delivery::new(event, "runtime").into())
            .await?;
        Ok(())
    }

    /// Request a graceful shutdown, then await all function tasks.
    ///
    /// # Shutdown Process
    ///
    /// 1. Waits for the dispatcher to receive all pending deliveries
    ///    (up to `Config::sleep_on_shutdown`)
    /// 2. Stops the dispatcher and waits for it to drain function queues
    /// 3. Cancels all function tasks and waits for them to finish
    pub async fn stop(&mut self) -> Result<()> {
        use tokio::time::*;
        let start = Instant::now();
        let timeout = self.config.sleep_on_shutdown;
        let max = self.sender.max_capacity();

        // 1. Wait for the main channel to drain
        while start.elapsed() < timeout {
            if self.sender.capacity() == max {
                break;
            }
            sleep(Duration::from_micros(100)).await;
        }

        // 2. Wait for the dispatcher to shut down gracefully
        self.dispatcher_cancel_token.cancel();
        let _ = self.dispatcher.lock().await;

        // 3. Stop the functions
        self.cancel_token.cancel();
        while let Some(res) = self.tasks.join_next().await {
            res??;
        }
        Ok(())
    }

    pub fn config(&self) -> &Config {
        self.config.as_ref()
    }
}

impl<T: Trigger> Default for Runtime<T> {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
