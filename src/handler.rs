use core::marker::Send;
use std::future::Future;

use crate::{Delivery, Error, Result};

/// Core trait implemented by user-defined event handlers.
///
/// A handler processes deliveries routed to it by the dispatcher, with
/// optional lifecycle hooks in `on_start` and `on_shutdown`.
///
/// Implementors typically hold any state they need, and use the
/// runtime-provided `Context` (via a factory passed to
/// `Runtime::register`) to re-emit events or stop gracefully.
///
/// Ergonomics:
/// - Although the trait methods return futures, you can implement them as
///   `async fn` with a simple `Result<()>` return. The compiler will produce
///   the appropriate future type automatically.
/// - No `#[async_trait]` is required.
/// - A plain function can be registered without implementing this trait at
///   all; see [`FnHandler`] and
///   [`Runtime::register_fn`](crate::Runtime::register_fn).
///
/// See also: [`crate::Context`], [`crate::Runtime`].
pub trait Handler: Send + 'static {
    /// Handle a single inbound delivery.
    ///
    /// Equivalent to:
    ///
    /// ```ignore
    /// async fn handle(&mut self, delivery: &Delivery) -> Result<()>;
    /// ```
    ///
    /// Called once per delivery routed to this function. Return `Ok(())`
    /// when processing succeeds, or an error to signal failure.
    fn handle(&mut self, delivery: &Delivery) -> impl Future<Output = Result<()>> + Send;

    /// Lifecycle hook called once before the delivery loop starts.
    fn on_start(&mut self) -> impl Future<Output = Result<()>> + Send {
        async { Ok(()) }
    }

    /// Lifecycle hook called once after the delivery loop stops.
    fn on_shutdown(&mut self) -> impl Future<Output = Result<()>> + Send {
        async { Ok(()) }
    }

    /// Called when an error is returned by [`handle`](Handler::handle).
    ///
    /// Return `Ok(())` to swallow the error and continue processing, or
    /// `Err(error)` to propagate and stop the function.
    ///
    /// # Default Behavior
    ///
    /// By default, all errors propagate: the function stops and the fault
    /// surfaces through [`Runtime::join`](crate::Runtime::join), leaving any
    /// retry or dead-lettering policy to the hosting layer.
    fn on_error(&self, error: Error) -> Result<()> {
        Err(error)
    }
}

/// Adapter turning a plain closure into a [`Handler`].
///
/// Mirrors registering a bare function with the hosting framework: no state,
/// no lifecycle, just one call per delivery.
pub struct FnHandler<F> {
    f: F,
}

impl<F> FnHandler<F>
where
    F: FnMut(&Delivery) -> Result<()> + Send + 'static,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> Handler for FnHandler<F>
where
    F: FnMut(&Delivery) -> Result<()> + Send + 'static,
{
    fn handle(&mut self, delivery: &Delivery) -> impl Future<Output = Result<()>> + Send {
        let res = (self.f)(delivery);
        async move { res }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CloudEvent;

    #[tokio::test]
    async fn test_fn_handler_invokes_closure_per_delivery() {
        let mut count = 0u32;
        let mut handler = FnHandler::new(move |_delivery| {
            count += 1;
            if count > 2 { Err(Error::External("too many".into())) } else { Ok(()) }
        });
        let delivery = Delivery::new(CloudEvent::new("t", "//s"), "runtime");
        assert!(handler.handle(&delivery).await.is_ok());
        assert!(handler.handle(&delivery).await.is_ok());
        assert!(handler.handle(&delivery).await.is_err());
    }

    #[tokio::test]
    async fn test_fn_handler_propagates_closure_error() {
        let mut handler = FnHandler::new(|_delivery| {
            Err(Error::External(std::sync::Arc::from("boom")))
        });
        let delivery = Delivery::new(CloudEvent::new("t", "//s"), "runtime");
        assert!(handler.handle(&delivery).await.is_err());
    }
}
