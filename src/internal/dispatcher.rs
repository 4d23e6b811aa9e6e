use std::sync::Arc;

use tokio::{select, sync::mpsc::Receiver};
use tokio_util::sync::CancellationToken;

use super::Route;
use crate::{Delivery, Error, Result, Trigger};

#[derive(Debug)]
pub(crate) struct Dispatcher<T: Trigger> {
    receiver: Receiver<Arc<Delivery>>,
    routes: Vec<Route<T>>,
    cancel_token: Arc<CancellationToken>,
}

impl<T: Trigger> Dispatcher<T> {
    pub fn new(
        receiver: Receiver<Arc<Delivery>>,
        cancel_token: Arc<CancellationToken>,
    ) -> Dispatcher<T> {
        Dispatcher {
            receiver,
            routes: Vec::new(),
            cancel_token,
        }
    }

    pub(crate) fn add_route(&mut self, route: Route<T>) -> Result<()> {
        if self.routes.iter().any(|r| r.id == route.id) {
            return Err(Error::FunctionAlreadyExists(route.id.clone()));
        }
        self.routes.push(route);
        Ok(())
    }

    fn route(&mut self, delivery: &Arc<Delivery>) -> Result<()> {
        let trigger = T::from_event(&delivery.event);
        self.routes
            .iter()
            .filter(|r| r.triggers.contains(&trigger) && r.id != delivery.meta.emitter)
            .try_for_each(|r| r.sender.try_send(delivery.clone()))?;
        Ok(())
    }

    pub async fn run(&mut self) -> Result<()> {
        loop {
            select! {
                _ = self.cancel_token.cancelled() => break,
                Some(delivery) = self.receiver.recv() => {
                    self.route(&delivery)?;
                },
                else => break
            }
        }
        self.shutdown().await;
        Ok(())
    }

    async fn shutdown(&mut self) {
        use tokio::time::*;

        for _ in 0..self.receiver.len() {
            if let Ok(delivery) = self.receiver.try_recv() {
                if let Err(err) = self.route(&delivery) {
                    tracing::error!(%err, "Delivery dropped during shutdown");
                }
            } else {
                break; // Queue drained faster than expected
            }
        }

        tokio::task::yield_now().await;

        let start = Instant::now();
        let timeout = Duration::from_millis(10);
        while !self.is_empty() && start.elapsed() < timeout {
            tokio::time::sleep(tokio::time::Duration::from_micros(100)).await;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.routes
            .iter()
            .all(|r| r.is_closed() || r.sender.capacity() == r.sender.max_capacity())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CloudEvent, EventType, FunctionId};
    use std::collections::HashSet;
    use tokio::sync::mpsc;

    fn make_route(name: &str, ty: &str, tx: mpsc::Sender<Arc<Delivery>>) -> Route<EventType> {
        Route::new(
            FunctionId::new(Arc::from(name)),
            HashSet::from([EventType::new(ty)]),
            tx,
        )
    }

    #[tokio::test]
    async fn test_add_route_rejects_duplicate_name() {
        let (tx, rx) = mpsc::channel(10);
        let cancel_token = Arc::new(CancellationToken::new());
        let mut dispatcher = Dispatcher::<EventType>::new(rx, cancel_token);
        assert!(dispatcher.add_route(make_route("fn1", "a", tx.clone())).is_ok());
        assert!(dispatcher.add_route(make_route("fn1", "b", tx.clone())).is_err());
    }

    #[tokio::test]
    async fn test_route_matches_event_type() {
        let (main_tx, main_rx) = mpsc::channel(10);
        let (tx, mut rx) = mpsc::channel::<Arc<Delivery>>(10);
        let cancel_token = Arc::new(CancellationToken::new());
        let mut dispatcher = Dispatcher::<EventType>::new(main_rx, cancel_token);
        dispatcher.add_route(make_route("fn1", "wqi.reading", tx)).unwrap();
        drop(main_tx);

        let matching = Arc::new(Delivery::new(CloudEvent::new("wqi.reading", "//s"), "runtime"));
        let other = Arc::new(Delivery::new(CloudEvent::new("other", "//s"), "runtime"));
        dispatcher.route(&matching).unwrap();
        dispatcher.route(&other).unwrap();

        let received = rx.try_recv().unwrap();
        assert_eq!(received.event.ty, "wqi.reading");
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_route_skips_own_emitter() {
        let (main_tx, main_rx) = mpsc::channel(10);
        let (tx, mut rx) = mpsc::channel::<Arc<Delivery>>(10);
        let cancel_token = Arc::new(CancellationToken::new());
        let mut dispatcher = Dispatcher::<EventType>::new(main_rx, cancel_token);
        dispatcher.add_route(make_route("fn1", "wqi.reading", tx)).unwrap();
        drop(main_tx);

        let own = Arc::new(Delivery::new(CloudEvent::new("wqi.reading", "//s"), "fn1"));
        dispatcher.route(&own).unwrap();
        assert!(rx.try_recv().is_err());
    }
}
