use std::{future::Future, sync::Arc};

use tokio::sync::Mutex;

use crate::{Delivery, Handler, Result};

/// Shared store of deliveries recorded by a [`Collector`].
///
/// Clone it before handing it to the collector and query the clone after
/// the runtime has stopped.
#[derive(Debug, Clone, Default)]
pub struct Records(Arc<Mutex<Vec<Delivery>>>);

impl Records {
    pub(crate) async fn push(&self, delivery: Delivery) {
        self.0.lock().await.push(delivery);
    }

    /// Copy of everything recorded so far.
    pub async fn snapshot(&self) -> Vec<Delivery> {
        self.0.lock().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.0.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.0.lock().await.is_empty()
    }

    pub async fn clear(&self) {
        self.0.lock().await.clear();
    }
}

/// A handler that records every delivery it receives.
pub struct Collector {
    records: Records,
}

impl Collector {
    pub fn new(records: Records) -> Self {
        Self { records }
    }
}

impl Handler for Collector {
    fn handle(&mut self, delivery: &Delivery) -> impl Future<Output = Result<()>> + Send {
        let delivery = delivery.clone();
        async move {
            self.records.push(delivery).await;
            Ok(())
        }
    }
}
