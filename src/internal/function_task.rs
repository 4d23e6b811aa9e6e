use std::sync::Arc;

use tokio::{select, sync::mpsc::Receiver};
use tokio_util::sync::CancellationToken;

use crate::{Context, Delivery, Handler, Result};

pub(crate) struct FunctionTask<H: Handler> {
    pub(crate) handler: H,
    pub(crate) receiver: Receiver<Arc<Delivery>>,
    pub(crate) ctx: Context,
    pub(crate) max_events_per_tick: usize,
    pub(crate) cancel_token: Arc<CancellationToken>,
}

impl<H: Handler> FunctionTask<H> {
    pub async fn run(&mut self) -> Result<()> {
        self.handler.on_start().await?;
        loop {
            select! {
                _ = self.cancel_token.cancelled() => {
                    // Consume what the dispatcher already routed to us
                    self.drain().await?;
                    break;
                },
                maybe = self.receiver.recv() => {
                    match maybe {
                        Some(delivery) => self.process_batch(delivery).await?,
                        None => break,
                    }
                }
            }
            if !self.ctx.is_alive() {
                break;
            }
        }
        self.handler.on_shutdown().await
    }

    async fn process_batch(&mut self, first: Arc<Delivery>) -> Result<()> {
        self.process(first).await?;
        let mut cnt = 1;
        while cnt < self.max_events_per_tick {
            let Ok(delivery) = self.receiver.try_recv() else {
                break;
            };
            self.process(delivery).await?;
            cnt += 1;
        }
        tokio::task::yield_now().await;
        Ok(())
    }

    async fn process(&mut self, delivery: Arc<Delivery>) -> Result<()> {
        if let Err(e) = self.handler.handle(&delivery).await {
            self.handler.on_error(e)?;
        }
        Ok(())
    }

    async fn drain(&mut self) -> Result<()> {
        while let Ok(delivery) = self.receiver.try_recv() {
            self.process(delivery).await?;
        }
        Ok(())
    }
}
