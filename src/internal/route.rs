use std::{collections::HashSet, sync::Arc};

use tokio::sync::mpsc::Sender;

use crate::{Delivery, FunctionId, Trigger};

#[derive(Debug)]
pub(crate) struct Route<T: Trigger> {
    pub id: FunctionId,
    pub triggers: HashSet<T>,
    pub sender: Sender<Arc<Delivery>>,
}

impl<T: Trigger> Route<T> {
    pub fn new(id: FunctionId, triggers: HashSet<T>, sender: Sender<Arc<Delivery>>) -> Route<T> {
        Route {
            id,
            triggers,
            sender,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

impl<T: Trigger> PartialEq for Route<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T: Trigger> Eq for Route<T> {}
