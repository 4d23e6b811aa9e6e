use std::{hash::Hash, ops::Deref, sync::Arc};

/// A lightweight handle identifying a registered function.
///
/// Created by [`Runtime::register`](crate::Runtime::register) from the
/// registration name, and attached to every delivery's [`Meta`](crate::Meta)
/// as the emitter. Handles are cheap to clone and compare by name.
#[derive(Debug, Clone)]
pub struct FunctionId(Arc<str>);

impl FunctionId {
    pub(crate) fn new(id: Arc<str>) -> Self {
        Self(id)
    }

    /// The function's name as registered with the runtime.
    #[inline]
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl PartialEq for FunctionId {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for FunctionId {}

impl std::fmt::Display for FunctionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Hash for FunctionId {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl Deref for FunctionId {
    type Target = str;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
