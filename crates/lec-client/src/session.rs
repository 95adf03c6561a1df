//! Per-session context shared by the dispatcher and coordinators.
//!
//! Built once when the console starts and passed by reference; it replaces a
//! process-wide "last working endpoint" slot.

use crate::catalog::EndpointCatalog;
use crate::dispatcher::RequestDispatcher;
use crate::memory::EndpointMemory;
use crate::transport::Transport;

#[derive(Debug, Default)]
pub struct SessionContext {
    catalog: EndpointCatalog,
    memory: EndpointMemory,
}

impl SessionContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn catalog(&self) -> &EndpointCatalog {
        &self.catalog
    }

    #[must_use]
    pub const fn memory(&self) -> &EndpointMemory {
        &self.memory
    }

    /// Dispatcher bound to this session's catalog and memory.
    pub const fn dispatcher<'a, T: Transport>(&'a self, transport: &'a T) -> RequestDispatcher<'a, T> {
        RequestDispatcher::new(self, transport)
    }
}
