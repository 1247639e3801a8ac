use std::sync::Arc;
use std::time::Duration;

use crate::embedding::EmbeddingProvider;
use crate::search::DegreeSearch;
use crate::vectordb::HybridSearchBackend;

pub struct HandlerState<
    E: EmbeddingProvider + 'static,
    B: HybridSearchBackend + 'static,
> {
    pub search: Arc<DegreeSearch<E, B>>,

    /// Deadline for a whole search request.
    pub request_timeout: Duration,
}

impl<E, B> HandlerState<E, B>
where
    E: EmbeddingProvider + 'static,
    B: HybridSearchBackend + 'static,
{
    pub fn new(search: DegreeSearch<E, B>, request_timeout: Duration) -> Self {
        Self {
            search: Arc::new(search),
            request_timeout,
        }
    }
}

impl<E, B> Clone for HandlerState<E, B>
where
    E: EmbeddingProvider + 'static,
    B: HybridSearchBackend + 'static,
{
    fn clone(&self) -> Self {
        Self {
            search: Arc::clone(&self.search),
            request_timeout: self.request_timeout,
        }
    }
}
