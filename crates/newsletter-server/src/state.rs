//! Shared handler state

use newsletter_assembler::NewsletterAssembler;
use std::sync::Arc;

/// State cloned into every handler
///
/// The assembler is stateless between requests, so it is shared without a lock.
#[derive(Clone)]
pub struct AppState {
    pub assembler: Arc<NewsletterAssembler>,
}

impl AppState {
    pub fn new(assembler: NewsletterAssembler) -> Self {
        Self {
            assembler: Arc::new(assembler),
        }
    }
}
