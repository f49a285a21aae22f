use moodscope_core::{CoreError, ScrapeRequest};
use std::future::Future;

pub mod api;

#[cfg(test)]
mod tests;

pub use api::ScrapeClient;

/// Something that can carry out a scrape request.
///
/// Implementations only report whether the request succeeded; the response
/// body is not consumed.
pub trait ScrapeBackend: Send + Sync + 'static {
    fn submit(
        &self,
        request: ScrapeRequest,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;
}
