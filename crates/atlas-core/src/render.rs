use crate::country::CountryRecord;
use crate::error::RenderError;
use crate::repository::MirrorStatus;
use async_trait::async_trait;

/// Sink for the post-refresh summary card.
///
/// Rendering consumes final state only; implementations write the card
/// wherever they please, typically a PNG on disk.
#[async_trait]
pub trait SummaryRenderer: Send + Sync + 'static {
    async fn render(
        &self,
        top_countries: &[CountryRecord],
        status: &MirrorStatus,
    ) -> Result<(), RenderError>;
}
