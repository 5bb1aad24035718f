use async_trait::async_trait;
use mostrador_core::domain::ProductRecord;
use mostrador_core::errors::ProviderError;

/// Seam to the storefront catalog provider.
///
/// Implementations fetch one page of active products, filter them to the
/// sellable category and map them into normalized records. An `Err` here is
/// already a recovered state: the orchestrator treats it exactly like an
/// empty catalog and never lets it escape to the transport layer.
#[async_trait]
pub trait CatalogGateway: Send + Sync {
    async fn fetch_catalog(&self) -> Result<Vec<ProductRecord>, ProviderError>;
}
