use async_trait::async_trait;

use crate::model::entity::ResourceShape;

#[async_trait]
pub trait ResourceShapeRepo: Send + Sync {
    /// Look up a catalog entry, `None` when the reference is unknown.
    async fn get_resource_shape(&self, shape_ref: &str) -> anyhow::Result<Option<ResourceShape>>;
}
