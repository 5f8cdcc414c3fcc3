use async_trait::async_trait;
use mockall::mock;

use crate::{
    model::entity::{InstanceRecord, ResourceShape},
    repository::{InstanceFilter, InstanceRecordRepo, ResourceShapeRepo},
};

mock! {
    pub InstanceRecordRepo {}
    #[async_trait]
    impl InstanceRecordRepo for InstanceRecordRepo {
        async fn list_instances(&self, filter: &InstanceFilter) -> anyhow::Result<Vec<InstanceRecord>>;
    }
}

mock! {
    pub ResourceShapeRepo {}
    #[async_trait]
    impl ResourceShapeRepo for ResourceShapeRepo {
        async fn get_resource_shape(&self, shape_ref: &str) -> anyhow::Result<Option<ResourceShape>>;
    }
}
