use alice_architecture::model::AggregateRoot;
use serde::{Deserialize, Serialize};

/// Catalog entry describing the resources an instance was created with.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, AggregateRoot)]
#[serde(rename_all = "camelCase")]
pub struct ResourceShape {
    /// Reference instances use to point at this shape.
    pub id: String,
    pub name: String,
    pub memory_size_mb: u64,
    pub disk_size_gb: u64,
    pub vcpus: u32,
}

impl ResourceShape {
    /// Builds a shape from a catalog entry that splits root and ephemeral disk.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        memory_size_mb: u64,
        root_gb: u64,
        ephemeral_gb: u64,
        vcpus: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            memory_size_mb,
            disk_size_gb: root_gb.saturating_add(ephemeral_gb),
            vcpus,
        }
    }
}
