mod instance_record;
mod resource_shape;

#[rustfmt::skip]
pub use {
    instance_record::{InstanceFilter, InstanceRecordRepo},
    resource_shape::ResourceShapeRepo,
};
