pub mod instance_record;
pub mod resource_shape;

#[rustfmt::skip]
pub use {
    instance_record::InstanceRecord,
    resource_shape::ResourceShape,
};
