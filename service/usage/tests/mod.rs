use std::{collections::HashMap, sync::Arc};

use domain_usage::{
    exception::UsageException,
    mock::{MockInstanceRecordRepo, MockResourceShapeRepo},
    model::{
        entity::{InstanceRecord, ResourceShape},
        vo::{ActiveAccounting, ReportingWindow, TERMINATED_STATE},
    },
    repository::InstanceFilter,
    service::UsageReportService,
};
use service_usage::{UsageConfig, UsageReportServiceImpl};
use uuid::Uuid;

fn window() -> ReportingWindow {
    ReportingWindow::parse("2024-01-01T00:00:00", "2024-01-02T00:00:00").unwrap()
}

fn instance(tenant: &str, shape: &str, launched: &str, terminated: Option<&str>) -> InstanceRecord {
    InstanceRecord {
        id: Uuid::new_v4(),
        tenant_id: tenant.to_owned(),
        user_id: "joeuser".to_owned(),
        resource_shape_ref: shape.to_owned(),
        vcpus: 1,
        hostname: format!("{tenant}-server"),
        display_name: format!("{tenant}-server"),
        state_description: "active".to_owned(),
        launched_at: Some(launched.to_owned()),
        terminated_at: terminated.map(str::to_owned),
        ..Default::default()
    }
}

fn catalog() -> MockResourceShapeRepo {
    let shapes = HashMap::from([
        ("1".to_owned(), ResourceShape::new("1", "m1.tiny", 512, 0, 0, 1)),
        ("2".to_owned(), ResourceShape::new("2", "m1.small", 2048, 20, 0, 2)),
    ]);
    let mut repo = MockResourceShapeRepo::new();
    repo.expect_get_resource_shape().returning(move |r| Ok(shapes.get(r).cloned()));
    repo
}

fn service(
    instances: MockInstanceRecordRepo,
    shapes: MockResourceShapeRepo,
    config: UsageConfig,
) -> UsageReportServiceImpl {
    UsageReportServiceImpl::builder()
        .instance_repo(Arc::new(instances))
        .shape_repo(Arc::new(shapes))
        .config(config)
        .build()
}

#[tokio::test]
async fn list_usage_for_all_tenants() {
    let mut instances = MockInstanceRecordRepo::new();
    instances
        .expect_list_instances()
        .withf(|f| f.tenant_id.is_none() && f.active_in == Some(window()))
        .times(1)
        .returning(|_| {
            Ok(vec![
                instance("t2", "1", "2024-01-01T00:00:00", None),
                instance("t1", "2", "2024-01-01T12:00:00", None),
                instance("t1", "2", "2023-12-31T00:00:00", Some("2024-01-01 06:00:00")),
            ])
        });
    let service = service(instances, catalog(), UsageConfig::default());

    let summaries = service.list_usage(&window()).await.unwrap();

    assert_eq!(summaries.len(), 2);
    let t1 = &summaries[0];
    assert_eq!(t1.tenant_id, "t1");
    assert_eq!(t1.total_hours, 18.0);
    assert_eq!(t1.total_vcpu_hours, 36.0);
    assert_eq!(t1.total_ram_mb_hours, 36_864.0);
    assert_eq!(t1.total_disk_gb_hours, 360.0);
    assert_eq!(t1.active_instance_count, 1);
    assert_eq!(t1.lines[1].state, TERMINATED_STATE);
    assert_eq!(summaries[1].tenant_id, "t2");
    assert_eq!(summaries[1].total_ram_mb_hours, 512.0 * 24.0);
}

#[tokio::test]
async fn shapes_are_looked_up_once_per_reference() {
    let mut instances = MockInstanceRecordRepo::new();
    instances.expect_list_instances().returning(|_| {
        Ok(vec![
            instance("t1", "2", "2024-01-01T00:00:00", None),
            instance("t1", "2", "2024-01-01T01:00:00", None),
            instance("t2", "2", "2024-01-01T02:00:00", None),
        ])
    });
    let mut shapes = MockResourceShapeRepo::new();
    shapes
        .expect_get_resource_shape()
        .withf(|r| r == "2")
        .times(1)
        .returning(|_| Ok(Some(ResourceShape::new("2", "m1.small", 2048, 20, 0, 2))));
    let service = service(instances, shapes, UsageConfig::default());

    let summaries = service.list_usage(&window()).await.unwrap();

    assert_eq!(summaries.iter().map(|s| s.lines.len()).sum::<usize>(), 3);
}

#[tokio::test]
async fn get_usage_passes_tenant_to_store() {
    let mut instances = MockInstanceRecordRepo::new();
    instances
        .expect_list_instances()
        .withf(|f| f.tenant_id.as_deref() == Some("t1"))
        .returning(|_| Ok(vec![instance("t1", "2", "2024-01-01T12:00:00", None)]));
    let service = service(instances, catalog(), UsageConfig::default());

    let summary = service.get_usage("t1", &window()).await.unwrap();

    assert_eq!(summary.tenant_id, "t1");
    assert_eq!(summary.lines.len(), 1);
    assert_eq!(summary.total_hours, 12.0);
    assert_eq!(summary.total_vcpu_hours, 24.0);
    assert_eq!(summary.total_ram_mb_hours, 24_576.0);
    assert_eq!(summary.total_disk_gb_hours, 240.0);
}

#[tokio::test]
async fn get_usage_without_records_is_empty_summary() {
    let mut instances = MockInstanceRecordRepo::new();
    instances.expect_list_instances().returning(|_| Ok(vec![]));
    let service = service(instances, catalog(), UsageConfig::default());

    let summary = service.get_usage("t1", &window()).await.unwrap();

    assert_eq!(summary.tenant_id, "t1");
    assert_eq!(summary.window_start, window().start());
    assert_eq!(summary.window_stop, window().stop());
    assert_eq!(summary.total_hours, 0.0);
    assert_eq!(summary.active_instance_count, 0);
    assert!(summary.lines.is_empty());
}

#[tokio::test]
async fn get_usage_ignores_other_tenants_returned_by_store() {
    let mut instances = MockInstanceRecordRepo::new();
    instances.expect_list_instances().returning(|_| {
        Ok(vec![
            instance("t2", "1", "2024-01-01T00:00:00", None),
            instance("t1", "1", "2024-01-05T00:00:00", None),
        ])
    });
    let service = service(instances, catalog(), UsageConfig::default());

    let summary = service.get_usage("t1", &window()).await.unwrap();

    assert_eq!(summary.lines.len(), 1);
    assert_eq!(summary.lines[0].hours, 0.0);
    assert_eq!(summary.total_hours, 0.0);
}

#[tokio::test]
async fn window_pre_filter_can_be_disabled() {
    let mut instances = MockInstanceRecordRepo::new();
    instances
        .expect_list_instances()
        .withf(|f: &InstanceFilter| f.active_in.is_none())
        .returning(|_| Ok(vec![]));
    let config = UsageConfig {
        pre_filter_by_window: false,
        ..Default::default()
    };
    let service = service(instances, catalog(), config);

    assert!(service.list_usage(&window()).await.unwrap().is_empty());
}

#[tokio::test]
async fn legacy_accounting_from_config() {
    let mut instances = MockInstanceRecordRepo::new();
    instances.expect_list_instances().returning(|_| {
        Ok(vec![instance("t1", "2", "2024-01-01T00:00:00", Some("2024-01-01T01:00:00"))])
    });
    let config = UsageConfig {
        active_accounting: ActiveAccounting::Legacy,
        ..Default::default()
    };
    let service = service(instances, catalog(), config);

    let summary = service.get_usage("t1", &window()).await.unwrap();

    assert_eq!(summary.active_instance_count, 1);
    assert_eq!(summary.active_vcpus, 2);
}

#[tokio::test]
async fn unknown_shape_fails_request() {
    let mut instances = MockInstanceRecordRepo::new();
    instances.expect_list_instances().returning(|_| {
        Ok(vec![
            instance("t1", "1", "2024-01-01T00:00:00", None),
            instance("t1", "99", "2024-01-01T00:00:00", None),
        ])
    });
    let service = service(instances, catalog(), UsageConfig::default());

    let err = service.list_usage(&window()).await.unwrap_err();

    assert!(matches!(err, UsageException::UnknownResourceShape { shape_ref } if shape_ref == "99"));
}

#[tokio::test]
async fn malformed_timestamp_fails_request() {
    let mut instances = MockInstanceRecordRepo::new();
    instances
        .expect_list_instances()
        .returning(|_| Ok(vec![instance("t1", "1", "2024/01/01 00:00", None)]));
    let service = service(instances, catalog(), UsageConfig::default());

    let err = service.get_usage("t1", &window()).await.unwrap_err();

    assert!(matches!(err, UsageException::MalformedTimestamp { .. }));
}

#[tokio::test]
async fn store_failure_is_internal_error() {
    let mut instances = MockInstanceRecordRepo::new();
    instances
        .expect_list_instances()
        .returning(|_| Err(anyhow::anyhow!("connection refused")));
    let service = service(instances, MockResourceShapeRepo::new(), UsageConfig::default());

    let err = service.list_usage(&window()).await.unwrap_err();

    assert!(matches!(err, UsageException::InternalError { .. }));
}
