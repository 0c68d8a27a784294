use crate::support::sandbox;
use anyhow::Result;
use std::time::Duration;
use uniweb_harness::{
    HarnessError, InitOptions, PageOptions, PerformanceHelper, BULK_OPERATION,
};

#[tokio::test]
async fn test_bulk_pages_benchmark() -> Result<()> {
    let mut sb = sandbox().await?;
    sb.init_project("p", InitOptions::single_site()).await?;

    let mut perf = PerformanceHelper::new();
    let report = perf.benchmark_bulk_operations(&mut sb, 50).await?;

    assert_eq!(report.count, 50);
    assert!(report.avg_time_per_operation.is_finite());
    assert!(report.avg_time_per_operation >= 0.0);
    assert!(perf.measurement(BULK_OPERATION).is_some_and(|m| m.succeeded));
    for i in 0..50 {
        assert!(sb.file_exists(format!("pages/test-page-{}/page.yml", i)).await);
    }

    sb.cleanup().await;
    Ok(())
}

#[tokio::test]
async fn test_timed_operation_thresholds() -> Result<()> {
    let mut sb = sandbox().await?;
    let mut perf = PerformanceHelper::new();

    perf.time_operation("init", sb.init_project("p", InitOptions::single_site()))
        .await?;
    perf.expect_operation_faster_than("init", Duration::from_secs(60))?;

    let err = perf
        .expect_operation_faster_than("init", Duration::ZERO)
        .unwrap_err();
    assert!(matches!(err, HarnessError::TooSlow { .. }));

    let err = perf
        .expect_operation_faster_than("never-ran", Duration::from_secs(1))
        .unwrap_err();
    assert!(matches!(err, HarnessError::MissingMeasurement { .. }));

    sb.cleanup().await;
    Ok(())
}

#[tokio::test]
async fn test_failed_operation_still_measured() -> Result<()> {
    let mut sb = sandbox().await?;
    sb.init_project("p", InitOptions::single_site()).await?;
    let mut perf = PerformanceHelper::new();

    sb.add_page("dup", PageOptions::default()).await?;
    let result = perf
        .time_operation("dup", sb.add_page("dup", PageOptions::default()))
        .await;

    assert!(result.is_err());
    let measurement = perf.measurement("dup").copied();
    assert!(measurement.is_some_and(|m| !m.succeeded));
    assert_eq!(perf.report().len(), 1);

    sb.cleanup().await;
    Ok(())
}
