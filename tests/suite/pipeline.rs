//! End-to-end probe passes against a local mirror.

use std::time::Duration;

use probe_core::{Dataset, report};
use probe_engine::{NoopObserver, run_plan};
use probe_types::{Status, Thresholds, Verdict};

use probe_webfetch::Fetcher;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::common::{
    file_path, mirror_fetcher, mirror_settings, mount_dataset, mount_status, start_mirror,
};

#[tokio::test]
async fn full_pass_against_healthy_mirror() {
    let server = start_mirror(&[]).await;
    let fetcher = mirror_fetcher(&server);

    let run = run_plan(&fetcher, &Thresholds::default(), &mut NoopObserver).await;

    assert_eq!(run.len(), 5);
    assert!(run.all_succeeded());
    for (_, record) in run.entries() {
        assert_eq!(record.verdict(), Verdict::Ok, "{}", record.name());
    }

    let nodes = run.record(Dataset::Nodes).and_then(|r| r.result()).unwrap();
    assert_eq!(nodes.describe(), "3 rows x 5 columns");
    let highway = run
        .record(Dataset::HighwayEdges)
        .and_then(|r| r.result())
        .unwrap();
    assert_eq!(highway.describe(), "dict with 3 entries");
    let demand = run.record(Dataset::Demand).and_then(|r| r.result()).unwrap();
    assert_eq!(demand.describe(), "dict with 2 entries");

    assert!(report::estimates(&run).contains("(loads everything)"));
}

#[tokio::test]
async fn stalled_download_times_out_and_the_rest_still_run() {
    let server = start_mirror(&[Dataset::RailwayEdges]).await;
    mount_dataset(&server, Dataset::RailwayEdges, Duration::from_secs(5)).await;
    let fetcher = mirror_fetcher(&server);
    let thresholds = Thresholds::new(Duration::from_millis(500), Duration::from_secs(1)).unwrap();

    let run = run_plan(&fetcher, &thresholds, &mut NoopObserver).await;

    assert_eq!(run.len(), 5);
    for (dataset, record) in run.entries() {
        if *dataset == Dataset::RailwayEdges {
            assert_eq!(record.status(), Status::Timeout);
            assert!(record.result().is_none());
            assert!(record.elapsed() >= Duration::from_secs(1));
            assert!(record.elapsed() < Duration::from_secs(3), "{:?}", record.elapsed());
        } else {
            assert_eq!(record.status(), Status::Success, "{dataset:?}");
        }
    }

    let estimates = report::estimates(&run);
    assert!(estimates.contains("Example 4 (Dataset Stats): N/A (some operations timed out)"));
}

#[tokio::test]
async fn missing_file_is_an_error_record() {
    let server = start_mirror(&[Dataset::WaterwayEdges]).await;
    mount_status(&server, Dataset::WaterwayEdges, 404).await;
    let fetcher = mirror_fetcher(&server);

    let run = run_plan(&fetcher, &Thresholds::default(), &mut NoopObserver).await;

    let waterway = run.record(Dataset::WaterwayEdges).unwrap();
    assert_eq!(waterway.status(), Status::Error);
    let message = waterway.outcome().error_message().unwrap();
    assert!(message.contains("404"), "{message}");
    assert!(message.contains("W-adj.pickle"), "{message}");

    assert!(run.record(Dataset::Demand).unwrap().is_success());
    assert!(!run.all_succeeded());
}

#[tokio::test]
async fn network_timeout_below_deadline_is_an_error() {
    let server = start_mirror(&[Dataset::Demand]).await;
    mount_dataset(&server, Dataset::Demand, Duration::from_secs(5)).await;

    let mut settings = mirror_settings(&server);
    settings.timeout = Duration::from_millis(300);
    let fetcher = Fetcher::new(settings).unwrap();

    let run = run_plan(&fetcher, &Thresholds::default(), &mut NoopObserver).await;

    let demand = run.record(Dataset::Demand).unwrap();
    assert_eq!(demand.status(), Status::Error);
    let message = demand.outcome().error_message().unwrap();
    assert!(message.contains("network timeout"), "{message}");
}

#[tokio::test]
async fn garbage_body_is_a_decode_error() {
    let server = start_mirror(&[Dataset::HighwayEdges]).await;
    Mock::given(method("GET"))
        .and(path(file_path(Dataset::HighwayEdges)))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>Service Unavailable</html>"))
        .mount(&server)
        .await;
    let fetcher = mirror_fetcher(&server);

    let run = run_plan(&fetcher, &Thresholds::default(), &mut NoopObserver).await;

    let highway = run.record(Dataset::HighwayEdges).unwrap();
    assert_eq!(highway.status(), Status::Error);
    assert!(
        highway
            .outcome()
            .error_message()
            .unwrap()
            .starts_with("failed to decode pickle")
    );
}
