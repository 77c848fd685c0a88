//! Shared test utilities and fixtures
//!
//! A local mirror of the dataset directory served by wiremock.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::time::Duration;

use probe_core::Dataset;
use probe_webfetch::{FetchSettings, Fetcher};
use serde_pickle::SerOptions;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const DATA_PATH: &str = "/data/Parsed_Data/";

pub const NODES_CSV: &str = "\
node_id,name,lat,lon,mode
1,Knoxville,35.96,-83.92,H
2,Memphis,35.15,-90.05,R
3,Paducah,37.08,-88.60,W
";

/// Adjacency map shaped like the per-mode edge files.
pub fn adjacency_pickle() -> Vec<u8> {
    let mut adjacency: BTreeMap<i64, Vec<i64>> = BTreeMap::new();
    adjacency.insert(1, vec![2, 3]);
    adjacency.insert(2, vec![1]);
    adjacency.insert(3, vec![1]);
    serde_pickle::to_vec(&adjacency, SerOptions::new()).unwrap()
}

/// Origin/destination demand keyed by node pair.
pub fn demand_pickle() -> Vec<u8> {
    let mut demand: BTreeMap<String, f64> = BTreeMap::new();
    demand.insert("1-2".to_string(), 120.5);
    demand.insert("2-3".to_string(), 64.0);
    serde_pickle::to_vec(&demand, SerOptions::new()).unwrap()
}

pub fn body_for(dataset: Dataset) -> Vec<u8> {
    match dataset {
        Dataset::Nodes => NODES_CSV.as_bytes().to_vec(),
        Dataset::Demand => demand_pickle(),
        Dataset::HighwayEdges | Dataset::RailwayEdges | Dataset::WaterwayEdges => {
            adjacency_pickle()
        }
    }
}

pub fn file_path(dataset: Dataset) -> String {
    format!("{DATA_PATH}{}", dataset.file_name())
}

/// Serve `dataset` with a 200 after `delay`.
pub async fn mount_dataset(server: &MockServer, dataset: Dataset, delay: Duration) {
    Mock::given(method("GET"))
        .and(path(file_path(dataset)))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(body_for(dataset))
                .set_delay(delay),
        )
        .mount(server)
        .await;
}

/// Answer requests for `dataset` with `status` and no body.
pub async fn mount_status(server: &MockServer, dataset: Dataset, status: u16) {
    Mock::given(method("GET"))
        .and(path(file_path(dataset)))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

/// Mirror with every dataset served immediately, except those in `skip`.
pub async fn start_mirror(skip: &[Dataset]) -> MockServer {
    let server = MockServer::start().await;
    for dataset in Dataset::ALL {
        if !skip.contains(&dataset) {
            mount_dataset(&server, dataset, Duration::ZERO).await;
        }
    }
    server
}

pub fn mirror_settings(server: &MockServer) -> FetchSettings {
    let mut settings = FetchSettings::with_base_url(&format!("{}{DATA_PATH}", server.uri())).unwrap();
    settings.allow_plain_http = true;
    settings.timeout = Duration::from_secs(10);
    settings.connect_timeout = Duration::from_secs(2);
    settings
}

pub fn mirror_fetcher(server: &MockServer) -> Fetcher {
    Fetcher::new(mirror_settings(server)).unwrap()
}
