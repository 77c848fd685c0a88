//! Config file to probe run.

use std::io::Write;

use probe_config::{ConfigError, ProbeConfig, ResolvedConfig};
use probe_core::Dataset;
use probe_engine::{NoopObserver, run_plan};
use probe_webfetch::Fetcher;

use crate::common::{DATA_PATH, start_mirror};

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[tokio::test]
async fn config_file_points_the_probe_at_a_mirror() {
    let server = start_mirror(&[]).await;
    let file = write_config(&format!(
        r#"
[probe]
base_url = "{}{DATA_PATH}"
deadline_secs = 5

[http]
timeout_secs = 4
user_agent = "recoil-probe-ci"
allow_plain_http = true
"#,
        server.uri()
    ));

    let config = ProbeConfig::load_from(file.path()).unwrap().unwrap();
    let resolved = ResolvedConfig::from_config(Some(&config)).unwrap();
    assert_eq!(resolved.thresholds.deadline().as_secs(), 5);
    assert_eq!(resolved.thresholds.soft().as_secs(), 5);

    let fetcher = Fetcher::new(resolved.fetch).unwrap();
    let run = run_plan(&fetcher, &resolved.thresholds, &mut NoopObserver).await;

    assert!(run.all_succeeded());
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), Dataset::ALL.len());
    assert!(requests.iter().all(|r| {
        r.headers
            .get("user-agent")
            .is_some_and(|v| v.as_bytes() == b"recoil-probe-ci")
    }));
}

#[test]
fn plain_http_mirror_without_opt_in_is_rejected() {
    let file = write_config("[probe]\nbase_url = \"http://127.0.0.1:9/data/\"\n");

    let config = ProbeConfig::load_from(file.path()).unwrap().unwrap();
    let err = ResolvedConfig::from_config(Some(&config)).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { .. }), "{err}");
}

#[test]
fn unknown_keys_are_a_parse_error() {
    let file = write_config("[probe]\ndeadline = 10\n");

    let err = ProbeConfig::load_from(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert_eq!(err.path(), Some(file.path()));
}
