//! Result listing against a paginated mock store.

use std::sync::Arc;

use cumulus::clients::ObjectStore;
use cumulus::mock::{MockCompute, MockStore, StaticConfiguration};
use cumulus::{CloudClients, Settings, SparkJobProvisioner};

const SETTINGS_TOML: &str = r#"
    environment = "stage"
    region = "us-west-2"
    master_instance_type = "c3.4xlarge"
    worker_instance_type = "c3.4xlarge"
    ec2_key_name = "cumulus-key"
    code_bucket = "cumulus-code"
    log_bucket = "cumulus-logs"
    public_data_bucket = "cumulus-data-public"
    private_data_bucket = "cumulus-data-private"
    spark_emr_bucket = "cumulus-spark-emr"
    instance_profile = "spark-instance-profile"
    instance_app_tag = "cumulus-app"
    accounting_app_tag = "spark-analysis"
    accounting_type_tag = "adhoc"
"#;

fn provisioner_with_store(store: MockStore) -> SparkJobProvisioner {
    let settings: Settings = toml::from_str(SETTINGS_TOML).unwrap();
    let clients = CloudClients::new(
        Arc::new(MockCompute::new()),
        Arc::new(store),
        Arc::new(StaticConfiguration::empty()),
    );
    SparkJobProvisioner::new(Arc::new(settings), clients)
}

#[test]
fn results_grouped_by_second_path_segment() {
    let store = MockStore::new();
    for key in [
        "jobA/groupX/f1",
        "jobA/groupX/f2",
        "jobA/groupY/f3",
        "jobA/f4",
    ] {
        store
            .put_object("cumulus-data-private", key, Vec::new())
            .unwrap();
    }
    let provisioner = provisioner_with_store(store);

    let index = provisioner.results("jobA", false).unwrap();

    assert_eq!(index.len(), 2);
    assert_eq!(
        index.get("groupX").unwrap(),
        &["jobA/groupX/f1".to_string(), "jobA/groupX/f2".to_string()]
    );
    assert_eq!(index.get("groupY").unwrap(), &["jobA/groupY/f3".to_string()]);
    // key without a group segment is silently omitted
    assert!(index.get("f4").is_none());
}

#[test]
fn results_drain_every_page_before_returning() {
    let store = MockStore::with_page_size(2);
    for i in 0..7 {
        store
            .put_object(
                "cumulus-data-private",
                &format!("jobB/out/part-{:05}", i),
                Vec::new(),
            )
            .unwrap();
    }
    let provisioner = provisioner_with_store(store);

    let index = provisioner.results("jobB", false).unwrap();

    assert_eq!(index.len(), 1);
    assert_eq!(index.get("out").unwrap().len(), 7);
}

#[test]
fn results_only_include_the_requested_job() {
    let store = MockStore::new();
    store
        .put_object("cumulus-data-private", "jobC/out/f1", Vec::new())
        .unwrap();
    store
        .put_object("cumulus-data-private", "jobCC/out/f1", Vec::new())
        .unwrap();
    let provisioner = provisioner_with_store(store);

    let index = provisioner.results("jobC", false).unwrap();

    assert_eq!(index.len(), 1);
    assert_eq!(index.get("out").unwrap(), &["jobC/out/f1".to_string()]);
}

#[test]
fn results_bucket_follows_visibility() {
    let store = MockStore::new();
    store
        .put_object("cumulus-data-public", "jobD/out/f1", Vec::new())
        .unwrap();
    let provisioner = provisioner_with_store(store);

    let public = provisioner.results("jobD", true).unwrap();
    assert_eq!(public.len(), 1);

    // same job in the private bucket has nothing
    let private = provisioner.results("jobD", false).unwrap();
    assert!(private.is_empty());
}

#[test]
fn empty_listing_returns_empty_index() {
    let provisioner = provisioner_with_store(MockStore::new());

    let index = provisioner.results("jobE", false).unwrap();

    assert!(index.is_empty());
    assert_eq!(index.iter().count(), 0);
}
