//! End-to-end tests: mock NameNode JMX servlet -> exporter -> /metrics.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use axum::routing::get;
use hadoop_exporter_common::{ExporterConfig, UpstreamConfig};
use hadoop_exporter_framework::{ExporterArgs, HttpServer, create_router};
use hadoop_namenode_exporter::{DEFAULT_URL, NameNodeExporter};
use serde_json::json;
use tokio::sync::watch;
use tower::ServiceExt;

async fn spawn_upstream(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

async fn serve_jmx(body: String) -> SocketAddr {
    let router = Router::new().route("/jmx", get(move || async move { body }));
    spawn_upstream(router).await
}

fn exporter_for(addr: SocketAddr, cluster: &str) -> Arc<NameNodeExporter> {
    let config = ExporterConfig {
        cluster: cluster.to_string(),
        upstream: UpstreamConfig {
            url: format!("http://{}/jmx/", addr),
            timeout_secs: 2,
        },
        ..Default::default()
    };
    Arc::new(NameNodeExporter::new(&config).unwrap())
}

async fn scrape(exporter: Arc<NameNodeExporter>) -> (StatusCode, String) {
    let response = create_router(exporter, "/metrics")
        .oneshot(Request::get("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

fn sample_lines(body: &str) -> Vec<&str> {
    body.lines()
        .filter(|l| !l.starts_with('#') && !l.trim().is_empty())
        .collect()
}

#[tokio::test]
async fn test_cluster_health_end_to_end() {
    let addr = serve_jmx(
        r#"{"beans":[{"name":"Hadoop:service=NameNode,name=FSNamesystemState","MissingBlocks":3,"CapacityTotal":1000}]}"#
            .to_string(),
    )
    .await;

    let (status, body) = scrape(exporter_for(addr, "prod")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("hadoop_namenode_missing_blocks{cluster=\"prod\"} 3\n"));
    assert!(body.contains("hadoop_namenode_capacity_total{cluster=\"prod\"} 1000\n"));
    assert_eq!(sample_lines(&body).len(), 2, "unexpected samples:\n{}", body);

    // Declared but empty families are still described.
    assert!(body.contains("# TYPE hadoop_namenode_corrupt_blocks gauge"));
    assert!(body.contains("# TYPE hadoop_datanode_node_up gauge"));
}

#[tokio::test]
async fn test_datanodes_end_to_end() {
    let live = json!({
        "dn1.example:9866": {
            "xferaddr": "10.0.0.1:9866",
            "lastContact": 0,
            "nonDfsUsedSpace": 100,
            "capacity": 1000,
            "numBlocks": 12,
            "used": 300,
            "remaining": 600,
            "blockPoolUsed": 300,
            "blockPoolUsedPercent": 30.5
        }
    });
    let dead = json!({
        "dn2.example:9866": {"xferaddr": "10.0.0.2:9866", "lastContact": 1200}
    });
    let payload = json!({
        "beans": [{
            "name": "Hadoop:service=NameNode,name=NameNodeInfo",
            "LiveNodes": live.to_string(),
            "DeadNodes": dead.to_string()
        }]
    });
    let addr = serve_jmx(payload.to_string()).await;

    let (status, body) = scrape(exporter_for(addr, "prod")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(
        "hadoop_datanode_node_up{cluster=\"prod\",host=\"dn1.example:9866\",xferaddr=\"10.0.0.1:9866\"} 1\n"
    ));
    assert!(body.contains(
        "hadoop_datanode_node_up{cluster=\"prod\",host=\"dn2.example:9866\",xferaddr=\"10.0.0.2:9866\"} 0\n"
    ));
    assert!(body.contains(
        "hadoop_datanode_node_last_contact{cluster=\"prod\",host=\"dn2.example:9866\",xferaddr=\"10.0.0.2:9866\"} 1200\n"
    ));
    assert!(body.contains("hadoop_datanode_node_block_pool_used_percent{"));
    assert!(
        !body.contains("hadoop_datanode_node_capacity{cluster=\"prod\",host=\"dn2.example:9866\""),
        "dead node without capacity must not be sampled"
    );
    // 9 live samples + up and lastContact for the dead node.
    assert_eq!(sample_lines(&body).len(), 11, "unexpected samples:\n{}", body);
}

#[tokio::test]
async fn test_upstream_unavailable_yields_empty_families() {
    let router = Router::new().route(
        "/jmx",
        get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "unavailable") }),
    );
    let addr = spawn_upstream(router).await;

    let (status, body) = scrape(exporter_for(addr, "prod")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(sample_lines(&body).is_empty(), "unexpected samples:\n{}", body);
    assert!(body.contains("# TYPE hadoop_namenode_missing_blocks gauge"));
    assert!(body.contains("# TYPE hadoop_datanode_node_used gauge"));
}

#[tokio::test]
async fn test_invalid_json_fails_scrape() {
    let addr = serve_jmx("this is not json".to_string()).await;

    let (status, _) = scrape(exporter_for(addr, "prod")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_repeated_scrapes_do_not_accumulate() {
    let addr = serve_jmx(
        r#"{"beans":[{"name":"Hadoop:service=NameNode,name=FSNamesystem","FilesTotal":7}]}"#
            .to_string(),
    )
    .await;
    let exporter = exporter_for(addr, "prod");

    let (_, first) = scrape(exporter.clone()).await;
    let (_, second) = scrape(exporter).await;

    assert_eq!(first, second);
    assert_eq!(sample_lines(&second).len(), 1);
}

#[tokio::test]
async fn test_http_server_serves_live_state() {
    let addr = serve_jmx(
        r#"{"beans":[{"name":"Hadoop:service=NameNode,name=FSNamesystemState","StaleDataNodes":2}]}"#
            .to_string(),
    )
    .await;

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let server_addr = listener.local_addr().unwrap();
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let server = HttpServer::new(
        exporter_for(addr, "prod"),
        server_addr,
        "/metrics".to_string(),
    );
    let server_handle = tokio::spawn(async move { server.serve(listener, shutdown_rx).await });

    let response = reqwest::Client::new()
        .get(format!("http://{}/metrics", server_addr))
        .send()
        .await
        .unwrap();

    assert!(response.status().is_success());
    let body = response.text().await.unwrap();
    assert!(body.contains("hadoop_namenode_stale_data_nodes{cluster=\"prod\"} 2"));

    shutdown_tx.send(true).unwrap();
    let _ = tokio::time::timeout(Duration::from_secs(1), server_handle).await;
}

#[tokio::test]
async fn test_default_flags_build_a_working_exporter() {
    let addr = serve_jmx(
        r#"{"beans":[{"name":"Hadoop:service=NameNode,name=FSNamesystem","BlocksTotal":42}]}"#
            .to_string(),
    )
    .await;

    let defaults = ExporterArgs {
        cluster: Some("prod".to_string()),
        ..Default::default()
    }
    .into_config(DEFAULT_URL)
    .unwrap();
    assert_eq!(defaults.upstream.url, DEFAULT_URL);
    assert_eq!(defaults.upstream.timeout_secs, 10);
    NameNodeExporter::new(&defaults).unwrap();

    let args = ExporterArgs {
        cluster: Some("prod".to_string()),
        url: Some(format!("http://{}/jmx", addr)),
        ..Default::default()
    };
    let config = args.into_config(DEFAULT_URL).unwrap();
    let exporter = Arc::new(NameNodeExporter::new(&config).unwrap());

    let (status, body) = scrape(exporter).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("hadoop_namenode_blocks_total{cluster=\"prod\"} 42\n"));
}
