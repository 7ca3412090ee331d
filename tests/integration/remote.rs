use country_codes::{countries::bundled, DataSource, Error, FieldKind};
use pretty_assertions::assert_eq;
use std::net::TcpListener;
use std::time::Duration;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

use crate::integration::utils::{
    countries_endpoint, read_fixture, remote_directory, run_blocking, setup_tracing,
};

async fn mount_response(server: &MockServer, response: ResponseTemplate, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path("/v2/all"))
        .respond_with(response)
        .expect(expected_calls)
        .mount(server)
        .await;
}

fn fixture_response() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(
        read_fixture("restcountries_response.json").into_bytes(),
        "application/json",
    )
}

#[tokio::test]
async fn successful_fetch_replaces_bundled_table() {
    setup_tracing();
    let server = MockServer::start().await;
    mount_response(&server, fixture_response(), 4).await;
    let endpoint = countries_endpoint(&server);

    let (all, france, kosovo, usa) = run_blocking(move || {
        let directory = remote_directory(&endpoint, 5);
        (
            directory.list_all(DataSource::Remote),
            directory.find(FieldKind::Alpha3, " fra ", DataSource::Remote),
            directory.find(FieldKind::Alpha3, "unk", DataSource::Remote),
            directory.find(FieldKind::Alpha2, "US", DataSource::Remote),
        )
    })
    .await;

    let codes: Vec<&str> = all.iter().map(|c| c.alpha2.as_str()).collect();
    assert_eq!(codes, vec!["NO", "FR", "XK", "JP"]);
    assert_eq!(france.unwrap().un_code, "250");
    let kosovo = kosovo.unwrap();
    assert_eq!(kosovo.native_name, "Republika e Kosovës");
    assert_eq!(kosovo.un_code, "");
    // Only in the bundled table.
    assert_eq!(usa, None);
}

#[tokio::test]
async fn remote_results_are_not_cached() {
    setup_tracing();
    let server = MockServer::start().await;
    mount_response(&server, fixture_response(), 2).await;
    let endpoint = countries_endpoint(&server);

    let (first, second, bundled_after) = run_blocking(move || {
        let directory = remote_directory(&endpoint, 5);
        (
            directory.list_all(DataSource::Remote),
            directory.list_all(DataSource::Remote),
            directory.list_all(DataSource::Bundled),
        )
    })
    .await;

    assert_eq!(first, second);
    assert_eq!(bundled_after, bundled::all());
}

#[tokio::test]
async fn server_error_yields_no_data() {
    setup_tracing();
    let server = MockServer::start().await;
    mount_response(&server, ResponseTemplate::new(500), 3).await;
    let endpoint = countries_endpoint(&server);

    let (all, found, strict) = run_blocking(move || {
        let directory = remote_directory(&endpoint, 5);
        (
            directory.list_all(DataSource::Remote),
            directory.find(FieldKind::Alpha2, "FR", DataSource::Remote),
            directory.try_list_remote(),
        )
    })
    .await;

    assert!(all.is_empty());
    assert_eq!(found, None);
    match strict {
        Err(Error::RemoteStatus(status)) => assert_eq!(status.as_u16(), 500),
        other => panic!("Expected RemoteStatus, got {:?}", other),
    }
}

#[tokio::test]
async fn non_200_success_status_yields_no_data() {
    setup_tracing();
    let server = MockServer::start().await;
    let response = ResponseTemplate::new(203).set_body_raw(
        read_fixture("restcountries_response.json").into_bytes(),
        "application/json",
    );
    mount_response(&server, response, 1).await;
    let endpoint = countries_endpoint(&server);

    let all = run_blocking(move || remote_directory(&endpoint, 5).list_all(DataSource::Remote)).await;

    assert!(all.is_empty());
}

#[tokio::test]
async fn empty_body_yields_no_data() {
    setup_tracing();
    let server = MockServer::start().await;
    mount_response(&server, ResponseTemplate::new(200), 3).await;
    let endpoint = countries_endpoint(&server);

    let (all, found, strict) = run_blocking(move || {
        let directory = remote_directory(&endpoint, 5);
        (
            directory.list_all(DataSource::Remote),
            directory.find(FieldKind::UnCode, "250", DataSource::Remote),
            directory.try_list_remote(),
        )
    })
    .await;

    assert!(all.is_empty());
    assert_eq!(found, None);
    assert!(matches!(strict, Err(Error::EmptyRemoteBody)));
}

#[tokio::test]
async fn malformed_body_yields_no_data() {
    setup_tracing();
    let server = MockServer::start().await;
    let response = ResponseTemplate::new(200)
        .set_body_raw(r#"{"status": 404, "message": "Not Found"}"#, "application/json");
    mount_response(&server, response, 2).await;
    let endpoint = countries_endpoint(&server);

    let (all, strict) = run_blocking(move || {
        let directory = remote_directory(&endpoint, 5);
        (directory.list_all(DataSource::Remote), directory.try_list_remote())
    })
    .await;

    assert!(all.is_empty());
    assert!(matches!(strict, Err(Error::MalformedRemoteData(_))));
}

#[tokio::test]
async fn one_misshapen_entry_rejects_the_whole_response() {
    setup_tracing();
    let server = MockServer::start().await;
    let body = r#"[
        {"name": "France", "nativeName": "France", "alpha2Code": "FR", "alpha3Code": "FRA", "numericCode": "250"},
        {"name": "Nowhere", "alpha2Code": "NW"}
    ]"#;
    let response = ResponseTemplate::new(200).set_body_raw(body, "application/json");
    mount_response(&server, response, 1).await;
    let endpoint = countries_endpoint(&server);

    let found = run_blocking(move || {
        remote_directory(&endpoint, 5).find(FieldKind::Alpha2, "fr", DataSource::Remote)
    })
    .await;

    assert_eq!(found, None);
}

#[tokio::test]
async fn blank_or_invalid_remote_lookups_do_not_fetch() {
    setup_tracing();
    let server = MockServer::start().await;
    mount_response(&server, fixture_response(), 0).await;
    let endpoint = countries_endpoint(&server);

    let (blank, invalid) = run_blocking(move || {
        let directory = remote_directory(&endpoint, 5);
        (
            directory.find(FieldKind::Alpha2, "   ", DataSource::Remote),
            directory.find_by_key("4letter", "FRA", DataSource::Remote),
        )
    })
    .await;

    assert_eq!(blank, None);
    assert_eq!(invalid, None);
}

#[tokio::test]
async fn unreachable_server_yields_no_data() {
    setup_tracing();
    // Nothing listens on a port once its listener is dropped.
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
        listener.local_addr().unwrap().port()
    };
    let endpoint = format!("http://127.0.0.1:{}/v2/all", port);

    let (all, strict) = run_blocking(move || {
        let directory = remote_directory(&endpoint, 5);
        (directory.list_all(DataSource::Remote), directory.try_list_remote())
    })
    .await;

    assert!(all.is_empty());
    assert!(matches!(strict, Err(Error::RemoteUnavailable(_))));
}

#[tokio::test]
async fn slow_server_times_out() {
    setup_tracing();
    let server = MockServer::start().await;
    let response = fixture_response().set_delay(Duration::from_secs(4));
    Mock::given(method("GET"))
        .and(path("/v2/all"))
        .respond_with(response)
        .mount(&server)
        .await;
    let endpoint = countries_endpoint(&server);

    let strict = run_blocking(move || remote_directory(&endpoint, 1).try_list_remote()).await;

    match strict {
        Err(Error::RemoteUnavailable(e)) => assert!(e.is_timeout(), "{:?}", e),
        other => panic!("Expected a timeout, got {:?}", other),
    }
}
