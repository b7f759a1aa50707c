use std::sync::Arc;
use tracing::{error, info};

// Adds automatic logging to test
mod test_utils {
    use trm::providers::datos_gov::LATEST_RATE_QUERY;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub const DATASET: &str = "32sa-8pi3";

    /// The mock fails verification on drop unless it saw exactly one request.
    pub async fn create_mock_server(mock_response: &str) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(format!("/resource/{DATASET}.json")))
            .and(query_param("$query", LATEST_RATE_QUERY))
            .respond_with(ResponseTemplate::new(200).set_body_string(mock_response))
            .expect(1)
            .mount(&mock_server)
            .await;

        mock_server
    }

    pub fn write_config(file: &tempfile::NamedTempFile, base_url: &str) {
        let config_content = format!(
            r#"
        provider:
          base_url: {base_url}
          dataset: "{DATASET}"
    "#
        );
        std::fs::write(file.path(), config_content).expect("Failed to write config file");
    }
}

const SAMPLE_RESPONSE: &str =
    r#"[{"valor":"4000.50","vigenciadesde":"2024-01-10","vigenciahasta":"2024-01-10"}]"#;

#[test_log::test(tokio::test)]
async fn test_loader_against_mock_endpoint() {
    use trm::core::{LoadStatus, RateLoader};
    use trm::providers::DatosGovProvider;

    let mock_server = test_utils::create_mock_server(SAMPLE_RESPONSE).await;
    let provider = DatosGovProvider::new(&mock_server.uri(), test_utils::DATASET);
    let mut loader = RateLoader::start(Arc::new(provider));

    let status = loader.settled().await;
    let LoadStatus::Ready(rate) = &status else {
        panic!("Expected a loaded rate, got {status:?}");
    };
    assert_eq!(trm::cli::ui::format_rate_value(rate), "$4000.50 COP");

    // Converting repeatedly reads the loaded status; it never refetches.
    let mut state = trm::core::ConversionState::default();
    for amount in ["1", "10", "100"] {
        state.set_input(amount);
        let rate = loader.status();
        assert!(state.output(rate.rate().unwrap()).is_some());
    }
}

#[test_log::test(tokio::test)]
async fn test_empty_dataset_is_no_data_error() {
    use trm::core::{LoadStatus, RateLoader};
    use trm::providers::DatosGovProvider;

    let mock_server = test_utils::create_mock_server("[]").await;
    let provider = DatosGovProvider::new(&mock_server.uri(), test_utils::DATASET);
    let mut loader = RateLoader::start(Arc::new(provider));

    assert_eq!(
        loader.settled().await,
        LoadStatus::Error("No se encontraron datos de TRM".to_string())
    );
}

#[test_log::test(tokio::test)]
async fn test_full_app_flow_with_mock() {
    let mock_server = test_utils::create_mock_server(SAMPLE_RESPONSE).await;
    let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    test_utils::write_config(&config_file, &mock_server.uri());

    let result = trm::run_command(
        trm::AppCommand::Show { json: false },
        Some(config_file.path().to_str().unwrap()),
    )
    .await;
    assert!(
        result.is_ok(),
        "Show command failed with: {:?}",
        result.err()
    );
}

#[test_log::test(tokio::test)]
async fn test_convert_flow_with_mock() {
    let mock_server = test_utils::create_mock_server(SAMPLE_RESPONSE).await;
    let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    test_utils::write_config(&config_file, &mock_server.uri());

    let result = trm::run_command(
        trm::AppCommand::Convert {
            amount: "100".to_string(),
            direction: trm::core::Direction::UsdToCop,
        },
        Some(config_file.path().to_str().unwrap()),
    )
    .await;
    assert!(
        result.is_ok(),
        "Convert command failed with: {:?}",
        result.err()
    );
}

#[test_log::test(tokio::test)]
async fn test_full_app_flow_reports_empty_dataset() {
    let mock_server = test_utils::create_mock_server("[]").await;
    let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    test_utils::write_config(&config_file, &mock_server.uri());

    let result = trm::run_command(
        trm::AppCommand::Show { json: true },
        Some(config_file.path().to_str().unwrap()),
    )
    .await;
    assert_eq!(
        result.unwrap_err().to_string(),
        "No se encontraron datos de TRM"
    );
}

#[test_log::test(tokio::test)]
async fn test_unreadable_config_path_fails() {
    let dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let missing = dir.path().join("missing.yaml");

    let result =
        trm::run_command(trm::AppCommand::Show { json: false }, missing.to_str()).await;
    assert!(
        result
            .unwrap_err()
            .to_string()
            .contains("Failed to read config file")
    );
}

#[test_log::test(tokio::test)]
#[ignore = "hits the live datos.gov.co endpoint"]
async fn test_real_datos_gov_api() {
    use trm::core::RateProvider;
    use trm::core::config::{DEFAULT_BASE_URL, DEFAULT_DATASET};
    use trm::providers::DatosGovProvider;

    let provider = DatosGovProvider::new(DEFAULT_BASE_URL, DEFAULT_DATASET);
    info!("Fetching TRM from datos.gov.co");

    match provider.fetch_latest().await {
        Ok(rates) => {
            info!(?rates, "Received successful TRM response");
            let rate = rates.first().expect("At least one TRM record");
            assert!(rate.per_usd() > 0.0, "Rate should be positive");
            assert!(rate.valid_to() >= rate.valid_from());
        }
        Err(e) => {
            error!("TRM request failed: {e}\n{e:?}");
            panic!("TRM request failed: {e}");
        }
    }
}
