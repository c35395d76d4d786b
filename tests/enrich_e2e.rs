use anyhow::Result;
use httpmock::prelude::*;
use parcel_enrich::{EnrichError, OutputSchema, Settings, SkipReason};
use std::path::Path;
use tempfile::TempDir;

const HEADER: &str = "Parcel Number,Account Number,Owner,Amount,GIS Map Hyperlink";

fn viewer_link(parcel: &str) -> String {
    format!(
        "https://mcgis.mohave.gov/Html5Viewer/index.html?viewer=MCGIS&run=ParcelZoom&ParcelId={}&Extra=1",
        parcel
    )
}

fn settings_for(dir: &TempDir, input: &str, server: &MockServer) -> Result<Settings> {
    let input_path = dir.path().join("input.csv");
    std::fs::write(&input_path, input)?;

    let mut settings = Settings::new(input_path, dir.path().join("output.csv"));
    settings.endpoint = server.url("/ArcGIS/rest/services/PARCELS/MapServer/14/query");
    settings.max_delay_seconds = 0.0;
    settings.timeout_seconds = 5;
    Ok(settings)
}

fn read_lines(path: &Path) -> Result<Vec<String>> {
    Ok(std::fs::read_to_string(path)?
        .lines()
        .map(str::to_string)
        .collect())
}

fn column(name: &str) -> usize {
    OutputSchema::standard()
        .header()
        .position(|h| h == name)
        .unwrap()
}

#[tokio::test]
async fn test_row_without_parcel_id_is_skipped() -> Result<()> {
    let dir = TempDir::new()?;
    let server = MockServer::start_async().await;

    let mut mocks = Vec::new();
    for id in ["111", "333"] {
        let clause = format!("TAXPIN = '{}'", id);
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/ArcGIS/rest/services/PARCELS/MapServer/14/query")
                    .query_param("where", clause.as_str());
                then.status(200).json_body(serde_json::json!({
                    "features": [{"attributes": {"PARCEL": id, "OWNER": format!("OWNER {}", id)}}]
                }));
            })
            .await;
        mocks.push(mock);
    }

    let input = format!(
        "{}\n111,A1,FIRST,10,{}\n222,A2,SECOND,20,https://mcgis.mohave.gov/Html5Viewer/index.html?run=ParcelZoom\n333,A3,THIRD,30,{}\n",
        HEADER,
        viewer_link("111"),
        viewer_link("333")
    );
    let settings = settings_for(&dir, &input, &server)?;

    let summary = parcel_enrich::run(&settings).await?;

    for mock in &mocks {
        mock.assert_async().await;
    }
    assert_eq!(summary.total_rows, 3);
    assert_eq!(summary.written, 2);
    assert_eq!(summary.skipped.len(), 1);
    assert_eq!(summary.skipped[0].row, 2);
    assert_eq!(summary.skipped[0].reason, SkipReason::InvalidInput);

    let lines = read_lines(&settings.output_csv)?;
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with(HEADER));
    assert!(lines[1].starts_with("111,A1,FIRST,10,"));
    assert!(lines[2].starts_with("333,A3,THIRD,30,"));
    Ok(())
}

#[tokio::test]
async fn test_feature_values_land_in_their_columns() -> Result<()> {
    let dir = TempDir::new()?;
    let server = MockServer::start_async().await;

    let api_mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/ArcGIS/rest/services/PARCELS/MapServer/14/query")
                .query_param("f", "json")
                .query_param("where", "TAXPIN = '21522004'")
                .query_param("outFields", "*")
                .query_param("returnGeometry", "false");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "displayFieldName": "PARCEL",
                    "features": [{
                        "attributes": {
                            "OBJECTID": 8812,
                            "PARCEL": "215-22-004",
                            "OWNER": "JONES, A",
                            "LANDVALUE": 12345,
                            "CITY": "KINGMAN",
                            "SALEDT": null
                        }
                    }]
                }));
        })
        .await;

    let input = format!(
        "{},Notes\n 215-22-004 ,R0099,\"Jones, Alice  \",\"1,500.00\",{},ignored\n",
        HEADER,
        viewer_link("21522004")
    );
    let settings = settings_for(&dir, &input, &server)?;

    let summary = parcel_enrich::run(&settings).await?;

    api_mock.assert_async().await;
    assert_eq!(summary.written, 1);
    assert!(summary.is_complete());

    let lines = read_lines(&settings.output_csv)?;
    assert_eq!(lines.len(), 2);

    let schema = OutputSchema::standard();
    let fields: Vec<&str> = lines[1].split(',').collect();
    assert_eq!(fields.len(), schema.width());
    assert_eq!(lines[0].split(',').count(), schema.width());

    assert_eq!(fields[column("Parcel Number")], "215-22-004");
    assert_eq!(fields[column("Owner")], "Jones Alice");
    assert_eq!(fields[column("Amount")], "1500.00");
    assert_eq!(fields[column("OWNER")], "JONES A");
    assert_eq!(fields[column("LANDVALUE")], "12345");
    assert_eq!(fields[column("CITY")], "KINGMAN");
    assert_eq!(fields[column("SALEDT")], "");
    assert_eq!(fields[column("BOS_DISTRICT")], "");
    Ok(())
}

#[tokio::test]
async fn test_no_data_and_transport_failures_are_skipped() -> Result<()> {
    let dir = TempDir::new()?;
    let server = MockServer::start_async().await;

    let empty_mock = server
        .mock_async(|when, then| {
            when.method(GET).query_param("where", "TAXPIN = 'NOPE'");
            then.status(200).json_body(serde_json::json!({ "features": [] }));
        })
        .await;
    let failing_mock = server
        .mock_async(|when, then| {
            when.method(GET).query_param("where", "TAXPIN = 'BOOM'");
            then.status(500);
        })
        .await;
    let ok_mock = server
        .mock_async(|when, then| {
            when.method(GET).query_param("where", "TAXPIN = 'OK'");
            then.status(200).json_body(serde_json::json!({
                "features": [{"attributes": {"PARCEL": "OK"}}]
            }));
        })
        .await;

    let input = format!(
        "{}\n1,A,X,1,{}\n2,B,Y,2,{}\n3,C,Z,3,{}\n",
        HEADER,
        viewer_link("NOPE"),
        viewer_link("BOOM"),
        viewer_link("OK")
    );
    let settings = settings_for(&dir, &input, &server)?;

    let summary = parcel_enrich::run(&settings).await?;

    empty_mock.assert_async().await;
    failing_mock.assert_async().await;
    ok_mock.assert_async().await;

    assert_eq!(summary.written, 1);
    assert_eq!(summary.skipped_for(SkipReason::NoData), 1);
    assert_eq!(summary.skipped_for(SkipReason::Transport), 1);

    let lines = read_lines(&settings.output_csv)?;
    assert_eq!(lines.len(), 2);
    assert!(lines[1].starts_with("3,C,Z,3,"));
    Ok(())
}

#[tokio::test]
async fn test_missing_required_column_is_fatal() -> Result<()> {
    let dir = TempDir::new()?;
    let server = MockServer::start_async().await;
    let api_mock = server
        .mock_async(|when, then| {
            when.method(GET);
            then.status(200).json_body(serde_json::json!({ "features": [] }));
        })
        .await;

    let settings = settings_for(&dir, "Parcel Number,Owner\n1,X\n", &server)?;

    let err = parcel_enrich::run(&settings).await.unwrap_err();

    assert!(matches!(err, EnrichError::MissingColumnError { .. }));
    api_mock.assert_hits_async(0).await;
    assert!(!settings.output_csv.exists());
    Ok(())
}

#[tokio::test]
async fn test_unreadable_input_is_fatal() -> Result<()> {
    let dir = TempDir::new()?;
    let server = MockServer::start_async().await;

    let mut settings = settings_for(&dir, "", &server)?;
    settings.input_csv = dir.path().join("does-not-exist.csv");

    let err = parcel_enrich::run(&settings).await.unwrap_err();
    assert!(matches!(err, EnrichError::IoError(_)));
    Ok(())
}

#[tokio::test]
async fn test_output_over_input_is_rejected_and_input_kept() -> Result<()> {
    let dir = TempDir::new()?;
    let server = MockServer::start_async().await;

    let input = format!("{}\n1,A,X,1,{}\n", HEADER, viewer_link("1"));
    let mut settings = settings_for(&dir, &input, &server)?;
    settings.output_csv = settings.input_csv.clone();

    let err = parcel_enrich::run(&settings).await.unwrap_err();

    assert!(matches!(err, EnrichError::InvalidConfigValueError { .. }));
    assert_eq!(std::fs::read_to_string(&settings.input_csv)?, input);
    Ok(())
}
