//! End-to-end pipeline tests against a local mock image endpoint

use coloring_page::codec::{decode, encode_png, save_png};
use coloring_page::{
    Config, FileSource, Generator, PipelineError, PollinationsSource, RasterImage, is_binary,
};
use std::sync::mpsc;
use std::time::Duration;
use tiny_http::{Response, Server};

/// Gray ramp with a transparent corner, encoded as PNG
fn sample_png() -> Vec<u8> {
    let image = RasterImage::from_pixels(
        2,
        2,
        &[
            [255, 255, 255, 255],
            [0, 0, 0, 255],
            [200, 200, 200, 255],
            [100, 100, 100, 0],
        ],
    )
    .unwrap();
    encode_png(&image).unwrap()
}

/// Start a server on an ephemeral port that answers every request with
/// `status` and `body`, reporting each request URL on the returned channel.
fn start_mock_server(status: u16, body: Vec<u8>) -> (String, mpsc::Receiver<String>) {
    let server = Server::http("127.0.0.1:0").unwrap();
    let port = server.server_addr().to_ip().unwrap().port();
    let (tx, rx) = mpsc::channel();

    std::thread::spawn(move || {
        for request in server.incoming_requests() {
            let _ = tx.send(request.url().to_string());
            let response = Response::from_data(body.clone()).with_status_code(status);
            let _ = request.respond(response);
        }
    });

    (format!("http://127.0.0.1:{}", port), rx)
}

fn config_for(endpoint: &str) -> Config {
    Config {
        endpoint: endpoint.to_string(),
        timeout: Duration::from_secs(10),
        ..Config::default()
    }
}

#[test]
fn test_generate_from_http_endpoint() {
    let (endpoint, urls) = start_mock_server(200, sample_png());
    let config = config_for(&endpoint);
    let source = PollinationsSource::from_config(&config).unwrap();
    let mut generator = Generator::new(source, config);

    let page = generator.generate("friendly cartoon robot").unwrap();

    let url = urls.recv_timeout(Duration::from_secs(5)).unwrap();
    assert!(url.starts_with(
        "/prompt/simple%20children's%20coloring%20book%20page%20of%20friendly%20cartoon%20robot%2C"
    ));
    assert!(url.contains("width=1024&height=1024&seed="));
    assert!(url.ends_with("&nologo=true&model=flux"));

    assert!(is_binary(&page.image));
    assert_eq!(
        page.image.as_bytes(),
        &[
            255, 255, 255, 255, //
            0, 0, 0, 255, //
            255, 255, 255, 255, //
            0, 0, 0, 0,
        ]
    );
    assert_eq!(decode(&page.png).unwrap(), page.image);
    assert_eq!(generator.history().len(), 1);
}

#[test]
fn test_server_error_is_fetch_error() {
    let (endpoint, _urls) = start_mock_server(500, b"boom".to_vec());
    let config = config_for(&endpoint);
    let source = PollinationsSource::from_config(&config).unwrap();
    let mut generator = Generator::new(source, config);

    match generator.generate("dragon") {
        Err(PipelineError::Fetch(msg)) => assert!(msg.contains("500")),
        other => panic!("Expected Fetch error, got {:?}", other.map(|p| p.prompt)),
    }
    assert!(generator.history().is_empty());
}

#[test]
fn test_non_image_body_is_decode_error() {
    let (endpoint, _urls) = start_mock_server(200, b"<html>rate limited</html>".to_vec());
    let config = config_for(&endpoint);
    let source = PollinationsSource::from_config(&config).unwrap();
    let mut generator = Generator::new(source, config);

    assert!(matches!(
        generator.generate("kitten"),
        Err(PipelineError::Decode(_))
    ));
}

#[test]
fn test_unreachable_endpoint_is_fetch_error() {
    // Bind then drop to get a port with nothing listening
    let port = {
        let server = Server::http("127.0.0.1:0").unwrap();
        server.server_addr().to_ip().unwrap().port()
    };
    let config = config_for(&format!("http://127.0.0.1:{}", port));
    let source = PollinationsSource::from_config(&config).unwrap();
    let mut generator = Generator::new(source, config);

    assert!(matches!(
        generator.generate("owl"),
        Err(PipelineError::Fetch(_))
    ));
}

#[test]
fn test_file_source_and_save() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input.png");
    std::fs::write(&input, sample_png()).unwrap();

    let mut generator = Generator::new(FileSource::new(&input), Config::default());
    let page = generator.generate("Pirate Ship  On The Ocean").unwrap();
    assert_eq!(page.file_name(), "coloring-page-pirate-ship-on-the-ocean.png");

    let output = dir.path().join(page.file_name());
    save_png(&output, &page.png).unwrap();
    let reloaded = coloring_page::tools::load_rgba(&output).unwrap();
    assert_eq!(reloaded, page.image);
}

#[test]
fn test_prompt_with_slash_saves_next_to_output_dir() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input.png");
    std::fs::write(&input, sample_png()).unwrap();

    let mut generator = Generator::new(FileSource::new(&input), Config::default());
    let page = generator.generate("AC/DC guitar").unwrap();
    assert_eq!(page.file_name(), "coloring-page-ac-dc-guitar.png");

    let output = dir.path().join(page.file_name());
    save_png(&output, &page.png).unwrap();
    assert_eq!(output.parent(), Some(dir.path()));
    assert!(output.is_file());
}
