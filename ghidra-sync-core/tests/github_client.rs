use ghidra_sync_core::contract::{EntryKind, RemoteLister};
use ghidra_sync_core::github::GithubClient;
use ghidra_sync_core::SyncError;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};

/// Serve one canned `(status, body)` response per connection, in order, and
/// hand back the raw request heads, lower-cased.
fn serve(responses: Vec<(u16, &'static str)>) -> (String, JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind local listener");
    let base = format!("http://{}", listener.local_addr().unwrap());

    let handle = thread::spawn(move || {
        let mut requests = Vec::new();
        for (status, body) in responses {
            let (mut stream, _) = listener.accept().expect("accept connection");
            let mut head = Vec::new();
            let mut buf = [0u8; 1024];
            while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).expect("read request");
                if n == 0 {
                    break;
                }
                head.extend_from_slice(&buf[..n]);
            }
            requests.push(String::from_utf8_lossy(&head).to_lowercase());

            let response = format!(
                "HTTP/1.1 {status} Canned\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).expect("write response");
            stream.flush().unwrap();
        }
        requests
    });

    (base, handle)
}

/// Client that talks to the local listener directly, whatever proxy the environment sets.
fn local_client(token: Option<&str>) -> GithubClient {
    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    GithubClient::with_client(client, token).unwrap()
}

#[tokio::test]
async fn listing_error_status_is_status_error_and_headers_are_sent() {
    let (base, server) = serve(vec![(403, r#"{"message":"API rate limit exceeded"}"#)]);
    let client = local_client(Some("tok"));

    let err = client
        .list_directory(&format!("{base}/repos/o/r/contents/cpp"))
        .await
        .unwrap_err();

    match err {
        SyncError::Status { status, url } => {
            assert_eq!(status, 403);
            assert!(url.ends_with("/repos/o/r/contents/cpp"));
        }
        other => panic!("expected Status error, got {other:?}"),
    }

    let requests = server.join().unwrap();
    let head = &requests[0];
    assert!(head.starts_with("get /repos/o/r/contents/cpp "), "got {head}");
    assert!(head.contains("authorization: bearer tok\r\n"), "got {head}");
    assert!(head.contains("user-agent: ghidra-sync/"), "got {head}");
    assert!(head.contains("accept: application/vnd.github+json"), "got {head}");
}

#[tokio::test]
async fn content_error_status_still_returns_body() {
    let (base, server) = serve(vec![(500, "partial")]);
    let client = local_client(Some("tok"));

    let body = client
        .fetch_content(&format!("{base}/raw/funcdata.cc"))
        .await
        .expect("content download returns the body whatever the status");

    assert_eq!(body, b"partial");
    let requests = server.join().unwrap();
    assert!(requests[0].contains("authorization: bearer tok\r\n"));
}

#[tokio::test]
async fn listing_is_parsed_and_no_token_sends_no_authorization() {
    let listing = r#"[
      {"name": "funcdata.cc", "path": "cpp/funcdata.cc", "type": "file",
       "download_url": "http://raw.invalid/cpp/funcdata.cc", "url": "http://api.invalid/cpp/funcdata.cc"},
      {"name": "sub", "path": "cpp/sub", "type": "dir",
       "download_url": null, "url": "http://api.invalid/cpp/sub"}
    ]"#;
    let (base, server) = serve(vec![(200, listing)]);
    let client = local_client(None);

    let entries = client
        .list_directory(&format!("{base}/repos/o/r/contents/cpp"))
        .await
        .expect("listing should parse");

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].name, "funcdata.cc");
    assert_eq!(entries[0].kind, EntryKind::File);
    assert_eq!(entries[1].kind, EntryKind::Directory);
    assert_eq!(entries[1].listing_url, "http://api.invalid/cpp/sub");

    let requests = server.join().unwrap();
    assert!(!requests[0].contains("authorization:"), "got {}", requests[0]);
    assert!(requests[0].contains("user-agent: ghidra-sync/"));
}

#[tokio::test]
async fn successful_non_array_listing_is_parse_error() {
    let (base, server) = serve(vec![(200, r#"{"name": "funcdata.cc", "type": "file"}"#)]);
    let client = local_client(None);

    let err = client
        .list_directory(&format!("{base}/repos/o/r/contents/cpp/funcdata.cc"))
        .await
        .unwrap_err();

    assert!(matches!(err, SyncError::Parse { .. }), "got {err:?}");
    server.join().unwrap();
}
