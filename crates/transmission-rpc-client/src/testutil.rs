//! Shared test utilities and fixtures.

use std::io;

use serde_json::{Value, json};
use transmission_rpc_types::TransmissionError;

use crate::transport::HttpResponse;

/// `Authorization` header for `transmission:transmission`.
pub(crate) const AUTH: &str = "Basic dHJhbnNtaXNzaW9uOnRyYW5zbWlzc2lvbg==";

/// A 409 handing out `session_id`.
pub(crate) fn conflict(session_id: &str) -> HttpResponse {
    HttpResponse {
        status: 409,
        session_id: Some(session_id.to_string()),
        body: b"<h1>409: Conflict</h1>".to_vec(),
    }
}

/// A 409 without a session header.
pub(crate) fn bare_conflict() -> HttpResponse {
    HttpResponse {
        status: 409,
        session_id: None,
        body: Vec::new(),
    }
}

pub(crate) fn raw_response(status: u16, body: &str) -> HttpResponse {
    HttpResponse {
        status,
        session_id: None,
        body: body.as_bytes().to_vec(),
    }
}

pub(crate) fn json_response(status: u16, body: &Value) -> HttpResponse {
    raw_response(status, &body.to_string())
}

pub(crate) fn network_error() -> TransmissionError {
    TransmissionError::Network(Box::new(io::Error::new(
        io::ErrorKind::ConnectionRefused,
        "connection refused",
    )))
}

pub(crate) fn ping_response() -> Value {
    json!({ "arguments": {}, "result": "no method name" })
}

pub(crate) fn success(arguments: Value) -> Value {
    json!({ "arguments": arguments, "result": "success" })
}

pub(crate) fn session_arguments() -> Value {
    json!({
        "alt-speed-down": 50,
        "alt-speed-enabled": false,
        "alt-speed-time-begin": 540,
        "alt-speed-time-day": 127,
        "alt-speed-time-enabled": false,
        "alt-speed-time-end": 1020,
        "alt-speed-up": 50,
        "blocklist-enabled": false,
        "blocklist-size": 0,
        "blocklist-url": "http://www.example.com/blocklist",
        "cache-size-mb": 4,
        "config-dir": "/config",
        "dht-enabled": true,
        "download-dir": "/downloads/complete",
        "download-dir-free-space": 1_000_000_000_i64,
        "download-queue-enabled": true,
        "download-queue-size": 5,
        "encryption": "preferred",
        "idle-seeding-limit": 30,
        "idle-seeding-limit-enabled": false,
        "incomplete-dir": "/downloads/incomplete",
        "incomplete-dir-enabled": true,
        "lpd-enabled": false,
        "peer-limit-global": 200,
        "peer-limit-per-torrent": 50,
        "peer-port": 51413,
        "peer-port-random-on-start": false,
        "pex-enabled": true,
        "port-forwarding-enabled": false,
        "queue-stalled-enabled": true,
        "queue-stalled-minutes": 30,
        "rename-partial-files": true,
        "rpc-version": 17,
        "rpc-version-minimum": 14,
        "script-torrent-done-enabled": false,
        "script-torrent-done-filename": "",
        "seed-queue-enabled": false,
        "seed-queue-size": 10,
        "seedRatioLimit": 2,
        "seedRatioLimited": false,
        "session-id": "123",
        "speed-limit-down": 100,
        "speed-limit-down-enabled": false,
        "speed-limit-up": 100,
        "speed-limit-up-enabled": false,
        "start-added-torrents": true,
        "trash-original-torrent-files": false,
        "units": {
            "memory-bytes": 1024,
            "memory-units": ["KiB", "MiB", "GiB", "TiB"],
            "size-bytes": 1000,
            "size-units": ["kB", "MB", "GB", "TB"],
            "speed-bytes": 1000,
            "speed-units": ["kB/s", "MB/s", "GB/s", "TB/s"]
        },
        "utp-enabled": true,
        "version": "4.0.3 (6b0e49bbb2)"
    })
}

pub(crate) fn make_test_torrent(id: i64, name: &str, hash: &str) -> Value {
    json!({
        "activityDate": 1682285765,
        "addedDate": 1682253325,
        "comment": "",
        "downloadDir": "/downloads",
        "eta": 10589,
        "etaIdle": -1,
        "hashString": hash,
        "id": id,
        "isFinished": false,
        "name": name,
        "peer-limit": 50,
        "percentDone": 0.5,
        "status": 4,
        "totalSize": 49678893056_i64,
        "uploadRatio": 0.1
    })
}
