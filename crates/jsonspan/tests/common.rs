#![allow(missing_docs)]
#![allow(dead_code)]

/// A device configuration document of the kind a constrained node receives
/// over the wire, pretty-printed so spans cross line boundaries.
pub const DEVICE: &str = r#"
{
    "device": {
        "id": "node-17",
        "label": "boiler \"north\"\nroom 2",
        "enabled": true,
        "maintenance": false,
        "firmware": null
    },
    "sampling": {
        "interval_ms": 250,
        "gain": -1.5e-2,
        "channels": [
            { "name": "temp", "unit": "C", "limits": [-40, 125] },
            { "name": "humidity", "unit": "%", "limits": [0, 100] },
            { "name": "pressure", "unit": "hPa", "limits": [300, 1100] }
        ]
    },
    "routes": [
        ["mqtt", "broker.local", 1883],
        ["http", "https:\/\/api.example\/ingest", 443]
    ],
    "tags": {}
}
"#;

/// Compact form of [`DEVICE`].
pub fn device_compact() -> Vec<u8> {
    let value: serde_json::Value = serde_json::from_str(DEVICE).unwrap();
    serde_json::to_vec(&value).unwrap()
}
