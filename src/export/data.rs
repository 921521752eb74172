//! Structured data backend.
//!
//! Serializes the snapshot's seven category arrays to pretty-printed
//! JSON, tagged with the organization and an export timestamp. Internal
//! bookkeeping (`record_id`) never reaches the artifact; everything
//! else round-trips losslessly.

use std::io::{Seek, Write};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::Result;
use crate::model::{
    BackupJob, Endpoint, NetworkDevice, Peripheral, Server, Snapshot, SoftwareItem, VoipService,
};

use super::Exporter;

/// Configuration for data export.
#[derive(Debug, Clone, Default)]
pub struct DataConfig {
    /// Fixed export timestamp; `None` stamps the current time.
    pub timestamp: Option<DateTime<Utc>>,
}

/// Exporter for the JSON data artifact.
#[derive(Debug, Clone, Default)]
pub struct DataExporter {
    config: DataConfig,
}

/// Top-level artifact shape. Struct serialization keeps the field order
/// stable, with categories in their fixed section order.
#[derive(Serialize)]
struct DataDocument<'a> {
    organization: &'a str,
    export_date: String,
    data: CategoryData<'a>,
}

#[derive(Serialize)]
struct CategoryData<'a> {
    network_devices: &'a [NetworkDevice],
    endpoints: &'a [Endpoint],
    servers: &'a [Server],
    peripherals: &'a [Peripheral],
    backups: &'a [BackupJob],
    software: &'a [SoftwareItem],
    voip_services: &'a [VoipService],
}

impl DataExporter {
    /// Create a new DataExporter with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a DataExporter with the specified configuration.
    pub fn with_config(config: DataConfig) -> Self {
        Self { config }
    }

    /// Renders the data document as pretty-printed JSON.
    pub fn render(&self, snapshot: &Snapshot) -> Result<String> {
        let mut json = serde_json::to_string_pretty(&self.document(snapshot))?;
        json.push('\n');
        Ok(json)
    }

    fn document<'a>(&self, snapshot: &'a Snapshot) -> DataDocument<'a> {
        DataDocument {
            organization: &snapshot.organization,
            export_date: self
                .config
                .timestamp
                .unwrap_or_else(Utc::now)
                .to_rfc3339_opts(SecondsFormat::Secs, true),
            data: CategoryData {
                network_devices: &snapshot.network_devices,
                endpoints: &snapshot.endpoints,
                servers: &snapshot.servers,
                peripherals: &snapshot.peripherals,
                backups: &snapshot.backups,
                software: &snapshot.software,
                voip_services: &snapshot.voip_services,
            },
        }
    }
}

impl Exporter for DataExporter {
    fn export<W: Write + Seek>(&self, snapshot: &Snapshot, writer: &mut W) -> Result<()> {
        writer.write_all(self.render(snapshot)?.as_bytes())?;
        Ok(())
    }

    fn media_type(&self) -> &'static str {
        "application/json"
    }

    fn suffix(&self) -> &'static str {
        "_diagram_data.json"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::io::Cursor;

    fn rich_snapshot() -> Snapshot {
        let mut snap = Snapshot::new("Acme Corp");
        snap.network_devices.push(
            NetworkDevice::new("fw-01", "Firewall")
                .with_manufacturer("Fortinet")
                .with_model("FortiGate 60F")
                .with_ip("203.0.113.1"),
        );
        snap.servers.push(
            Server::new("db-01", "Database")
                .with_os("Ubuntu 24.04")
                .with_hardware("2x Xeon Silver", "128 GB")
                .with_ip("10.0.1.5")
                .with_status("Online"),
        );
        snap.software
            .push(SoftwareItem::new("CRM Suite", "SaaS").with_seats(150));
        snap
    }

    fn export_json(snap: &Snapshot) -> serde_json::Value {
        let exporter = DataExporter::with_config(DataConfig {
            timestamp: Some(Utc.with_ymd_and_hms(2024, 5, 14, 9, 30, 0).unwrap()),
        });
        let mut cursor = Cursor::new(Vec::new());
        exporter.export(snap, &mut cursor).unwrap();
        serde_json::from_slice(cursor.get_ref()).unwrap()
    }

    #[test]
    fn test_document_shape() {
        let json = export_json(&rich_snapshot());
        assert_eq!(json["organization"], "Acme Corp");
        assert_eq!(json["export_date"], "2024-05-14T09:30:00Z");
        for key in [
            "network_devices",
            "endpoints",
            "servers",
            "peripherals",
            "backups",
            "software",
            "voip_services",
        ] {
            assert!(json["data"][key].is_array(), "missing array for {key}");
        }
    }

    #[test]
    fn test_every_field_round_trips() {
        let snap = rich_snapshot();
        let json = export_json(&snap);

        let devices: Vec<NetworkDevice> =
            serde_json::from_value(json["data"]["network_devices"].clone()).unwrap();
        assert_eq!(devices, snap.network_devices);

        let servers: Vec<Server> = serde_json::from_value(json["data"]["servers"].clone()).unwrap();
        assert_eq!(servers, snap.servers);

        let software: Vec<SoftwareItem> =
            serde_json::from_value(json["data"]["software"].clone()).unwrap();
        assert_eq!(software, snap.software);
    }

    #[test]
    fn test_record_ids_never_exported() {
        let mut snap = rich_snapshot();
        snap.servers[0].record_id = Some(991);
        snap.network_devices[0].record_id = Some(17);

        let json = export_json(&snap);
        assert!(json["data"]["servers"][0].get("record_id").is_none());
        assert!(json["data"]["network_devices"][0].get("record_id").is_none());
    }

    #[test]
    fn test_absent_optionals_are_omitted_not_null() {
        let mut snap = Snapshot::new("x");
        snap.servers.push(Server::new("bare", "Web"));
        let json = export_json(&snap);
        let server = &json["data"]["servers"][0];
        assert_eq!(server["name"], "bare");
        assert!(server.get("os").is_none());
        assert!(server.get("status").is_none());
    }

    #[test]
    fn test_empty_snapshot_exports_empty_arrays() {
        let json = export_json(&Snapshot::new("Empty"));
        assert_eq!(json["data"]["endpoints"].as_array().unwrap().len(), 0);
        assert_eq!(json["data"]["voip_services"].as_array().unwrap().len(), 0);
    }
}
