//! Typed inventory items, one fixed field set per category.
//!
//! The upstream store keeps these as loose attribute maps; the export
//! engine only ever sees the typed structs below, so every renderer and
//! the data dump work off the same exhaustively-checked shapes. Items
//! never hold live references to each other — cross-references are
//! denormalized display names (`assigned_to_name`).

use serde::{Deserialize, Serialize};

/// Uniform view the layout engine takes over all seven item types: a card
/// title, the category-specific type tag, and the label/value detail lines
/// shown beneath the title. Missing optional attributes are omitted, never
/// rendered as errors.
pub trait CardSource {
    /// Item display name (the card title).
    fn name(&self) -> &str;

    /// Category-specific type tag (`device_type`, `server_type`, ...).
    fn kind(&self) -> &str;

    /// Ordered label/value detail lines for the card body.
    fn details(&self) -> Vec<(&'static str, String)>;
}

/// Firewall, router, switch, access point, or other network gear.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkDevice {
    pub name: String,
    pub device_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    /// Upstream row identifier; never exported.
    #[serde(skip)]
    pub record_id: Option<u64>,
}

/// A workstation, laptop, or other user-facing device.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Endpoint {
    pub name: String,
    pub endpoint_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip)]
    pub record_id: Option<u64>,
}

/// A physical or virtual server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Server {
    pub name: String,
    pub server_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ram: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip)]
    pub record_id: Option<u64>,
}

/// A printer, scanner, or other shared peripheral.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Peripheral {
    pub name: String,
    pub peripheral_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to_name: Option<String>,
    #[serde(skip)]
    pub record_id: Option<u64>,
}

/// A backup job or appliance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BackupJob {
    pub name: String,
    pub backup_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(skip)]
    pub record_id: Option<u64>,
}

/// A licensed software product or SaaS subscription.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SoftwareItem {
    pub name: String,
    pub software_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seat_count: Option<u32>,
    #[serde(skip)]
    pub record_id: Option<u64>,
}

/// A VoIP trunk, PBX, or handset fleet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VoipService {
    pub name: String,
    pub voip_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension_count: Option<u32>,
    #[serde(skip)]
    pub record_id: Option<u64>,
}

impl NetworkDevice {
    pub fn new(name: impl Into<String>, device_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            device_type: device_type.into(),
            ..Default::default()
        }
    }

    pub fn with_manufacturer(mut self, manufacturer: impl Into<String>) -> Self {
        self.manufacturer = Some(manufacturer.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_ip(mut self, ip: impl Into<String>) -> Self {
        self.ip_address = Some(ip.into());
        self
    }
}

impl Endpoint {
    pub fn new(name: impl Into<String>, endpoint_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            endpoint_type: endpoint_type.into(),
            ..Default::default()
        }
    }

    pub fn with_os(mut self, os: impl Into<String>) -> Self {
        self.os = Some(os.into());
        self
    }

    pub fn with_assigned_to(mut self, who: impl Into<String>) -> Self {
        self.assigned_to_name = Some(who.into());
        self
    }

    pub fn with_ip(mut self, ip: impl Into<String>) -> Self {
        self.ip_address = Some(ip.into());
        self
    }
}

impl Server {
    pub fn new(name: impl Into<String>, server_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            server_type: server_type.into(),
            ..Default::default()
        }
    }

    pub fn with_os(mut self, os: impl Into<String>) -> Self {
        self.os = Some(os.into());
        self
    }

    pub fn with_hardware(mut self, cpu: impl Into<String>, ram: impl Into<String>) -> Self {
        self.cpu = Some(cpu.into());
        self.ram = Some(ram.into());
        self
    }

    pub fn with_ip(mut self, ip: impl Into<String>) -> Self {
        self.ip_address = Some(ip.into());
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }
}

impl Peripheral {
    pub fn new(name: impl Into<String>, peripheral_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            peripheral_type: peripheral_type.into(),
            ..Default::default()
        }
    }

    pub fn with_model(mut self, manufacturer: impl Into<String>, model: impl Into<String>) -> Self {
        self.manufacturer = Some(manufacturer.into());
        self.model = Some(model.into());
        self
    }

    pub fn with_assigned_to(mut self, who: impl Into<String>) -> Self {
        self.assigned_to_name = Some(who.into());
        self
    }
}

impl BackupJob {
    pub fn new(name: impl Into<String>, backup_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            backup_type: backup_type.into(),
            ..Default::default()
        }
    }

    pub fn with_vendor(mut self, vendor: impl Into<String>) -> Self {
        self.vendor = Some(vendor.into());
        self
    }

    pub fn with_schedule(mut self, schedule: impl Into<String>) -> Self {
        self.schedule = Some(schedule.into());
        self
    }

    pub fn with_destination(mut self, destination: impl Into<String>) -> Self {
        self.destination = Some(destination.into());
        self
    }
}

impl SoftwareItem {
    pub fn new(name: impl Into<String>, software_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            software_type: software_type.into(),
            ..Default::default()
        }
    }

    pub fn with_vendor(mut self, vendor: impl Into<String>) -> Self {
        self.vendor = Some(vendor.into());
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_seats(mut self, seats: u32) -> Self {
        self.seat_count = Some(seats);
        self
    }
}

impl VoipService {
    pub fn new(name: impl Into<String>, voip_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            voip_type: voip_type.into(),
            ..Default::default()
        }
    }

    pub fn with_vendor(mut self, vendor: impl Into<String>) -> Self {
        self.vendor = Some(vendor.into());
        self
    }

    pub fn with_number(mut self, number: impl Into<String>) -> Self {
        self.phone_number = Some(number.into());
        self
    }

    pub fn with_extensions(mut self, extensions: u32) -> Self {
        self.extension_count = Some(extensions);
        self
    }
}

/// Push `(label, value)` when the optional attribute is present.
fn push_detail(out: &mut Vec<(&'static str, String)>, label: &'static str, value: &Option<String>) {
    if let Some(value) = value {
        out.push((label, value.clone()));
    }
}

impl CardSource for NetworkDevice {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> &str {
        &self.device_type
    }

    fn details(&self) -> Vec<(&'static str, String)> {
        let mut out = vec![("Type", self.device_type.clone())];
        push_detail(&mut out, "Mfr", &self.manufacturer);
        push_detail(&mut out, "Model", &self.model);
        push_detail(&mut out, "IP", &self.ip_address);
        out
    }
}

impl CardSource for Endpoint {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> &str {
        &self.endpoint_type
    }

    fn details(&self) -> Vec<(&'static str, String)> {
        let mut out = vec![("Type", self.endpoint_type.clone())];
        push_detail(&mut out, "User", &self.assigned_to_name);
        push_detail(&mut out, "OS", &self.os);
        push_detail(&mut out, "IP", &self.ip_address);
        out
    }
}

impl CardSource for Server {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> &str {
        &self.server_type
    }

    fn details(&self) -> Vec<(&'static str, String)> {
        let mut out = vec![("Type", self.server_type.clone())];
        push_detail(&mut out, "OS", &self.os);
        push_detail(&mut out, "CPU", &self.cpu);
        push_detail(&mut out, "RAM", &self.ram);
        push_detail(&mut out, "IP", &self.ip_address);
        push_detail(&mut out, "Status", &self.status);
        out
    }
}

impl CardSource for Peripheral {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> &str {
        &self.peripheral_type
    }

    fn details(&self) -> Vec<(&'static str, String)> {
        let mut out = vec![("Type", self.peripheral_type.clone())];
        push_detail(&mut out, "Mfr", &self.manufacturer);
        push_detail(&mut out, "Model", &self.model);
        push_detail(&mut out, "User", &self.assigned_to_name);
        out
    }
}

impl CardSource for BackupJob {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> &str {
        &self.backup_type
    }

    fn details(&self) -> Vec<(&'static str, String)> {
        let mut out = vec![("Type", self.backup_type.clone())];
        push_detail(&mut out, "Vendor", &self.vendor);
        push_detail(&mut out, "Schedule", &self.schedule);
        push_detail(&mut out, "Target", &self.destination);
        out
    }
}

impl CardSource for SoftwareItem {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> &str {
        &self.software_type
    }

    fn details(&self) -> Vec<(&'static str, String)> {
        let mut out = vec![("Type", self.software_type.clone())];
        push_detail(&mut out, "Vendor", &self.vendor);
        push_detail(&mut out, "Version", &self.version);
        if let Some(seats) = self.seat_count {
            out.push(("Seats", seats.to_string()));
        }
        out
    }
}

impl CardSource for VoipService {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> &str {
        &self.voip_type
    }

    fn details(&self) -> Vec<(&'static str, String)> {
        let mut out = vec![("Type", self.voip_type.clone())];
        push_detail(&mut out, "Vendor", &self.vendor);
        push_detail(&mut out, "Number", &self.phone_number);
        if let Some(extensions) = self.extension_count {
            out.push(("Extensions", extensions.to_string()));
        }
        out
    }
}
