//! Inventory categories and their fixed diagram order.

/// One of the seven inventory groupings a snapshot carries.
///
/// The diagram always walks categories in [`Category::ORDER`]; renderers key
/// section titles, JSON field names, and accent colors off this tag rather
/// than carrying per-section strings around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Network gear: firewalls, routers, switches, access points.
    Network,
    /// Workstations, laptops, and other user-facing devices.
    Endpoints,
    /// Physical and virtual servers.
    Servers,
    /// Printers, scanners, and other shared peripherals.
    Peripherals,
    /// Backup jobs and appliances.
    Backups,
    /// Licensed software and SaaS subscriptions.
    Software,
    /// VoIP trunks, PBXes, and handset fleets.
    Voip,
}

impl Category {
    /// Fixed section order for every export format.
    pub const ORDER: [Category; 7] = [
        Category::Network,
        Category::Endpoints,
        Category::Servers,
        Category::Peripherals,
        Category::Backups,
        Category::Software,
        Category::Voip,
    ];

    /// Human-readable section title.
    pub fn title(self) -> &'static str {
        match self {
            Category::Network => "Network",
            Category::Endpoints => "Endpoints",
            Category::Servers => "Servers",
            Category::Peripherals => "Peripherals",
            Category::Backups => "Backups",
            Category::Software => "Software",
            Category::Voip => "VoIP Services",
        }
    }

    /// Field name used for this category in the structured data export.
    pub fn key(self) -> &'static str {
        match self {
            Category::Network => "network_devices",
            Category::Endpoints => "endpoints",
            Category::Servers => "servers",
            Category::Peripherals => "peripherals",
            Category::Backups => "backups",
            Category::Software => "software",
            Category::Voip => "voip_services",
        }
    }

    /// Plural noun for empty-section placeholders ("No servers configured").
    pub fn noun(self) -> &'static str {
        match self {
            Category::Network => "network devices",
            Category::Endpoints => "endpoints",
            Category::Servers => "servers",
            Category::Peripherals => "peripherals",
            Category::Backups => "backups",
            Category::Software => "software items",
            Category::Voip => "VoIP services",
        }
    }

    /// Accent color for section bands and card glyphs, shared by the SVG
    /// and PDF backends so the two stay visually consistent.
    pub fn accent_rgb(self) -> (u8, u8, u8) {
        match self {
            Category::Network => (41, 98, 255),
            Category::Endpoints => (0, 137, 123),
            Category::Servers => (94, 53, 177),
            Category::Peripherals => (216, 67, 21),
            Category::Backups => (46, 125, 50),
            Category::Software => (69, 90, 100),
            Category::Voip => (173, 20, 87),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_covers_all_seven_categories() {
        assert_eq!(Category::ORDER.len(), 7);
        // No duplicates
        for (i, a) in Category::ORDER.iter().enumerate() {
            for b in &Category::ORDER[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_network_comes_first_voip_last() {
        assert_eq!(Category::ORDER[0], Category::Network);
        assert_eq!(Category::ORDER[6], Category::Voip);
    }

    #[test]
    fn test_keys_are_snake_case_identifiers() {
        for category in Category::ORDER {
            let key = category.key();
            assert!(!key.is_empty());
            assert!(
                key.chars().all(|c| c.is_ascii_lowercase() || c == '_'),
                "key {key:?} should be lowercase snake_case"
            );
        }
    }
}
