// Streetlight device domain model
use super::feed::BulbPair;
use chrono::{DateTime, Utc};

const LOCATIONS: [&str; 2] = ["Main St & 5th Ave", "Park Rd & Elm St"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceStatus {
    Active,
    Inactive,
}

impl DeviceStatus {
    pub fn is_active(self) -> bool {
        self == DeviceStatus::Active
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DeviceStatus::Active => "active",
            DeviceStatus::Inactive => "inactive",
        }
    }
}

/// Static identity of one streetlight and the bulb pair it reports on.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceIdentity {
    pub id: String,
    pub location: String,
    pub pair: BulbPair,
    pub in_service: bool,
}

impl DeviceIdentity {
    pub fn new(pair: BulbPair, in_service: bool) -> Self {
        let slot = usize::from(pair.number() - 1);
        Self {
            id: Self::format_id(slot),
            location: LOCATIONS[slot].to_string(),
            pair,
            in_service,
        }
    }

    pub fn format_id(slot: usize) -> String {
        format!("SL-{}", 1000 + slot)
    }
}

/// The fixed set of monitored streetlights.
#[derive(Debug, Clone, PartialEq)]
pub struct Fleet {
    pub devices: Vec<DeviceIdentity>,
}

impl Fleet {
    /// `size` is clamped to the number of bulb pairs the feed carries.
    pub fn new(size: usize, out_of_service: &[String]) -> Self {
        let devices = BulbPair::ALL
            .iter()
            .take(size)
            .enumerate()
            .map(|(slot, pair)| {
                let id = DeviceIdentity::format_id(slot);
                DeviceIdentity::new(*pair, !out_of_service.contains(&id))
            })
            .collect();
        Self { devices }
    }

    pub fn pairs(&self) -> impl Iterator<Item = BulbPair> + '_ {
        self.devices.iter().map(|d| d.pair)
    }
}

impl Default for Fleet {
    fn default() -> Self {
        Self::new(BulbPair::ALL.len(), &[])
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LastSwitched {
    /// Approximate; the feed carries no switch-time audit trail.
    At(DateTime<Utc>),
    Never,
    NotApplicable,
}

impl LastSwitched {
    pub fn display(&self) -> String {
        match self {
            LastSwitched::At(time) => time.to_rfc3339(),
            LastSwitched::Never => "Never".to_string(),
            LastSwitched::NotApplicable => "N/A".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BulbFlags {
    pub primary_bulb_1: bool,
    pub secondary_bulb_1: bool,
    pub primary_bulb_2: bool,
    pub secondary_bulb_2: bool,
}

impl BulbFlags {
    pub fn for_pair(pair: BulbPair, primary: bool, backup: bool) -> Self {
        match pair {
            BulbPair::One => Self {
                primary_bulb_1: primary,
                secondary_bulb_1: backup,
                ..Self::default()
            },
            BulbPair::Two => Self {
                primary_bulb_2: primary,
                secondary_bulb_2: backup,
                ..Self::default()
            },
        }
    }

    pub fn any_primary(&self) -> bool {
        self.primary_bulb_1 || self.primary_bulb_2
    }

    pub fn any_secondary(&self) -> bool {
        self.secondary_bulb_1 || self.secondary_bulb_2
    }

    /// "Primary 1, Secondary 2" style listing of lit bulbs, or "None".
    pub fn label(&self) -> String {
        let lit: Vec<&str> = [
            (self.primary_bulb_1, "Primary 1"),
            (self.secondary_bulb_1, "Secondary 1"),
            (self.primary_bulb_2, "Primary 2"),
            (self.secondary_bulb_2, "Secondary 2"),
        ]
        .into_iter()
        .filter_map(|(on, label)| on.then_some(label))
        .collect();

        if lit.is_empty() {
            "None".to_string()
        } else {
            lit.join(", ")
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeviceSummary {
    pub id: String,
    pub location: String,
    pub status: DeviceStatus,
    pub bulbs: BulbFlags,
    pub current_bulb_label: String,
    pub last_switched: LastSwitched,
    pub current_milliamps: f64,
    /// Synthetic placeholder until real health telemetry exists.
    pub health: u8,
    pub total_switches: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fleet_ids_and_locations() {
        let fleet = Fleet::default();
        assert_eq!(fleet.devices.len(), 2);
        assert_eq!(fleet.devices[0].id, "SL-1000");
        assert_eq!(fleet.devices[1].id, "SL-1001");
        assert_eq!(fleet.devices[1].location, "Park Rd & Elm St");
        assert_eq!(fleet.devices[1].pair, BulbPair::Two);
    }

    #[test]
    fn test_fleet_out_of_service() {
        let fleet = Fleet::new(2, &["SL-1001".to_string()]);
        assert!(fleet.devices[0].in_service);
        assert!(!fleet.devices[1].in_service);
    }

    #[test]
    fn test_fleet_size_is_clamped() {
        assert_eq!(Fleet::new(5, &[]).devices.len(), 2);
        assert_eq!(Fleet::new(1, &[]).devices.len(), 1);
    }

    #[test]
    fn test_bulb_label() {
        assert_eq!(BulbFlags::default().label(), "None");
        assert_eq!(BulbFlags::for_pair(BulbPair::One, true, false).label(), "Primary 1");

        let flags = BulbFlags {
            primary_bulb_1: true,
            secondary_bulb_2: true,
            ..BulbFlags::default()
        };
        assert_eq!(flags.label(), "Primary 1, Secondary 2");
    }

    #[test]
    fn test_last_switched_display() {
        assert_eq!(LastSwitched::Never.display(), "Never");
        assert_eq!(LastSwitched::NotApplicable.display(), "N/A");
    }
}
