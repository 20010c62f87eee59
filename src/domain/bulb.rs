// Bulb state classification

/// Readings above this count as a lit bulb for device flags and switch counting.
pub const ACTIVITY_THRESHOLD: f64 = 0.5;

/// Readings below this count as a dead bulb when tallying failures.
pub const FAILURE_THRESHOLD: f64 = 0.1;

/// Full brightness for primaries, engaged for backups.
pub const FULL_ON: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulbMode {
    Primary,
    Backup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulbStatus {
    On,
    Partial,
    Off,
}

impl BulbStatus {
    pub fn from_value(value: f64) -> Self {
        if value >= FULL_ON {
            BulbStatus::On
        } else if value > 0.0 {
            BulbStatus::Partial
        } else {
            BulbStatus::Off
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BulbStatus::On => "ON",
            BulbStatus::Partial => "PARTIAL",
            BulbStatus::Off => "OFF",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackupStatus {
    Active,
    Standby,
}

impl BackupStatus {
    pub fn from_value(value: f64) -> Self {
        if value >= FULL_ON {
            BackupStatus::Active
        } else {
            BackupStatus::Standby
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BackupStatus::Active => "ACTIVE",
            BackupStatus::Standby => "STANDBY",
        }
    }
}

/// Result of classifying one channel value under a given mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulbReading {
    Primary(BulbStatus),
    Backup(BackupStatus),
}

impl BulbReading {
    pub fn as_str(&self) -> &'static str {
        match self {
            BulbReading::Primary(status) => status.as_str(),
            BulbReading::Backup(status) => status.as_str(),
        }
    }
}

/// Three classes for primaries, two for backups. Backups never read as PARTIAL.
pub fn classify(value: f64, mode: BulbMode) -> BulbReading {
    match mode {
        BulbMode::Primary => BulbReading::Primary(BulbStatus::from_value(value)),
        BulbMode::Backup => BulbReading::Backup(BackupStatus::from_value(value)),
    }
}

pub fn is_active(value: f64) -> bool {
    value > ACTIVITY_THRESHOLD
}

pub fn is_failed(value: f64) -> bool {
    value < FAILURE_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_classes() {
        assert_eq!(classify(0.0, BulbMode::Primary), BulbReading::Primary(BulbStatus::Off));
        assert_eq!(classify(-3.0, BulbMode::Primary), BulbReading::Primary(BulbStatus::Off));
        assert_eq!(classify(0.5, BulbMode::Primary), BulbReading::Primary(BulbStatus::Partial));
        assert_eq!(classify(0.01, BulbMode::Primary), BulbReading::Primary(BulbStatus::Partial));
        assert_eq!(classify(0.99, BulbMode::Primary), BulbReading::Primary(BulbStatus::Partial));
        assert_eq!(classify(1.0, BulbMode::Primary), BulbReading::Primary(BulbStatus::On));
        assert_eq!(classify(4.0, BulbMode::Primary), BulbReading::Primary(BulbStatus::On));
    }

    #[test]
    fn test_backup_is_binary() {
        assert_eq!(classify(0.0, BulbMode::Backup), BulbReading::Backup(BackupStatus::Standby));
        assert_eq!(classify(0.5, BulbMode::Backup), BulbReading::Backup(BackupStatus::Standby));
        assert_eq!(classify(1.0, BulbMode::Backup), BulbReading::Backup(BackupStatus::Active));
    }

    #[test]
    fn test_activity_threshold_is_strict() {
        assert!(!is_active(0.5));
        assert!(is_active(0.51));
        assert!(is_active(FULL_ON));
    }

    #[test]
    fn test_partial_is_not_failed() {
        assert!(is_failed(0.05));
        assert!(!is_failed(FAILURE_THRESHOLD));
        assert!(!is_failed(0.5));
    }

    #[test]
    fn test_labels() {
        assert_eq!(classify(0.5, BulbMode::Primary).as_str(), "PARTIAL");
        assert_eq!(classify(1.0, BulbMode::Backup).as_str(), "ACTIVE");
    }
}
