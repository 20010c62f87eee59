// Domain layer - Pure types and rules, no I/O
pub mod bulb;
pub mod dashboard;
pub mod device;
pub mod feed;
pub mod fleet;
pub mod time_range;
