//! ---
//! pointy_section: "12-derived-views"
//! pointy_subsection: "module"
//! pointy_type: "source"
//! pointy_scope: "code"
//! pointy_description: "Zone capacity classification and building grouping."
//! pointy_version: "v0.1.0"
//! pointy_owner: "tbd"
//! ---
use indexmap::IndexMap;
use pointy_sim::Zone;
use serde::Serialize;
use strum::{AsRefStr, Display, EnumIter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumIter, AsRefStr)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum CapacityStatus {
    Normal,
    Warning,
    Critical,
}

/// CRITICAL at or above capacity, WARNING from 80%, NORMAL below.
///
/// Compared in integers so the 80% boundary is exact. A zone without capacity
/// is CRITICAL as soon as anyone is in it.
pub fn capacity_status(zone: &Zone) -> CapacityStatus {
    let occupancy = u64::from(zone.current_occupancy);
    let capacity = u64::from(zone.capacity);
    if capacity == 0 {
        return if occupancy > 0 {
            CapacityStatus::Critical
        } else {
            CapacityStatus::Normal
        };
    }
    if occupancy >= capacity {
        CapacityStatus::Critical
    } else if occupancy * 5 >= capacity * 4 {
        CapacityStatus::Warning
    } else {
        CapacityStatus::Normal
    }
}

/// Progress-bar fill, capped at 100.
pub fn fill_percent(zone: &Zone) -> f64 {
    if zone.capacity == 0 {
        return if zone.current_occupancy > 0 { 100.0 } else { 0.0 };
    }
    (f64::from(zone.current_occupancy) * 100.0 / f64::from(zone.capacity)).min(100.0)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneView {
    #[serde(flatten)]
    pub zone: Zone,
    pub status: CapacityStatus,
    pub fill_percent: f64,
}

impl From<&Zone> for ZoneView {
    fn from(zone: &Zone) -> Self {
        Self {
            status: capacity_status(zone),
            fill_percent: fill_percent(zone),
            zone: zone.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildingGroup {
    pub building: String,
    pub zones: Vec<ZoneView>,
    pub total_occupancy: u32,
    pub total_capacity: u32,
}

/// Zones grouped per building, buildings in first-seen order.
pub fn group_by_building(zones: &[Zone]) -> Vec<BuildingGroup> {
    let mut groups: IndexMap<&str, BuildingGroup> = IndexMap::new();
    for zone in zones {
        let group = groups
            .entry(zone.building.as_str())
            .or_insert_with(|| BuildingGroup {
                building: zone.building.clone(),
                zones: Vec::new(),
                total_occupancy: 0,
                total_capacity: 0,
            });
        group.total_occupancy += zone.current_occupancy;
        group.total_capacity += zone.capacity;
        group.zones.push(ZoneView::from(zone));
    }
    groups.into_values().collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ZoneSummary {
    pub total_zones: usize,
    /// Zones strictly above capacity.
    pub over_capacity: usize,
    pub total_occupancy: u32,
}

pub fn zone_summary(zones: &[Zone]) -> ZoneSummary {
    ZoneSummary {
        total_zones: zones.len(),
        over_capacity: zones
            .iter()
            .filter(|zone| zone.current_occupancy > zone.capacity)
            .count(),
        total_occupancy: zones.iter().map(|zone| zone.current_occupancy).sum(),
    }
}
