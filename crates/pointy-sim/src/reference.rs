//! ---
//! pointy_section: "11-simulation"
//! pointy_subsection: "module"
//! pointy_type: "source"
//! pointy_scope: "code"
//! pointy_description: "Fixed reference vocabularies sampled by the generators."
//! pointy_version: "v0.1.0"
//! pointy_owner: "tbd"
//! ---

pub const DEPARTMENTS: &[&str] = &[
    "Engineering",
    "Marketing",
    "Sales",
    "HR",
    "Finance",
    "Operations",
    "Legal",
    "IT Support",
];

pub const BUILDINGS: &[&str] = &["HQ Building A", "HQ Building B", "Warehouse", "R&D Center"];

/// Zones an employee may be assigned to at generation time.
pub const ZONES: &[&str] = &[
    "Floor 1",
    "Floor 2",
    "Floor 3",
    "Lobby",
    "Cafeteria",
    "Meeting Rooms",
    "Server Room",
    "Parking",
];

/// Number of leading [`ZONES`] tracked for occupancy in every building.
pub const MONITORED_ZONES_PER_BUILDING: usize = 5;

/// Zones the live simulator relocates employees into.
pub const RELOCATION_ZONES: &[&str] = &[
    "Floor 1",
    "Floor 2",
    "Floor 3",
    "Lobby",
    "Cafeteria",
    "Meeting Rooms",
];

/// Checkpoints covered by the access-control log.
pub const SECURITY_ZONES: &[&str] = &[
    "Main Entrance",
    "Parking Gate",
    "Floor 1",
    "Floor 2",
    "Server Room",
    "Executive Wing",
];

pub const FIRST_NAMES: &[&str] = &[
    "Ahmed", "Fatima", "Mohamed", "Amina", "Youssef", "Sara", "Karim", "Nadia", "Omar", "Leila",
    "Hassan", "Yasmine", "Ali", "Samira", "Rachid", "Khadija",
];

pub const LAST_NAMES: &[&str] = &[
    "Benali",
    "Mansouri",
    "Boudjema",
    "Larbi",
    "Hadj",
    "Belkacem",
    "Zerhouni",
    "Benmoussa",
    "Khelifi",
    "Rahmani",
    "Saidi",
    "Cherif",
    "Hamidi",
    "Ouali",
    "Messaoudi",
];
