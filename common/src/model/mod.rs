pub mod address;
pub mod city;
pub mod fire_station;
pub mod medication;
pub mod person;
pub mod variant;

/// Storage-assigned identity shared by every entity kind.
pub type EntityId = i64;
