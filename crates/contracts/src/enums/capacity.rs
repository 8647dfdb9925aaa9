use serde::{Deserialize, Serialize};

/// Единица измерения ёмкости накопителя
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CapacityUnit {
    #[default]
    GB,
    TB,
}

impl CapacityUnit {
    pub fn code(&self) -> &'static str {
        match self {
            CapacityUnit::GB => "GB",
            CapacityUnit::TB => "TB",
        }
    }

    pub fn all() -> Vec<CapacityUnit> {
        vec![CapacityUnit::GB, CapacityUnit::TB]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "GB" => Some(CapacityUnit::GB),
            "TB" => Some(CapacityUnit::TB),
            _ => None,
        }
    }
}

/// Тип накопителя
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CapacityType {
    #[default]
    SSD,
    HD,
}

impl CapacityType {
    pub fn code(&self) -> &'static str {
        match self {
            CapacityType::SSD => "SSD",
            CapacityType::HD => "HD",
        }
    }

    pub fn all() -> Vec<CapacityType> {
        vec![CapacityType::SSD, CapacityType::HD]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "SSD" => Some(CapacityType::SSD),
            "HD" => Some(CapacityType::HD),
            _ => None,
        }
    }
}
