use serde::{Deserialize, Deserializer, Serialize};

use crate::remnant::RemnantPool;

/// Length of one fresh rod of stock when none is configured.
pub const DEFAULT_RAW_LENGTH: f64 = 19.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    Height,
    Width,
    Divider,
}

impl std::fmt::Display for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PieceKind::Height => write!(f, "height"),
            PieceKind::Width => write!(f, "width"),
            PieceKind::Divider => write!(f, "divider"),
        }
    }
}

/// A single required cut.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Piece {
    pub length: f64,
    #[serde(rename = "type")]
    pub kind: PieceKind,
}

impl Piece {
    pub fn new(length: f64, kind: PieceKind) -> Self {
        Self { length, kind }
    }

    pub fn fits_in(&self, capacity: f64) -> bool {
        self.length <= capacity
    }
}

/// Accepts integral JSON numbers written either as `3` or `3.0`.
pub fn deserialize_u32_from_number<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    if value.fract() != 0.0 || value < 0.0 || value > u32::MAX as f64 {
        return Err(serde::de::Error::custom(format!(
            "expected a non-negative integer, got {value}"
        )));
    }
    Ok(value as u32)
}

/// One material line of a window configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialRequirement {
    pub code: String,
    #[serde(default)]
    pub height: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub divider: f64,
    #[serde(deserialize_with = "deserialize_u32_from_number")]
    pub quantity: u32,
}

impl MaterialRequirement {
    pub fn has_dimensions(&self) -> bool {
        self.height != 0.0 || self.width != 0.0 || self.divider != 0.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    #[serde(alias = "company")]
    pub vendor: String,
    #[serde(default)]
    pub window_type: String,
    #[serde(default = "default_quantity", deserialize_with = "deserialize_u32_from_number")]
    pub quantity: u32,
    pub materials: Vec<MaterialRequirement>,
}

fn default_quantity() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizeRequest {
    pub configurations: Vec<Configuration>,
}

/// All pieces requested for one (code, vendor) pair within a request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaterialGroup {
    pub code: String,
    pub vendor: String,
    pub description: String,
    #[serde(rename = "unit_price")]
    pub unit_price_per_length: f64,
    #[serde(rename = "rod_price")]
    pub price_per_rod: f64,
    pub quantity: u32,
    #[serde(skip)]
    pub pieces: Vec<Piece>,
}

/// A fresh rod and the pieces cut from it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rod {
    pub pieces: Vec<Piece>,
    pub leftover: f64,
}

impl Rod {
    pub fn new(raw_length: f64) -> Self {
        Self {
            pieces: Vec::new(),
            leftover: raw_length,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn cut(&mut self, piece: Piece) {
        self.leftover -= piece.length;
        self.pieces.push(piece);
    }

    pub fn used_length(&self) -> f64 {
        self.pieces.iter().map(|p| p.length).sum()
    }
}

/// A piece served from a remnant left by an earlier rod.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReuseEvent {
    pub remnant_length: f64,
    pub length: f64,
    #[serde(rename = "type")]
    pub kind: PieceKind,
    pub remaining: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaterialResult {
    #[serde(rename = "material_details")]
    pub group: MaterialGroup,
    pub rods_used: Vec<Rod>,
    pub leftovers: Vec<f64>,
    pub total_length: f64,
    pub reused_length: f64,
    pub fresh_length: f64,
    pub total_rods_required: usize,
    pub total_wastage: f64,
    #[serde(rename = "total_price_per_ft")]
    pub priced_by_length: f64,
    #[serde(rename = "total_price_per_rod")]
    pub priced_by_rod: f64,
    pub wastage_cost: f64,
    #[serde(rename = "reused_material")]
    pub reused: Vec<ReuseEvent>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectSummary {
    pub total_unique_materials: usize,
    pub total_material_types: usize,
    pub total_rods_used: usize,
    pub total_wastage: f64,
    #[serde(rename = "total_project_price_per_ft")]
    pub total_priced_by_length: f64,
    #[serde(rename = "total_project_price_per_rod")]
    pub total_priced_by_rod: f64,
    pub total_wastage_cost: f64,
    #[serde(rename = "material_details")]
    pub materials: Vec<MaterialResult>,
    #[serde(rename = "available_leftovers")]
    pub remnants: RemnantPool,
}

impl ProjectSummary {
    pub fn waste_percent(&self, raw_length: f64) -> f64 {
        let stock = raw_length * self.total_rods_used as f64;
        if stock == 0.0 {
            return 0.0;
        }
        self.total_wastage / stock * 100.0
    }
}
