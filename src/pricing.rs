use std::collections::BTreeSet;

use crate::packer::Packing;
use crate::remnant::RemnantPool;
use crate::types::{MaterialGroup, MaterialResult, ProjectSummary};

/// Prices one packed group.
///
/// `wastage_cost` is rod price minus length price and is not clamped: it goes
/// negative when reuse makes per-length pricing exceed per-rod pricing.
pub fn price_material(group: MaterialGroup, packing: Packing, raw_length: f64) -> MaterialResult {
    let total_length: f64 = group.pieces.iter().map(|p| p.length).sum();
    let rod_count = packing.rod_count();
    let priced_by_length = total_length * group.unit_price_per_length;
    let priced_by_rod = rod_count as f64 * group.price_per_rod;

    MaterialResult {
        leftovers: packing.rods.iter().map(|r| r.leftover).collect(),
        reused_length: packing.reused_length(),
        fresh_length: packing.fresh_length(),
        total_rods_required: rod_count,
        total_wastage: raw_length * rod_count as f64 - total_length,
        priced_by_length,
        priced_by_rod,
        wastage_cost: priced_by_rod - priced_by_length,
        total_length,
        rods_used: packing.rods,
        reused: packing.reused,
        group,
    }
}

/// Field-wise sum of the per-material results.
pub fn summarize(materials: Vec<MaterialResult>, remnants: RemnantPool) -> ProjectSummary {
    let unique_codes: BTreeSet<&str> = materials.iter().map(|m| m.group.code.as_str()).collect();
    let total_unique_materials = unique_codes.len();

    ProjectSummary {
        total_unique_materials,
        total_material_types: materials.len(),
        total_rods_used: materials.iter().map(|m| m.total_rods_required).sum(),
        total_wastage: materials.iter().map(|m| m.total_wastage).sum(),
        total_priced_by_length: materials.iter().map(|m| m.priced_by_length).sum(),
        total_priced_by_rod: materials.iter().map(|m| m.priced_by_rod).sum(),
        total_wastage_cost: materials.iter().map(|m| m.wastage_cost).sum(),
        materials,
        remnants,
    }
}
