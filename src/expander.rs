use std::collections::HashMap;

use crate::catalog::Catalog;
use crate::error::{OptimizeError, Result};
use crate::types::{Configuration, MaterialGroup, MaterialRequirement, Piece, PieceKind};

/// Upper bound on the pieces a single requirement may expand into.
pub const MAX_PIECES_PER_REQUIREMENT: u64 = 1_000_000;

/// Turns one requirement into its cut pieces.
///
/// Each unit needs two height and two width pieces when both are positive,
/// plus one divider when the divider is positive.
pub fn expand_requirement(req: &MaterialRequirement) -> Result<Vec<Piece>> {
    validate(req)?;

    let qty = req.quantity as usize;
    let mut pieces = Vec::with_capacity(piece_count(req) as usize);
    if has_frame(req) {
        pieces.extend(std::iter::repeat_n(Piece::new(req.height, PieceKind::Height), 2 * qty));
        pieces.extend(std::iter::repeat_n(Piece::new(req.width, PieceKind::Width), 2 * qty));
    }
    if req.divider > 0.0 {
        pieces.extend(std::iter::repeat_n(Piece::new(req.divider, PieceKind::Divider), qty));
    }
    Ok(pieces)
}

fn has_frame(req: &MaterialRequirement) -> bool {
    req.height > 0.0 && req.width > 0.0
}

fn piece_count(req: &MaterialRequirement) -> u64 {
    let qty = u64::from(req.quantity);
    let frame = if has_frame(req) { 4 * qty } else { 0 };
    let divider = if req.divider > 0.0 { qty } else { 0 };
    frame + divider
}

fn validate(req: &MaterialRequirement) -> Result<()> {
    for (name, value) in [
        ("height", req.height),
        ("width", req.width),
        ("divider", req.divider),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(OptimizeError::Validation(format!(
                "{name} of material {} must be a non-negative number, got {value}",
                req.code
            )));
        }
    }
    if req.quantity < 1 && req.has_dimensions() {
        return Err(OptimizeError::Validation(format!(
            "quantity of material {} must be at least 1",
            req.code
        )));
    }
    let count = piece_count(req);
    if count > MAX_PIECES_PER_REQUIREMENT {
        return Err(OptimizeError::Validation(format!(
            "material {} expands to {count} pieces, at most {MAX_PIECES_PER_REQUIREMENT} allowed",
            req.code
        )));
    }
    Ok(())
}

/// Groups the pieces of every configuration by (code, vendor), in order of
/// first occurrence.
pub fn group_materials<C: Catalog + ?Sized>(
    catalog: &C,
    configurations: &[Configuration],
) -> Result<Vec<MaterialGroup>> {
    let mut groups: Vec<MaterialGroup> = Vec::new();
    let mut index: HashMap<(&str, &str), usize> = HashMap::new();

    for config in configurations {
        for req in &config.materials {
            let pieces = expand_requirement(req)?;
            let key = (req.code.as_str(), config.vendor.as_str());

            let gi = match index.get(&key) {
                Some(&gi) => gi,
                None => {
                    let product = catalog.resolve(&req.code, &config.vendor).ok_or_else(|| {
                        OptimizeError::MaterialNotFound {
                            code: req.code.clone(),
                            vendor: config.vendor.clone(),
                        }
                    })?;
                    groups.push(MaterialGroup {
                        code: req.code.clone(),
                        vendor: config.vendor.clone(),
                        description: product.description.clone(),
                        unit_price_per_length: product.unit_price_per_length,
                        price_per_rod: product.price_per_rod,
                        quantity: 0,
                        pieces: Vec::new(),
                    });
                    index.insert(key, groups.len() - 1);
                    groups.len() - 1
                }
            };

            let group = &mut groups[gi];
            group.quantity = group.quantity.checked_add(req.quantity).ok_or_else(|| {
                OptimizeError::Validation(format!(
                    "total quantity of material {} from vendor {} is too large",
                    group.code, group.vendor
                ))
            })?;
            group.pieces.extend(pieces);
        }
    }

    Ok(groups)
}
