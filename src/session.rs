use crate::catalog::Catalog;
use crate::error::{OptimizeError, Result};
use crate::expander::group_materials;
use crate::packer::Packer;
use crate::pricing::{price_material, summarize};
use crate::remnant::RemnantPool;
use crate::types::{Configuration, DEFAULT_RAW_LENGTH, ProjectSummary};

/// Plans the cutting of one request's configurations against a read-only catalog.
///
/// Each call to [`Optimizer::optimize`] starts from an empty remnant pool, so
/// one optimizer may serve many requests without leaking leftovers between them.
pub struct Optimizer<'a, C: Catalog + ?Sized> {
    catalog: &'a C,
    packer: Packer,
}

impl<'a, C: Catalog + ?Sized> Optimizer<'a, C> {
    pub fn new(catalog: &'a C) -> Self {
        Self {
            catalog,
            packer: Packer::new(DEFAULT_RAW_LENGTH),
        }
    }

    pub fn with_raw_length(catalog: &'a C, raw_length: f64) -> Result<Self> {
        if !raw_length.is_finite() || raw_length <= 0.0 {
            return Err(OptimizeError::Validation(format!(
                "raw length must be a positive number, got {raw_length}"
            )));
        }
        Ok(Self {
            catalog,
            packer: Packer::new(raw_length),
        })
    }

    pub fn raw_length(&self) -> f64 {
        self.packer.raw_length()
    }

    pub fn optimize(&self, configurations: &[Configuration]) -> Result<ProjectSummary> {
        let groups = group_materials(self.catalog, configurations)?;
        let raw_length = self.raw_length();

        let mut pool = RemnantPool::new();
        let mut materials = Vec::with_capacity(groups.len());
        // Group order decides which remnants later groups can drain.
        for group in groups {
            let packing = self.packer.pack(&group, &mut pool)?;
            materials.push(price_material(group, packing, raw_length));
        }

        let summary = summarize(materials, pool);
        tracing::info!(
            materials = summary.total_material_types,
            rods = summary.total_rods_used,
            wastage = summary.total_wastage,
            "optimization complete"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogData, Product, ProductCatalog};
    use crate::types::MaterialRequirement;

    fn catalog() -> ProductCatalog {
        let mut data = CatalogData::new();
        data.entry("WizPlas".into())
            .or_default()
            .entry("sliding".into())
            .or_default()
            .insert(
                "frames".into(),
                vec![Product {
                    code: "SP-2001".into(),
                    description: "80mm Sliding Frame Premium".into(),
                    unit_price_per_length: 100.0,
                    price_per_rod: 1500.0,
                }],
            );
        ProductCatalog::new(data)
    }

    fn divider_config(length: f64, quantity: u32) -> Configuration {
        Configuration {
            vendor: "WizPlas".into(),
            window_type: "sliding".into(),
            quantity: 1,
            materials: vec![MaterialRequirement {
                code: "SP-2001".into(),
                height: 0.0,
                width: 0.0,
                divider: length,
                quantity,
            }],
        }
    }

    #[test]
    fn test_invalid_raw_length() {
        let catalog = catalog();
        assert!(Optimizer::with_raw_length(&catalog, 0.0).is_err());
        assert!(Optimizer::with_raw_length(&catalog, -3.0).is_err());
        assert!(Optimizer::with_raw_length(&catalog, f64::INFINITY).is_err());
        assert_eq!(Optimizer::new(&catalog).raw_length(), 19.0);
    }

    #[test]
    fn test_pool_is_fresh_per_run() {
        let catalog = catalog();
        let optimizer = Optimizer::new(&catalog);
        let first = optimizer.optimize(&[divider_config(10.0, 3)]).unwrap();
        let second = optimizer.optimize(&[divider_config(10.0, 3)]).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.total_rods_used, 3);
    }

    #[test]
    fn test_custom_raw_length() {
        let catalog = catalog();
        let optimizer = Optimizer::with_raw_length(&catalog, 30.0).unwrap();
        let summary = optimizer.optimize(&[divider_config(10.0, 3)]).unwrap();
        assert_eq!(summary.total_rods_used, 1);
        assert_eq!(summary.total_wastage, 0.0);
        assert!(summary.remnants.is_empty());
    }

    #[test]
    fn test_error_aborts_whole_request() {
        let catalog = catalog();
        let optimizer = Optimizer::new(&catalog);
        let err = optimizer
            .optimize(&[divider_config(10.0, 1), divider_config(20.0, 1)])
            .unwrap_err();
        assert!(matches!(err, OptimizeError::PieceTooLong { length, .. } if length == 20.0));
    }
}
