//! Catalog product model.

use chrono::{DateTime, Utc};

use partfinder_core::{ProductId, ProductRecord};

/// A catalog line item as stored in the database.
#[derive(Debug, Clone)]
pub struct Product {
    pub id: ProductId,
    /// Category code, e.g. `A`.
    pub product_type: String,
    /// Line code.
    pub lwc: String,
    /// Optional partner line code.
    pub partner: Option<String>,
    /// Insulation code.
    pub insulation: String,
    /// Display length; may encode a range like `15-35`.
    pub length: String,
    pub blade_size: String,
    pub layers: String,
    pub qty_per_pallet: i64,
    pub box_pallet: i64,
    /// Derived part number, when one has been computed.
    pub part_number: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Field values for creating a product or overwriting one in place.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub product_type: String,
    pub lwc: String,
    pub partner: Option<String>,
    pub insulation: String,
    pub length: String,
    pub blade_size: String,
    pub layers: String,
    pub qty_per_pallet: i64,
    pub box_pallet: i64,
    pub part_number: Option<String>,
}

impl From<Product> for ProductRecord {
    fn from(product: Product) -> Self {
        Self {
            product_type: product.product_type,
            lwc: product.lwc,
            partner: product.partner,
            insulation: product.insulation,
            length: product.length,
            blade_size: product.blade_size,
            layers: product.layers,
            qty_per_pallet: product.qty_per_pallet,
            box_pallet: product.box_pallet,
            part_number: product.part_number,
        }
    }
}

impl From<ProductRecord> for NewProduct {
    fn from(record: ProductRecord) -> Self {
        Self {
            product_type: record.product_type,
            lwc: record.lwc,
            partner: record.partner,
            insulation: record.insulation,
            length: record.length,
            blade_size: record.blade_size,
            layers: record.layers,
            qty_per_pallet: record.qty_per_pallet,
            box_pallet: record.box_pallet,
            part_number: record.part_number,
        }
    }
}
