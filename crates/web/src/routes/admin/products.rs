//! Admin product CRUD route handlers.
//!
//! Every successful mutation regenerates the whole `products.json`
//! snapshot from the store before redirecting, so the public API and the
//! statically served copy never drift. A failed export downgrades the
//! redirect to a warning notice; the store remains authoritative.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use partfinder_core::ProductId;

use crate::db::ProductRepository;
use crate::error::AppError;
use crate::middleware::RequireAdminAuth;
use crate::models::product::{NewProduct, Product};
use crate::services::export::export_snapshot;
use crate::state::AppState;

use super::{MessageQuery, Notice};

// =============================================================================
// Form Types
// =============================================================================

/// Product form data, as submitted from the add/edit pages.
///
/// Everything arrives as text; `parse` turns it into a [`NewProduct`] or a
/// user-facing validation message.
#[derive(Debug, Default, Deserialize)]
pub struct ProductForm {
    pub product_type: String,
    pub lwc: String,
    pub partner: String,
    pub insulation: String,
    pub length: String,
    pub blade_size: String,
    pub layers: String,
    pub qty_per_pallet: String,
    pub box_pallet: String,
    pub part_number: String,
}

impl ProductForm {
    /// Validate the form and build the record to persist.
    ///
    /// # Errors
    ///
    /// Returns a user-facing message naming the first invalid field.
    fn parse(&self) -> Result<NewProduct, String> {
        let required = [
            ("Type", &self.product_type),
            ("LWC", &self.lwc),
            ("Insulation", &self.insulation),
            ("Length", &self.length),
        ];
        for (label, value) in required {
            if value.trim().is_empty() {
                return Err(format!("{label} is required."));
            }
        }

        let qty_per_pallet = parse_count(&self.qty_per_pallet)
            .ok_or_else(|| "Qty per pallet must be a whole number.".to_owned())?;
        let box_pallet = parse_count(&self.box_pallet)
            .ok_or_else(|| "Boxes per pallet must be a whole number.".to_owned())?;

        Ok(NewProduct {
            product_type: self.product_type.trim().to_owned(),
            lwc: self.lwc.trim().to_owned(),
            partner: optional(&self.partner),
            insulation: self.insulation.trim().to_owned(),
            length: self.length.trim().to_owned(),
            blade_size: self.blade_size.trim().to_owned(),
            layers: self.layers.trim().to_owned(),
            qty_per_pallet,
            box_pallet,
            part_number: optional(&self.part_number),
        })
    }
}

impl From<&Product> for ProductForm {
    fn from(product: &Product) -> Self {
        Self {
            product_type: product.product_type.clone(),
            lwc: product.lwc.clone(),
            partner: product.partner.clone().unwrap_or_default(),
            insulation: product.insulation.clone(),
            length: product.length.clone(),
            blade_size: product.blade_size.clone(),
            layers: product.layers.clone(),
            qty_per_pallet: product.qty_per_pallet.to_string(),
            box_pallet: product.box_pallet.to_string(),
            part_number: product.part_number.clone().unwrap_or_default(),
        }
    }
}

/// An empty or whitespace field becomes `None`.
fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}

/// Parse a pallet count; an empty field counts as zero.
fn parse_count(value: &str) -> Option<i64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some(0);
    }
    trimmed.parse().ok().filter(|n| *n >= 0)
}

// =============================================================================
// Templates
// =============================================================================

/// Product row for the listing template.
#[derive(Debug)]
pub struct ProductView {
    pub id: i64,
    pub product_type: String,
    pub lwc: String,
    pub partner: String,
    pub insulation: String,
    pub length: String,
    pub blade_size: String,
    pub layers: String,
    pub qty_per_pallet: i64,
    pub box_pallet: i64,
    pub part_number: String,
}

impl From<Product> for ProductView {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.as_i64(),
            product_type: product.product_type,
            lwc: product.lwc,
            partner: product.partner.unwrap_or_default(),
            insulation: product.insulation,
            length: product.length,
            blade_size: product.blade_size,
            layers: product.layers,
            qty_per_pallet: product.qty_per_pallet,
            box_pallet: product.box_pallet,
            part_number: product.part_number.unwrap_or_default(),
        }
    }
}

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/products.html")]
pub struct ProductsTemplate {
    pub username: String,
    pub products: Vec<ProductView>,
    pub notice: Option<Notice>,
}

/// Add/edit form page template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/product_form.html")]
pub struct ProductFormTemplate {
    pub username: String,
    pub heading: &'static str,
    /// Where the form posts back to.
    pub action: String,
    pub error: Option<String>,
    pub form: ProductForm,
}

// =============================================================================
// Handlers
// =============================================================================

/// Product listing.
///
/// GET /admin
pub async fn index(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Query(query): Query<MessageQuery>,
) -> Result<ProductsTemplate, AppError> {
    let products = ProductRepository::new(state.pool()).list_all().await?;

    Ok(ProductsTemplate {
        username: admin.username,
        products: products.into_iter().map(ProductView::from).collect(),
        notice: query.notice(),
    })
}

/// Empty product form.
///
/// GET /admin/add
pub async fn add_form(RequireAdminAuth(admin): RequireAdminAuth) -> ProductFormTemplate {
    ProductFormTemplate {
        username: admin.username,
        heading: "Add product",
        action: "/admin/add".to_owned(),
        error: None,
        form: ProductForm::default(),
    }
}

/// Create a product.
///
/// POST /admin/add
pub async fn add(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Form(form): Form<ProductForm>,
) -> Result<Response, AppError> {
    let new = match form.parse() {
        Ok(new) => new,
        Err(message) => {
            return Ok(ProductFormTemplate {
                username: admin.username,
                heading: "Add product",
                action: "/admin/add".to_owned(),
                error: Some(message),
                form,
            }
            .into_response());
        }
    };

    match ProductRepository::new(state.pool()).insert(&new).await {
        Ok(product) => {
            tracing::info!(id = %product.id, "product created");
            Ok(redirect_after_mutation(&state, "success=created").await)
        }
        Err(e) => {
            tracing::error!(error = %e, "product insert failed");
            Ok(ProductFormTemplate {
                username: admin.username,
                heading: "Add product",
                action: "/admin/add".to_owned(),
                error: Some("Could not save the product.".to_owned()),
                form,
            }
            .into_response())
        }
    }
}

/// Edit form for an existing product.
///
/// GET /admin/edit/{id}
pub async fn edit_form(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    let Some(product) = ProductRepository::new(state.pool())
        .get(ProductId::new(id))
        .await?
    else {
        return Ok(Redirect::to("/admin?error=not_found").into_response());
    };

    Ok(ProductFormTemplate {
        username: admin.username,
        heading: "Edit product",
        action: format!("/admin/edit/{id}"),
        error: None,
        form: ProductForm::from(&product),
    }
    .into_response())
}

/// Overwrite a product in place.
///
/// POST /admin/edit/{id}
pub async fn edit(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<ProductForm>,
) -> Result<Response, AppError> {
    let new = match form.parse() {
        Ok(new) => new,
        Err(message) => {
            return Ok(ProductFormTemplate {
                username: admin.username,
                heading: "Edit product",
                action: format!("/admin/edit/{id}"),
                error: Some(message),
                form,
            }
            .into_response());
        }
    };

    let repo = ProductRepository::new(state.pool());
    match repo.update(ProductId::new(id), &new).await {
        Ok(()) => {
            tracing::info!(id, "product updated");
            Ok(redirect_after_mutation(&state, "success=updated").await)
        }
        Err(crate::db::RepositoryError::NotFound) => {
            Ok(Redirect::to("/admin?error=not_found").into_response())
        }
        Err(e) => {
            tracing::error!(error = %e, id, "product update failed");
            Ok(ProductFormTemplate {
                username: admin.username,
                heading: "Edit product",
                action: format!("/admin/edit/{id}"),
                error: Some("Could not save the product.".to_owned()),
                form,
            }
            .into_response())
        }
    }
}

/// Delete a product.
///
/// POST /admin/delete/{id}
///
/// Idempotent from the caller's perspective: deleting an id that does not
/// exist lands back on the listing with a not-found notice.
pub async fn delete(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    let deleted = ProductRepository::new(state.pool())
        .delete(ProductId::new(id))
        .await?;

    if deleted {
        tracing::info!(id, "product deleted");
        Ok(redirect_after_mutation(&state, "warning=deleted").await)
    } else {
        Ok(Redirect::to("/admin?error=not_found").into_response())
    }
}

/// Regenerate the snapshot and redirect to the listing.
///
/// The mutation has already committed; an export failure keeps it and
/// downgrades the notice to a warning.
async fn redirect_after_mutation(state: &AppState, outcome: &str) -> Response {
    let query = match export_snapshot(state.pool(), &state.config().snapshot_path).await {
        Ok(_) => outcome.to_owned(),
        Err(e) => {
            tracing::error!(error = %e, "snapshot export after mutation failed");
            "warning=export_failed".to_owned()
        }
    };

    Redirect::to(&format!("/admin?{query}")).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> ProductForm {
        ProductForm {
            product_type: "A".to_owned(),
            lwc: "X1".to_owned(),
            partner: String::new(),
            insulation: "FOIL".to_owned(),
            length: "30".to_owned(),
            blade_size: "1/4".to_owned(),
            layers: "2".to_owned(),
            qty_per_pallet: "10".to_owned(),
            box_pallet: "5".to_owned(),
            part_number: String::new(),
        }
    }

    #[test]
    fn test_parse_valid_form() {
        let new = filled_form().parse().expect("valid form");
        assert_eq!(new.product_type, "A");
        assert_eq!(new.partner, None);
        assert_eq!(new.part_number, None);
        assert_eq!(new.qty_per_pallet, 10);
    }

    #[test]
    fn test_parse_requires_core_fields() {
        let mut form = filled_form();
        form.lwc = "  ".to_owned();
        let err = form.parse().expect_err("missing lwc");
        assert!(err.contains("LWC"));
    }

    #[test]
    fn test_parse_rejects_non_numeric_counts() {
        let mut form = filled_form();
        form.qty_per_pallet = "ten".to_owned();
        assert!(form.parse().is_err());

        form.qty_per_pallet = "-3".to_owned();
        assert!(form.parse().is_err());
    }

    #[test]
    fn test_parse_empty_counts_default_to_zero() {
        let mut form = filled_form();
        form.qty_per_pallet = String::new();
        form.box_pallet = " ".to_owned();
        let new = form.parse().expect("valid form");
        assert_eq!(new.qty_per_pallet, 0);
        assert_eq!(new.box_pallet, 0);
    }

    #[test]
    fn test_optional_trims_to_none() {
        assert_eq!(optional("  "), None);
        assert_eq!(optional(" P1 "), Some("P1".to_owned()));
    }
}
