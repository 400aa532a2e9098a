//! Product route handlers.
//!
//! Every operation here runs as the logged-in account and goes through the
//! owner-filtered storage calls, so a product that exists but belongs to
//! someone else is handled exactly like one that does not exist.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use tienda_core::{Price, ProductId};

use super::{MessageQuery, flash_message};
use crate::{
    error::Result,
    middleware::auth::RequireAuth,
    models::Product,
    state::AppState,
    storage::StoreError,
};

// =============================================================================
// Form Types
// =============================================================================

/// Product form data. The create and edit forms share field names, and a
/// missing field reads as blank.
#[derive(Debug, Deserialize)]
pub struct ProductForm {
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub precio: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Product list page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/list.html")]
pub struct ListTemplate {
    /// Display name of the logged-in account.
    pub name: String,
    pub products: Vec<Product>,
    pub error: Option<&'static str>,
    pub success: Option<&'static str>,
}

/// Product edit page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/edit.html")]
pub struct EditTemplate {
    pub product: Product,
    pub error: Option<&'static str>,
}

// =============================================================================
// List Route
// =============================================================================

/// Display the product list for the logged-in account.
pub async fn index(
    RequireAuth(account): RequireAuth,
    State(state): State<AppState>,
    Query(query): Query<MessageQuery>,
) -> Result<ListTemplate> {
    let products = state.store().list_products_for_owner(&account.id).await?;

    Ok(ListTemplate {
        name: account.name,
        products,
        error: query.error.as_deref().and_then(flash_message),
        success: query.success.as_deref().and_then(flash_message),
    })
}

// =============================================================================
// Create Route
// =============================================================================

/// Handle product creation.
pub async fn create(
    RequireAuth(account): RequireAuth,
    State(state): State<AppState>,
    Form(form): Form<ProductForm>,
) -> Result<Redirect> {
    // A price that does not parse is stored as zero.
    let price = Price::parse_lenient(&form.precio);

    state
        .store()
        .create_product(&account.id, &form.nombre, price)
        .await?;

    Ok(Redirect::to("/"))
}

// =============================================================================
// Edit Routes
// =============================================================================

/// Display the edit form for one product.
pub async fn edit_page(
    RequireAuth(account): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<MessageQuery>,
) -> Result<Response> {
    let product_id = ProductId::new(id);

    let found = state
        .store()
        .find_product_for_owner(&product_id, &account.id)
        .await?;
    let Some(product) = found else {
        return Ok(Redirect::to("/?error=not_yours").into_response());
    };

    Ok(EditTemplate {
        product,
        error: query.error.as_deref().and_then(flash_message),
    }
    .into_response())
}

/// Handle the edit form submission.
///
/// Blank fields keep their stored value. A non-blank price must parse; a
/// bad one sends the form back without changing anything.
pub async fn update(
    RequireAuth(account): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<ProductForm>,
) -> Result<Response> {
    let product_id = ProductId::new(id);

    let found = state
        .store()
        .find_product_for_owner(&product_id, &account.id)
        .await?;
    let Some(current) = found else {
        return Ok(Redirect::to("/?error=not_yours").into_response());
    };

    let name = if form.nombre.is_empty() {
        current.name
    } else {
        form.nombre
    };
    let price = if form.precio.is_empty() {
        current.price
    } else {
        match form.precio.parse::<Price>() {
            Ok(price) => price,
            Err(_) => {
                let target = format!("/producto/editar/{product_id}?error=bad_price");
                return Ok(Redirect::to(&target).into_response());
            }
        }
    };

    match state
        .store()
        .update_product(&product_id, &account.id, &name, price)
        .await
    {
        Ok(()) => Ok(Redirect::to("/?success=updated").into_response()),
        // The product went away between the lookup and the write
        Err(StoreError::NotFound) => Ok(Redirect::to("/?error=not_yours").into_response()),
        Err(e) => Err(e.into()),
    }
}

// =============================================================================
// Delete Route
// =============================================================================

/// Handle product deletion.
pub async fn delete(
    RequireAuth(account): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response> {
    let product_id = ProductId::new(id);

    match state
        .store()
        .delete_product(&product_id, &account.id)
        .await
    {
        Ok(()) => Ok(Redirect::to("/?success=deleted").into_response()),
        Err(StoreError::NotFound) => {
            tracing::warn!("Refused delete of product {}", product_id);
            Ok(Redirect::to("/?error=not_yours").into_response())
        }
        Err(e) => Err(e.into()),
    }
}
