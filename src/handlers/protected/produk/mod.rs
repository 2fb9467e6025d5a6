use axum::extract::{Extension, Path};
use axum::response::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::database;
use crate::database::models::produk::Produk;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};

/// Body for create and update. Field presence is checked here rather than
/// through serde so that a missing field yields a 400, and `stok` may
/// arrive as either a JSON number or a numeric string.
#[derive(Debug, Deserialize)]
pub struct ProdukPayload {
    pub nama: Option<String>,
    pub stok: Option<Value>,
    pub link_gambar: Option<String>,
}

fn validate_payload(payload: &ProdukPayload) -> Result<(String, i32), ApiError> {
    let nama = payload
        .nama
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::bad_request("Nama is required"))?;

    let stok = coerce_stok(payload.stok.as_ref())?;

    Ok((nama.to_string(), stok))
}

fn coerce_stok(value: Option<&Value>) -> Result<i32, ApiError> {
    let value = value.ok_or_else(|| ApiError::bad_request("Stok is required"))?;

    let stok = match value {
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| ApiError::bad_request("Stok must be a whole number"))?,
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| ApiError::bad_request("Stok must be a number"))?,
        _ => return Err(ApiError::bad_request("Stok must be a number")),
    };

    if stok < 0 {
        return Err(ApiError::bad_request("Stok cannot be negative"));
    }

    i32::try_from(stok).map_err(|_| ApiError::bad_request("Stok is out of range"))
}

/// GET /produk - List all products, no pagination or filtering
pub async fn list() -> ApiResult<Vec<Produk>> {
    let produk = database::produk::list_produk().await.map_err(|e| {
        tracing::error!("Failed to list produk: {}", e);
        ApiError::internal_server_error("Error retrieving products")
    })?;

    Ok(ApiResponse::success(produk))
}

/// GET /produk/:id - Show a single product
pub async fn show(Path(id): Path<i32>) -> ApiResult<Produk> {
    let produk = database::produk::find_produk(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Product not found"))?;

    Ok(ApiResponse::success(produk))
}

/// POST /produk - Create a product, returning the generated id
pub async fn create(
    Extension(auth_user): Extension<AuthUser>,
    Json(payload): Json<ProdukPayload>,
) -> ApiResult<Value> {
    let (nama, stok) = validate_payload(&payload)?;

    let id_barang = database::produk::insert_produk(&nama, stok, payload.link_gambar.as_deref())
        .await
        .map_err(|e| {
            tracing::error!("Produk insert failed: {}", e);
            ApiError::internal_server_error("Error adding product")
        })?;

    tracing::info!(id_barang, created_by = %auth_user.email, "produk created");

    Ok(ApiResponse::created(json!({
        "message": "Product added successfully",
        "productId": id_barang
    })))
}

/// PUT /produk/:id - Update name, stock and image URL
pub async fn update(
    Path(id): Path<i32>,
    Json(payload): Json<ProdukPayload>,
) -> ApiResult<Value> {
    let (nama, stok) = validate_payload(&payload)?;

    let updated =
        database::produk::update_produk(id, &nama, stok, payload.link_gambar.as_deref()).await?;

    if !updated {
        return Err(ApiError::not_found("Product not found"));
    }

    Ok(ApiResponse::success(json!({
        "message": "Product updated successfully"
    })))
}

/// DELETE /produk/:id - Remove a product
pub async fn destroy(
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<i32>,
) -> ApiResult<Value> {
    let deleted = database::produk::delete_produk(id).await?;

    if !deleted {
        return Err(ApiError::not_found("Product not found"));
    }

    tracing::info!(id_barang = id, deleted_by = %auth_user.email, "produk deleted");

    Ok(ApiResponse::success(json!({
        "message": "Product deleted successfully"
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(nama: Option<&str>, stok: Option<Value>) -> ProdukPayload {
        ProdukPayload {
            nama: nama.map(String::from),
            stok,
            link_gambar: None,
        }
    }

    #[test]
    fn numeric_stok_is_accepted() {
        let (nama, stok) = validate_payload(&payload(Some("Widget"), Some(json!(10)))).unwrap();
        assert_eq!(nama, "Widget");
        assert_eq!(stok, 10);
    }

    #[test]
    fn string_stok_is_coerced() {
        let (_, stok) = validate_payload(&payload(Some("Widget"), Some(json!("25")))).unwrap();
        assert_eq!(stok, 25);
    }

    #[test]
    fn non_numeric_stok_is_rejected() {
        let err = validate_payload(&payload(Some("Widget"), Some(json!("banyak")))).unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn negative_stok_is_rejected() {
        let err = validate_payload(&payload(Some("Widget"), Some(json!(-1)))).unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn fractional_stok_is_rejected() {
        let err = validate_payload(&payload(Some("Widget"), Some(json!(1.5)))).unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn missing_nama_is_rejected() {
        let err = validate_payload(&payload(None, Some(json!(1)))).unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn blank_nama_is_rejected() {
        let err = validate_payload(&payload(Some("   "), Some(json!(1)))).unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn missing_stok_is_rejected() {
        let err = validate_payload(&payload(Some("Widget"), None)).unwrap_err();
        assert_eq!(err.status_code(), 400);
    }
}
