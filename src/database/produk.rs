use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::produk::Produk;

const PRODUK_COLUMNS: &str = "id_barang, nama, stok, link_gambar, created_at, updated_at";

/// List every product. No pagination or filtering.
pub async fn list_produk() -> Result<Vec<Produk>, DatabaseError> {
    let pool = DatabaseManager::pool().await?;

    let produk =
        sqlx::query_as::<_, Produk>(&format!("SELECT {} FROM produk", PRODUK_COLUMNS))
            .fetch_all(pool)
            .await?;

    Ok(produk)
}

pub async fn find_produk(id_barang: i32) -> Result<Option<Produk>, DatabaseError> {
    let pool = DatabaseManager::pool().await?;

    let produk = sqlx::query_as::<_, Produk>(&format!(
        "SELECT {} FROM produk WHERE id_barang = $1",
        PRODUK_COLUMNS
    ))
    .bind(id_barang)
    .fetch_optional(pool)
    .await?;

    Ok(produk)
}

/// Insert a product row, returning the generated id
pub async fn insert_produk(
    nama: &str,
    stok: i32,
    link_gambar: Option<&str>,
) -> Result<i32, DatabaseError> {
    let pool = DatabaseManager::pool().await?;

    let (id_barang,): (i32,) = sqlx::query_as(
        "INSERT INTO produk (nama, stok, link_gambar) VALUES ($1, $2, $3) RETURNING id_barang",
    )
    .bind(nama)
    .bind(stok)
    .bind(link_gambar)
    .fetch_one(pool)
    .await?;

    Ok(id_barang)
}

/// Update a product row. Returns false when no row matched the id.
/// `updated_at` refreshes on every successful update.
pub async fn update_produk(
    id_barang: i32,
    nama: &str,
    stok: i32,
    link_gambar: Option<&str>,
) -> Result<bool, DatabaseError> {
    let pool = DatabaseManager::pool().await?;

    let result = sqlx::query(
        "UPDATE produk
         SET nama = $1, stok = $2, link_gambar = $3, updated_at = now()
         WHERE id_barang = $4",
    )
    .bind(nama)
    .bind(stok)
    .bind(link_gambar)
    .bind(id_barang)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Delete a product row. Returns false when no row matched the id.
pub async fn delete_produk(id_barang: i32) -> Result<bool, DatabaseError> {
    let pool = DatabaseManager::pool().await?;

    let result = sqlx::query("DELETE FROM produk WHERE id_barang = $1")
        .bind(id_barang)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
