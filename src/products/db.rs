/**
 * Product Documents and Collection Operations
 *
 * Listings live in the `products` collection. Wire field names are
 * camelCase with one historical exception: the transaction id is stored
 * and served as `transactionID`.
 *
 * The optional flags (`advertised`, `reported`, `verified`) are absent
 * until set; filters therefore match on `true` rather than on presence.
 */

use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId},
    results::{DeleteResult, InsertOneResult, UpdateResult},
    Collection, Database,
};
use serde::{Deserialize, Serialize};

/// Product document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    /// Hex ObjectId of the category this listing is filed under
    pub category_id: String,
    pub seller_email: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posted_at: Option<String>,
    #[serde(default)]
    pub sold: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advertised: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reported: Option<bool>,
    /// Present and true only when the seller was verified at creation time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
    #[serde(
        rename = "transactionID",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub transaction_id: Option<String>,
}

fn collection(db: &Database) -> Collection<Product> {
    db.collection("products")
}

/// List a seller's products
pub async fn find_by_seller(
    db: &Database,
    email: &str,
) -> Result<Vec<Product>, mongodb::error::Error> {
    collection(db)
        .find(doc! { "sellerEmail": email })
        .await?
        .try_collect()
        .await
}

/// List the unsold products of a category
pub async fn find_unsold_by_category(
    db: &Database,
    category_id: &str,
) -> Result<Vec<Product>, mongodb::error::Error> {
    collection(db)
        .find(doc! { "categoryId": category_id, "sold": false })
        .await?
        .try_collect()
        .await
}

/// List advertised products that have not sold yet
pub async fn find_advertised(db: &Database) -> Result<Vec<Product>, mongodb::error::Error> {
    collection(db)
        .find(doc! { "advertised": true, "sold": false })
        .await?
        .try_collect()
        .await
}

/// List reported products
pub async fn find_reported(db: &Database) -> Result<Vec<Product>, mongodb::error::Error> {
    collection(db)
        .find(doc! { "reported": true })
        .await?
        .try_collect()
        .await
}

/// Insert a new listing
pub async fn insert(
    db: &Database,
    product: &Product,
) -> Result<InsertOneResult, mongodb::error::Error> {
    collection(db).insert_one(product).await
}

/// Flag a listing as advertised
pub async fn set_advertised(
    db: &Database,
    id: ObjectId,
) -> Result<UpdateResult, mongodb::error::Error> {
    collection(db)
        .update_one(doc! { "_id": id }, doc! { "$set": { "advertised": true } })
        .await
}

/// Flag a listing as reported
pub async fn set_reported(
    db: &Database,
    id: ObjectId,
) -> Result<UpdateResult, mongodb::error::Error> {
    collection(db)
        .update_one(doc! { "_id": id }, doc! { "$set": { "reported": true } })
        .await
}

/// Mark a listing sold and record the payment transaction id
pub async fn mark_sold(
    db: &Database,
    id: ObjectId,
    transaction_id: &str,
) -> Result<UpdateResult, mongodb::error::Error> {
    collection(db)
        .update_one(
            doc! { "_id": id },
            doc! { "$set": { "sold": true, "transactionID": transaction_id } },
        )
        .await
}

/// Delete a listing
pub async fn delete(db: &Database, id: ObjectId) -> Result<DeleteResult, mongodb::error::Error> {
    collection(db).delete_one(doc! { "_id": id }).await
}
