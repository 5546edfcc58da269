/**
 * Order Documents and Collection Operations
 *
 * An order is a buyer's claim on a product. The natural key is the
 * (productID, buyerEmail) pair; creation is an atomic `$setOnInsert`
 * upsert on that pair so a buyer cannot race two open orders onto the
 * same product.
 */

use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, to_document},
    results::UpdateResult,
    Collection, Database,
};
use serde::{Deserialize, Serialize};

/// Order document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// Hex ObjectId of the ordered product
    #[serde(rename = "productID")]
    pub product_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    pub buyer_email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meeting_location: Option<String>,
    #[serde(default)]
    pub sold: bool,
}

fn collection(db: &Database) -> Collection<Order> {
    db.collection("orders")
}

/// List a buyer's orders
pub async fn find_by_buyer(
    db: &Database,
    email: &str,
) -> Result<Vec<Order>, mongodb::error::Error> {
    collection(db)
        .find(doc! { "buyerEmail": email })
        .await?
        .try_collect()
        .await
}

/// Get an order by id
pub async fn find_by_id(
    db: &Database,
    id: ObjectId,
) -> Result<Option<Order>, mongodb::error::Error> {
    collection(db).find_one(doc! { "_id": id }).await
}

/// Insert an order unless the buyer already holds one for the product
///
/// Atomic upsert keyed on the (productID, buyerEmail) pair; an existing
/// order is left untouched and `upserted_id` comes back `None`.
pub async fn find_or_insert(
    db: &Database,
    order: &Order,
) -> Result<UpdateResult, mongodb::error::Error> {
    let mut fields = to_document(order)?;
    // Both key fields travel in the filter.
    fields.remove("productID");
    fields.remove("buyerEmail");

    collection(db)
        .update_one(
            doc! { "productID": &order.product_id, "buyerEmail": &order.buyer_email },
            doc! { "$setOnInsert": fields },
        )
        .upsert(true)
        .await
}

/// Flip every order on a product to sold
pub async fn mark_sold_by_product(
    db: &Database,
    product_id: &str,
) -> Result<UpdateResult, mongodb::error::Error> {
    collection(db)
        .update_many(
            doc! { "productID": product_id },
            doc! { "$set": { "sold": true } },
        )
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_order() -> Order {
        Order {
            id: None,
            product_id: "63a1b2c3d4e5f6a7b8c9d0e1".to_string(),
            product_name: Some("Thinkpad X220".to_string()),
            buyer_email: "buyer@x.com".to_string(),
            price: Some(220.0),
            phone: None,
            meeting_location: None,
            sold: false,
        }
    }

    #[test]
    fn test_product_reference_uses_historical_name() {
        let json = serde_json::to_value(sample_order()).unwrap();
        assert_eq!(json["productID"], "63a1b2c3d4e5f6a7b8c9d0e1");
        assert!(json.get("productId").is_none());
        assert_eq!(json["buyerEmail"], "buyer@x.com");
    }

    #[test]
    fn test_upsert_fields_drop_natural_key() {
        let mut fields = to_document(&sample_order()).unwrap();
        fields.remove("productID");
        fields.remove("buyerEmail");
        assert!(!fields.contains_key("productID"));
        assert!(!fields.contains_key("buyerEmail"));
        assert_eq!(fields.get_str("productName").unwrap(), "Thinkpad X220");
    }

    #[test]
    fn test_sold_defaults_false() {
        let order: Order = serde_json::from_str(
            r#"{"productID":"p1","buyerEmail":"b@x.com"}"#,
        )
        .unwrap();
        assert!(!order.sold);
    }
}
