/**
 * Payment Documents and Collection Operations
 *
 * A payment record is the source of truth for "the sale happened":
 * downstream reads check payment existence, not the product flag. The
 * insert is keyed on the provider transaction id so a retried checkout
 * request cannot duplicate the record.
 */

use mongodb::{
    bson::{doc, oid::ObjectId, to_document},
    results::UpdateResult,
    Collection, Database,
};
use serde::{Deserialize, Serialize};

/// Payment document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// Hex ObjectId of the purchased product
    #[serde(rename = "productID")]
    pub product_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buyer_email: Option<String>,
    /// Provider transaction id reported by the client after checkout
    #[serde(rename = "transactionID")]
    pub transaction_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

fn collection(db: &Database) -> Collection<Payment> {
    db.collection("payments")
}

/// Insert a payment unless the transaction id was already recorded
///
/// Atomic upsert keyed on `transactionID`; a retried checkout request
/// leaves the existing record untouched (`upserted_id` comes back `None`)
/// so the caller can still re-run the idempotent fan-out updates.
pub async fn find_or_insert(
    db: &Database,
    payment: &Payment,
) -> Result<UpdateResult, mongodb::error::Error> {
    let mut fields = to_document(payment)?;
    fields.remove("transactionID");

    collection(db)
        .update_one(
            doc! { "transactionID": &payment.transaction_id },
            doc! { "$setOnInsert": fields },
        )
        .upsert(true)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_wire_names() {
        let payment = Payment {
            id: None,
            product_id: "63a1b2c3d4e5f6a7b8c9d0e1".to_string(),
            buyer_email: Some("buyer@x.com".to_string()),
            transaction_id: "pi_3MtwBwLkdIwHu7ix28a3tqPa".to_string(),
            price: Some(220.0),
        };
        let json = serde_json::to_value(payment).unwrap();
        assert_eq!(json["productID"], "63a1b2c3d4e5f6a7b8c9d0e1");
        assert_eq!(json["transactionID"], "pi_3MtwBwLkdIwHu7ix28a3tqPa");
        assert_eq!(json["buyerEmail"], "buyer@x.com");
    }

    #[test]
    fn test_upsert_fields_drop_transaction_id() {
        let payment = Payment {
            id: None,
            product_id: "p1".to_string(),
            buyer_email: None,
            transaction_id: "txn_1".to_string(),
            price: None,
        };
        let mut fields = to_document(&payment).unwrap();
        fields.remove("transactionID");
        assert!(!fields.contains_key("transactionID"));
        assert_eq!(fields.get_str("productID").unwrap(), "p1");
    }
}
