/**
 * User Documents and Collection Operations
 *
 * Accounts live in the `users` collection. The natural unique key is the
 * email; the ObjectId is only used for the admin delete/verify routes.
 *
 * Account creation is an atomic find-or-insert: a `$setOnInsert` upsert
 * keyed on the email, so concurrent sign-ins for the same identity cannot
 * race past a separate existence check and insert twice.
 */

use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, to_document},
    results::{DeleteResult, UpdateResult},
    Collection, Database,
};
use serde::{Deserialize, Serialize};

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Seller,
    Buyer,
}

/// Account document
///
/// `role` is absent for accounts that never picked one and `verified`
/// defaults to false for documents written before the flag existed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default)]
    pub verified: bool,
}

fn collection(db: &Database) -> Collection<User> {
    db.collection("users")
}

/// Get a user by email
///
/// # Returns
/// The account, or `None` if the email is unknown
pub async fn find_by_email(
    db: &Database,
    email: &str,
) -> Result<Option<User>, mongodb::error::Error> {
    collection(db).find_one(doc! { "email": email }).await
}

/// List every account
pub async fn find_all(db: &Database) -> Result<Vec<User>, mongodb::error::Error> {
    collection(db).find(doc! {}).await?.try_collect().await
}

/// List accounts holding a role
pub async fn find_by_role(db: &Database, role: Role) -> Result<Vec<User>, mongodb::error::Error> {
    let role_name = match role {
        Role::Admin => "admin",
        Role::Seller => "seller",
        Role::Buyer => "buyer",
    };
    collection(db)
        .find(doc! { "role": role_name })
        .await?
        .try_collect()
        .await
}

/// Insert an account unless the email is already registered
///
/// Single atomic upsert keyed on the email. The email itself is carried by
/// the filter; everything else goes through `$setOnInsert` so an existing
/// account is left untouched.
///
/// # Returns
/// The raw `UpdateResult`; `upserted_id` is `None` when the account
/// already existed.
pub async fn find_or_insert(
    db: &Database,
    user: &User,
) -> Result<UpdateResult, mongodb::error::Error> {
    let mut fields = to_document(user)?;
    // The filter already pins the email; repeating it in the update
    // document is a path conflict on upsert.
    fields.remove("email");

    collection(db)
        .update_one(
            doc! { "email": &user.email },
            doc! { "$setOnInsert": fields },
        )
        .upsert(true)
        .await
}

/// Mark an account as verified
pub async fn set_verified(
    db: &Database,
    id: ObjectId,
) -> Result<UpdateResult, mongodb::error::Error> {
    collection(db)
        .update_one(doc! { "_id": id }, doc! { "$set": { "verified": true } })
        .await
}

/// Delete an account by id
pub async fn delete(db: &Database, id: ObjectId) -> Result<DeleteResult, mongodb::error::Error> {
    collection(db).delete_one(doc! { "_id": id }).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), r#""admin""#);
        assert_eq!(serde_json::to_string(&Role::Seller).unwrap(), r#""seller""#);
        assert_eq!(serde_json::to_string(&Role::Buyer).unwrap(), r#""buyer""#);
    }

    #[test]
    fn test_user_without_role_deserializes() {
        let user: User =
            serde_json::from_str(r#"{"email":"a@x.com"}"#).unwrap();
        assert_eq!(user.email, "a@x.com");
        assert_eq!(user.role, None);
        assert!(!user.verified);
    }

    #[test]
    fn test_user_skips_absent_optionals() {
        let user = User {
            id: None,
            name: None,
            email: "a@x.com".to_string(),
            role: None,
            verified: false,
        };
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("_id").is_none());
        assert!(json.get("role").is_none());
    }

    #[test]
    fn test_upsert_fields_drop_email() {
        let user = User {
            id: None,
            name: Some("Ada".to_string()),
            email: "ada@x.com".to_string(),
            role: Some(Role::Buyer),
            verified: false,
        };
        let mut fields = to_document(&user).unwrap();
        fields.remove("email");
        assert!(!fields.contains_key("email"));
        assert_eq!(fields.get_str("role").unwrap(), "buyer");
    }
}
