//! Category documents and collection operations

use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId},
    Collection, Database,
};
use serde::{Deserialize, Serialize};

/// Category document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
}

fn collection(db: &Database) -> Collection<Category> {
    db.collection("categories")
}

/// List every category
pub async fn find_all(db: &Database) -> Result<Vec<Category>, mongodb::error::Error> {
    collection(db).find(doc! {}).await?.try_collect().await
}
