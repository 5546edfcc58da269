/**
 * Server Configuration
 *
 * Environment-driven configuration. The store connection is the only
 * piece the server cannot run without, so `connect_database` pings the
 * deployment and fails fast instead of surfacing the first broken handler
 * call minutes later.
 *
 * | Variable            | Default                     |
 * |---------------------|-----------------------------|
 * | `MONGODB_URI`       | `mongodb://localhost:27017` |
 * | `MONGODB_DB`        | `resale_market`             |
 * | `PORT`              | `5000`                      |
 */

use mongodb::{
    bson::doc,
    options::ClientOptions,
    Client, Database,
};

const DEFAULT_MONGODB_URI: &str = "mongodb://localhost:27017";
const DEFAULT_DATABASE: &str = "resale_market";
const DEFAULT_PORT: u16 = 5000;

/// Connect to MongoDB and verify the deployment answers
///
/// # Returns
/// The database handle every handler receives through `AppState`
pub async fn connect_database() -> Result<Database, mongodb::error::Error> {
    let uri =
        std::env::var("MONGODB_URI").unwrap_or_else(|_| DEFAULT_MONGODB_URI.to_string());
    let db_name =
        std::env::var("MONGODB_DB").unwrap_or_else(|_| DEFAULT_DATABASE.to_string());

    tracing::info!("connecting to MongoDB database '{}'", db_name);

    let options = ClientOptions::parse(&uri).await?;
    let client = Client::with_options(options)?;
    let db = client.database(&db_name);

    db.run_command(doc! { "ping": 1 }).await?;
    tracing::info!("MongoDB connection established");

    Ok(db)
}

/// Listen port from `PORT`, defaulting to 5000
pub fn listen_port() -> u16 {
    std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listen_port_default() {
        if std::env::var("PORT").is_err() {
            assert_eq!(listen_port(), 5000);
        }
    }
}
