use crate::config::AppConfig;
use mongodb::bson::{doc, Document};
use mongodb::error::{Error as MongoError, ErrorKind, WriteFailure};
use mongodb::options::IndexOptions;
use futures::TryStreamExt;
use mongodb::{Client, Collection, Database, IndexModel};
use std::error::Error;

pub const USERS: &str = "users";
pub const EMAILS: &str = "emails";
pub const ALERTS: &str = "alerts";

/// Collections the service expects, in creation order
pub const COLLECTIONS: [&str; 3] = [USERS, EMAILS, ALERTS];

/// Server code for "collection already exists"
const NAMESPACE_EXISTS: i32 = 48;
/// Server code for unique index violations
const DUPLICATE_KEY: i32 = 11000;

#[derive(Clone)]
pub struct MongoDB {
    client: Client,
    db: Database,
}

/// Outcome of a bootstrap run. Re-running only moves names to the `existing_*` lists.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BootstrapReport {
    pub created_collections: Vec<String>,
    pub existing_collections: Vec<String>,
    pub created_indexes: Vec<String>,
    pub existing_indexes: Vec<String>,
    /// Indexes on the right keys whose `unique` flag differs from the expected one
    pub mismatched_indexes: Vec<String>,
}

/// How an expected index compares with what the collection already has
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IndexState {
    Missing,
    Present,
    UniqueMismatch { actual: bool },
}

/// One index the bootstrap guarantees
struct IndexSpec {
    collection: &'static str,
    keys: Document,
    unique: bool,
}

impl IndexSpec {
    /// Name the server assigns by default, e.g. `user_id_1_received_at_-1`
    fn default_name(&self) -> String {
        self.keys
            .iter()
            .map(|(field, dir)| format!("{}_{}", field, dir))
            .collect::<Vec<_>>()
            .join("_")
    }

    /// Matches on the key document first, then on the default name
    fn state_in(&self, existing: &[IndexModel]) -> IndexState {
        let name = self.default_name();
        let found = existing.iter().find(|model| model.keys == self.keys).or_else(|| {
            existing.iter().find(|model| {
                model.options.as_ref().and_then(|o| o.name.as_deref()) == Some(name.as_str())
            })
        });

        match found {
            None => IndexState::Missing,
            Some(model) => {
                let actual = model
                    .options
                    .as_ref()
                    .and_then(|o| o.unique)
                    .unwrap_or(false);
                if actual == self.unique {
                    IndexState::Present
                } else {
                    IndexState::UniqueMismatch { actual }
                }
            }
        }
    }
}

fn index_specs() -> Vec<IndexSpec> {
    vec![
        IndexSpec {
            collection: USERS,
            keys: doc! { "email": 1 },
            unique: true,
        },
        IndexSpec {
            collection: EMAILS,
            keys: doc! { "user_id": 1, "received_at": -1 },
            unique: false,
        },
        IndexSpec {
            collection: ALERTS,
            keys: doc! { "user_id": 1, "triggered_at": -1 },
            unique: false,
        },
    ]
}

impl MongoDB {
    pub async fn new(config: &AppConfig) -> Result<Self, Box<dyn Error>> {
        let mut client_options = mongodb::options::ClientOptions::parse(&config.mongodb_uri).await?;

        client_options.app_name = Some("phishguard".to_string());
        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(2);
        client_options.max_idle_time = Some(std::time::Duration::from_secs(300));

        client_options.connect_timeout = Some(std::time::Duration::from_secs(5));
        client_options.server_selection_timeout = Some(std::time::Duration::from_secs(5));

        let client = Client::with_options(client_options)?;
        let db = client.database(&config.mongodb_database);

        // Test connection
        db.run_command(doc! { "ping": 1 }).await?;

        Ok(Self { client, db })
    }

    /// Creates the collections and indexes the service relies on.
    ///
    /// Safe to run on every start: collections and indexes that already exist
    /// are reported, not recreated.
    pub async fn bootstrap(&self) -> Result<BootstrapReport, MongoError> {
        log::info!("🔧 Bootstrapping database '{}'...", self.db.name());

        let mut report = BootstrapReport::default();
        let existing = self.db.list_collection_names().await?;

        for name in COLLECTIONS {
            if existing.iter().any(|c| c == name) {
                log::debug!("   ℹ️  Collection already exists: {}", name);
                report.existing_collections.push(name.to_string());
                continue;
            }

            match self.db.create_collection(name).await {
                Ok(()) => {
                    log::info!("   ✅ Collection created: {}", name);
                    report.created_collections.push(name.to_string());
                }
                // Another process created it between the listing and now
                Err(e) if command_code(&e) == Some(NAMESPACE_EXISTS) => {
                    log::debug!("   ℹ️  Collection already exists: {}", name);
                    report.existing_collections.push(name.to_string());
                }
                Err(e) => return Err(e),
            }
        }

        for spec in index_specs() {
            let collection = self.collection::<Document>(spec.collection);
            let label = format!("{}({})", spec.collection, spec.default_name());

            let existing: Vec<IndexModel> = collection.list_indexes().await?.try_collect().await?;
            match spec.state_in(&existing) {
                IndexState::Missing => {}
                IndexState::Present => {
                    log::debug!("   ℹ️  Index already exists: {}", label);
                    report.existing_indexes.push(label);
                    continue;
                }
                IndexState::UniqueMismatch { actual } => {
                    log::warn!(
                        "⚠️  Index {} exists with unique={} (expected {}); drop it and re-run to fix",
                        label,
                        actual,
                        spec.unique
                    );
                    report.mismatched_indexes.push(label);
                    continue;
                }
            }

            let options = IndexOptions::builder().unique(spec.unique.then_some(true)).build();
            let model = IndexModel::builder()
                .keys(spec.keys.clone())
                .options(options)
                .build();

            collection.create_index(model).await?;
            log::info!("   ✅ Index created: {}", label);
            report.created_indexes.push(label);
        }

        log::info!(
            "✅ Database ready: {} collections created, {} indexes created",
            report.created_collections.len(),
            report.created_indexes.len()
        );

        Ok(report)
    }

    pub async fn ping(&self) -> Result<(), MongoError> {
        self.db.run_command(doc! { "ping": 1 }).await.map(|_| ())
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub fn client(&self) -> &Client {
        &self.client
    }
}

fn command_code(err: &MongoError) -> Option<i32> {
    match err.kind.as_ref() {
        ErrorKind::Command(cmd) => Some(cmd.code),
        _ => None,
    }
}

/// True when the error is a unique index violation
pub fn is_duplicate_key(err: &MongoError) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write)) => write.code == DUPLICATE_KEY,
        ErrorKind::Command(cmd) => cmd.code == DUPLICATE_KEY,
        _ => false,
    }
}
