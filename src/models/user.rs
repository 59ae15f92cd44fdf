use mongodb::bson::{oid::ObjectId, DateTime as BsonDateTime};
use serde::{Deserialize, Serialize};

/// Document in the `users` collection. The email is the natural key (unique index).
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub email: String,
    pub name: String,
    pub picture: Option<String>,
    pub created_at: Option<BsonDateTime>,
    pub last_login: Option<BsonDateTime>,
}

/// Public user shape, as handed to the dashboard after login
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, utoipa::ToSchema)]
pub struct UserInfo {
    pub email: String,
    pub name: String,
    pub picture: Option<String>,
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        UserInfo {
            email: user.email,
            name: user.name,
            picture: user.picture,
        }
    }
}
