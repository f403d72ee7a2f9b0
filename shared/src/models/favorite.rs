//! Favorite Model

use serde::{Deserialize, Serialize};

/// Add favorite payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoriteAdd {
    pub restaurant_id: String,
}
