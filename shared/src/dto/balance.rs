//! # Balance DTOs

use serde::{Deserialize, Serialize};

/// Response body of `GET /users/balance`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GemBalance {
    pub gem_balance: i64,
}
