use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::{PartnershipId, StartupId, UserId};

/// Partnership model - a durable legal record linking one user to one
/// startup with financial and role terms.
///
/// Created only by registration reconciliation, in partner-list order, and
/// never mutated afterwards by this core.
#[derive(sqlx::FromRow, Debug, Clone, Serialize, Deserialize)]
pub struct Partnership {
    pub id: PartnershipId,
    pub user_id: UserId,
    pub startup_id: StartupId,
    pub shares: i64,
    pub cash_contribution: i64,
    pub salary: i64,
    pub managing_director: bool,
    pub operate_bank_account: bool,
    pub created_at: DateTime<Utc>,
}
