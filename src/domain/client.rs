//! Client entity.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Textual layout of [`Client::birthday`].
pub const BIRTHDAY_FORMAT: &str = "%Y%m%d";

/// A stored client record. `id` is 0 until the row has been inserted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: i64,
    pub full_name: String,
    pub login: String,
    pub birthday: String,
    pub email: String,
}

impl Client {
    pub fn new(
        full_name: impl Into<String>,
        login: impl Into<String>,
        birthday: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            full_name: full_name.into(),
            login: login.into(),
            birthday: birthday.into(),
            email: email.into(),
        }
    }

    pub fn is_persisted(&self) -> bool {
        self.id > 0
    }

    pub fn with_id(&self, id: i64) -> Self {
        Self {
            id,
            ..self.clone()
        }
    }

    /// Parsed birthday, or `None` when the stored text is not `YYYYMMDD`.
    pub fn birth_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.birthday, BIRTHDAY_FORMAT).ok()
    }
}
