//! Unicycle ownership: a single member or the collective.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use unitrack_core::AppError;
use unitrack_core::types::UserId;

/// Stored value of the owner column for collectively owned unicycles.
pub const COLLECTIVE_SENTINEL: &str = "Club";

/// Who owns a unicycle.
///
/// Custody is always held by an individual, so [`Ownership::Collective`]
/// never appears in the custody column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ownership {
    /// Owned by one guild member.
    Member(UserId),
    /// Owned by the community as a whole.
    Collective,
}

impl Ownership {
    /// Return the owning member, if any.
    pub fn member(&self) -> Option<UserId> {
        match self {
            Self::Member(user) => Some(*user),
            Self::Collective => None,
        }
    }

    /// Whether the community owns the unicycle.
    pub fn is_collective(&self) -> bool {
        matches!(self, Self::Collective)
    }

    /// Whether `user` is the individual owner.
    pub fn is_member(&self, user: UserId) -> bool {
        self.member() == Some(user)
    }

    /// Text stored in the owner column.
    pub fn as_stored(&self) -> String {
        match self {
            Self::Member(user) => user.to_string(),
            Self::Collective => COLLECTIVE_SENTINEL.to_string(),
        }
    }

    /// Human-readable owner, using mentions for members.
    pub fn display(&self) -> String {
        match self {
            Self::Member(user) => user.mention(),
            Self::Collective => COLLECTIVE_SENTINEL.to_string(),
        }
    }
}

impl fmt::Display for Ownership {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_stored())
    }
}

impl FromStr for Ownership {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case(COLLECTIVE_SENTINEL) {
            return Ok(Self::Collective);
        }
        s.parse::<UserId>()
            .map(Self::Member)
            .map_err(|_| AppError::validation(format!("Invalid owner: '{s}'")))
    }
}

impl From<UserId> for Ownership {
    fn from(user: UserId) -> Self {
        Self::Member(user)
    }
}

impl sqlx::Type<sqlx::Sqlite> for Ownership {
    fn type_info() -> sqlx::sqlite::SqliteTypeInfo {
        <String as sqlx::Type<sqlx::Sqlite>>::type_info()
    }
}

impl<'q> sqlx::Encode<'q, sqlx::Sqlite> for Ownership {
    fn encode_by_ref(
        &self,
        buf: &mut <sqlx::Sqlite as sqlx::Database>::ArgumentBuffer<'q>,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<'q, sqlx::Sqlite>>::encode(self.as_stored(), buf)
    }
}

impl<'r> sqlx::Decode<'r, sqlx::Sqlite> for Ownership {
    fn decode(
        value: <sqlx::Sqlite as sqlx::Database>::ValueRef<'r>,
    ) -> Result<Self, sqlx::error::BoxDynError> {
        let text = <&str as sqlx::Decode<'r, sqlx::Sqlite>>::decode(value)?;
        Ok(text.parse::<Self>()?)
    }
}
