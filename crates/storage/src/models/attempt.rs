use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Did not finish
pub const DNF: i64 = -1;
/// Did not start
pub const DNS: i64 = -2;

/// A single solve inside a result.
///
/// `result > 0` is a valid time (centiseconds) or score, `0` is an empty slot
/// that was never attempted, and the negative sentinels are [`DNF`] and [`DNS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Attempt {
    pub result: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<i64>,
}

impl Attempt {
    pub fn new(result: i64) -> Self {
        Self { result, memo: None }
    }

    pub fn with_memo(result: i64, memo: i64) -> Self {
        Self {
            result,
            memo: Some(memo),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.result > 0
    }

    /// Empty slots don't count towards the number of attempts of a result
    pub fn is_counted(&self) -> bool {
        self.result != 0
    }

    pub fn is_dns(&self) -> bool {
        self.result == DNS
    }
}
