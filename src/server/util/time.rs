use chrono::{DateTime, SubsecRound, Utc};

/// Postgres `timestamptz` keeps microseconds, so anything we persist is cut to that precision
/// up front and reads back identical.
const STORED_SUBSEC_DIGITS: u16 = 6;

pub(crate) mod helper {
    #[cfg(not(test))]
    pub use super::get_utc_now;
    #[cfg(test)]
    pub use super::mock_chrono::get_utc_now;
    #[cfg(test)]
    pub use super::mock_chrono::set_utc_now;
}


#[cfg(not(test))]
pub fn get_utc_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(STORED_SUBSEC_DIGITS)
}
