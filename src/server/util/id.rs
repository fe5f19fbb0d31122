use uuid::Uuid;

/// Parse an id-shaped input the way the store keys records.
///
/// Returns `None` for anything that is not a UUID, so callers can reject it before querying.
pub(crate) fn parse_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw).ok()
}
