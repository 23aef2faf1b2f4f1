//! Identifier generation for cheatsheets, sections and imported blocks.
//!
//! Document and section ids embed a UUIDv7: the leading 48 bits are the
//! Unix timestamp in milliseconds, so ids still sort by creation time, and
//! the random tail keeps ids distinct when many are minted within the same
//! millisecond (bulk imports).

use uuid::Uuid;

/// Prefix for cheatsheet (document) ids.
pub const CHEATSHEET_PREFIX: &str = "cs_";
/// Prefix for section ids.
pub const SECTION_PREFIX: &str = "sec_";

/// Mint a fresh, collision-free cheatsheet id such as `cs_0190f3c2...`.
#[must_use]
pub fn new_cheatsheet_id() -> String {
    format!("{CHEATSHEET_PREFIX}{}", Uuid::now_v7().simple())
}

/// Mint a fresh section id.
#[must_use]
pub fn new_section_id() -> String {
    format!("{SECTION_PREFIX}{}", Uuid::now_v7().simple())
}

/// Id for the `counter`-th block emitted while importing `cheatsheet_id`.
#[must_use]
pub fn block_id(cheatsheet_id: &str, counter: u32) -> String {
    format!("block_{cheatsheet_id}_{counter}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_bulk_ids_are_unique_without_delay() {
        let ids: HashSet<String> = (0..10_000).map(|_| new_cheatsheet_id()).collect();
        assert_eq!(ids.len(), 10_000);
    }

    #[test]
    fn test_ids_carry_prefixes() {
        assert!(new_cheatsheet_id().starts_with("cs_"));
        assert!(new_section_id().starts_with("sec_"));
        assert_eq!(block_id("cs_abc", 3), "block_cs_abc_3");
    }

    #[test]
    fn test_ids_are_filename_safe() {
        let id = new_cheatsheet_id();
        assert!(id.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'));
    }
}
