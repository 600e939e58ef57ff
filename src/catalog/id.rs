//! Record id generation
//!
//! An id is the creation time in decimal milliseconds followed by 12 hex
//! digits (48 bits) of a v4 UUID. Ids minted in the same millisecond collide
//! with probability 2^-48; the catalog also re-draws on a clash with an id it
//! already holds.

use uuid::Uuid;

use crate::utils::timestamp;

pub const RANDOM_SUFFIX_LEN: usize = 12;

pub fn new_record_id() -> String {
    let millis = timestamp::now().timestamp_millis();
    let random = Uuid::new_v4().simple().to_string();
    format!("{}{}", millis, &random[..RANDOM_SUFFIX_LEN])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn ids_have_time_prefix_and_hex_suffix() {
        let id = new_record_id();
        let (prefix, suffix) = id.split_at(id.len() - RANDOM_SUFFIX_LEN);
        assert!(prefix.parse::<i64>().unwrap() > 1_600_000_000_000);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn ids_do_not_repeat() {
        let ids: HashSet<String> = (0..1000).map(|_| new_record_id()).collect();
        assert_eq!(ids.len(), 1000);
    }
}
