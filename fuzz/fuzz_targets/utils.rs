#![allow(dead_code)]

use std::str;

/// Inputs are capped so a single case cannot exhaust memory.
pub const MAX_INPUT_SIZE: usize = 256 * 1024;

/// Capped UTF-8 view of `data`, trimming at most 3 bytes to undo a split codepoint.
#[inline]
pub fn truncate_utf8(data: &[u8]) -> Option<&str> {
    let cap = data.len().min(MAX_INPUT_SIZE);
    (0..=3.min(cap)).find_map(|trim| str::from_utf8(&data[..cap - trim]).ok())
}
