// Document id generation.
//
// Ids are 24 lowercase hex chars: 4 bytes of big-endian unix seconds followed
// by 8 random bytes. They sort roughly by creation time and are unique for
// all practical purposes, which is all the embedded arrays need.

use chrono::Utc;

const ID_LEN: usize = 24;

/// Generate a fresh document id.
pub fn new_document_id() -> String {
    let seconds = Utc::now().timestamp().clamp(0, u32::MAX as i64) as u32;
    let random: [u8; 8] = rand::random();

    let mut id = String::with_capacity(ID_LEN);
    for byte in seconds.to_be_bytes().iter().chain(random.iter()) {
        id.push_str(&format!("{:02x}", byte));
    }
    id
}

/// Whether `id` has the shape produced by [`new_document_id`].
pub fn is_document_id(id: &str) -> bool {
    id.len() == ID_LEN && id.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}
