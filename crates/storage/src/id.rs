use rand::RngCore;

/// Random 128-bit hex id for comments and reports.
pub(crate) fn new_id() -> String {
    let mut buf = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut buf);
    hex::encode(buf)
}
