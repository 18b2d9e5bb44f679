use crate::{Error, Result, Role};

/// Single authorization gate for every mutating operation: the resource owner
/// may act on their own comment, a moderator may act on anyone's.
pub fn authorize(requester_id: &str, role: Role, owner_id: &str) -> Result<()> {
    if requester_id == owner_id || role == Role::Moderator {
        Ok(())
    } else {
        Err(Error::Forbidden)
    }
}

/// Owner-only variant for operations a moderator may NOT perform on someone
/// else's behalf (editing another author's words).
pub fn authorize_owner(requester_id: &str, owner_id: &str) -> Result<()> {
    if requester_id == owner_id {
        Ok(())
    } else {
        Err(Error::Forbidden)
    }
}
