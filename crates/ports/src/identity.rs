// crates/ports/src/identity.rs

/// Lookup between numeric ids and user/group names.
///
/// Unknown ids or names yield `None`; callers treat that as "no match".
pub trait NameResolver: Send + Sync {
    fn uid_to_name(&self, uid: u32) -> Option<String>;
    fn gid_to_name(&self, gid: u32) -> Option<String>;
    fn name_to_uid(&self, name: &str) -> Option<u32>;
    fn name_to_gid(&self, name: &str) -> Option<u32>;
}
