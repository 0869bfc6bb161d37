// crates/infra/src/identity.rs
use std::{
    collections::HashMap,
    sync::{Mutex, PoisonError},
};

use dwalk_ports::NameResolver;
use log::debug;

type NameCache = Mutex<HashMap<u32, Option<String>>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lookup {
    /// The C library's user and group databases (`getpwuid_r`, `getgrgid_r`),
    /// so NSS sources such as LDAP or SSSD are honoured.
    System,
    /// Only the preloaded tables; a miss is final.
    Tables,
}

/// Name lookup over the system user and group databases.
///
/// Every id is resolved at most once; hits and misses are both cached, so a
/// large walk with few distinct owners costs a handful of lookups.
#[derive(Debug)]
pub struct SystemNameResolver {
    lookup: Lookup,
    users: NameCache,
    groups: NameCache,
}

impl Default for SystemNameResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemNameResolver {
    pub fn new() -> Self {
        Self { lookup: Lookup::System, users: NameCache::default(), groups: NameCache::default() }
    }

    /// Fixed tables in `passwd(5)` and `group(5)` format; the system
    /// databases are never consulted.
    pub fn from_contents(passwd: &str, group: &str) -> Self {
        let users = parse_id_table(passwd);
        let groups = parse_id_table(group);
        debug!("loaded {} users and {} groups", users.len(), groups.len());
        Self { lookup: Lookup::Tables, users: Mutex::new(users), groups: Mutex::new(groups) }
    }

    fn cached(&self, cache: &NameCache, id: u32, system: fn(u32) -> Option<String>) -> Option<String> {
        let mut cache = cache.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(name) = cache.get(&id) {
            return name.clone();
        }
        let name = match self.lookup {
            Lookup::System => system(id),
            Lookup::Tables => None,
        };
        cache.insert(id, name.clone());
        name
    }

    fn reverse(&self, cache: &NameCache, name: &str, system: fn(&str) -> Option<u32>) -> Option<u32> {
        match self.lookup {
            Lookup::System => system(name),
            Lookup::Tables => {
                let cache = cache.lock().unwrap_or_else(PoisonError::into_inner);
                cache.iter().find_map(|(id, n)| (n.as_deref() == Some(name)).then_some(*id))
            }
        }
    }
}

/// `name:password:id:...` lines; the first entry for an id wins.
fn parse_id_table(contents: &str) -> HashMap<u32, Option<String>> {
    let mut table = HashMap::new();
    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut fields = line.split(':');
        let (Some(name), Some(_), Some(id)) = (fields.next(), fields.next(), fields.next()) else {
            continue;
        };
        if let Ok(id) = id.parse::<u32>() {
            table.entry(id).or_insert_with(|| Some(name.to_string()));
        }
    }
    table
}

#[cfg(unix)]
mod system {
    pub(super) fn user_name(uid: u32) -> Option<String> {
        uzers::get_user_by_uid(uid).map(|user| user.name().to_string_lossy().into_owned())
    }

    pub(super) fn group_name(gid: u32) -> Option<String> {
        uzers::get_group_by_gid(gid).map(|group| group.name().to_string_lossy().into_owned())
    }

    pub(super) fn user_id(name: &str) -> Option<u32> {
        uzers::get_user_by_name(name).map(|user| user.uid())
    }

    pub(super) fn group_id(name: &str) -> Option<u32> {
        uzers::get_group_by_name(name).map(|group| group.gid())
    }
}

#[cfg(not(unix))]
mod system {
    pub(super) fn user_name(_uid: u32) -> Option<String> {
        None
    }

    pub(super) fn group_name(_gid: u32) -> Option<String> {
        None
    }

    pub(super) fn user_id(_name: &str) -> Option<u32> {
        None
    }

    pub(super) fn group_id(_name: &str) -> Option<u32> {
        None
    }
}

impl NameResolver for SystemNameResolver {
    fn uid_to_name(&self, uid: u32) -> Option<String> {
        self.cached(&self.users, uid, system::user_name)
    }

    fn gid_to_name(&self, gid: u32) -> Option<String> {
        self.cached(&self.groups, gid, system::group_name)
    }

    fn name_to_uid(&self, name: &str) -> Option<u32> {
        self.reverse(&self.users, name, system::user_id)
    }

    fn name_to_gid(&self, name: &str) -> Option<u32> {
        self.reverse(&self.groups, name, system::group_id)
    }
}
