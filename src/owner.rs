// owner.rs — Owner and group name resolution
//
// Resolves uid/gid to names via the system user database, with a per-run
// cache so a level full of same-owner entries costs one lookup. Unknown
// ids resolve to None and the caller falls back to numeric formatting.

use std::collections::HashMap;

use uzers::{get_group_by_gid, get_user_by_uid};

#[derive(Default)]
pub struct OwnerResolver {
    users:  HashMap<u32, Option<String>>,
    groups: HashMap<u32, Option<String>>,
}

impl OwnerResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolve_owner(&mut self, uid: u32) -> Option<String> {
        self.users
            .entry(uid)
            .or_insert_with(|| {
                get_user_by_uid(uid).map(|u| u.name().to_string_lossy().into_owned())
            })
            .clone()
    }

    pub fn resolve_group(&mut self, gid: u32) -> Option<String> {
        self.groups
            .entry(gid)
            .or_insert_with(|| {
                get_group_by_gid(gid).map(|g| g.name().to_string_lossy().into_owned())
            })
            .clone()
    }
}
