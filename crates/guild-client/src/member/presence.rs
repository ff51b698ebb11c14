//! Presence and member-update merges

use guild_core::{DomainResult, FromRaw, Presence, RawAttributes};
use serde_json::Value;
use tracing::trace;

use super::{fields, Member};

impl Member {
    /// Merge a presence push into the raw store.
    ///
    /// Returns a presence snapshot of the state *before* the merge. The
    /// snapshot owns its data; later writes to this member never show up in
    /// it. An invalid push is rejected whole and changes nothing.
    pub fn update_from_presence(&self, presence: RawAttributes) -> DomainResult<Presence> {
        fields::validate(&presence, Some(self.identity()))?;

        let mut raw = self.raw.write();
        let snapshot = Presence::from_raw(&raw.project(Presence::FIELDS), self.origin)?;
        merge_member_patch(&mut raw, presence);

        trace!(member_id = %fields::member_id(&raw), "Presence merged");
        Ok(snapshot)
    }

    /// Merge a member update into the raw store.
    ///
    /// Same field-level union as a presence merge, without the snapshot.
    pub fn apply_update(&self, patch: RawAttributes) -> DomainResult<()> {
        fields::validate(&patch, Some(self.identity()))?;
        merge_member_patch(&mut self.raw.write(), patch);
        Ok(())
    }
}

/// Field-level union of `patch` into `raw`.
///
/// `user` is unioned one level deeper so a partial user (id only, as presence
/// pushes carry) does not drop the stored username.
fn merge_member_patch(raw: &mut RawAttributes, mut patch: RawAttributes) {
    if let Some(Value::Object(incoming)) = patch.remove("user") {
        let mut user = raw.object("user").unwrap_or_default();
        user.merge(RawAttributes::from(incoming));
        raw.insert("user", user.into_value());
    }
    raw.merge(patch);
}
