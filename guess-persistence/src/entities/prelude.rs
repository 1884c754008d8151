pub use super::kv_entries::Entity as KvEntries;
pub use super::ranked_members::Entity as RankedMembers;
