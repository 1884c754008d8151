pub mod prelude;

pub mod kv_entries;
pub mod ranked_members;
