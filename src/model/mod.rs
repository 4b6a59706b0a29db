//! Types that represent the core data model, such as `Bank` and `Record`.
mod bank;
mod record;

pub use bank::{Bank, Layout};
pub use record::Record;
