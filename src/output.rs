//! Output formatters (human and JSONL)

pub mod human;
pub mod jsonl;
pub mod listing;

pub use human::HumanFormatter;
pub use jsonl::JsonlFormatter;
pub use listing::{
    ListingHumanFormatter, ListingJsonlFormatter, PatternListing, RuleListing, RuleSource,
};
