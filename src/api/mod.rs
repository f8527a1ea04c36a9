pub mod search;
pub mod startups;
