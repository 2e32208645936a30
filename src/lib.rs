//! ThreatFeed client core: fetches news, an ad and today's threat score and
//! publishes each as a loading/success/error state.

pub mod api;
pub mod core;

#[cfg(test)]
pub mod test_support;
