// src/strategy/traits.rs

use std::fmt::Debug;

/// Decides how much to order at the start of a period.
///
/// `Send` + `Sync` so a policy can be handed to a worker thread.
pub trait OrderPolicy: Debug + Send + Sync {
    /// Order quantity for `period` given on-hand `inventory`.
    ///
    /// Implementations must keep `inventory + order` within storage capacity.
    fn order_quantity(&mut self, period: usize, inventory: usize) -> usize;

    /// Short label used in reports.
    fn name(&self) -> &str;
}
