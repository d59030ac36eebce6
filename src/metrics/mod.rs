// ============================================================================
// Module : metrics
// ============================================================================
// Calculs dérivés en lecture seule sur un Snapshot :
// - valeur totale, allocation, performance (portfolio.rs)
// - vue filtrée des transactions et volume (filter.rs)
//
// Aucune fonction ici ne modifie les données reçues.
// ============================================================================

pub mod filter;
pub mod portfolio;

pub use filter::{
    daily_volume, filter_transactions, volume_total, DateRange, TransactionFilter, TransactionSummary,
};
pub use portfolio::{
    allocations, compute_allocation, performance_change, total_value, weighted_change_24h,
    PerformanceChange,
};
