//! Remote-day and office-seat planning for hybrid work rotas.
//!
//! A roster is split into departments; each department gets a daily remote
//! quota inside the configured ratio band, remote days are spread over its
//! members, and the remaining on-site days are seated at one of two office
//! locations under shared daily ceilings.

pub mod planner;
pub mod table;
pub mod types;

pub use planner::{CapacityLedger, Planner, QuotaPlan, RemoteAllocation};
pub use table::{LayoutPreset, ReportTable, TableLayout};
pub use types::*;
