//! Flight-economics engine for an airline-management game.
//!
//! Pure functions over caller-supplied snapshots: great-circle distances,
//! stopover search, cabin configuration, ticket pricing and profitability.

pub mod configuration;
pub mod error;
pub mod models;
pub mod pricing;
pub mod profit;
pub mod route;
pub mod rules;
pub mod spatial;
pub mod stopover;

pub use configuration::{optimize, Allocation, AllocationPolicy, Configuration};
pub use error::{EngineError, Result};
pub use models::{
    Aircraft, AircraftKind, Airport, Coordinate, Demand, EngineVariant, FareClass, Modifications,
    Staffing, TrainingBonuses,
};
pub use pricing::TicketPrices;
pub use profit::{
    max_flights_per_day, purchase_share_value_growth, share_value_growth, simulate,
    simulate_fleet, CostSettings, FleetEntry, FleetSummary, ProfitBreakdown, SalaryRates,
};
pub use route::{evaluate_route, RouteRequest, RouteResult};
pub use rules::{GameMode, ModeRules};
pub use spatial::{bearing, distance, distance_multi, midpoint, MultiLegDistance};
pub use stopover::{find_stopovers, plan_route, RoutePlan, Stopover};
