pub mod identity;
pub mod money;
pub mod network;
pub mod registration;
pub mod report;

pub use identity::{Email, NationalId, PostalCode, Role, TaxId};
pub use money::Money;
pub use network::{Bus, Line, PublicCompany, Stop, StopRef, TripRecord};
pub use registration::{
    Address, CitizenRegistration, ManagerRegistration, ValidatedCitizen, ValidatedManager,
};
pub use report::{
    HourLoad, LineSummary, LineTripCount, Listing, RouteCount, SpendTotal, StopDetail,
    TerminusAnomaly, TripSummary,
};
