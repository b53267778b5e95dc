mod incident;

pub use incident::{Incident, IncidentPriority, IncidentStatus};
