mod incident_dto;

pub use incident_dto::{
    CreateIncidentDto, IncidentListQuery, IncidentResponseDto, ReviewIncidentDto,
};
