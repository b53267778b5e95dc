mod statistics_dto;

pub use statistics_dto::{
    RecentIncidentDto, ReporterStatisticsDto, StatisticsQuery, StatisticsStateDto,
    StatusSummaryDto,
};
