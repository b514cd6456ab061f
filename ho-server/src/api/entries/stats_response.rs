use ho_db::{EntryStats, GroupCount};

use serde::Serialize;

/// One label/count pair in an aggregate grouping
#[derive(Debug, Serialize)]
pub struct GroupCountDto {
    pub label: String,
    pub count: i64,
}

impl From<GroupCount> for GroupCountDto {
    fn from(g: GroupCount) -> Self {
        Self {
            label: g.label,
            count: g.count,
        }
    }
}

/// SQL-side aggregate summary of the entry set
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub total: i64,
    pub gender: Vec<GroupCountDto>,
    pub diagnosis: Vec<GroupCountDto>,
    pub treatment: Vec<GroupCountDto>,
    pub average_weight: f64,
    pub average_temp: f64,
}

impl From<EntryStats> for StatsResponse {
    fn from(s: EntryStats) -> Self {
        Self {
            total: s.total,
            gender: s.gender.into_iter().map(GroupCountDto::from).collect(),
            diagnosis: s.diagnosis.into_iter().map(GroupCountDto::from).collect(),
            treatment: s.treatment.into_iter().map(GroupCountDto::from).collect(),
            average_weight: s.average_weight.unwrap_or(0.0),
            average_temp: s.average_temp.unwrap_or(0.0),
        }
    }
}
