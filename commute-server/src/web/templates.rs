//! Askama template for the HTML status page.

use askama::Template;

use super::dto::{ActiveStatus, BestTrain, StatusResponse, TargetCommute, TrainView};

/// Status page, served when the client prefers HTML.
#[derive(Template)]
#[template(path = "status.html")]
pub struct StatusTemplate {
    pub active: bool,
    pub schedule_status: String,
    pub timestamp: String,
    pub line: String,
    pub work_start: String,
    pub journey_mins: i64,
    pub trains: Vec<TrainView>,
    pub best_train: Option<BestTrain>,
    pub commute: Option<TargetCommute>,
}

impl StatusTemplate {
    pub fn from_status(status: &StatusResponse) -> Self {
        match status {
            StatusResponse::Inactive(s) => Self {
                active: false,
                schedule_status: s.schedule_status.clone(),
                timestamp: s.timestamp.clone(),
                line: String::new(),
                work_start: String::new(),
                journey_mins: 0,
                trains: Vec::new(),
                best_train: None,
                commute: None,
            },
            StatusResponse::Active(ActiveStatus {
                schedule_status,
                timestamp,
                line,
                work_start,
                journey_mins,
                trains,
                best_train,
                commute,
                ..
            }) => Self {
                active: true,
                schedule_status: schedule_status.clone(),
                timestamp: timestamp.clone(),
                line: line.clone(),
                work_start: work_start.clone(),
                journey_mins: *journey_mins,
                trains: trains.clone(),
                best_train: best_train.clone(),
                commute: commute.clone(),
            },
        }
    }
}
