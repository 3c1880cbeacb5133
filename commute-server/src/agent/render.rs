//! Console status blocks.

use chrono::NaiveDateTime;

use crate::config::Config;
use crate::domain::format_hhmm;
use crate::leave_by::{LeaveBy, LeaveByPlan, SelectionMode};

use super::{SHOWN_TRAINS, TickOutcome, alert_message};

/// Below this many minutes the countdown switches to minutes and seconds.
const COUNTDOWN_MINUTES: i64 = 15;

/// Lines printed once when the agent starts.
pub fn banner(config: &Config) -> Vec<String> {
    let commute = &config.commute;
    let deadline = match commute.mode {
        SelectionMode::Deadline(t) => format!("at work by {t}"),
        SelectionMode::Target(t) => format!("arrive at {t}"),
    };

    vec![
        "commute agent started".to_string(),
        format!("  station:     {}", config.tfl.home_station),
        format!("  destination: {}", config.tfl.work_station),
        format!("  line:        {} ({})", config.tfl.line, config.tfl.direction),
        format!("  walking:     {} min", commute.walking_minutes),
        format!("  journey:     {} min (fallback)", config.tfl.journey_time_minutes),
        format!("  deadline:    {deadline}"),
    ]
}

/// Lines describing one tick.
pub fn render_tick(outcome: &TickOutcome, now: NaiveDateTime, line: &str) -> Vec<String> {
    let stamp = now.format("%H:%M:%S");

    match outcome {
        TickOutcome::Inactive { reason } => vec![format!("[{stamp}] {reason}, sleeping")],
        TickOutcome::NoTrains => vec![format!(
            "[{stamp}] no {line} trains found, checking again shortly"
        )],
        TickOutcome::Evaluated {
            candidates,
            journey_minutes,
            result,
        } => {
            let mut lines = vec![format!("[{stamp}] journey {journey_minutes} min")];

            let selected = result
                .plan()
                .and_then(|p| p.selected_train.as_ref())
                .and_then(|s| candidates.iter().position(|c| c == s));

            for (i, train) in candidates.iter().take(SHOWN_TRAINS).enumerate() {
                let marker = if Some(i) == selected { "->" } else { "  " };
                lines.push(format!(
                    "  {marker} {:<24} {:>3} min  {}",
                    train.short_destination(),
                    train.minutes_until_departure(),
                    train.platform
                ));
            }

            match result {
                LeaveBy::Planned(plan) => lines.extend(plan_lines(plan)),
                LeaveBy::NoViableTrain { deadline } => lines.push(format!(
                    "  no trains get you to work by {}",
                    format_hhmm(*deadline)
                )),
            }

            lines
        }
    }
}

fn plan_lines(plan: &LeaveByPlan) -> Vec<String> {
    let mut lines = Vec::new();

    if plan.selected_train.is_none() {
        lines.push(format!(
            "  target {}: catch the {} train",
            format_hhmm(plan.arrival_at_work),
            format_hhmm(plan.train_departs_at)
        ));
    }

    if plan.should_have_left() {
        lines.push(format!("  {}", alert_message(plan)));
    } else if plan.minutes_until_leave() <= COUNTDOWN_MINUTES {
        let secs = plan.seconds_until_leave;
        lines.push(format!("  LEAVE IN: {}m {}s", secs / 60, secs % 60));
    } else {
        lines.push(format!(
            "  {} minutes until you should leave",
            plan.minutes_until_leave()
        ));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CandidateDeparture;
    use chrono::{Duration, NaiveDate};

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    fn plan(now: NaiveDateTime, seconds_until_leave: i64, train: Option<CandidateDeparture>) -> LeaveByPlan {
        let leave_home_at = now + Duration::seconds(seconds_until_leave);
        let train_departs_at = leave_home_at + Duration::minutes(12);
        LeaveByPlan {
            selected_train: train,
            deadline: at(9, 0, 0),
            train_departs_at,
            leave_home_at,
            arrival_at_work: train_departs_at + Duration::minutes(18),
            seconds_until_leave,
            seconds_until_train: seconds_until_leave + 12 * 60,
        }
    }

    fn trains() -> Vec<CandidateDeparture> {
        vec![
            CandidateDeparture::new("Heathrow Terminal 5 Underground Station", "Platform 2", 120),
            CandidateDeparture::new("Rayners Lane Underground Station", "Platform 2", 300),
            CandidateDeparture::new("Uxbridge Underground Station", "Platform 1", 600),
            CandidateDeparture::new("Northfields Underground Station", "Platform 1", 900),
        ]
    }

    #[test]
    fn inactive_line() {
        let outcome = TickOutcome::Inactive {
            reason: "not a commute day: saturday".into(),
        };
        assert_eq!(
            render_tick(&outcome, at(8, 0, 5), "piccadilly"),
            vec!["[08:00:05] not a commute day: saturday, sleeping"]
        );
    }

    #[test]
    fn no_trains_line() {
        assert_eq!(
            render_tick(&TickOutcome::NoTrains, at(8, 0, 0), "piccadilly"),
            vec!["[08:00:00] no piccadilly trains found, checking again shortly"]
        );
    }

    #[test]
    fn selected_train_is_marked_and_list_is_capped() {
        let now = at(7, 0, 0);
        let candidates = trains();
        let outcome = TickOutcome::Evaluated {
            result: LeaveBy::Planned(plan(now, 40 * 60, Some(candidates[1].clone()))),
            candidates,
            journey_minutes: 18,
        };

        let lines = render_tick(&outcome, now, "piccadilly");

        assert_eq!(lines.len(), 5);
        assert!(lines[1].starts_with("     Heathrow Terminal 5"));
        assert!(lines[2].starts_with("  -> Rayners Lane"));
        assert!(lines[2].contains("  5 min  Platform 2"));
        assert!(lines[3].starts_with("     Uxbridge"));
        assert_eq!(lines[4], "  40 minutes until you should leave");
    }

    #[test]
    fn countdown_under_fifteen_minutes() {
        let now = at(7, 40, 0);
        let lines = plan_lines(&plan(now, 14 * 60 + 5, None));

        assert_eq!(lines[0], "  target 08:24: catch the 08:06 train");
        assert_eq!(lines[1], "  LEAVE IN: 14m 5s");
    }

    #[test]
    fn fifteen_minutes_exactly_counts_down() {
        let lines = plan_lines(&plan(at(7, 0, 0), 15 * 60 + 59, Some(trains()[0].clone())));
        assert_eq!(lines, vec!["  LEAVE IN: 15m 59s"]);

        let lines = plan_lines(&plan(at(7, 0, 0), 16 * 60, Some(trains()[0].clone())));
        assert_eq!(lines, vec!["  16 minutes until you should leave"]);
    }

    #[test]
    fn leave_now_when_late() {
        let now = at(8, 0, 0);
        let lines = plan_lines(&plan(now, 0, Some(trains()[0].clone())));
        assert_eq!(lines, vec!["  LEAVE NOW! Train 08:12 -> Arrive 08:30"]);
    }

    #[test]
    fn no_viable_train() {
        let outcome = TickOutcome::Evaluated {
            candidates: trains(),
            journey_minutes: 18,
            result: LeaveBy::NoViableTrain {
                deadline: at(8, 15, 0),
            },
        };

        let lines = render_tick(&outcome, at(8, 0, 0), "piccadilly");

        assert!(lines.iter().all(|l| !l.starts_with("  ->")));
        assert_eq!(lines.last().unwrap(), "  no trains get you to work by 08:15");
    }
}
