use chrono::{DateTime, Datelike, Utc};
use std::time::SystemTime;

pub fn now_iso() -> String {
    let now: DateTime<Utc> = SystemTime::now().into();
    now.to_rfc3339()
}

pub fn current_year() -> i32 {
    Utc::now().year()
}
