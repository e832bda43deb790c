use chrono::{DateTime, Local, Utc};
use std::time::SystemTime;

pub fn now_secs() -> i64 {
    Utc::now().timestamp()
}

pub fn format_timestamp(at: SystemTime) -> String {
    let local: DateTime<Local> = at.into();
    local.format("%Y-%m-%d %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, UNIX_EPOCH};

    #[test]
    fn formatted_timestamps_have_second_precision() {
        let text = format_timestamp(UNIX_EPOCH + Duration::from_secs(86_400 * 365));
        assert_eq!(text.len(), "1971-01-01 00:00:00".len());
        assert_eq!(&text[4..5], "-");
        assert_eq!(&text[13..14], ":");
    }
}
