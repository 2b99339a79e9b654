//! 시각 유틸리티
//!
//! MongoDB는 시각을 밀리초 단위로 저장합니다. 레코드에 들어가는 시각은 모두 밀리초로 잘라
//! 저장소 종류와 관계없이 쓰기 결과와 이후 조회 결과가 같도록 합니다.

use chrono::{DateTime, SubsecRound, Utc};

/// 밀리초 정밀도로 자른 시각
pub fn truncate_to_millis(value: DateTime<Utc>) -> DateTime<Utc> {
    value.trunc_subsecs(3)
}

/// 밀리초 정밀도의 현재 시각
pub fn now_millis() -> DateTime<Utc> {
    truncate_to_millis(Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_drops_sub_millisecond_part() {
        let precise = DateTime::<Utc>::from_timestamp(1_700_000_000, 123_456_789).unwrap();
        let truncated = truncate_to_millis(precise);

        assert_eq!(truncated.timestamp_millis(), 1_700_000_000_123);
        assert_eq!(truncated.timestamp_subsec_nanos(), 123_000_000);
        assert_eq!(now_millis().timestamp_subsec_nanos() % 1_000_000, 0);
    }
}
