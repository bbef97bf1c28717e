use ridegraph::shared::Time;

#[test]
fn valid_time_test_1() {
    let time = "00:00:00";
    assert_eq!(Time::from_hms(time).unwrap().as_seconds(), 0);
}

#[test]
fn valid_time_test_2() {
    let time = "00:00:30";
    assert_eq!(Time::from_hms(time).unwrap().as_seconds(), 30);
}

#[test]
fn valid_time_test_3() {
    let time = "00:01:30";
    assert_eq!(Time::from_hms(time).unwrap().as_seconds(), 90);
}

#[test]
fn valid_time_test_4() {
    let time = "01:01:30";
    assert_eq!(Time::from_hms(time).unwrap().as_seconds(), 3690);
}

#[test]
fn invalid_time_empty() {
    let time = "";
    assert!(Time::from_hms(time).is_none())
}

#[test]
fn invalid_time_hours_only() {
    let time = "12";
    assert!(Time::from_hms(time).is_none())
}

#[test]
fn minutes_until_same_day() {
    let from = Time::from_hms("08:00:00").unwrap();
    let to = Time::from_hms("08:12:29").unwrap();
    assert_eq!(from.minutes_until(to), 12);
}

#[test]
fn minutes_until_rounds_half_up() {
    let from = Time::from_hms("08:00:00").unwrap();
    let to = Time::from_hms("08:02:30").unwrap();
    assert_eq!(from.minutes_until(to), 3);
}

#[test]
fn minutes_until_wraps_midnight() {
    let from = Time::from_hms("23:58:00").unwrap();
    let to = Time::from_hms("00:02:00").unwrap();
    assert_eq!(from.minutes_until(to), 4);
}

#[test]
fn minutes_until_zero() {
    let at = Time::from_hms("10:00").unwrap();
    assert_eq!(at.minutes_until(at), 0);
}
