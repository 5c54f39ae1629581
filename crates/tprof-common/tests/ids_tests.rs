use super::*;

#[test]
fn test_array_id_next_is_monotonic() {
    let first = ArrayId::FIRST;
    let second = first.next().expect("second id");
    let third = second.next().expect("third id");

    assert!(first < second);
    assert!(second < third);
    assert_eq!(third, ArrayId(2));
}

#[test]
fn test_array_id_next_stops_at_the_last_id() {
    assert_eq!(ArrayId(u32::MAX - 1).next(), Some(ArrayId(u32::MAX)));
    assert_eq!(ArrayId(u32::MAX).next(), None);
}

#[test]
fn test_array_id_display() {
    assert_eq!(ArrayId(7).to_string(), "#7");
}

#[test]
fn test_ids_compare_by_value() {
    assert_eq!(ClassId(3), ClassId(3));
    assert_ne!(CodeId(1), CodeId(2));
    assert_eq!(EnvId(0), EnvId::clone(&EnvId(0)));
}
