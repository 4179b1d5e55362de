use crate::{BidiVec, ErrorKind};

#[test]
fn test_pop_both_ends() {
    let mut v: BidiVec<i32> = (0..5).collect();
    assert_eq!(v.pop_front(), Some(0));
    assert_eq!(v.pop_back(), Some(4));
    assert_eq!(v.front_slack(), 1);
    assert_eq!(v.back_slack(), 1);
    assert_eq!(v, [1, 2, 3]);
    v.verify();
}

#[test]
fn test_round_trip_to_empty() {
    let mut v = BidiVec::new();
    for i in 0..100 {
        v.push_back(i);
    }
    for _ in 0..100 {
        assert!(v.pop_front().is_some());
    }
    assert!(v.is_empty());
    assert_eq!(v.len(), 0);
    assert_eq!(v.pop_front(), None);
    assert_eq!(v.pop_back(), None);

    for i in 0..100 {
        v.push_front(i);
    }
    for _ in 0..100 {
        assert!(v.pop_back().is_some());
    }
    assert!(v.is_empty());
    v.verify();
}

#[test]
fn test_remove_shifts_shorter_side() {
    let mut v: BidiVec<i32> = (0..10).collect();
    assert_eq!(v.remove(2), 2);
    assert_eq!(v.front_slack(), 1);
    assert_eq!(v.back_slack(), 0);

    assert_eq!(v.remove(7), 8);
    assert_eq!(v.front_slack(), 1);
    assert_eq!(v.back_slack(), 1);
    assert_eq!(v, [0, 1, 3, 4, 5, 6, 7, 9]);
    assert_eq!(v.capacity(), 10);
}

#[test]
fn test_remove_first_and_last() {
    let mut v: BidiVec<i32> = (0..4).collect();
    assert_eq!(v.remove(0), 0);
    assert_eq!(v.front_slack(), 1);
    assert_eq!(v.remove(2), 3);
    assert_eq!(v.back_slack(), 1);
    assert_eq!(v, [1, 2]);
    assert_eq!(v.remove(0), 1);
    assert_eq!(v.remove(0), 2);
    assert!(v.is_empty());
}

#[test]
fn test_try_remove_out_of_range() {
    let mut v: BidiVec<i32> = (0..3).collect();
    let err = v.try_remove(3).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::OutOfRange { index: 3, len: 3 });
    assert_eq!(v, [0, 1, 2]);
}

#[test]
#[should_panic(expected = "removal index (is 5) should be < len (is 2)")]
fn test_remove_out_of_range_panics() {
    let mut v: BidiVec<i32> = (0..2).collect();
    v.remove(5);
}

#[test]
fn test_clear_keeps_allocation_and_slack() {
    let mut v: BidiVec<String> = (0..10).map(|i| i.to_string()).collect();
    v.pop_front();
    v.pop_front();
    v.pop_front();
    let ptr = v.as_ptr();
    v.clear();
    assert_eq!(v.len(), 0);
    assert!(v.is_empty());
    assert_eq!(v.capacity(), 10);
    assert_eq!(v.front_slack(), 3);
    assert_eq!(v.back_slack(), 7);
    assert_eq!(v.as_ptr(), ptr);

    v.push_front("a".to_string());
    v.push_back("b".to_string());
    assert_eq!(v.capacity(), 10);
    assert_eq!(v, ["a", "b"]);
}

#[test]
fn test_truncate_both_sides() {
    let mut v: BidiVec<i32> = (0..10).collect();
    v.truncate(7);
    assert_eq!(v, [0, 1, 2, 3, 4, 5, 6]);
    assert_eq!(v.back_slack(), 3);
    v.truncate_front(4);
    assert_eq!(v, [3, 4, 5, 6]);
    assert_eq!(v.front_slack(), 3);
    v.truncate(10);
    v.truncate_front(10);
    assert_eq!(v.len(), 4);
}

#[test]
fn test_retain() {
    let mut v: BidiVec<i32> = (0..10).collect();
    v.pop_front();
    v.retain(|x| x % 3 != 0);
    assert_eq!(v, [1, 2, 4, 5, 7, 8]);
    assert_eq!(v.front_slack(), 1);

    v.retain_mut(|x| {
        *x *= 10;
        *x > 40
    });
    assert_eq!(v, [50, 70, 80]);
    v.verify();
}

#[test]
fn test_checked_access() {
    let mut v: BidiVec<i32> = (0..3).collect();
    assert_eq!(v.at(1), Ok(&1));
    let err = v.at(3).unwrap_err();
    assert!(err.is_out_of_range());
    assert_eq!(err.to_string(), "index 3 out of range for length 3");
    *v.at_mut(0).unwrap() = 10;
    assert!(v.at_mut(7).is_err());
    assert_eq!(v.get(2), Some(&2));
    assert_eq!(v.get(3), None);
    assert_eq!(unsafe { *v.get_unchecked(0) }, 10);
    *v.back_mut().unwrap() = 20;
    *v.front_mut().unwrap() += 1;
    assert_eq!(v, [11, 1, 20]);
}

#[test]
#[should_panic]
fn test_index_out_of_range_panics() {
    let v: BidiVec<i32> = (0..3).collect();
    let _ = v[3];
}
