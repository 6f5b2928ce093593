//! Journey: a realistic review backlog is ranked, filtered, and summarized.

use cadence_core::{
    filter_overdue, priority, queue_stats, sort_by_priority, MasteryState,
};
use cadence_e2e_tests::fixtures::TestDataFactory;
use chrono::Utc;

#[test]
fn backlog_ranks_misconceptions_and_fragile_material_first() {
    let now = Utc::now();
    let mut items = vec![
        TestDataFactory::overdue_item("stable", MasteryState::Mastered, 60.0, 0, now),
        TestDataFactory::overdue_item("wobbly", MasteryState::Fragile, 1.0, 2, now),
        TestDataFactory::overdue_item("wrong", MasteryState::Misconceived, 5.0, 1, now),
        TestDataFactory::overdue_item("growing", MasteryState::Developing, 4.0, 3, now),
        TestDataFactory::overdue_item("known", MasteryState::Solid, 20.0, 0, now),
    ];

    sort_by_priority(&mut items);

    // The misconception leads even with less overdueness than others.
    assert_eq!(items[0].concept_id, "wrong");
    assert_eq!(items[1].concept_id, "wobbly");
    // Comfortable material trails the queue.
    assert_eq!(items[4].concept_id, "stable");

    // Scores strictly decrease down the sorted queue for this data.
    for pair in items.windows(2) {
        assert!(priority(&pair[0]) >= priority(&pair[1]));
    }
}

#[test]
fn filters_and_stats_agree() {
    let now = Utc::now();
    let items = vec![
        TestDataFactory::overdue_item("a", MasteryState::Fragile, 2.0, 4, now),
        TestDataFactory::overdue_item("b", MasteryState::Fragile, 2.0, 0, now),
        TestDataFactory::overdue_item("c", MasteryState::Solid, 15.0, 2, now),
    ];

    let overdue = filter_overdue(&items);
    assert_eq!(overdue.len(), 2);

    let stats = queue_stats(&items);
    assert_eq!(stats.total, 3);
    assert_eq!(stats.by_state.fragile, 2);
    assert_eq!(stats.by_state.solid, 1);
    assert!((stats.average_days_overdue - 2.0).abs() < 0.01);

    // Empty queues stay well-defined.
    let empty = queue_stats(&[]);
    assert_eq!(empty.total, 0);
    assert_eq!(empty.average_days_overdue, 0.0);
}
