// File: crates/chart-core/tests/density.rs
// Purpose: Marker/fill/axis thresholds as seen through ChartConfig.

mod common;

use chart_core::{ChartConfig, XAxisKind};
use common::daily_series;

fn config(n: usize) -> ChartConfig {
    ChartConfig::build(&daily_series(n), 10)
}

#[test]
fn marker_thresholds() {
    assert_eq!(config(30).style.point_radius, 2.0);
    assert_eq!(config(31).style.point_radius, 1.0);
    assert_eq!(config(50).style.point_radius, 1.0);
    assert!(config(50).style.show_points);
    assert_eq!(config(51).style.point_radius, 0.0);
    assert_eq!(config(60).style.point_radius, 0.0);
}

#[test]
fn fill_thresholds() {
    assert!(!config(1).style.fill);
    assert!(config(2).style.fill);
    assert!(config(60).style.fill);
    assert!(config(100).style.fill);
    assert!(!config(101).style.fill);
}

#[test]
fn tension_drops_for_dense_series() {
    assert_eq!(config(50).style.tension, 0.4);
    assert_eq!(config(51).style.tension, 0.1);
}

#[test]
fn axis_typing_and_tick_policy() {
    let one = config(1);
    assert_eq!(one.x_axis.kind, XAxisKind::Category);
    assert_eq!(one.x_axis.max_ticks, 1);

    let twenty = config(20);
    assert_eq!(twenty.x_axis.kind, XAxisKind::Time);
    assert!(!twenty.x_axis.auto_skip);

    let many = config(21);
    assert!(many.x_axis.auto_skip);
    assert_eq!(many.x_axis.max_ticks, 20);
    assert_eq!(many.x_axis.label_rotation_deg, 45.0);
}

#[test]
fn rank_axis_is_reversed_with_hash_labels() {
    let c = config(5);
    assert!(c.y_axis.reverse);
    assert!(!c.y_axis.begin_at_zero);
    assert_eq!(c.y_axis.tick_label(1234567.0), "#1,234,567");
    assert_eq!(c.label, "Average BSR (10 books)");
}
