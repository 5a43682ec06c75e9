mod common;
use common::synth_record;
use ecgtrain::{split_by_group, Dataset, Error, PipelineConfig};
use std::collections::HashSet;

fn build_eleven_window_dataset() -> Dataset {
    let lens = [4500_usize, 9000, 2000, 13500, 4500];
    let records: Vec<_> = lens
        .iter()
        .enumerate()
        .map(|(i, &len)| synth_record(len, (i % 2) as u8, &format!("rec{i}")))
        .collect();
    Dataset::build(&records, &PipelineConfig::default()).unwrap()
}

fn group_set<'a>(ds: &'a Dataset, idx: &[usize]) -> HashSet<&'a str> {
    idx.iter().map(|&i| ds.groups[i].as_str()).collect()
}

#[test]
fn no_recording_straddles_a_boundary() {
    let ds = build_eleven_window_dataset();
    let s = split_by_group(&ds.groups, 0.2, 0.2, 42).unwrap();

    assert_eq!(s.total(), ds.len());
    let tr = group_set(&ds, &s.train);
    let va = group_set(&ds, &s.val);
    let te = group_set(&ds, &s.test);
    assert!(tr.is_disjoint(&va), "train/val share groups");
    assert!(tr.is_disjoint(&te), "train/test share groups");
    assert!(va.is_disjoint(&te), "val/test share groups");

    // Joint cover: every example index appears exactly once.
    let mut all: Vec<usize> = s.train.iter().chain(&s.val).chain(&s.test).copied().collect();
    all.sort_unstable();
    assert_eq!(all, (0..ds.len()).collect::<Vec<_>>());
}

#[test]
fn identical_seed_reproduces_indices() {
    let ds = build_eleven_window_dataset();
    let a = split_by_group(&ds.groups, 0.2, 0.2, 42).unwrap();
    let b = split_by_group(&ds.groups, 0.2, 0.2, 42).unwrap();
    assert_eq!(a, b);
}

#[test]
fn splits_are_never_empty_on_valid_input() {
    let ds = build_eleven_window_dataset();
    for seed in 0..50 {
        let s = split_by_group(&ds.groups, 0.2, 0.2, seed).unwrap();
        assert!(!s.train.is_empty(), "seed {seed}");
        assert!(!s.val.is_empty(), "seed {seed}");
        assert!(!s.test.is_empty(), "seed {seed}");
    }
}

#[test]
fn two_groups_cannot_fill_three_splits() {
    let records = vec![synth_record(9000, 0, "only-a"), synth_record(9000, 1, "only-b")];
    let ds = Dataset::build(&records, &PipelineConfig::default()).unwrap();
    let err = split_by_group(&ds.groups, 0.2, 0.2, 42).unwrap_err();
    assert!(matches!(err, Error::Split(_)), "{err}");
}
