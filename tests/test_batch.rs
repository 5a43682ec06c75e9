mod common;
use common::synth_record;
use ecgtrain::{BatchSupplier, Dataset, PipelineConfig};

fn dataset() -> Dataset {
    let records: Vec<_> = (0..4)
        .map(|i| synth_record(9000, (i % 2) as u8, &format!("rec{i}")))
        .collect();
    Dataset::build(&records, &PipelineConfig::default()).unwrap() // 12 windows
}

#[test]
fn batches_partition_the_split() {
    let ds = dataset();
    let n = ds.len();
    let sup = BatchSupplier::new(ds.examples.clone(), ds.labels.clone(), 5, true, 42);

    assert_eq!(sup.len(), 3); // ceil(12 / 5)
    let mut total = 0;
    for i in 0..sup.len() {
        let (x, y) = sup.batch(i);
        assert_eq!(x.shape()[1], 4500);
        assert_eq!(x.shape()[2], 1);
        assert_eq!(x.shape()[0], y.shape()[0]);
        total += x.shape()[0];
    }
    assert_eq!(total, n);
}

#[test]
fn unshuffled_batch_zero_starts_at_index_zero() {
    let ds = dataset();
    let sup = BatchSupplier::new(ds.examples.clone(), ds.labels.clone(), 4, false, 42);
    let (x, _) = sup.batch(0);
    for i in 0..4500 {
        assert_eq!(x[[0, i, 0]], ds.examples[[0, i]], "sample {i}");
    }
}

#[test]
fn epoch_end_is_a_noop_without_shuffle() {
    let ds = dataset();
    let mut sup = BatchSupplier::new(ds.examples.clone(), ds.labels.clone(), 4, false, 42);
    let before: Vec<f32> = (0..sup.len()).map(|i| sup.batch(i).0[[0, 0, 0]]).collect();
    sup.on_epoch_end();
    let after: Vec<f32> = (0..sup.len()).map(|i| sup.batch(i).0[[0, 0, 0]]).collect();
    assert_eq!(before, after);
}
