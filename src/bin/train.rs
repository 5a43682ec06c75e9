use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use ecgtrain::{
    build_dataset, fit, predict_all, split_by_group, BatchSupplier, ClassificationReport,
    ConfusionMatrix, LogisticBaseline, Model, PipelineConfig, TrainConfig,
};

#[derive(Parser)]
#[command(name = "train", about = "Train a binary arrhythmia classifier end to end")]
struct Args {
    /// Directory with REFERENCE.csv and per-record safetensors payloads
    #[arg(long)]
    records: PathBuf,

    /// Bundled safetensors file (signal matrix + parallel labels)
    #[arg(long)]
    bundle: PathBuf,

    /// Documented sampling rate of the bundle rows (Hz)
    #[arg(long, default_value_t = 128.0)]
    bundle_fs: f32,

    /// Mini-batch size
    #[arg(long, default_value_t = 64)]
    batch_size: usize,

    /// Maximum training epochs
    #[arg(long, default_value_t = 30)]
    max_epochs: usize,

    /// Early-stopping patience (epochs without validation AUPRC gain)
    #[arg(long, default_value_t = 5)]
    patience: usize,

    /// Fraction of examples held out for the test split (by group)
    #[arg(long, default_value_t = 0.2)]
    test_frac: f64,

    /// Fraction of the remaining pool held out for validation (by group)
    #[arg(long, default_value_t = 0.2)]
    val_frac: f64,

    /// Seed for splitting and shuffling
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// SGD learning rate of the baseline model
    #[arg(long, default_value_t = 0.01)]
    lr: f32,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let pcfg = PipelineConfig::default();
    let tcfg = TrainConfig {
        batch_size: args.batch_size,
        test_frac: args.test_frac,
        val_frac: args.val_frac,
        patience: args.patience,
        max_epochs: args.max_epochs,
        seed: args.seed,
    };

    let ds = build_dataset(&args.records, &args.bundle, args.bundle_fs, &pcfg)?;
    println!("{}", ds.summary());

    let split = split_by_group(&ds.groups, tcfg.test_frac, tcfg.val_frac, tcfg.seed)?;
    println!(
        "split: {} train / {} val / {} test examples",
        split.train.len(),
        split.val.len(),
        split.test.len(),
    );

    let (train_x, train_y) = ds.select(&split.train);
    let (val_x, val_y) = ds.select(&split.val);
    let (test_x, test_y) = ds.select(&split.test);

    let mut train_sup = BatchSupplier::new(train_x, train_y, tcfg.batch_size, true, tcfg.seed);
    let val_sup = BatchSupplier::new(val_x, val_y, tcfg.batch_size, false, tcfg.seed);

    let model = LogisticBaseline::new(pcfg.window_samples(), args.lr);
    println!("{}", model.summary());

    let (model, _history) = fit(model, &mut train_sup, &val_sup, &tcfg);

    let test_sup = BatchSupplier::new(test_x, test_y, tcfg.batch_size, false, tcfg.seed);
    let (probs, truth) = predict_all(&model, &test_sup);

    println!();
    println!("{}", ConfusionMatrix::from_probs(&probs, &truth, 0.5));
    println!();
    println!("{}", ClassificationReport::from_probs(&probs, &truth, 0.5));
    println!();
    println!("test auprc: {:.4}", ecgtrain::average_precision(&probs, &truth));

    Ok(())
}
