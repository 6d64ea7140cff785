pub mod tsv_loader;

pub use tsv_loader::{load_tsv_dataset, parse_tsv};
