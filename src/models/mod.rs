pub mod article;
pub mod loaders;
pub mod run_config;
pub mod score;

pub use article::{Article, Dataset};
pub use loaders::load_tsv_dataset;
pub use run_config::RunConfig;
pub use score::Score;
