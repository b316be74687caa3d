pub mod config;
pub mod error;
pub mod evaluator;
pub mod expr;
pub mod report;
pub mod supervisor;
pub mod task;
pub mod worker;

pub use config::PoolConfig;
pub use error::{ConfigError, PoolError, TaskError};
pub use evaluator::{Evaluator, HttpEvaluator};
pub use expr::{ExpressionSource, RandomExpressions};
pub use report::{JsonReporter, LogReporter, Reporter, TextReporter};
pub use supervisor::Supervisor;
pub use task::Task;
