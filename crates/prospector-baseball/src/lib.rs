// Statistical normalization and prospect evaluation.
//
// `schema` turns arbitrary tabular player data into canonical profiles;
// `evaluation` scores those profiles against pretrained artifacts and a
// historical reference population.

pub mod error;
pub mod evaluation;
pub mod schema;

pub use error::ErrorBody;
pub use evaluation::pipeline::{EngineOptions, PositionModel, ProspectEngine};
pub use schema::reader::{read_player_file, ReadOptions};
