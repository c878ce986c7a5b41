pub mod bucking;
pub mod cross_cut;
pub mod error;
pub mod models;
pub mod taper;

pub use bucking::optimize;
pub use cross_cut::{cross_cut, CrossCutFn, DEFAULT_STEP, DEFAULT_STUMP_HEIGHT};
pub use error::BuckingError;
pub use models::{unique_grades, GradeYield, PriceRow, SpeciesBucket, StemProfile};
pub use taper::build_stem_profile;
