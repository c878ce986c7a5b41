mod price;
mod profile;
mod species;

pub use price::{unique_grades, GradeYield, PriceRow};
pub use profile::StemProfile;
pub use species::SpeciesBucket;
