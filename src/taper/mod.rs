mod builder;
mod correction;
mod curves;

pub use builder::build_stem_profile;
