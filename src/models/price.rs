use serde::{Deserialize, Serialize};

/// One row of a timber price table.
///
/// Units follow the Finnish price-table convention: diameters in
/// millimeters (matching the stem profile's scaled diameter column),
/// lengths in centimeters (so `max_length / div` is a count of profile
/// increments), prices in currency units per cubic meter.
///
/// Grade ids need not be unique within a table; a grade commonly appears
/// once per length class. They also need not be contiguous.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRow {
    /// Timber grade id (small positive integer)
    pub grade: i64,
    /// Minimum acceptable top diameter in mm
    pub min_top_diameter: f64,
    /// Segment length in cm
    pub max_length: f64,
    /// Unit price per m³
    pub unit_price: f64,
}

/// Recovered volume and value for one timber grade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeYield {
    /// Timber grade id
    pub grade: i64,
    /// Total recovered volume in m³
    pub volume: f64,
    /// Total recovered value in currency units
    pub value: f64,
}

/// Sorted distinct grade ids of a price table.
///
/// This defines the length and order of the cross-cut output: one
/// `GradeYield` per distinct grade, ascending by id.
pub fn unique_grades(table: &[PriceRow]) -> Vec<i64> {
    let mut grades: Vec<i64> = table.iter().map(|row| row.grade).collect();
    grades.sort_unstable();
    grades.dedup();
    grades
}
