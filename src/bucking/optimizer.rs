use crate::models::{unique_grades, GradeYield, PriceRow, StemProfile};

/// Näsberg dynamic program: partition the stem into log segments, each
/// priced by one table row, maximizing total value.
///
/// A row `j` produces candidate segments of exactly `max_length / div`
/// profile increments; a segment may only end at an index whose top
/// diameter meets the row's minimum. Ties keep the earlier-found solution
/// (strict `>` update), and the backtrack starts from the first maximal
/// cumulative value, so the reported partition is deterministic.
///
/// Returns one [`GradeYield`] per distinct grade id in the table, ascending
/// by id, with zero volume and value for grades the optimal partition never
/// uses. A stem too thin for every row yields all zeros.
pub fn optimize(profile: &StemProfile, price_table: &[PriceRow], div: u32) -> Vec<GradeYield> {
    let n = profile.len();
    let grades = unique_grades(price_table);
    let mut volumes = vec![0.0f64; grades.len()];
    let mut values = vec![0.0f64; grades.len()];

    if n > 0 {
        let div = f64::from(div);

        // Per-index DP state: best volume, best value, the row grade and
        // segment start that produced it.
        let mut best_volume = vec![0.0f64; n];
        let mut best_value = vec![0.0f64; n];
        let mut assigned_grade = vec![0i64; n];
        let mut segment_start = vec![0usize; n];

        for i in 0..n {
            for row in price_table {
                // Segment length in increments, kept in f64 until the
                // bound check: an infinite or absurdly long row must fail
                // `t < n` cleanly rather than wrap the index arithmetic.
                let length = (row.max_length / div).trunc();
                if !length.is_finite() || i as f64 + length >= n as f64 {
                    continue;
                }
                let t = i + length as usize;
                if profile.diameters[t] < row.min_top_diameter {
                    continue;
                }
                let volume = profile.cum_volumes[t] - profile.cum_volumes[i];
                let value = volume * row.unit_price;
                let volume_total = volume + best_volume[i];
                let value_total = value + best_value[i];
                if value_total > best_value[t] {
                    best_volume[t] = volume_total;
                    best_value[t] = value_total;
                    assigned_grade[t] = row.grade;
                    segment_start[t] = i;
                }
            }
        }

        // First maximal index wins the argmax.
        let mut best = 0usize;
        for (idx, &value) in best_value.iter().enumerate() {
            if value > best_value[best] {
                best = idx;
            }
        }

        // Walk the chain of segment starts back to the stump, crediting
        // each segment's volume and value to its grade.
        let mut idx = best;
        while idx > 0 {
            let start = segment_start[idx];
            if let Ok(slot) = grades.binary_search(&assigned_grade[idx]) {
                volumes[slot] += best_volume[idx] - best_volume[start];
                values[slot] += best_value[idx] - best_value[start];
            }
            idx = start;
        }
    }

    grades
        .iter()
        .zip(volumes.iter().zip(values.iter()))
        .map(|(&grade, (&volume, &value))| GradeYield {
            grade,
            volume,
            value,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    /// Linear toy stem: n increments, diameter shrinking 10 mm per step,
    /// uniform 0.01 m³ of volume per increment.
    fn toy_profile(n: usize, top_diameter: f64) -> StemProfile {
        StemProfile {
            diameters: (0..n)
                .map(|i| top_diameter + 10.0 * (n - 1 - i) as f64)
                .collect(),
            heights: (0..n).map(|i| 0.2 + 0.1 * i as f64).collect(),
            cum_volumes: (0..n).map(|i| 0.01 * (i + 1) as f64).collect(),
        }
    }

    fn row(grade: i64, min_top: f64, length_cm: f64, price: f64) -> PriceRow {
        PriceRow {
            grade,
            min_top_diameter: min_top,
            max_length: length_cm,
            unit_price: price,
        }
    }

    #[test]
    fn test_empty_profile_reports_zeros_per_grade() {
        let profile = StemProfile {
            diameters: vec![],
            heights: vec![],
            cum_volumes: vec![],
        };
        let table = vec![row(1, 0.0, 10.0, 50.0), row(2, 0.0, 10.0, 30.0)];
        let result = optimize(&profile, &table, 10);
        assert_eq!(result.len(), 2);
        for y in &result {
            assert_eq!(y.volume, 0.0);
            assert_eq!(y.value, 0.0);
        }
    }

    #[test]
    fn test_empty_price_table() {
        let profile = toy_profile(10, 100.0);
        assert!(optimize(&profile, &[], 10).is_empty());
    }

    #[test]
    fn test_single_unit_row_recovers_everything_above_first_increment() {
        // One grade, one-increment segments, no diameter limit: every chain
        // link is feasible, so the whole stem above increment 0 is recovered.
        let profile = toy_profile(10, 100.0);
        let table = vec![row(1, 0.0, 10.0, 50.0)];
        let result = optimize(&profile, &table, 10);
        assert_eq!(result.len(), 1);
        let expected_volume = profile.total_volume() - profile.cum_volumes[0];
        assert_approx_eq!(result[0].volume, expected_volume, 1e-12);
        assert_approx_eq!(result[0].value, expected_volume * 50.0, 1e-12);
    }

    #[test]
    fn test_too_thin_stem_yields_zeros_for_every_grade() {
        let profile = toy_profile(10, 10.0);
        let table = vec![row(1, 500.0, 10.0, 50.0), row(2, 400.0, 20.0, 30.0)];
        let result = optimize(&profile, &table, 10);
        assert_eq!(result.len(), 2);
        for y in &result {
            assert_eq!(y.volume, 0.0);
            assert_eq!(y.value, 0.0);
        }
    }

    #[test]
    fn test_min_top_diameter_limits_reach() {
        // Diameters run 190..100 mm top-down. A 150 mm minimum stops the
        // grade partway up the stem; the thin top contributes nothing.
        let profile = toy_profile(10, 100.0);
        let table = vec![row(1, 150.0, 10.0, 50.0)];
        let result = optimize(&profile, &table, 10);
        // Feasible segment ends: indices with diameter >= 150 (0..=4).
        let expected_volume = profile.cum_volumes[4] - profile.cum_volumes[0];
        assert_approx_eq!(result[0].volume, expected_volume, 1e-12);
    }

    #[test]
    fn test_longer_segments_skip_increments() {
        // Three-increment segments can only end at indices 3, 6, 9.
        let profile = toy_profile(10, 100.0);
        let table = vec![row(1, 0.0, 30.0, 50.0)];
        let result = optimize(&profile, &table, 10);
        let expected_volume = profile.cum_volumes[9] - profile.cum_volumes[0];
        assert_approx_eq!(result[0].volume, expected_volume, 1e-12);
    }

    #[test]
    fn test_higher_priced_grade_wins_shared_stem() {
        let profile = toy_profile(10, 100.0);
        let table = vec![row(1, 0.0, 10.0, 50.0), row(2, 0.0, 10.0, 30.0)];
        let result = optimize(&profile, &table, 10);
        assert!(result[0].volume > 0.0);
        assert_eq!(result[1].volume, 0.0);
        assert_eq!(result[1].value, 0.0);
    }

    #[test]
    fn test_strict_update_keeps_first_row_on_tie() {
        // Identical economics: the earlier table row must win every segment.
        let profile = toy_profile(10, 100.0);
        let table = vec![row(7, 0.0, 10.0, 50.0), row(4, 0.0, 10.0, 50.0)];
        let result = optimize(&profile, &table, 10);
        // Output is sorted by grade id: grade 4 first, then grade 7.
        assert_eq!(result[0].grade, 4);
        assert_eq!(result[0].volume, 0.0);
        assert_eq!(result[1].grade, 7);
        assert!(result[1].volume > 0.0);
    }

    #[test]
    fn test_non_contiguous_grade_ids() {
        let profile = toy_profile(10, 100.0);
        let table = vec![row(40, 0.0, 10.0, 50.0), row(10, 500.0, 10.0, 90.0)];
        let result = optimize(&profile, &table, 10);
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].grade, 10);
        assert_eq!(result[0].volume, 0.0);
        assert_eq!(result[1].grade, 40);
        assert!(result[1].volume > 0.0);
    }

    #[test]
    fn test_mixed_grades_partition_thick_and_thin_parts() {
        // Sawlog needs 150 mm; pulp takes the rest of the top.
        let profile = toy_profile(10, 100.0);
        let table = vec![row(1, 150.0, 10.0, 50.0), row(3, 0.0, 10.0, 15.0)];
        let result = optimize(&profile, &table, 10);
        let sawlog = &result[0];
        let pulp = &result[1];
        assert!(sawlog.volume > 0.0);
        assert!(pulp.volume > 0.0);
        let total = sawlog.volume + pulp.volume;
        let expected = profile.total_volume() - profile.cum_volumes[0];
        assert_approx_eq!(total, expected, 1e-12);
    }

    #[test]
    fn test_infinite_segment_length_is_infeasible() {
        // An unbounded row can never end inside the profile; it must be
        // skipped without disturbing the index arithmetic.
        let profile = toy_profile(3, 100.0);
        let table = vec![row(1, 0.0, f64::INFINITY, 50.0)];
        let result = optimize(&profile, &table, 10);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].volume, 0.0);
        assert_eq!(result[0].value, 0.0);
    }

    #[test]
    fn test_oversized_segment_length_is_infeasible() {
        let profile = toy_profile(10, 100.0);
        let table = vec![row(1, 0.0, 1e300, 50.0), row(2, 0.0, f64::NAN, 50.0)];
        let result = optimize(&profile, &table, 10);
        for y in &result {
            assert_eq!(y.volume, 0.0);
            assert_eq!(y.value, 0.0);
        }
    }

    #[test]
    fn test_unbounded_row_does_not_disturb_feasible_rows() {
        let profile = toy_profile(10, 100.0);
        let bounded_only = vec![row(1, 0.0, 10.0, 50.0)];
        let with_unbounded = vec![row(2, 0.0, f64::INFINITY, 90.0), row(1, 0.0, 10.0, 50.0)];
        let a = optimize(&profile, &bounded_only, 10);
        let b = optimize(&profile, &with_unbounded, 10);
        let grade_one = b.iter().find(|y| y.grade == 1).unwrap();
        assert_eq!(grade_one, &a[0]);
        let grade_two = b.iter().find(|y| y.grade == 2).unwrap();
        assert_eq!(grade_two.volume, 0.0);
    }

    #[test]
    fn test_no_volume_fabricated() {
        let profile = toy_profile(50, 50.0);
        let table = vec![
            row(1, 150.0, 40.0, 58.0),
            row(2, 120.0, 30.0, 35.0),
            row(3, 60.0, 20.0, 17.5),
        ];
        let result = optimize(&profile, &table, 10);
        let total: f64 = result.iter().map(|y| y.volume).sum();
        assert!(total <= profile.total_volume() + 1e-12);
        assert!(total > 0.0);
    }

    #[test]
    fn test_value_consistent_with_single_price_per_grade() {
        let profile = toy_profile(50, 50.0);
        let table = vec![row(1, 150.0, 40.0, 58.0), row(3, 60.0, 20.0, 17.5)];
        let result = optimize(&profile, &table, 10);
        for (y, price) in result.iter().zip([58.0, 17.5]) {
            assert_approx_eq!(y.value, y.volume * price, 1e-9);
        }
    }

    #[test]
    fn test_row_order_does_not_change_result_without_ties() {
        let profile = toy_profile(50, 50.0);
        let forward = vec![
            row(1, 150.0, 40.0, 58.0),
            row(2, 120.0, 30.0, 35.0),
            row(3, 60.0, 20.0, 17.5),
        ];
        let mut reversed = forward.clone();
        reversed.reverse();
        assert_eq!(
            optimize(&profile, &forward, 10),
            optimize(&profile, &reversed, 10)
        );
    }

    #[test]
    fn test_raising_price_weakly_raises_total_value() {
        let profile = toy_profile(50, 50.0);
        let cheap = vec![row(1, 150.0, 40.0, 58.0), row(3, 60.0, 20.0, 17.5)];
        let mut dear = cheap.clone();
        dear[1].unit_price = 25.0;
        let total = |rows: &[PriceRow]| -> f64 {
            optimize(&profile, rows, 10).iter().map(|y| y.value).sum()
        };
        assert!(total(&dear) >= total(&cheap));
    }
}
