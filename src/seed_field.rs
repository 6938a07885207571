use crate::error::FieldError;
use phyllotaxis_common::{pol2cart, Vec2};
use std::f64::consts::TAU;

/// Angular resolution of the nucleation grid search, in radians.
pub const ANGLE_STEP: f64 = 0.05;

/// A single nucleated growth point. Its identity is its index in the owning [`SeedField`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Seed {
    pub position: Vec2,
}

/// Append-only sequence of seeds in nucleation order, plus the repulsive potential they generate.
#[derive(Debug, Clone)]
pub struct SeedField {
    seeds: Vec<Seed>,
    growth_strength: f64,
}

impl SeedField {
    /// Creates an empty field whose potential terms are scaled by `growth_strength`.
    pub fn new(growth_strength: f64) -> Self {
        Self { seeds: Vec::new(), growth_strength }
    }

    /// Appends a seed at polar coordinates `(r, phi)`.
    pub fn add(&mut self, r: f64, phi: f64) {
        self.seeds.push(Seed { position: pol2cart(r, phi) });
    }

    pub fn count(&self) -> usize {
        self.seeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seeds.is_empty()
    }

    /// Read-only view of every seed, oldest first.
    pub fn seeds(&self) -> &[Seed] {
        &self.seeds
    }

    /// Owned copy of all positions as `(x, y)` pairs.
    pub fn positions(&self) -> Vec<(f64, f64)> {
        self.seeds.iter().map(|s| (s.position.x, s.position.y)).collect()
    }

    /// Cartesian position of seed `i`.
    pub fn position(&self, i: usize) -> Result<Vec2, FieldError> {
        self.seeds
            .get(i)
            .map(|s| s.position)
            .ok_or(FieldError::IndexOutOfRange { index: i, count: self.seeds.len() })
    }

    /// Distance of seed `i` from the origin.
    pub fn radius(&self, i: usize) -> Result<f64, FieldError> {
        Ok(self.position(i)?.length())
    }

    /// Polar angle of seed `i`, in `(-π, π]`.
    pub fn angle(&self, i: usize) -> Result<f64, FieldError> {
        Ok(self.position(i)?.angle())
    }

    /// Replaces the whole position of seed `i`.
    pub fn set_position(&mut self, i: usize, position: Vec2) -> Result<(), FieldError> {
        let count = self.seeds.len();
        let seed = self
            .seeds
            .get_mut(i)
            .ok_or(FieldError::IndexOutOfRange { index: i, count })?;
        seed.position = position;
        Ok(())
    }

    /// Sum of `G / distance` over every seed not located exactly at `p`.
    ///
    /// The coincidence test is exact floating-point equality, not a tolerance. It exists so the
    /// potential can be evaluated at a seed's own location without that seed's term diverging.
    pub fn potential_at(&self, p: Vec2) -> f64 {
        self.seeds
            .iter()
            .filter(|s| !(s.position.x == p.x && s.position.y == p.y))
            .map(|s| self.growth_strength / s.position.distance(p))
            .sum()
    }

    /// Grid search for the angle on the circle of `radius` with the lowest potential.
    ///
    /// Samples `0, Δφ, 2Δφ, ...` while below 2π (126 samples for `Δφ = 0.05`); the first sample
    /// reaching the minimum wins ties, so an empty field yields angle `0`. The sample angle is
    /// accumulated by repeated addition, not computed as `k * Δφ`.
    /// Cost is O(count × samples).
    pub fn minimize_potential(&self, radius: f64) -> f64 {
        let mut best_angle = TAU;
        let mut best_potential = f64::INFINITY;
        let mut angle = 0.0;
        while angle < TAU {
            let potential = self.potential_at(pol2cart(radius, angle));
            if potential < best_potential {
                best_potential = potential;
                best_angle = angle;
            }
            angle += ANGLE_STEP;
        }
        best_angle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn add_converts_polar_to_cartesian() {
        let mut field = SeedField::new(1.0);
        field.add(2.0, PI / 2.0);
        let p = field.position(0).unwrap();
        assert!(p.x.abs() < 1e-12);
        assert!((p.y - 2.0).abs() < 1e-12);
        assert_eq!(field.count(), 1);
    }

    #[test]
    fn index_order_is_nucleation_order() {
        let mut field = SeedField::new(1.0);
        field.add(1.0, 0.0);
        field.add(2.0, 0.0);
        field.add(3.0, 0.0);
        let radii: Vec<f64> = (0..3).map(|i| field.radius(i).unwrap()).collect();
        assert_eq!(radii, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn out_of_range_queries_are_errors() {
        let mut field = SeedField::new(1.0);
        field.add(1.0, 0.0);
        let expected = FieldError::IndexOutOfRange { index: 1, count: 1 };
        assert_eq!(field.position(1), Err(expected));
        assert_eq!(field.radius(1), Err(expected));
        assert_eq!(field.angle(1), Err(expected));
        assert_eq!(field.set_position(1, Vec2::zero()), Err(expected));
    }

    #[test]
    fn radius_and_angle_of_seed() {
        let mut field = SeedField::new(1.0);
        field.add(0.5, 2.0);
        assert!((field.radius(0).unwrap() - 0.5).abs() < 1e-12);
        assert!((field.angle(0).unwrap() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn angle_range_is_atan2() {
        let mut field = SeedField::new(1.0);
        field.add(1.0, 3.0 * PI / 2.0);
        let a = field.angle(0).unwrap();
        assert!((a + PI / 2.0).abs() < 1e-12);
    }

    #[test]
    fn set_position_replaces_whole_tuple() {
        let mut field = SeedField::new(1.0);
        field.add(1.0, 0.0);
        field.set_position(0, Vec2::new(3.0, 4.0)).unwrap();
        assert_eq!(field.position(0).unwrap(), Vec2::new(3.0, 4.0));
        assert_eq!(field.radius(0).unwrap(), 5.0);
    }

    #[test]
    fn potential_sums_inverse_distances() {
        let mut field = SeedField::new(2.0);
        field.add(1.0, 0.0);
        field.add(2.0, 0.0);
        // distances 1 and 2 from the origin
        let v = field.potential_at(Vec2::zero());
        assert!((v - (2.0 / 1.0 + 2.0 / 2.0)).abs() < 1e-12);
    }

    #[test]
    fn potential_of_empty_field_is_zero() {
        let field = SeedField::new(1.0);
        assert_eq!(field.potential_at(Vec2::new(0.3, -0.2)), 0.0);
    }

    #[test]
    fn potential_skips_coincident_seed() {
        let mut field = SeedField::new(1.0);
        field.add(1.0, 0.0);
        field.add(1.0, PI);
        let at_first = field.position(0).unwrap();
        let v = field.potential_at(at_first);
        assert!(v.is_finite());
        // only the opposite seed, at distance 2, contributes
        assert!((v - 0.5).abs() < 1e-12);
    }

    #[test]
    fn minimizer_on_empty_field_picks_first_sample() {
        let field = SeedField::new(1.0);
        assert_eq!(field.minimize_potential(0.5), 0.0);
    }

    #[test]
    fn minimizer_points_away_from_single_seed() {
        for r in [0.1, 0.5, 2.0, 7.0] {
            let mut field = SeedField::new(1.0);
            field.add(1.0, 0.0);
            let phi = field.minimize_potential(r);
            assert!((phi - PI).abs() <= ANGLE_STEP, "r={r}: phi={phi}");
        }
    }

    #[test]
    fn minimizer_sample_on_top_of_seed_sees_no_potential_from_it() {
        // the angle-0 sample lands exactly on the seed, whose term is skipped
        let mut field = SeedField::new(1.0);
        field.add(1.0, 0.0);
        assert_eq!(field.potential_at(pol2cart(1.0, 0.0)), 0.0);
        assert_eq!(field.minimize_potential(1.0), 0.0);
    }

    #[test]
    fn minimizer_returns_grid_sample() {
        let mut field = SeedField::new(1.0);
        field.add(0.5, 1.0);
        field.add(0.5, 2.5);
        let phi = field.minimize_potential(0.5);
        let k = (phi / ANGLE_STEP).round();
        assert!((phi - k * ANGLE_STEP).abs() < 1e-9);
        assert!((0.0..TAU).contains(&phi));
    }

    #[test]
    fn minimizer_avoids_two_seeds() {
        // seeds at 0 and π/2 leave the widest gap centered on 5π/4
        let mut field = SeedField::new(1.0);
        field.add(1.0, 0.0);
        field.add(1.0, PI / 2.0);
        let phi = field.minimize_potential(0.5);
        assert!((phi - 5.0 * PI / 4.0).abs() <= ANGLE_STEP, "phi={phi}");
    }
}
