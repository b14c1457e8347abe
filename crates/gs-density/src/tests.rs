//! Unit tests for gs-density.
//!
//! Estimator tests run on a reduced-resolution grid so the KDE smoothing
//! pass stays fast in debug builds; the math is resolution-independent.

#[cfg(test)]
mod reduce {
    use gs_core::GeoPoint;

    use crate::{reduce_nodes, DEFAULT_REDUCTION_BANDWIDTH_DEG};

    #[test]
    fn empty_input_is_not_an_error() {
        assert!(reduce_nodes(&[], DEFAULT_REDUCTION_BANDWIDTH_DEG).is_empty());
    }

    #[test]
    fn collapses_near_duplicates_keeps_isolated() {
        // Five stops crammed into ~200 m, one isolated station ~11 km away.
        let points = vec![
            GeoPoint::new(50.7300, 7.1000),
            GeoPoint::new(50.7305, 7.1005),
            GeoPoint::new(50.7310, 7.1002),
            GeoPoint::new(50.7302, 7.0998),
            GeoPoint::new(50.7308, 7.1008),
            GeoPoint::new(50.8300, 7.1000),
        ];
        let centers = reduce_nodes(&points, DEFAULT_REDUCTION_BANDWIDTH_DEG);

        assert_eq!(centers.len(), 2, "one center per peak, got {centers:?}");
        // First center is the dense group's mean, second the isolated point.
        assert!((centers[0].lat - 50.7305).abs() < 0.001);
        assert!((centers[1].lat - 50.8300).abs() < 0.001);
    }

    #[test]
    fn single_point_survives() {
        let points = vec![GeoPoint::new(50.0, 7.0)];
        let centers = reduce_nodes(&points, DEFAULT_REDUCTION_BANDWIDTH_DEG);
        assert_eq!(centers.len(), 1);
        assert!((centers[0].lat - 50.0).abs() < 1e-9);
    }

    #[test]
    fn deterministic() {
        let points = vec![
            GeoPoint::new(50.73, 7.10),
            GeoPoint::new(50.731, 7.101),
            GeoPoint::new(50.74, 7.12),
            GeoPoint::new(50.76, 7.09),
        ];
        let a = reduce_nodes(&points, DEFAULT_REDUCTION_BANDWIDTH_DEG);
        let b = reduce_nodes(&points, DEFAULT_REDUCTION_BANDWIDTH_DEG);
        assert_eq!(a, b);
    }
}

#[cfg(test)]
mod kde {
    use gs_core::GeoPoint;

    use crate::Kde2;

    #[test]
    fn zero_weights_give_flat_zero_surface() {
        let points = vec![GeoPoint::new(50.0, 7.0), GeoPoint::new(50.1, 7.1)];
        let kde = Kde2::fit(&points, &[0.0, 0.0]);
        assert_eq!(kde.evaluate(&points), vec![0.0, 0.0]);
    }

    #[test]
    fn empty_input_gives_empty_output() {
        let kde = Kde2::fit(&[], &[]);
        assert!(kde.evaluate(&[]).is_empty());
        assert_eq!(kde.evaluate(&[GeoPoint::new(0.0, 0.0)]), vec![0.0]);
    }

    #[test]
    fn heavier_point_dominates_nearby() {
        let a = GeoPoint::new(50.00, 7.00);
        let b = GeoPoint::new(50.10, 7.10);
        let kde = Kde2::fit(&[a, b], &[10.0, 1.0]);
        let d = kde.evaluate(&[a, b]);
        assert!(d[0] > d[1], "density at the heavy point should win: {d:?}");
    }

    #[test]
    fn coincident_points_do_not_produce_nan() {
        // Zero variance in both dimensions — bandwidth floor must kick in.
        let p = GeoPoint::new(50.0, 7.0);
        let kde = Kde2::fit(&[p, p, p], &[1.0, 1.0, 1.0]);
        let d = kde.evaluate(&[p, GeoPoint::new(50.2, 7.0)]);
        assert!(d.iter().all(|v| v.is_finite()), "{d:?}");
        assert!(d[0] > d[1]);
    }

    #[test]
    fn signed_weights_are_accepted() {
        let green = GeoPoint::new(50.00, 7.00);
        let urban = GeoPoint::new(50.05, 7.05);
        let kde = Kde2::fit(&[green, urban], &[0.5, -0.6]);
        let d = kde.evaluate(&[green, urban]);
        assert!(d.iter().all(|v| v.is_finite()));
        assert!(d[0] > d[1], "repulsive weight should lower the surface: {d:?}");
    }
}

#[cfg(test)]
mod layer {
    use crate::{combine, min_max_normalize};

    #[test]
    fn normalization_bounds() {
        let mut values = vec![3.0, 7.0, 5.0, 11.0];
        min_max_normalize(&mut values);
        assert_eq!(values[0], 0.0);
        assert_eq!(values[3], 1.0);
        assert!(values.iter().all(|v| (0.0..=1.0).contains(v)));
    }

    #[test]
    fn constant_surface_normalizes_to_zeros() {
        let mut values = vec![0.42; 8];
        min_max_normalize(&mut values);
        assert_eq!(values, vec![0.0; 8]);

        let mut zeros = vec![0.0; 8];
        min_max_normalize(&mut zeros);
        assert_eq!(zeros, vec![0.0; 8]);
    }

    #[test]
    fn empty_normalization_is_a_noop() {
        let mut values: Vec<f64> = Vec::new();
        min_max_normalize(&mut values);
        assert!(values.is_empty());
    }

    #[test]
    fn single_weight_combination_is_identity() {
        let layer_x = vec![0.1, 0.5, 0.9];
        let layer_y = vec![1.0, 1.0, 1.0];
        let total = combine(
            3,
            &[(1.0, Some(layer_x.as_slice())), (0.0, Some(layer_y.as_slice()))],
        );
        assert_eq!(total, layer_x);
    }

    #[test]
    fn equal_weights_over_constant_layers() {
        // Four weights of 0.25; three constant-0.5 layers present, the
        // fourth layer absent → uniformly 0.375 everywhere.
        let half = vec![0.5; 6];
        let total = combine(
            6,
            &[
                (0.25, Some(half.as_slice())),
                (0.25, Some(half.as_slice())),
                (0.25, Some(half.as_slice())),
                (0.25, None),
            ],
        );
        for v in total {
            assert!((v - 0.375).abs() < 1e-12, "got {v}");
        }
    }

    #[test]
    fn missing_layers_contribute_zero() {
        let total = combine(4, &[(3.0, None)]);
        assert_eq!(total, vec![0.0; 4]);
    }
}

#[cfg(test)]
mod estimator {
    use gs_core::{GeoPoint, Grid, GridSpec, LandUseCategory, Query, TransitMode};
    use rustc_hash::FxHashMap;

    use crate::{DensityEstimator, DensityInputs};

    /// 20×20 grid keeps the KDE pass fast in debug builds.
    fn test_query(radius_km: f64) -> Query {
        let mut q = Query::new(50.733334, 7.1, radius_km).unwrap();
        q.grid = GridSpec { resolution: 20, buffer_deg: 0.17 };
        q
    }

    fn empty_inputs() -> (FxHashMap<TransitMode, Vec<GeoPoint>>, FxHashMap<LandUseCategory, Vec<GeoPoint>>)
    {
        (FxHashMap::default(), FxHashMap::default())
    }

    #[test]
    fn layers_stay_index_aligned_after_masking() {
        let q = test_query(10.0);
        let grid = Grid::build(q.center(), &q.grid);
        let (modes, land_use) = empty_inputs();
        let inputs = DensityInputs {
            mode_nodes: &modes,
            existing_sites: &[],
            land_use: &land_use,
            population: &[],
        };
        let surface = DensityEstimator::new(&q).estimate(&grid, &inputs);

        assert!(!surface.cells.is_empty());
        assert!(surface.cells.len() < grid.len(), "radius mask must drop corners");
        assert_eq!(surface.infrastructure.len(), surface.cells.len());
        assert_eq!(surface.land_use.len(), surface.cells.len());
        assert_eq!(surface.population.len(), surface.cells.len());
        assert_eq!(surface.combined.len(), surface.cells.len());
    }

    #[test]
    fn masked_cells_are_within_radius() {
        let q = test_query(10.0);
        let grid = Grid::build(q.center(), &q.grid);
        let (modes, land_use) = empty_inputs();
        let inputs = DensityInputs {
            mode_nodes: &modes,
            existing_sites: &[],
            land_use: &land_use,
            population: &[],
        };
        let surface = DensityEstimator::new(&q).estimate(&grid, &inputs);
        for cell in &surface.cells {
            assert!(cell.distance_km(q.center()) <= q.radius_km());
        }
    }

    #[test]
    fn all_empty_inputs_give_all_zero_surface() {
        let q = test_query(25.0);
        let grid = Grid::build(q.center(), &q.grid);
        let (modes, land_use) = empty_inputs();
        let inputs = DensityInputs {
            mode_nodes: &modes,
            existing_sites: &[],
            land_use: &land_use,
            population: &[],
        };
        let surface = DensityEstimator::new(&q).estimate(&grid, &inputs);
        assert!(surface.combined.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn existing_sites_alone_drive_the_infrastructure_layer() {
        // Empty bus/rail/subway node sets but a non-empty existing-site
        // set: the surface is driven entirely by the charging term.
        let q = test_query(25.0);
        let grid = Grid::build(q.center(), &q.grid);
        let (modes, land_use) = empty_inputs();
        let sites = vec![GeoPoint::new(50.733334, 7.1), GeoPoint::new(50.74, 7.12)];
        let inputs = DensityInputs {
            mode_nodes: &modes,
            existing_sites: &sites,
            land_use: &land_use,
            population: &[],
        };
        let surface = DensityEstimator::new(&q).estimate(&grid, &inputs);

        let max = surface.infrastructure.iter().copied().fold(f64::MIN, f64::max);
        let min = surface.infrastructure.iter().copied().fold(f64::MAX, f64::min);
        assert!(max > min, "charging term alone must still shape the surface");
        assert!(surface.infrastructure.iter().all(|v| (0.0..=1.0).contains(v)));
    }

    #[test]
    fn infrastructure_scores_stay_in_unit_interval() {
        let q = test_query(25.0);
        let grid = Grid::build(q.center(), &q.grid);
        let mut modes = FxHashMap::default();
        modes.insert(TransitMode::Bus, vec![GeoPoint::new(50.73, 7.10)]);
        modes.insert(TransitMode::Rail, vec![GeoPoint::new(50.75, 7.08)]);
        let (_, land_use) = empty_inputs();
        let inputs = DensityInputs {
            mode_nodes: &modes,
            existing_sites: &[],
            land_use: &land_use,
            population: &[],
        };
        let surface = DensityEstimator::new(&q).estimate(&grid, &inputs);
        assert!(surface.infrastructure.iter().all(|v| (0.0..=1.0).contains(v)));
    }

    #[test]
    fn edge_penalty_damps_the_cell_farther_from_center() {
        // One site north of the center, and the two lattice cells 0.01°
        // on either side of it.  Their smoothed proximity values match by
        // symmetry, so the score ratio isolates the center-distance
        // penalty exp(−0.5·Δd/r).
        let mut q = Query::new(50.733334, 7.1, 25.0).unwrap();
        q.grid = GridSpec { resolution: 18, buffer_deg: 0.17 }; // 0.02° spacing
        let grid = Grid::build(q.center(), &q.grid);

        let center = q.center();
        let site = GeoPoint::new(center.lat + 0.10, center.lon - 0.01);
        let (modes, land_use) = empty_inputs();
        let inputs = DensityInputs {
            mode_nodes: &modes,
            existing_sites: &[site],
            land_use: &land_use,
            population: &[],
        };
        let surface = DensityEstimator::new(&q).estimate(&grid, &inputs);

        let near = GeoPoint::new(center.lat + 0.09, center.lon - 0.01);
        let far = GeoPoint::new(center.lat + 0.11, center.lon - 0.01);
        let score_at = |p: GeoPoint| {
            let i = surface
                .cells
                .iter()
                .position(|c| (c.lat - p.lat).abs() < 1e-9 && (c.lon - p.lon).abs() < 1e-9)
                .expect("coordinate must be a masked lattice cell");
            surface.infrastructure[i]
        };

        let ratio = score_at(near) / score_at(far);
        let expected =
            (-0.5 * (near.distance_km(center) - far.distance_km(center)) / q.radius_km()).exp();
        assert!(ratio > 1.0, "nearer cell must outscore the farther one, got {ratio}");
        assert!((ratio - expected).abs() < 0.02, "got {ratio}, want ~{expected}");
    }

    #[test]
    fn single_layer_weight_combination_equals_that_layer() {
        let q = test_query(25.0)
            .with_layer_weights(gs_core::LayerWeights {
                infrastructure: 1.0,
                land_use: 0.0,
                population: 0.0,
            })
            .unwrap();
        let grid = Grid::build(q.center(), &q.grid);
        let mut modes = FxHashMap::default();
        modes.insert(TransitMode::Subway, vec![GeoPoint::new(50.73, 7.11)]);
        let (_, mut land_use) = empty_inputs();
        land_use.insert(LandUseCategory::Green, vec![GeoPoint::new(50.74, 7.09)]);
        let inputs = DensityInputs {
            mode_nodes: &modes,
            existing_sites: &[],
            land_use: &land_use,
            population: &[(GeoPoint::new(50.72, 7.13), 10_000.0)],
        };
        let surface = DensityEstimator::new(&q).estimate(&grid, &inputs);
        assert_eq!(surface.combined, surface.infrastructure);
    }
}
