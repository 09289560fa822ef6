mod common;

use common::{centre, fixtures_dir, grid, sample_vessel, PatchField};
use searoute_lib::{
    base_fuel_per_km, haversine_km, load_zones, plan_voyage, EnvironmentalSample, LatLng,
    NoGoZone, PlannerOptions, RouteFailure, RouteRequest, SpatialGrid, Strategy, VoyagePlan,
};

fn plan_all(grid: &SpatialGrid, field: &PatchField, request: &RouteRequest) -> VoyagePlan {
    plan_voyage(grid, field, request, &PlannerOptions::default())
}

#[test]
fn flat_calm_grid_takes_the_diagonal() {
    let grid = grid(&[".....", ".....", ".....", ".....", "....."]);
    let request = RouteRequest::new(centre(0, 0), centre(4, 4), sample_vessel());
    let plan = plan_all(&grid, &PatchField::default(), &request);

    let base = base_fuel_per_km(&request.vessel);
    for outcome in &plan.outcomes {
        assert_eq!(outcome.points.len(), 5, "{}", outcome.strategy);
        let diagonal_km: f64 = (0..4)
            .map(|i| haversine_km(centre(i, i), centre(i + 1, i + 1)))
            .sum();
        let expected = base * diagonal_km;
        let total = outcome.total_fuel();
        assert!((total - expected).abs() <= 1e-9 * expected, "{total} vs {expected}");
        assert!(outcome.points.iter().skip(1).all(|p| p.segment_fuel > 0.0));
    }
}

#[test]
fn land_wall_forces_the_gap() {
    let grid = SpatialGrid::from_path(&fixtures_dir().join("strait_grid.json")).expect("fixture grid");
    let request = RouteRequest::new(centre(2, 4), centre(6, 4), sample_vessel());
    let plan = plan_all(&grid, &PatchField::default(), &request);

    for outcome in &plan.outcomes {
        assert!(outcome.is_success());
        assert!(outcome.points.iter().all(|p| !p.on_land));
        assert!(
            outcome
                .points
                .iter()
                .any(|p| p.position() == centre(4, 2)),
            "{} missed the gap",
            outcome.strategy
        );
    }
}

const RING: [&str; 5] = [
    "#.......#",
    "#.#####.#",
    "#.#####.#",
    "#.#####.#",
    "#.......#",
];

#[test]
fn shallow_cell_is_detoured_around() {
    let grid = grid(&RING);
    let field = PatchField::default().with(4, 0, EnvironmentalSample::calm(11.0));
    let request = RouteRequest::new(centre(1, 0), centre(7, 0), sample_vessel());
    let plan = plan_all(&grid, &field, &request);

    for outcome in &plan.outcomes {
        assert!(outcome.is_success());
        assert!(!outcome.points.iter().any(|p| p.position() == centre(4, 0)));
        assert!(outcome.points.iter().any(|p| p.lat == 4.5));
    }
}

#[test]
fn shallow_cell_is_crossed_when_it_is_the_only_way() {
    let grid = grid(&["#########", "#.......#", "#########"]);
    let field = PatchField::default().with(4, 1, EnvironmentalSample::calm(11.0));
    let request = RouteRequest::new(centre(1, 1), centre(7, 1), sample_vessel());
    let plan = plan_all(&grid, &field, &request);

    let balanced = plan.get(Strategy::Balanced).expect("balanced");
    assert!(balanced.is_success());
    let shallow = balanced
        .points
        .iter()
        .find(|p| p.position() == centre(4, 1))
        .expect("route crosses the shallow cell");
    let deep = &balanced.points[1];
    assert!(shallow.segment_fuel > 25.0 * deep.segment_fuel);
}

#[test]
fn land_start_is_bridged_to_water() {
    let grid = SpatialGrid::from_path(&fixtures_dir().join("strait_grid.json")).expect("fixture grid");
    let start = LatLng::new(2.4, 0.6);
    let request = RouteRequest::new(start, centre(6, 4), sample_vessel());
    let plan = plan_all(&grid, &PatchField::default(), &request);

    for outcome in &plan.outcomes {
        assert!(outcome.is_success());
        let first = &outcome.points[0];
        assert_eq!(first.position(), start);
        assert!(first.on_land);
        assert!(!outcome.points[1].on_land);
        assert_eq!(outcome.points[1].segment_fuel, 0.0);
        assert!(outcome.points[2..].iter().all(|p| !p.on_land));
    }
}

#[test]
fn land_end_is_bridged_to_the_nearest_coast() {
    let grid = grid(&["....#####", "....#####", "....#####"]);
    let end = centre(7, 1);
    let request = RouteRequest::new(centre(1, 1), end, sample_vessel());
    let plan = plan_all(&grid, &PatchField::default(), &request);

    for outcome in &plan.outcomes {
        assert!(outcome.is_success());
        let last = outcome.points.last().expect("points");
        assert_eq!(last.position(), end);
        assert!(last.on_land);
        assert_eq!(last.segment_fuel, 0.0);
    }
}

#[test]
fn enclosed_goal_is_unreachable_for_every_strategy() {
    let grid = grid(&["#########", "#...#.#.#", "#########"]);
    let request = RouteRequest::new(centre(1, 1), centre(5, 1), sample_vessel());
    let plan = plan_all(&grid, &PatchField::default(), &request);

    assert_eq!(plan.successes(), 0);
    for outcome in &plan.outcomes {
        assert_eq!(
            outcome.failure,
            Some(RouteFailure::Unreachable {
                expanded: outcome.expanded
            })
        );
        assert!(outcome.points.is_empty());
    }
}

#[test]
fn no_go_zone_is_avoided() {
    let grid = grid(&[
        "#.........#",
        "#.........#",
        "#.........#",
        "#.........#",
        "#.........#",
    ]);
    // lat 1..3, lng 3..6: straddles the straight line between the endpoints
    let zones = load_zones(&fixtures_dir().join("zones.json")).expect("fixture zones");
    assert_eq!(zones.len(), 1);
    assert_eq!(zones[0].vertices().len(), 4);
    let zone = zones[0].clone();
    assert!(zone.contains(centre(4, 2)));
    let request = RouteRequest::new(centre(1, 2), centre(9, 2), sample_vessel());
    let open = plan_all(&grid, &PatchField::default(), &request);
    let zoned = plan_all(
        &grid,
        &PatchField::default(),
        &request.clone().with_no_go_zones(zones),
    );

    for strategy in Strategy::ALL {
        let route = zoned.get(strategy).expect("zoned");
        assert!(route.points.iter().all(|p| !zone.contains(p.position())));
        assert!(route.total_fuel() > open.get(strategy).expect("open").total_fuel());
    }
}

#[test]
fn forced_no_go_transit_costs_a_hundredfold() {
    let grid = grid(&["#.....#", "#.....#"]);
    let cover = NoGoZone::new(vec![
        LatLng::new(-1.0, -1.0),
        LatLng::new(-1.0, 8.0),
        LatLng::new(3.0, 8.0),
        LatLng::new(3.0, -1.0),
    ]);
    let request = RouteRequest::new(centre(1, 0), centre(5, 1), sample_vessel());
    let free = plan_all(&grid, &PatchField::default(), &request);
    let forced = plan_all(
        &grid,
        &PatchField::default(),
        &request.with_no_go_zones(vec![cover]),
    );
    for strategy in Strategy::ALL {
        let a = free.get(strategy).expect("free").total_fuel();
        let b = forced.get(strategy).expect("forced").total_fuel();
        assert!((b / a - 100.0).abs() < 1e-6, "{strategy}: {b} / {a}");
    }
}
