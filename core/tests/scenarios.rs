use airline_tycoon_core::{
    AIPersonality, CompetitorAirline, FuelMarket, GameError, PersonalityKind, SaveCodec, advance_day, new_world,
};

fn rng() -> rand::rngs::StdRng {
    use rand::SeedableRng;
    rand::rngs::StdRng::seed_from_u64(1)
}

#[test]
fn no_competitor_identity_full_share_no_uplift() {
    let mut world = new_world(1, "Solo Air", "JFK", vec![]).unwrap();
    world.player.cash = 500_000_000.0;
    let plane = world.player.lease_aircraft("Boeing 737-800", 0, &mut rng()).unwrap();
    let route = world.player.open_route("JFK", "LAX", 300.0, 0).unwrap();
    world.player.assign_aircraft(route, plane).unwrap();

    let report = advance_day(&mut world);
    assert!(report.passengers > 0);
    // with zero competitors the lone carrier's market share is always 1.0,
    // so passengers are bounded only by capacity and demand, never trimmed
    // by a split.
    let route = world.player.route_by_id(route).unwrap();
    assert!(route.load_factor > 0.0);
}

#[test]
fn save_round_trip_then_advance_matches_unsaved_clone() {
    let mut world = new_world(5, "Persist Air", "ORD", vec![PersonalityKind::Aggressive]).unwrap();
    world.player.cash = 500_000_000.0;
    let plane = world.player.purchase_aircraft("Boeing 737-800", 0, &mut rng()).unwrap();
    let route = world.player.open_route("ORD", "ATL", 250.0, 0).unwrap();
    world.player.assign_aircraft(route, plane).unwrap();

    advance_day(&mut world);

    let mut clone_path = world.clone();
    let saved = SaveCodec::save(&world);
    let mut restored = SaveCodec::load(&saved).unwrap();

    advance_day(&mut clone_path);
    advance_day(&mut restored);

    assert_eq!(clone_path.player.cash, restored.player.cash);
    assert_eq!(clone_path.day, restored.day);
    assert_eq!(clone_path.fuel_market.price, restored.fuel_market.price);
}

#[test]
fn determinism_same_seed_same_action_stream_same_reports() {
    fn run(seed: u64) -> Vec<(f64, u64, f64)> {
        let mut world = new_world(seed, "Det Air", "JFK", vec![PersonalityKind::Budget, PersonalityKind::Conservative]).unwrap();
        world.player.cash = 500_000_000.0;
        let plane = world.player.purchase_aircraft("Boeing 737-800", 0, &mut rng()).unwrap();
        let route = world.player.open_route("JFK", "LAX", 300.0, 0).unwrap();
        world.player.assign_aircraft(route, plane).unwrap();

        (0..15)
            .map(|_| {
                let report = advance_day(&mut world);
                (report.revenue, report.passengers, report.cash)
            })
            .collect()
    }

    assert_eq!(run(2024), run(2024));
}

#[test]
fn purchase_boundary_exact_cash_succeeds_one_dollar_short_fails() {
    let mut exact = new_world(1, "Exact Air", "JFK", vec![]).unwrap();
    exact.player.cash = 90_000_000.0;
    assert!(exact.player.purchase_aircraft("Boeing 737-800", 0, &mut rng()).is_ok());

    let mut short = new_world(1, "Short Air", "JFK", vec![]).unwrap();
    short.player.cash = 89_999_999.0;
    let err = short.player.purchase_aircraft("Boeing 737-800", 0, &mut rng()).unwrap_err();
    assert_eq!(err, GameError::InsufficientFunds { have: 89_999_999.0, need: 90_000_000.0 });
}

#[test]
fn sale_of_assigned_aircraft_fails_without_mutating_world() {
    let mut world = new_world(1, "Assigned Air", "JFK", vec![]).unwrap();
    world.player.cash = 200_000_000.0;
    let plane = world.player.purchase_aircraft("Boeing 737-800", 0, &mut rng()).unwrap();
    let route = world.player.open_route("JFK", "LAX", 300.0, 0).unwrap();
    world.player.assign_aircraft(route, plane).unwrap();

    let cash_before = world.player.cash;
    let err = world.player.sell_aircraft(plane).unwrap_err();
    assert_eq!(err, GameError::AircraftAssigned { aircraft_id: plane });
    assert_eq!(world.player.cash, cash_before);
    assert_eq!(world.player.aircraft().len(), 1);
}

#[test]
fn sell_unassigned_aircraft_returns_seventy_percent_of_purchase_price() {
    let mut world = new_world(1, "Sell Air", "JFK", vec![]).unwrap();
    world.player.cash = 90_000_000.0;
    let plane = world.player.purchase_aircraft("Boeing 737-800", 0, &mut rng()).unwrap();
    let refund = world.player.sell_aircraft(plane).unwrap();
    assert!((refund - 63_000_000.0).abs() < 1e-6);
}

#[test]
fn lease_return_penalty_fails_on_insufficient_funds() {
    let mut world = new_world(1, "Lease Air", "JFK", vec![]).unwrap();
    let plane = world.player.lease_aircraft("Airbus A320", 0, &mut rng()).unwrap();
    world.player.cash = 50_000.0;
    let err = world.player.return_leased(plane).unwrap_err();
    assert_eq!(err, GameError::InsufficientFunds { have: 50_000.0, need: 2_040_000.0 });
}

#[test]
fn fuel_clamp_at_max_bucket_stays_at_ceiling() {
    let mut market = FuelMarket { price: 5.95, ema_30d: 5.95, trend: 0.0, days_since_trend_update: 0 };
    market.apply_shock(1.10, 0);
    assert_eq!(market.price, 6.00);
}

#[test]
fn competitor_ai_runs_without_panicking_across_many_days() {
    let mut world = new_world(
        9,
        "Watcher Air",
        "JFK",
        vec![PersonalityKind::Aggressive, PersonalityKind::Conservative, PersonalityKind::Budget, PersonalityKind::Balanced],
    )
    .unwrap();
    for competitor in &mut world.competitors {
        competitor.airline.cash = 300_000_000.0;
    }
    for _ in 0..60 {
        advance_day(&mut world);
    }
    assert_eq!(world.day, 60);
    assert_eq!(world.competitors.len(), 4);
}

#[test]
fn competition_share_worked_example_end_to_end() {
    let mut world = new_world(3, "Cheap Air", "JFK", vec![PersonalityKind::Balanced]).unwrap();
    world.player.cash = 500_000_000.0;
    world.competitors[0].airline.cash = 500_000_000.0;

    let p_plane = world.player.purchase_aircraft("Boeing 737-800", 0, &mut rng()).unwrap();
    let p_route = world.player.open_route("JFK", "LAX", 200.0, 0).unwrap();
    world.player.assign_aircraft(p_route, p_plane).unwrap();

    let c_plane = world.competitors[0].airline.purchase_aircraft("Boeing 737-800", 0, &mut rng()).unwrap();
    let c_route = world.competitors[0].airline.open_route("JFK", "LAX", 300.0, 0).unwrap();
    world.competitors[0].airline.assign_aircraft(c_route, c_plane).unwrap();

    advance_day(&mut world);

    let player_route = world.player.route_by_id(p_route).unwrap();
    let competitor_route = world.competitors[0].airline.route_by_id(c_route).unwrap();
    // cheaper ticket price should out-sell the pricier competitor on the
    // same contested city pair.
    assert!(player_route.cumulative_passengers >= competitor_route.cumulative_passengers);
}

#[test]
fn personality_presets_are_distinct() {
    let personalities: Vec<AIPersonality> =
        [PersonalityKind::Aggressive, PersonalityKind::Conservative, PersonalityKind::Budget, PersonalityKind::Balanced]
            .iter()
            .map(|k| k.parameters())
            .collect();
    for i in 0..personalities.len() {
        for j in (i + 1)..personalities.len() {
            assert_ne!(personalities[i], personalities[j]);
        }
    }
}

#[test]
fn competitor_airline_wraps_personality_kind() {
    let airline = airline_tycoon_core::Airline::new(airline_tycoon_core::AirlineId(9), "Rival", "ORD", 1_000_000.0);
    let competitor = CompetitorAirline::new(airline, PersonalityKind::Budget);
    assert_eq!(competitor.personality().pricing_modifier, 0.70);
}
