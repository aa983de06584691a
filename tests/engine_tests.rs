use rust_decimal::Decimal;
use std::str::FromStr;

use transit_queue::engine::{
    EngineConfig, EngineError, PassengerUpdate, QueueArea, TransitEngine, UpdatedField,
    VerificationOutcome,
};
use transit_queue::models::{FareCategory, PassengerDraft, PassengerStatus, PaymentMethod};

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn draft(name: &str, category: FareCategory, amount: &str) -> PassengerDraft {
    PassengerDraft {
        name: name.to_string(),
        destination: "Downtown".to_string(),
        category,
        payment_method: PaymentMethod::Cash,
        amount_paid: amount.to_string(),
    }
}

fn small_config() -> EngineConfig {
    EngineConfig {
        ticket_capacity: 3,
        boarding_capacity: 2,
        vehicle_capacity: 2,
        fleet_size: 2,
        reserve_size: 1,
        strict_update_reverification: false,
        first_passenger_id: 1,
    }
}

#[test]
fn test_full_boarding_flow() {
    let mut engine = TransitEngine::new(small_config());

    let admitted = engine
        .admit(draft("Ana", FareCategory::Standard, "50.00"))
        .unwrap();
    assert_eq!(admitted.passenger_id, 1);
    assert_eq!(admitted.queue_depth, 1);
    engine
        .admit(draft("Beto", FareCategory::Vip, "120.00"))
        .unwrap();

    let advanced = engine.advance_to_boarding().unwrap();
    assert_eq!(advanced.passenger_id, 1);
    assert_eq!(advanced.amount_collected, dec("50.00"));
    assert_eq!(advanced.assigned_vehicle.as_deref(), Some("BUS A"));
    engine.advance_to_boarding().unwrap();

    let boarded = engine.board_active_vehicle().unwrap();
    assert_eq!(boarded.vehicle_id, "BUS A");
    assert_eq!(boarded.load, 1);
    assert_eq!(boarded.capacity, 2);
    engine.board_active_vehicle().unwrap();

    assert_eq!(engine.served().len(), 2);
    assert_eq!(engine.served()[0].status, PassengerStatus::Boarded);
    assert!(engine.served()[0].boarded_at.is_some());
    assert_eq!(engine.ledger().total_collected(), dec("170.00"));

    let departed = engine.depart_active_vehicle().unwrap();
    assert_eq!(departed.departed_vehicle, "BUS A");
    assert_eq!(departed.passengers_carried, 2);
    assert_eq!(departed.introduced_vehicle.as_deref(), Some("BUS C"));
    assert_eq!(departed.active_vehicle.as_deref(), Some("BUS B"));
    assert_eq!(engine.departures().len(), 1);
}

#[test]
fn test_ticket_area_capacity() {
    let mut engine = TransitEngine::new(small_config());
    for i in 0..3 {
        engine
            .admit(draft(&format!("P{}", i), FareCategory::Standard, "50.00"))
            .unwrap();
    }
    let err = engine
        .admit(draft("Extra", FareCategory::Standard, "50.00"))
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::CapacityExceeded {
            area: QueueArea::Ticketing,
            capacity: 3,
        }
    );
    assert_eq!(engine.ticketing().len(), 3);
}

#[test]
fn test_advance_with_empty_ticketing() {
    let mut engine = TransitEngine::new(small_config());
    let err = engine.advance_to_boarding().unwrap_err();
    assert_eq!(
        err,
        EngineError::EmptySource {
            area: QueueArea::Ticketing,
        }
    );
}

#[test]
fn test_full_boarding_area_blocks_advance() {
    let mut engine = TransitEngine::new(small_config());
    for i in 0..3 {
        engine
            .admit(draft(&format!("P{}", i), FareCategory::Standard, "50.00"))
            .unwrap();
    }
    engine.advance_to_boarding().unwrap();
    engine.advance_to_boarding().unwrap();

    let err = engine.advance_to_boarding().unwrap_err();
    assert_eq!(
        err,
        EngineError::CapacityExceeded {
            area: QueueArea::Boarding,
            capacity: 2,
        }
    );
    // El rechazo no toca la cola de boletería
    assert_eq!(engine.ticketing().len(), 1);
    assert_eq!(engine.ticketing().front().map(|p| p.id()), Some(3));
}

#[test]
fn test_denied_payment_drops_passenger() {
    let mut engine = TransitEngine::new(small_config());
    engine
        .admit(draft("Corto", FareCategory::Standard, "45.00"))
        .unwrap();

    let err = engine.advance_to_boarding().unwrap_err();
    assert_eq!(
        err,
        EngineError::Denied {
            id: 1,
            name: "Corto".to_string(),
            required: dec("50.00"),
            tendered: "45.00".to_string(),
        }
    );
    assert!(engine.ticketing().is_empty());
    assert!(engine.boarding().is_empty());
    assert_eq!(engine.ledger().denied_count(), 1);
    assert_eq!(engine.ledger().total_collected(), dec("0"));

    let record = engine.ledger().record_for(1).unwrap();
    assert_eq!(record.outcome, VerificationOutcome::Denied);
    assert_eq!(record.amount_collected, None);
}

#[test]
fn test_unreadable_amount_is_denied() {
    let mut engine = TransitEngine::new(small_config());
    engine
        .admit(draft("Ilegible", FareCategory::Discounted, "treinta"))
        .unwrap();
    let err = engine.advance_to_boarding().unwrap_err();
    assert!(matches!(err, EngineError::Denied { id: 1, .. }));

    // El monto con espacios alrededor sí parsea
    engine
        .admit(draft("Espacios", FareCategory::Discounted, "  35.00 "))
        .unwrap();
    let advanced = engine.advance_to_boarding().unwrap();
    assert_eq!(advanced.amount_collected, dec("35.00"));
}

#[test]
fn test_board_full_vehicle_keeps_front_of_queue() {
    let mut engine = TransitEngine::new(small_config());
    for i in 0..3 {
        engine
            .admit(draft(&format!("P{}", i), FareCategory::Standard, "50.00"))
            .unwrap();
    }
    engine.advance_to_boarding().unwrap();
    engine.advance_to_boarding().unwrap();
    engine.board_active_vehicle().unwrap();
    engine.board_active_vehicle().unwrap();
    engine.advance_to_boarding().unwrap();

    let err = engine.board_active_vehicle().unwrap_err();
    assert_eq!(
        err,
        EngineError::VehicleFull {
            id: "BUS A".to_string(),
        }
    );
    // El pasajero rebotado conserva el frente de la cola
    assert_eq!(engine.boarding().len(), 1);
    assert_eq!(engine.boarding().front().map(|p| p.id()), Some(3));

    // Tras la partida, el mismo pasajero sube a la nueva unidad activa
    engine.depart_active_vehicle().unwrap();
    let boarded = engine.board_active_vehicle().unwrap();
    assert_eq!(boarded.passenger_id, 3);
    assert_eq!(boarded.vehicle_id, "BUS B");
}

#[test]
fn test_depart_empty_vehicle_rejected() {
    let mut engine = TransitEngine::new(small_config());
    let err = engine.depart_active_vehicle().unwrap_err();
    assert_eq!(
        err,
        EngineError::EmptyVehicle {
            id: "BUS A".to_string(),
        }
    );
    assert!(engine.departures().is_empty());
}

#[test]
fn test_operations_without_any_vehicle() {
    let config = EngineConfig {
        fleet_size: 0,
        reserve_size: 0,
        ..small_config()
    };
    let mut engine = TransitEngine::new(config);
    engine
        .admit(draft("Solo", FareCategory::Standard, "50.00"))
        .unwrap();

    // La verificación procede igual, sin unidad asignada
    let advanced = engine.advance_to_boarding().unwrap();
    assert_eq!(advanced.assigned_vehicle, None);

    assert_eq!(
        engine.board_active_vehicle().unwrap_err(),
        EngineError::NoActiveVehicle
    );
    assert_eq!(
        engine.depart_active_vehicle().unwrap_err(),
        EngineError::NoActiveVehicle
    );
}

#[test]
fn test_rotation_recycles_without_reserve() {
    let config = EngineConfig {
        reserve_size: 0,
        ..small_config()
    };
    let mut engine = TransitEngine::new(config);
    engine
        .admit(draft("Ana", FareCategory::Standard, "50.00"))
        .unwrap();
    engine.advance_to_boarding().unwrap();
    engine.board_active_vehicle().unwrap();

    let departed = engine.depart_active_vehicle().unwrap();
    assert_eq!(departed.departed_vehicle, "BUS A");
    assert_eq!(departed.introduced_vehicle, None);
    assert_eq!(departed.active_vehicle.as_deref(), Some("BUS B"));

    // Sin reserva, la unidad vuelve al final de la rotación ya vacía
    let order: Vec<&str> = engine.fleet().rotation_order().collect();
    assert_eq!(order, vec!["BUS B", "BUS A"]);
    assert_eq!(engine.fleet().get("BUS A").map(|v| v.occupancy()), Some(0));
}

#[test]
fn test_rotation_retires_with_reserve() {
    let mut engine = TransitEngine::new(small_config());
    engine
        .admit(draft("Ana", FareCategory::Standard, "50.00"))
        .unwrap();
    engine.advance_to_boarding().unwrap();
    engine.board_active_vehicle().unwrap();
    engine.depart_active_vehicle().unwrap();

    let order: Vec<&str> = engine.fleet().rotation_order().collect();
    assert_eq!(order, vec!["BUS B", "BUS C"]);
    assert_eq!(engine.fleet().reserve_len(), 0);
    // La unidad retirada sigue en el pool y puede volver por asignación
    assert!(engine.fleet().contains("BUS A"));
    assert_eq!(engine.fleet().retired_ids(), vec!["BUS A"]);
}

#[test]
fn test_assign_unknown_vehicle() {
    let mut engine = TransitEngine::new(small_config());
    let err = engine.assign_vehicle("BUS Z").unwrap_err();
    assert_eq!(
        err,
        EngineError::UnknownVehicle {
            id: "BUS Z".to_string(),
        }
    );
}

#[test]
fn test_assign_active_vehicle_is_noop() {
    let mut engine = TransitEngine::new(small_config());
    let outcome = engine.assign_vehicle("BUS A").unwrap();
    assert!(outcome.already_active);
    let order: Vec<&str> = engine.fleet().rotation_order().collect();
    assert_eq!(order, vec!["BUS A", "BUS B"]);
}

#[test]
fn test_assign_promotes_empty_vehicle() {
    let mut engine = TransitEngine::new(small_config());
    let outcome = engine.assign_vehicle("BUS B").unwrap();
    assert!(!outcome.already_active);
    assert_eq!(engine.fleet().active_id(), Some("BUS B"));
    let order: Vec<&str> = engine.fleet().rotation_order().collect();
    assert_eq!(order, vec!["BUS B", "BUS A"]);
}

#[test]
fn test_assign_reinstates_retired_vehicle() {
    let mut engine = TransitEngine::new(small_config());
    engine
        .admit(draft("Ana", FareCategory::Standard, "50.00"))
        .unwrap();
    engine.advance_to_boarding().unwrap();
    engine.board_active_vehicle().unwrap();
    engine.depart_active_vehicle().unwrap();
    assert_eq!(engine.fleet().retired_ids(), vec!["BUS A"]);

    engine.assign_vehicle("BUS A").unwrap();
    assert_eq!(engine.fleet().active_id(), Some("BUS A"));
    let order: Vec<&str> = engine.fleet().rotation_order().collect();
    assert_eq!(order, vec!["BUS A", "BUS B", "BUS C"]);
    assert!(engine.fleet().retired_ids().is_empty());
}

#[test]
fn test_assign_occupied_vehicle_rejected() {
    let mut engine = TransitEngine::new(small_config());
    engine
        .admit(draft("Ana", FareCategory::Standard, "50.00"))
        .unwrap();
    engine.advance_to_boarding().unwrap();
    engine.board_active_vehicle().unwrap();

    // BUS A queda con un pasajero a bordo y deja de ser el activo
    engine.assign_vehicle("BUS B").unwrap();
    let err = engine.assign_vehicle("BUS A").unwrap_err();
    assert_eq!(
        err,
        EngineError::OccupiedElsewhere {
            id: "BUS A".to_string(),
            occupancy: 1,
        }
    );
}

#[test]
fn test_assign_full_vehicle_rejected() {
    let mut engine = TransitEngine::new(small_config());
    for i in 0..2 {
        engine
            .admit(draft(&format!("P{}", i), FareCategory::Standard, "50.00"))
            .unwrap();
    }
    engine.advance_to_boarding().unwrap();
    engine.advance_to_boarding().unwrap();
    engine.board_active_vehicle().unwrap();
    engine.board_active_vehicle().unwrap();

    engine.assign_vehicle("BUS B").unwrap();
    let err = engine.assign_vehicle("BUS A").unwrap_err();
    assert_eq!(
        err,
        EngineError::AlreadyFull {
            id: "BUS A".to_string(),
        }
    );
}

#[test]
fn test_update_applies_changed_fields_only() {
    let mut engine = TransitEngine::new(small_config());
    engine
        .admit(draft("Ana", FareCategory::Standard, "50.00"))
        .unwrap();

    let outcome = engine
        .update_passenger(
            1,
            PassengerUpdate {
                name: "Ana María".to_string(),
                destination: "Downtown".to_string(),
                category: FareCategory::Vip,
            },
        )
        .unwrap();
    assert_eq!(
        outcome.changed,
        vec![UpdatedField::Name, UpdatedField::Category]
    );
    // Modo histórico: el cambio a una categoría más cara no re-verifica
    let found = engine.search("1").unwrap();
    assert_eq!(found.passenger.category, FareCategory::Vip);
    assert_eq!(found.passenger.name, "Ana María");
}

#[test]
fn test_update_strict_mode_blocks_uncovered_category() {
    let config = EngineConfig {
        strict_update_reverification: true,
        ..small_config()
    };
    let mut engine = TransitEngine::new(config);
    engine
        .admit(draft("Ana", FareCategory::Standard, "50.00"))
        .unwrap();

    let err = engine
        .update_passenger(
            1,
            PassengerUpdate {
                name: "Ana".to_string(),
                destination: "Airport".to_string(),
                category: FareCategory::Vip,
            },
        )
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::Denied {
            id: 1,
            name: "Ana".to_string(),
            required: dec("100.00"),
            tendered: "50.00".to_string(),
        }
    );
    // El rechazo no aplica ninguno de los cambios
    let found = engine.search("1").unwrap();
    assert_eq!(found.passenger.destination, "Downtown");
    assert_eq!(found.passenger.category, FareCategory::Standard);

    // Una categoría que el monto cubre pasa igual que en modo histórico
    let outcome = engine
        .update_passenger(
            1,
            PassengerUpdate {
                name: "Ana".to_string(),
                destination: "Downtown".to_string(),
                category: FareCategory::Discounted,
            },
        )
        .unwrap();
    assert_eq!(outcome.changed, vec![UpdatedField::Category]);
}

#[test]
fn test_update_missing_passenger() {
    let mut engine = TransitEngine::new(small_config());
    let err = engine
        .update_passenger(
            7,
            PassengerUpdate {
                name: "Nadie".to_string(),
                destination: "Downtown".to_string(),
                category: FareCategory::Standard,
            },
        )
        .unwrap_err();
    assert_eq!(err, EngineError::NotFound { id: 7 });
}

#[test]
fn test_remove_from_each_queue() {
    let mut engine = TransitEngine::new(small_config());
    engine
        .admit(draft("Ana", FareCategory::Standard, "50.00"))
        .unwrap();
    engine
        .admit(draft("Beto", FareCategory::Standard, "50.00"))
        .unwrap();
    engine.advance_to_boarding().unwrap();

    let removed = engine.remove_passenger(1).unwrap();
    assert_eq!(removed.area, QueueArea::Boarding);
    let removed = engine.remove_passenger(2).unwrap();
    assert_eq!(removed.area, QueueArea::Ticketing);
    assert_eq!(engine.remove_passenger(1), Err(EngineError::NotFound { id: 1 }));
    assert_eq!(engine.removed_this_session(), 2);
}

#[test]
fn test_search_by_id_and_by_name() {
    let mut engine = TransitEngine::new(small_config());
    engine
        .admit(draft("Alice Johnson", FareCategory::Standard, "50.00"))
        .unwrap();
    engine
        .admit(draft("Bob", FareCategory::Standard, "50.00"))
        .unwrap();
    engine.advance_to_boarding().unwrap();

    let by_id = engine.search("2").unwrap();
    assert_eq!(by_id.area, QueueArea::Ticketing);
    assert_eq!(by_id.position, 0);

    let by_name = engine.search("  alice johnson ").unwrap();
    assert_eq!(by_name.area, QueueArea::Boarding);
    assert_eq!(by_name.passenger.id(), 1);

    assert!(engine.search("9").is_none());
    assert!(engine.search("Charlie").is_none());
    assert!(engine.search("   ").is_none());
}

#[test]
fn test_seed_skips_entries_already_in_system() {
    let mut engine = TransitEngine::new(EngineConfig::default());
    let first = engine.seed_from_roster(3);
    assert_eq!(first.added, 3);
    assert_eq!(first.skipped, 0);
    assert_eq!(first.queue_depth, 3);

    let second = engine.seed_from_roster(2);
    assert_eq!(second.added, 2);
    assert_eq!(second.skipped, 3);
    assert_eq!(second.queue_depth, 5);
    assert!(!second.roster_exhausted);
}

#[test]
fn test_seed_reports_exhausted_roster() {
    let mut engine = TransitEngine::new(EngineConfig::default());
    let all = engine.seed_from_roster(100);
    assert_eq!(all.added, 12);
    assert_eq!(engine.roster_remaining(), 0);

    let empty = engine.seed_from_roster(1);
    assert!(empty.roster_exhausted);
    assert_eq!(empty.added, 0);
    assert_eq!(empty.skipped, 0);
}

#[test]
fn test_seed_with_full_queue_still_counts_duplicates() {
    let mut engine = TransitEngine::new(small_config());
    let first = engine.seed_from_roster(5);
    assert_eq!(first.added, 3);
    assert_eq!(first.queue_depth, 3);

    // Cola llena: nadie entra, pero los repetidos se siguen contando
    let second = engine.seed_from_roster(5);
    assert_eq!(second.added, 0);
    assert_eq!(second.skipped, 3);
    assert_eq!(second.queue_depth, 3);
}

#[test]
fn test_passenger_conservation() {
    let mut engine = TransitEngine::new(EngineConfig::default());
    engine
        .admit(draft("Valida1", FareCategory::Standard, "50.00"))
        .unwrap();
    engine
        .admit(draft("Corto", FareCategory::Standard, "10.00"))
        .unwrap();
    engine
        .admit(draft("Valida2", FareCategory::Vip, "150.00"))
        .unwrap();
    engine
        .admit(draft("Ilegible", FareCategory::Discounted, "??"))
        .unwrap();
    engine
        .admit(draft("Valida3", FareCategory::Discounted, "35.00"))
        .unwrap();

    engine.advance_to_boarding().unwrap();
    assert!(engine.advance_to_boarding().is_err());
    engine.advance_to_boarding().unwrap();
    assert!(engine.advance_to_boarding().is_err());
    engine.advance_to_boarding().unwrap();

    engine.board_active_vehicle().unwrap();
    engine.board_active_vehicle().unwrap();
    engine.remove_passenger(5).unwrap();

    let queued = engine.ticketing().len() + engine.boarding().len();
    let denied = engine.ledger().denied_count() as usize;
    let removed = engine.removed_this_session() as usize;
    let served = engine.served().len();
    assert_eq!(
        engine.admitted_this_session() as usize,
        queued + served + denied + removed
    );
    assert_eq!(engine.ledger().total_collected(), dec("235.00"));
}

#[test]
fn test_ids_are_never_reused() {
    let mut engine = TransitEngine::new(small_config());
    engine
        .admit(draft("Corto", FareCategory::Standard, "1.00"))
        .unwrap();
    assert!(engine.advance_to_boarding().is_err());
    engine.remove_passenger(1).unwrap_err();

    let next = engine
        .admit(draft("Siguiente", FareCategory::Standard, "50.00"))
        .unwrap();
    assert_eq!(next.passenger_id, 2);
}

#[test]
fn test_snapshot_round_trip_resumes_ids() {
    let mut engine = TransitEngine::new(small_config());
    engine
        .admit(draft("Ana", FareCategory::Standard, "50.00"))
        .unwrap();
    engine
        .admit(draft("Beto", FareCategory::Vip, "120.00"))
        .unwrap();
    engine.advance_to_boarding().unwrap();
    engine.board_active_vehicle().unwrap();
    engine.depart_active_vehicle().unwrap();

    let snapshot = engine.snapshot();
    let mut restored = TransitEngine::from_snapshot(small_config(), snapshot.clone());

    assert_eq!(restored.snapshot(), snapshot);
    assert_eq!(restored.ledger().total_collected(), dec("50.00"));
    assert_eq!(restored.fleet().active_id(), engine.fleet().active_id());

    let next = restored
        .admit(draft("Carla", FareCategory::Standard, "50.00"))
        .unwrap();
    assert_eq!(next.passenger_id, 3);
}
