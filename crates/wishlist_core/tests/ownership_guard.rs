use wishlist_core::db::open_db_in_memory;
use wishlist_core::{
    ActorId, MutationOp, NewPlace, PlaceService, PlaceServiceError, SqlitePlaceRepository,
};

#[test]
fn foreign_actor_cannot_mark_place_visited() {
    let conn = open_db_in_memory().unwrap();
    let service = PlaceService::new(SqlitePlaceRepository::try_new(&conn).unwrap());
    let created = service.create_place(&actor("bob"), named("Moab")).unwrap();

    let err = service
        .mark_visited(&actor("alice"), created.id, None)
        .unwrap_err();
    match err {
        PlaceServiceError::Forbidden { place, operation } => {
            assert_eq!(place, created.id);
            assert_eq!(operation, MutationOp::Visit);
        }
        other => panic!("unexpected error: {other}"),
    }

    // Denied mutation must leave the record untouched.
    let loaded = service.get_place(created.id).unwrap().unwrap();
    assert!(!loaded.visited);
}

#[test]
fn foreign_actor_cannot_delete_place() {
    let conn = open_db_in_memory().unwrap();
    let service = PlaceService::new(SqlitePlaceRepository::try_new(&conn).unwrap());
    let created = service.create_place(&actor("bob"), named("Moab")).unwrap();

    let err = service.delete_place(&actor("alice"), created.id).unwrap_err();
    match err {
        PlaceServiceError::Forbidden { place, operation } => {
            assert_eq!(place, created.id);
            assert_eq!(operation, MutationOp::Delete);
        }
        other => panic!("unexpected error: {other}"),
    }

    assert!(service.get_place(created.id).unwrap().is_some());
}

#[test]
fn denial_is_distinct_from_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = PlaceService::new(SqlitePlaceRepository::try_new(&conn).unwrap());
    let created = service.create_place(&actor("bob"), named("Moab")).unwrap();

    // Existence is not hidden from non-owners: the foreign actor gets
    // Forbidden for an existing record, NotFound only for a missing one.
    let err = service
        .mark_visited(&actor("alice"), created.id, None)
        .unwrap_err();
    assert!(matches!(err, PlaceServiceError::Forbidden { .. }));

    service.delete_place(&actor("bob"), created.id).unwrap();
    let err = service
        .mark_visited(&actor("alice"), created.id, None)
        .unwrap_err();
    assert!(matches!(err, PlaceServiceError::PlaceNotFound(_)));
}

#[test]
fn owner_passes_the_guard_for_both_operations() {
    let conn = open_db_in_memory().unwrap();
    let service = PlaceService::new(SqlitePlaceRepository::try_new(&conn).unwrap());
    let created = service.create_place(&actor("bob"), named("Moab")).unwrap();

    service.mark_visited(&actor("bob"), created.id, None).unwrap();
    service.delete_place(&actor("bob"), created.id).unwrap();
    assert!(service.get_place(created.id).unwrap().is_none());
}

fn actor(name: &str) -> ActorId {
    ActorId::parse(name).unwrap()
}

fn named(name: &str) -> NewPlace {
    NewPlace {
        name: name.to_string(),
        ..NewPlace::default()
    }
}
