use systemdb_core::{CatalogStore, ImportError, Item, MemoryStorage, System};

fn store_with_alpha() -> CatalogStore<MemoryStorage> {
    let mut store = CatalogStore::load(MemoryStorage::new()).unwrap();
    store
        .append(System::new(
            "Alpha",
            "G1",
            vec![],
            vec![Item::new("Iron", 10.0, 5.0)],
            vec![],
        ))
        .unwrap();
    store
}

#[test]
fn import_rejects_non_json_and_leaves_catalog_unchanged() {
    let mut store = store_with_alpha();

    let err = store.import_merge("not json").unwrap_err();
    assert!(matches!(err, ImportError::Parse(_)));
    assert_eq!(store.systems().len(), 1);
}

#[test]
fn import_rejects_wrong_shape_without_detail() {
    let mut store = store_with_alpha();

    let err = store
        .import_merge(r#"{"systems": [{"name": "Beta"}]}"#)
        .unwrap_err();
    assert!(matches!(err, ImportError::Shape));
    assert_eq!(store.systems().len(), 1);
}

#[test]
fn import_accepts_wrapped_form_and_appends() {
    let mut store = store_with_alpha();

    let added = store
        .import_merge(
            r#"{"systems":[{"name":"Beta","glyphs":"","tags":[],"buy":[],"sell":[{"name":"Gold","price":1,"percent":1}]}]}"#,
        )
        .unwrap();
    assert_eq!(added, 1);
    assert_eq!(store.systems().len(), 2);
    assert_eq!(store.systems()[1].name, "Beta");
}

#[test]
fn import_accepts_bare_sequence_form() {
    let mut store = CatalogStore::load(MemoryStorage::new()).unwrap();

    let added = store
        .import_merge(
            r#"[{"name":"Gamma","glyphs":"XY","tags":["lush"],"buy":[{"name":"Carbon","price":20,"percent":-2.5}],"sell":[]}]"#,
        )
        .unwrap();
    assert_eq!(added, 1);
    assert_eq!(store.systems()[0].glyphs, "XY");
    assert_eq!(store.systems()[0].buy[0].percent, -2.5);
}

#[test]
fn import_does_not_dedup_against_existing_names() {
    let mut store = store_with_alpha();

    let added = store
        .import_merge(
            r#"[{"name":"Alpha","glyphs":"","tags":[],"buy":[{"name":"Iron","price":10,"percent":5}],"sell":[]}]"#,
        )
        .unwrap();
    assert_eq!(added, 1);
    assert_eq!(store.systems().len(), 2);
    assert_eq!(store.systems()[0].name, "Alpha");
    assert_eq!(store.systems()[1].name, "Alpha");
}

#[test]
fn import_of_empty_catalog_adds_nothing() {
    let mut store = store_with_alpha();

    assert_eq!(store.import_merge("[]").unwrap(), 0);
    assert_eq!(store.import_merge(r#"{"systems":[]}"#).unwrap(), 0);
    assert_eq!(store.systems().len(), 1);
}

#[test]
fn import_rejects_mistyped_scalar_fields_as_shape_error() {
    // The shape predicate does not inspect system scalar types; the typed
    // decode behind it does, and its rejection surfaces as Shape.
    let mut store = store_with_alpha();

    let err = store
        .import_merge(r#"[{"name":7,"glyphs":"","tags":[],"buy":[],"sell":[{"name":"Gold","price":1,"percent":1}]}]"#)
        .unwrap_err();
    assert!(matches!(err, ImportError::Shape));
    assert_eq!(store.systems().len(), 1);
}

#[test]
fn imported_systems_survive_export_round_trip() {
    let mut store = store_with_alpha();
    store
        .import_merge(
            r#"{"systems":[{"name":"Beta","glyphs":"","tags":[],"buy":[],"sell":[{"name":"Gold","price":1,"percent":1}]}]}"#,
        )
        .unwrap();

    let document = store.export().unwrap();
    let decoded: Vec<System> = serde_json::from_str(&document).unwrap();
    assert_eq!(decoded.len(), 2);
    assert_eq!(decoded[1].sell[0].name, "Gold");
}
