use super::*;

fn registry_with(keys: &[&str]) -> AppRegistry {
    let registry = AppRegistry::new();
    for key in keys {
        registry
            .register(key, &format!("{}-id", key), &format!("{}-key", key), None)
            .unwrap();
    }
    registry
}

#[test]
fn test_list_preserves_insertion_order() {
    let registry = registry_with(&["weirdbrains", "mandible", "alpha"]);
    assert_eq!(registry.keys(), vec!["weirdbrains", "mandible", "alpha"]);
    let ids: Vec<String> = registry.list().into_iter().map(|a| a.app_id).collect();
    assert_eq!(ids, vec!["weirdbrains-id", "mandible-id", "alpha-id"]);
}

#[test]
fn test_first_registration_becomes_current() {
    let registry = AppRegistry::new();
    assert!(registry.current().is_none());

    registry.register("a", "a1", "k1", None).unwrap();
    registry.register("b", "b1", "k2", None).unwrap();

    assert_eq!(registry.current_key().as_deref(), Some("a"));
    assert_eq!(registry.current().unwrap().app_id, "a1");
}

#[test]
fn test_name_defaults_to_key() {
    let registry = AppRegistry::new();
    let app = registry.register("mandible", "id", "key", None).unwrap();
    assert_eq!(app.display_name, "mandible");

    let app = registry.register("wb", "id2", "key2", Some("Weird Brains")).unwrap();
    assert_eq!(app.display_name, "Weird Brains");
}

#[test]
fn test_duplicate_register_leaves_registry_unchanged() {
    let registry = AppRegistry::new();
    registry.register("a", "a1", "k1", Some("First")).unwrap();

    let err = registry.register("a", "other", "other", None).unwrap_err();
    assert_eq!(err, RegistryError::DuplicateKey("a".to_string()));

    assert_eq!(registry.len(), 1);
    let app = registry.get("a").unwrap();
    assert_eq!(app.app_id, "a1");
    assert_eq!(app.display_name, "First");
}

#[test]
fn test_register_rejects_empty_fields() {
    let registry = AppRegistry::new();
    assert!(matches!(
        registry.register("", "id", "key", None),
        Err(RegistryError::InvalidInput(_))
    ));
    assert!(matches!(
        registry.register("k", "id", "", None),
        Err(RegistryError::InvalidInput(msg)) if msg.contains("api_key")
    ));
    assert!(registry.is_empty());
}

#[test]
fn test_update_provided_fields_only() {
    let registry = registry_with(&["a"]);

    let updated = registry.update("a", None, Some("new-key"), Some("Renamed")).unwrap();
    assert_eq!(updated, vec![UpdatedField::ApiKey, UpdatedField::Name]);

    let app = registry.get("a").unwrap();
    assert_eq!(app.app_id, "a-id");
    assert_eq!(app.api_key, "new-key");
    assert_eq!(app.display_name, "Renamed");
}

#[test]
fn test_update_nothing_given() {
    let registry = registry_with(&["a"]);
    assert!(registry.update("a", None, Some(""), None).unwrap().is_empty());
    assert_eq!(registry.get("a").unwrap().api_key, "a-key");
}

#[test]
fn test_update_missing_key() {
    let registry = registry_with(&["a"]);
    assert_eq!(
        registry.update("ghost", Some("x"), None, None),
        Err(RegistryError::NotFound("ghost".to_string()))
    );
}

#[test]
fn test_updated_field_labels() {
    let labels: Vec<String> = [UpdatedField::AppId, UpdatedField::ApiKey, UpdatedField::Name]
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(labels, vec!["App ID", "API Key", "Name"]);
}

#[test]
fn test_remove_current_reassigns_first_remaining() {
    let registry = registry_with(&["a", "b", "c"]);
    assert!(registry.set_current("b"));

    let removed = registry.remove("b").unwrap();
    assert_eq!(removed.key, "b");
    assert_eq!(registry.current_key().as_deref(), Some("a"));
    assert!(registry.current().is_some());
}

#[test]
fn test_remove_non_current_keeps_current() {
    let registry = registry_with(&["a", "b"]);
    registry.remove("b").unwrap();
    assert_eq!(registry.current_key().as_deref(), Some("a"));
}

#[test]
fn test_remove_last_clears_current() {
    let registry = registry_with(&["only"]);
    registry.remove("only").unwrap();
    assert!(registry.current().is_none());
    assert!(registry.current_key().is_none());
    assert!(registry.is_empty());
}

#[test]
fn test_remove_missing_key() {
    let registry = registry_with(&["a"]);
    assert_eq!(
        registry.remove("ghost").unwrap_err(),
        RegistryError::NotFound("ghost".to_string())
    );
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_set_current_absent_key() {
    let registry = registry_with(&["a", "b"]);
    assert!(!registry.set_current("ghost"));
    assert_eq!(registry.current_key().as_deref(), Some("a"));
}

#[test]
fn test_resolve_prefers_registered_override() {
    let registry = registry_with(&["a", "b"]);
    assert_eq!(registry.resolve(Some("b")).unwrap().key, "b");
    assert_eq!(registry.resolve(Some("ghost")).unwrap().key, "a");
    assert_eq!(registry.resolve(None).unwrap().key, "a");
    assert!(AppRegistry::new().resolve(Some("a")).is_none());
}

#[test]
fn test_from_configs() {
    let registry = AppRegistry::from_configs(vec![
        AppConfig::new("mandible", "m-id", "m-key", Some("Mandible".to_string())),
        AppConfig::new("weirdbrains", "w-id", "w-key", None),
    ])
    .unwrap();
    assert_eq!(registry.current_key().as_deref(), Some("mandible"));
    assert_eq!(registry.len(), 2);
}

#[test]
fn test_from_configs_rejects_duplicates() {
    let result = AppRegistry::from_configs(vec![
        AppConfig::new("a", "1", "k", None),
        AppConfig::new("a", "2", "k", None),
    ]);
    assert!(matches!(result, Err(RegistryError::DuplicateKey(_))));
}
