use super::*;

struct Item {
    id: String,
}

impl Item {
    fn new(id: &str) -> Arc<Self> {
        Arc::new(Self { id: id.to_string() })
    }
}

impl Registerable for Item {
    fn registry_id(&self) -> &str {
        &self.id
    }
}

#[test]
fn test_new_is_empty() {
    let registry: BaseRegistry<Item> = BaseRegistry::default();
    assert!(registry.is_empty());
    assert_eq!(registry.len(), 0);
}

#[test]
fn test_register_and_get() {
    let registry = BaseRegistry::new();
    registry.register(Item::new("send_notification")).unwrap();

    assert!(registry.contains("send_notification"));
    assert_eq!(
        registry.get("send_notification").unwrap().registry_id(),
        "send_notification"
    );
    assert!(registry.get("view_messages").is_none());
}

#[test]
fn test_register_duplicate_keeps_first() {
    let registry = BaseRegistry::new();
    registry.register(Item::new("list_apps")).unwrap();

    match registry.register(Item::new("list_apps")) {
        Err(ExtensionError::AlreadyRegistered(id)) => assert_eq!(id, "list_apps"),
        other => panic!("expected AlreadyRegistered, got {:?}", other),
    }
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_unregister() {
    let registry = BaseRegistry::new();
    registry.register(Item::new("a")).unwrap();

    registry.unregister("a").unwrap();
    assert!(registry.is_empty());
    assert!(matches!(
        registry.unregister("a"),
        Err(ExtensionError::NotFound(_))
    ));
}

#[test]
fn test_listing_is_sorted() {
    let registry = BaseRegistry::new();
    for id in ["view_segments", "add_app", "list_apps"] {
        registry.register(Item::new(id)).unwrap();
    }

    assert_eq!(
        registry.list_ids(),
        vec!["add_app", "list_apps", "view_segments"]
    );
    let sorted: Vec<String> = registry
        .sorted()
        .iter()
        .map(|item| item.registry_id().to_string())
        .collect();
    assert_eq!(sorted, registry.list_ids());
}
