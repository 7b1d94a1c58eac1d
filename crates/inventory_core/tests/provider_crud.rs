use inventory_core::{
    install_schema, Category, CategoryRepository, Computer, ComputerRepository,
    ConnectionProvider, Provider, ProviderRepository, RepoError, Repository,
};
use tempfile::TempDir;

fn setup() -> (TempDir, ConnectionProvider) {
    let dir = tempfile::tempdir().unwrap();
    let provider = ConnectionProvider::for_path(dir.path().join("inventory.db"));
    install_schema(&provider).unwrap();
    (dir, provider)
}

fn acme() -> Provider {
    Provider::new("Acme Supply", "555-0100", "sales@acme.test", "1 Main St")
}

#[test]
fn create_and_get_roundtrip() {
    let (_dir, store) = setup();
    let repo = ProviderRepository::new(store);

    let created = repo.create(&acme()).unwrap();
    assert!(created.id > 0);
    assert_eq!(created.phone, "555-0100");
    assert_eq!(created.email, "sales@acme.test");
    assert_eq!(created.address, "1 Main St");

    assert_eq!(repo.get_by_id(created.id).unwrap(), Some(created));
}

#[test]
fn update_replaces_every_mutable_field() {
    let (_dir, store) = setup();
    let repo = ProviderRepository::new(store);

    let mut provider = repo.create(&acme()).unwrap();
    provider.name = "Acme Global".to_string();
    provider.phone = "555-0199".to_string();
    provider.email = "hello@acme.test".to_string();
    provider.address = "2 Side St".to_string();
    assert!(repo.update(&provider).unwrap());

    assert_eq!(repo.get_by_id(provider.id).unwrap(), Some(provider));
}

#[test]
fn delete_then_get_returns_none() {
    let (_dir, store) = setup();
    let repo = ProviderRepository::new(store);

    let provider = repo.create(&acme()).unwrap();
    assert!(repo.delete(provider.id).unwrap());
    assert!(repo.get_by_id(provider.id).unwrap().is_none());
    assert!(!repo.delete(provider.id).unwrap());
}

#[test]
fn search_matches_name_only() {
    let (_dir, store) = setup();
    let repo = ProviderRepository::new(store);

    repo.create(&acme()).unwrap();
    repo.create(&Provider::new("Byte Traders", "", "acme-reseller@bt.test", ""))
        .unwrap();

    let hits = repo.search("acme").unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "Acme Supply");
}

#[test]
fn get_all_orders_by_name() {
    let (_dir, store) = setup();
    let repo = ProviderRepository::new(store);

    repo.create(&Provider::new("Zeta Parts", "", "", "")).unwrap();
    repo.create(&Provider::new("byte traders", "", "", "")).unwrap();
    repo.create(&acme()).unwrap();

    let names: Vec<String> = repo
        .get_all()
        .unwrap()
        .into_iter()
        .map(|provider| provider.name)
        .collect();
    assert_eq!(names, vec!["Acme Supply", "byte traders", "Zeta Parts"]);
}

#[test]
fn deleting_provider_still_used_by_a_computer_fails() {
    let (_dir, store) = setup();
    let providers = ProviderRepository::new(store.clone());
    let categories = CategoryRepository::new(store.clone());
    let computers = ComputerRepository::new(store);

    let provider = providers.create(&acme()).unwrap();
    let category = categories.create(&Category::new("Laptops", "")).unwrap();
    computers
        .create(&Computer::new(
            category.id,
            Some(provider.id),
            "Acme",
            "X1",
            "SN-PRV-1",
            500.0,
            "",
        ))
        .unwrap();

    let err = providers.delete(provider.id).unwrap_err();
    assert!(matches!(err, RepoError::StatementFailed { .. }));
    assert!(err.to_string().starts_with("failed to delete Provider: "));
}
