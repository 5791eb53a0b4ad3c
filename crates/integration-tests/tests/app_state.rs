//! Integration tests for application state commands over in-memory
//! repositories: a session is built, persisted, and reloaded.

use chrono::{Duration, TimeZone, Utc};
use pricemate_core::repository::{InMemoryRepository, Repositories};
use pricemate_core::state::{AppState, DEFAULT_USER_LOCATION};
use pricemate_core::{
    AlertStatus, Barcode, Catalog, NewShoppingItem, Price, PriceAlert, PriceEntry, Product, Store,
};

fn price(cents: i64) -> Price {
    Price::from_cents(cents).unwrap()
}

fn product(barcode: &str, name: &str, entries: Vec<PriceEntry>) -> Product {
    Product {
        barcode: Barcode::parse(barcode).unwrap(),
        name: name.to_string(),
        brand: "Brand".to_string(),
        category: "Grocery".to_string(),
        image_url: None,
        prices: entries,
    }
}

#[test]
fn test_new_session_defaults() {
    let state = AppState::new(Repositories::in_memory());
    assert!(state.items().is_empty());
    assert!(state.alerts().is_empty());
    assert!(state.preferred_stores().is_empty());
    assert_eq!(state.user_location(), DEFAULT_USER_LOCATION);
}

#[test]
fn test_load_restores_saved_entities() {
    let costco = Store {
        is_preferred: true,
        ..Store::new("Costco", "cart.fill", 5.2)
    };
    let metro = Store::new("Metro", "cart.fill", 2.5);
    let items = vec![
        NewShoppingItem::new("Milk", 1).into_item(),
        NewShoppingItem::new("Eggs", 12).into_item(),
    ];
    let oreo = product("0628915410034", "Christie Oreo Cookies", Vec::new());

    let repos = Repositories {
        shopping_items: Box::new(InMemoryRepository::with_entities(items)),
        stores: Box::new(InMemoryRepository::with_entities(vec![costco.clone(), metro])),
        alerts: Box::new(InMemoryRepository::with_entities(vec![PriceAlert::new(
            &oreo,
            price(400),
            None,
        )])),
        scans: Box::new(InMemoryRepository::new()),
    };

    let state = AppState::load(repos).unwrap();
    assert_eq!(state.items().len(), 2);
    assert_eq!(state.preferred_stores().len(), 1);
    assert!(state.is_preferred(costco.id));
    assert_eq!(state.active_alerts().count(), 1);
}

#[test]
fn test_shopping_session() {
    let mut state = AppState::new(Repositories::in_memory());
    let milk = state
        .add_item(NewShoppingItem::new("Milk", 2).with_target_price(price(300)))
        .unwrap();
    state.add_item(NewShoppingItem::new("Bread", 1)).unwrap();
    assert!(state.add_item(NewShoppingItem::new("", 1)).is_err());

    assert!(state.toggle_item(milk.id).unwrap());
    let summary = state.summary(price(499));
    assert_eq!(summary.total_items, 3);
    assert_eq!(summary.checked_items, 2);

    state.remove_item(milk.id).unwrap();
    assert_eq!(state.items().len(), 1);
}

#[test]
fn test_preferred_stores_drive_ranking() {
    let walmart = Store::new("Walmart", "cart.fill", 3.8);
    let costco = Store::new("Costco", "cart.fill", 5.2);
    let now = Utc::now();
    let oreo = product(
        "0628915410034",
        "Christie Oreo Cookies",
        vec![
            PriceEntry::new(walmart.clone(), price(447), now),
            PriceEntry::new(costco.clone(), price(447), now),
        ],
    );

    let mut state = AppState::new(Repositories::in_memory());
    let ranked = pricemate_core::pricing::rank_entries(&oreo.prices);
    assert_eq!(ranked.first().unwrap().store.name, "Walmart");

    assert!(state.add_preferred_store(&costco).unwrap());
    assert!(!state.add_preferred_store(&costco).unwrap());
    let preferred = state.with_preferences(&oreo);
    let ranked = pricemate_core::pricing::rank_entries(&preferred.prices);
    assert_eq!(ranked.first().unwrap().store.name, "Costco");

    assert!(state.remove_preferred_store(costco.id).unwrap());
    assert!(!state.is_preferred(costco.id));
}

#[test]
fn test_alert_lifecycle() {
    let costco = Store::new("Costco", "cart.fill", 5.2);
    let now = Utc.with_ymd_and_hms(2025, 9, 1, 12, 0, 0).unwrap();
    let expensive = product(
        "0628915410034",
        "Christie Oreo Cookies",
        vec![PriceEntry::new(costco.clone(), price(499), now)],
    );

    let mut state = AppState::new(Repositories::in_memory());
    let alert = state.add_alert(&expensive, price(450), None).unwrap();

    let catalog = Catalog::new(vec![expensive.clone()]).unwrap();
    assert!(state.evaluate_alerts(&catalog, now).unwrap().is_empty());
    assert_eq!(state.active_alerts().count(), 1);

    let mut cheaper = expensive;
    cheaper.prices = vec![PriceEntry::new(costco, price(429), now)];
    let catalog = Catalog::new(vec![cheaper]).unwrap();
    let later = now + Duration::hours(1);
    let fired = state.evaluate_alerts(&catalog, later).unwrap();

    assert_eq!(fired.len(), 1);
    let note = fired.first().unwrap();
    assert_eq!(note.alert_id, alert.id);
    assert_eq!(
        note.body,
        "Christie Oreo Cookies is now $4.29 at Costco - At your target price!"
    );

    let stored = state.alerts().first().unwrap();
    assert_eq!(stored.status, AlertStatus::Triggered);
    assert_eq!(stored.triggered_at, Some(later));

    // Fired alerts stay quiet and cannot be dismissed.
    assert!(state.evaluate_alerts(&catalog, later).unwrap().is_empty());
    assert!(state.dismiss_alert(alert.id).is_err());
}

#[test]
fn test_scan_history() {
    let oreo = product("0628915410034", "Christie Oreo Cookies", Vec::new());
    let start = Utc.with_ymd_and_hms(2025, 9, 1, 12, 0, 0).unwrap();
    let mut state = AppState::new(Repositories::in_memory());

    for minute in 0..12 {
        let code = Barcode::parse(&format!("{:08}", 10_000_000 + minute)).unwrap();
        state
            .record_scan(code, None, start + Duration::minutes(minute))
            .unwrap();
    }
    state
        .record_scan(oreo.barcode.clone(), Some(&oreo), start + Duration::hours(1))
        .unwrap();

    let recent = state.recent_scans(10);
    assert_eq!(recent.len(), 10);
    let newest = recent.first().unwrap();
    assert_eq!(newest.product_name.as_deref(), Some("Christie Oreo Cookies"));
    assert!(recent.windows(2).all(|w| match w {
        [a, b] => a.scanned_at >= b.scanned_at,
        _ => true,
    }));
}

#[test]
fn test_location_update() {
    let mut state = AppState::new(Repositories::in_memory());
    state.set_user_location("  Ottawa, ON ").unwrap();
    assert_eq!(state.user_location(), "Ottawa, ON");
    assert!(state.set_user_location("   ").is_err());
    assert_eq!(state.user_location(), "Ottawa, ON");
}
