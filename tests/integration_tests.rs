//! Integration tests for the broker desk
//!
//! These tests exercise the modules together over the built-in fixtures.

use approx::assert_relative_eq;

use broker_desk::basket::{filter_by_kind, find_basket, BasketKind};
use broker_desk::behavior::{BehaviorView, ScoreBand};
use broker_desk::metrics;
use broker_desk::orders::{estimate_order, LimitPrice, OrderFilter, PriceMode, MTF_LEVERAGE};
use broker_desk::scenario::{simulate, simulate_group};
use broker_desk::watchlist::{AddOutcome, SortBy, WatchlistBook, WatchlistCategory};
use broker_desk::{Config, FixtureStore, Holding, ProductType, Route, Session, Symbol, UserId};

// =============================================================================
// Test Utilities
// =============================================================================

fn store() -> FixtureStore {
    FixtureStore::builtin()
}

fn session(user: UserId) -> Session {
    Session::new(store().users, user)
}

fn book(store: &FixtureStore) -> WatchlistBook {
    WatchlistBook::new(
        store.stocks.clone(),
        store.smart_lists.clone(),
        store.theme_lists.clone(),
    )
}

/// Holdings with arbitrary, non-representable decimal values
fn awkward_holdings() -> Vec<Holding> {
    (1..=25)
        .map(|i| {
            let i = i as f64;
            Holding::new(
                format!("S{}", i).as_str(),
                (i as u64) * 3 + 1,
                10.0 + i * 0.37,
                10.0 + i * 0.41 - (i % 4.0) * 0.13,
            )
        })
        .collect()
}

// =============================================================================
// Portfolio Metrics Tests
// =============================================================================

#[test]
fn test_pnl_identity_holds_exactly() {
    let holdings = awkward_holdings();
    let totals = metrics::portfolio_totals(&holdings);
    assert_eq!(totals.total_current - totals.total_invested, totals.total_pnl);

    for user in store().users {
        let totals = metrics::portfolio_totals(&user.holdings);
        assert_eq!(totals.total_current - totals.total_invested, totals.total_pnl);
    }
}

#[test]
fn test_zero_invested_never_divides() {
    let holdings = vec![
        Holding::new("BONUS1", 10, 0.0, 12.0),
        Holding::new("BONUS2", 5, 0.0, 30.0),
    ];
    let totals = metrics::portfolio_totals(&holdings);
    assert!(totals.total_invested.is_zero());
    assert_eq!(totals.total_pnl_percent, 0.0);
}

#[test]
fn test_allocation_weights_sum_to_100() {
    let weights = metrics::holding_weights(&awkward_holdings());
    let sum: f64 = weights.iter().map(|w| w.weight).sum();
    assert_relative_eq!(sum, 100.0, epsilon = 1e-9);
}

#[test]
fn test_single_holding_concentration() {
    let mut holding = Holding::new("X", 10, 100.0, 120.0);
    holding.current = 1200.0;
    let weights = metrics::allocation_weights(&[holding], 1200.0);
    assert_relative_eq!(weights[0].weight, 100.0);
    assert!(weights[0].is_concentrated);
}

#[test]
fn test_empty_user_dashboard_is_zero() {
    let s = session(UserId::SarahParker);
    let user = s.current_user();
    let totals = metrics::portfolio_totals(&user.holdings);
    let day = metrics::day_change(&user.holdings, &store().stocks);
    assert!(totals.total_pnl.is_zero());
    assert_eq!(totals.total_pnl_percent, 0.0);
    assert!(day.change.is_zero());
    assert_eq!(day.percent, 0.0);
    assert!(metrics::holding_weights(&user.holdings).is_empty());
}

#[test]
fn test_john_day_change_uses_quotes() {
    let store = store();
    let s = session(UserId::JohnDoe);
    let day = metrics::day_change(&s.current_user().holdings, &store.stocks);
    // RELIANCE 15.20 * 50 + TATASTEEL 2.40 * 1000
    assert_relative_eq!(day.change.to_f64(), 3160.0, epsilon = 1e-9);
    assert!(day.is_profit());
}

// =============================================================================
// Scenario Simulator Tests
// =============================================================================

#[test]
fn test_zero_move_is_identity_for_every_stock() {
    let store = store();
    for (stock, sim) in simulate_group(&store.stocks, 0.0) {
        assert_eq!(sim.price, stock.ltp);
        assert_eq!(sim.change, stock.change);
        assert_eq!(sim.percent, stock.percent_change);
    }
}

#[test]
fn test_high_beta_move() {
    let store = store();
    let adani = store.stock(&Symbol::new("ADANIENT")).unwrap();
    let sim = simulate(adani, 2.0);
    assert_relative_eq!(sim.percent, adani.percent_change + 2.0 * 1.5, epsilon = 1e-12);
}

// =============================================================================
// Watchlist Tests
// =============================================================================

#[test]
fn test_adding_present_stock_leaves_group_unchanged() {
    let store = store();
    let mut book = book(&store);
    let before = book.active_group().unwrap().clone();

    for stock in &store.stocks {
        assert_eq!(book.add_stock(stock), AddOutcome::AlreadyPresent);
    }
    assert_eq!(book.active_group().unwrap(), &before);
}

#[test]
fn test_removing_absent_symbol_leaves_group_unchanged() {
    let store = store();
    let mut book = book(&store);
    book.select_group("nifty");
    let before = book.active_group().unwrap().clone();

    assert!(!book.remove_stock(&Symbol::new("TATASTEEL")));
    assert_eq!(book.active_group().unwrap(), &before);
}

#[test]
fn test_switch_to_smart_selects_first_smart_list() {
    let store = store();
    let mut book = book(&store);
    book.select_group("banks");

    book.switch_category(WatchlistCategory::Smart);
    assert_eq!(book.category(), WatchlistCategory::Smart);
    assert_eq!(book.active_group().unwrap().id, store.smart_lists[0].id);
}

#[test]
fn test_add_note_remove_sequence() {
    let store = store();
    let mut book = book(&store);
    book.select_group("banks");
    let infy = store.stock(&Symbol::new("INFY")).unwrap();

    assert_eq!(book.add_stock(infy), AddOutcome::Added);
    assert_eq!(book.active_group().unwrap().stocks[0].symbol, infy.symbol);

    let note = book.add_note(&infy.symbol, "results on Thursday").unwrap();
    assert_eq!(note.text, "results on Thursday");
    assert_eq!(book.note(&infy.symbol).unwrap().text, "results on Thursday");

    assert!(book.remove_stock(&infy.symbol));
    assert!(!book.active_group().unwrap().contains(&infy.symbol));
    assert!(!book.remove_stock(&infy.symbol));

    book.switch_category(WatchlistCategory::Themes);
    assert_eq!(book.add_stock(infy), AddOutcome::ReadOnlyCategory);
}

#[test]
fn test_add_then_sort_by_change() {
    let store = store();
    let mut book = book(&store);
    book.select_group("banks");
    let steel = store.stock(&Symbol::new("TATASTEEL")).unwrap();
    assert_eq!(book.add_stock(steel), AddOutcome::Added);

    let sorted = book.sorted_stocks(SortBy::Change, &store.sentiment);
    let order: Vec<&str> = sorted.iter().map(|s| s.symbol.as_str()).collect();
    assert_eq!(order, vec!["TATASTEEL", "HDFCBANK"]);
}

// =============================================================================
// Orders, Baskets and Behavior Tests
// =============================================================================

#[test]
fn test_order_filters_partition_orders() {
    for user in store().users {
        let open = OrderFilter::Open.apply(&user.orders).len();
        let history = OrderFilter::History.apply(&user.orders).len();
        assert_eq!(open + history, OrderFilter::All.apply(&user.orders).len());
    }
}

#[test]
fn test_mtf_margin_is_quarter_of_value() {
    let est = estimate_order(1450.60, 100, PriceMode::Market, ProductType::Mtf);
    assert_relative_eq!(est.margin_required * 4.0, est.value, epsilon = 1e-9);
    assert!(est.daily_interest > 0.0);
}

#[test]
fn test_order_pad_for_fixture_stock() {
    let store = store();
    let reliance = store.stock(&Symbol::new("RELIANCE")).unwrap();

    let market = estimate_order(reliance.ltp, 10, PriceMode::Market, ProductType::Cnc);
    assert_relative_eq!(market.value, reliance.ltp * 10.0, epsilon = 1e-9);
    assert_relative_eq!(market.margin_required, market.value, epsilon = 1e-9);
    assert_eq!(market.daily_interest, 0.0);

    let limit = PriceMode::Limit(LimitPrice::from_rupees(2400.0));
    let mtf = estimate_order(reliance.ltp, 10, limit, ProductType::Mtf);
    assert_relative_eq!(mtf.value, 24_000.0, epsilon = 1e-9);
    assert_relative_eq!(mtf.margin_required, 24_000.0 / MTF_LEVERAGE, epsilon = 1e-9);
}

#[test]
fn test_mtf_dashboard_numbers() {
    let store = store();
    let summary = metrics::mtf_summary(&store.mtf_stats, &store.mtf_positions);
    assert_eq!(summary.positions.count, store.mtf_positions.len());
    assert!(store.mtf_positions.iter().all(|p| p.product == ProductType::Mtf));
    assert_relative_eq!(summary.positions.total_pnl.to_f64(), 11_830.0, epsilon = 1e-9);
    assert_relative_eq!(
        summary.utilization_percent,
        62_500.0 / 87_500.0 * 100.0,
        epsilon = 1e-9
    );
    assert!(summary.utilization_percent <= 100.0);
}

#[test]
fn test_basket_lookup_and_filter() {
    let store = store();
    assert_eq!(filter_by_kind(&store.baskets, None).len(), store.baskets.len());
    assert!(filter_by_kind(&store.baskets, Some(BasketKind::Theme))
        .iter()
        .all(|b| b.kind == BasketKind::Theme));
    assert!(find_basket(&store.baskets, "missing").is_none());

    for b in &store.baskets {
        let plan = b.min_plan();
        let invested: f64 = plan.allocations.iter().map(|a| a.amount).sum();
        assert_relative_eq!(invested, b.min_invest, epsilon = 1e-6);
    }
}

#[test]
fn test_behavior_views_per_user() {
    let mut s = session(UserId::JohnDoe);
    match BehaviorView::for_profile(s.current_user().behavior.as_ref()) {
        BehaviorView::Profile { band, .. } => assert_eq!(band, ScoreBand::HighRisk),
        BehaviorView::NoData => panic!("John has a behavior profile"),
    }

    assert!(s.switch_user("u2"));
    assert!(matches!(
        BehaviorView::for_profile(s.current_user().behavior.as_ref()),
        BehaviorView::NoData
    ));

    assert!(s.switch_user("u3"));
    match BehaviorView::for_profile(s.current_user().behavior.as_ref()) {
        BehaviorView::Profile { band, .. } => assert_eq!(band, ScoreBand::Disciplined),
        BehaviorView::NoData => panic!("David has a behavior profile"),
    }
}

// =============================================================================
// Session, Routes and Config Tests
// =============================================================================

#[test]
fn test_unknown_user_keeps_selection() {
    let mut s = session(UserId::DavidMorgan);
    assert!(!s.switch_user("u4"));
    assert_eq!(s.active_id(), UserId::DavidMorgan);
}

#[test]
fn test_route_fallback() {
    assert_eq!(Route::parse("#/behavior/"), Route::Behavior);
    assert_eq!(Route::parse("#/nowhere"), Route::Root);
}

#[test]
fn test_builtin_fixtures_are_consistent() {
    assert!(store().validate().is_empty());
    let config = Config::default();
    assert!(config.validate_fixtures);
    assert_eq!(config.load_fixtures().unwrap().validate_and_report(), 0);
}
