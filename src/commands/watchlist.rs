//! Watchlist command implementation

use anyhow::{anyhow, bail, Result};
use broker_desk::scenario::{self, MARKET_MOVE_RANGE};
use broker_desk::watchlist::{clusters, AddOutcome, SortBy, WatchlistBook, WatchlistCategory};
use broker_desk::Symbol;
use tracing::{info, warn};

use super::{footer, header, rule, signed, Desk};

/// Mutations applied to the active group before it is printed
#[derive(Debug, Default)]
pub struct Edits {
    pub add: Option<String>,
    pub remove: Option<String>,
    pub note: Option<String>,
    pub note_symbol: Option<String>,
}

fn apply_edits(book: &mut WatchlistBook, desk: &Desk, edits: Edits) -> Result<()> {
    if let Some(symbol) = &edits.add {
        let symbol = Symbol::new(symbol.to_ascii_uppercase());
        let Some(stock) = desk.store.stock(&symbol) else {
            bail!("Unknown symbol: {}", symbol);
        };
        match book.add_stock(stock) {
            AddOutcome::Added => println!("Added {} to the list", symbol),
            AddOutcome::AlreadyPresent => println!("{} is already in the list", symbol),
            AddOutcome::ReadOnlyCategory => {
                println!("You can only add stocks to your custom watchlists.")
            }
        }
    }

    if let Some(symbol) = &edits.remove {
        let symbol = Symbol::new(symbol.to_ascii_uppercase());
        if book.remove_stock(&symbol) {
            println!("Removed {} from the list", symbol);
        } else {
            println!("{} is not in the list", symbol);
        }
    }

    if let Some(text) = &edits.note {
        let Some(target) = edits.note_symbol.as_ref().or(edits.add.as_ref()) else {
            bail!("--note needs --add or --note-symbol");
        };
        let symbol = Symbol::new(target.to_ascii_uppercase());
        match book.add_note(&symbol, text) {
            Some(note) => println!("Note on {}: {}", note.symbol, note.text),
            None => warn!("Empty note for {} ignored", symbol),
        }
    }
    Ok(())
}

pub fn run(
    desk: &Desk,
    category: &str,
    group: Option<String>,
    market_move: Option<f64>,
    sort: &str,
    search: Option<String>,
    edits: Edits,
) -> Result<()> {
    let category: WatchlistCategory = category.parse().map_err(|e: String| anyhow!(e))?;
    let sort: SortBy = sort.parse().map_err(|e: String| anyhow!(e))?;
    let market_move = market_move.unwrap_or(desk.config.watchlist.default_move);

    let (low, high) = MARKET_MOVE_RANGE;
    if !(low..=high).contains(&market_move) {
        warn!(
            "Market move {:+.1}% is outside the slider range [{}, {}]",
            market_move, low, high
        );
    }

    let store = &desk.store;
    let mut book = WatchlistBook::new(
        store.stocks.clone(),
        store.smart_lists.clone(),
        store.theme_lists.clone(),
    );
    book.switch_category(category);
    if let Some(id) = group {
        book.select_group(&id);
    }
    apply_edits(&mut book, desk, edits)?;

    if let Some(query) = search {
        header(&format!("SEARCH \"{}\"", query));
        let results = book.search(&query);
        if results.is_empty() {
            println!("No matches");
        }
        for s in results {
            println!("{:<12} {}", s.symbol, s.name);
        }
    }

    let Some(active) = book.active_group() else {
        warn!("No watchlist groups to show");
        return Ok(());
    };
    info!(
        "Watchlist '{}' ({:?}), {} stocks, move {:+.1}%",
        active.name,
        category,
        active.stocks.len(),
        market_move
    );

    header(&active.name.to_uppercase());
    if let Some(description) = &active.description {
        println!("{}", description);
        rule();
    }
    for stock in book.sorted_stocks(sort, &store.sentiment) {
        let sim = scenario::simulate(stock, market_move);
        println!(
            "{:<12} {:>10.2} {:>9} ({}%)  quant {:>3}",
            stock.symbol,
            sim.price,
            signed(sim.change),
            signed(sim.percent),
            store.sentiment.quant_score(&stock.symbol)
        );
    }

    let split = clusters(&active.stocks, &store.sentiment);
    rule();
    println!(
        "Bullish: {}  Bearish/Neutral: {}",
        split.bullish.len(),
        split.other.len()
    );
    footer();
    Ok(())
}
