//! Command-line modes that print or change data and exit.

use std::io::Write;

use casebook::catalog::RecordStore;
use casebook::favorites::FavoritesStore;
use casebook::theme::Settings;
use casebook::view::{self, ViewInputs, ViewModel};

use crate::app::init::{load_settings, open_catalog, open_favorites};
use crate::args::Args;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// What: Run the requested command-line modes against the configured dataset.
///
/// Inputs:
/// - `args`: Parsed arguments.
/// - `out`: Destination for the printed output.
///
/// Output:
/// - `Ok(())` once every requested mode has printed its output.
///
/// # Errors
/// - The dataset cannot be loaded.
/// - Favorites cannot be cleared.
/// - Writing to `out` fails.
pub fn run_commands(args: &Args, out: &mut impl Write) -> Result<()> {
    let settings = load_settings();
    let store = open_catalog(args.data.as_deref(), &settings)?;
    let mut favorites = open_favorites(&settings, &store);

    if args.clear_favorites {
        let n = favorites.len();
        favorites.clear_all()?;
        tracing::info!(key = favorites.key(), cleared = n, "[Cli] Favorites cleared");
        writeln!(out, "Cleared {n} favorite(s).")?;
    }
    if let Some(term) = &args.search {
        write_matches(&store, &favorites, &settings, term, args.favorites, out)?;
    } else if args.list_categories {
        write_categories(&store, &favorites, &settings, args.favorites, out)?;
    }
    Ok(())
}

/// What: Print the records matching `term`, grouped by category.
///
/// Inputs:
/// - `store`, `favorites`, `settings`: Loaded session data.
/// - `term`: Search text, normalized like the TUI search input.
/// - `favorites_only`: Restrict to favorite records.
/// - `out`: Destination.
///
/// Details:
/// - Uses the same view computation as the TUI, so results match exactly.
/// - Prints the "no results" message when nothing matches.
///
/// # Errors
/// Returns an error when writing to `out` fails.
pub fn write_matches(
    store: &RecordStore,
    favorites: &FavoritesStore,
    settings: &Settings,
    term: &str,
    favorites_only: bool,
    out: &mut impl Write,
) -> Result<()> {
    let inputs = ViewInputs {
        search_text: term.to_string(),
        favorites_only,
    };
    let vm = view::compute(store, favorites, &inputs);
    tracing::info!(term = %vm.search_term, matches = vm.visible_count, "[Cli] Search");
    if let Some(reason) = vm.no_results {
        writeln!(out, "{}", reason.message())?;
        return Ok(());
    }
    write_groups(store, settings, &vm, out)
}

/// Print visible records of every category that has any.
fn write_groups(
    store: &RecordStore,
    settings: &Settings,
    vm: &ViewModel,
    out: &mut impl Write,
) -> Result<()> {
    for cat in vm.categories.iter().filter(|c| c.has_visible_members) {
        writeln!(
            out,
            "{} {} ({})",
            settings.category_icon(&cat.name),
            cat.name,
            cat.visible_count
        )?;
        for &id in &cat.members {
            let (Some(card), Some(rec)) = (vm.card(id), store.get(id)) else {
                continue;
            };
            if card.visible {
                let star = if card.favorite { " ★" } else { "" };
                writeln!(out, "  {id:>4}  {}{star}", rec.title)?;
            }
        }
    }
    Ok(())
}

/// What: Print every category with its record count.
///
/// Inputs:
/// - `favorites_only`: Count favorites only and skip categories without any.
///
/// # Errors
/// Returns an error when writing to `out` fails.
pub fn write_categories(
    store: &RecordStore,
    favorites: &FavoritesStore,
    settings: &Settings,
    favorites_only: bool,
    out: &mut impl Write,
) -> Result<()> {
    let inputs = ViewInputs {
        search_text: String::new(),
        favorites_only,
    };
    let vm = view::compute(store, favorites, &inputs);
    if let Some(reason) = vm.no_results {
        writeln!(out, "{}", reason.message())?;
        return Ok(());
    }
    for cat in vm.categories.iter().filter(|c| c.has_visible_members) {
        writeln!(
            out,
            "{} {}: {}",
            settings.category_icon(&cat.name),
            cat.name,
            cat.visible_count
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use casebook::catalog::Record;
    use casebook::favorites::MemoryBlobStore;

    fn fixture() -> (RecordStore, FavoritesStore) {
        let rec = |id, title: &str, category: Option<&str>| Record {
            id,
            title: title.into(),
            category: category.map(Into::into),
            description: String::new(),
            example: String::new(),
            related: Vec::new(),
        };
        let store = RecordStore::new(vec![
            rec(1, "Hoist", Some("Scope")),
            rec(2, "Closure", Some("Scope")),
            rec(3, "Promise", Some("Async")),
            rec(4, "Loose end", None),
        ])
        .expect("records");
        let fav = FavoritesStore::load(
            Box::new(MemoryBlobStore::with_entry("favorites", "[3]")),
            "favorites",
            &store,
        );
        (store, fav)
    }

    fn text(buf: Vec<u8>) -> String {
        String::from_utf8(buf).expect("utf8")
    }

    #[test]
    /// What: Search output groups matches under their category with favorite markers.
    ///
    /// Inputs:
    /// - Term "o" matching every record.
    ///
    /// Output:
    /// - Categories in first-seen order, uncategorized last, record 3 starred.
    fn search_prints_grouped_matches() {
        let (store, fav) = fixture();
        let mut buf = Vec::new();
        write_matches(&store, &fav, &Settings::default(), "O", false, &mut buf).expect("write");
        let s = text(buf);
        let scope = s.find("Scope (2)").expect("scope header");
        let asy = s.find("Async (1)").expect("async header");
        let unc = s.find("uncategorized (1)").expect("uncategorized header");
        assert!(scope < asy && asy < unc);
        assert!(s.contains("Promise ★"));
        assert!(!s.contains("Hoist ★"));
    }

    #[test]
    /// What: Empty results print the matching explanation.
    fn search_prints_no_results_message() {
        let (store, fav) = fixture();
        let mut buf = Vec::new();
        write_matches(&store, &fav, &Settings::default(), "zzz", true, &mut buf).expect("write");
        assert_eq!(
            text(buf).trim(),
            casebook::view::NoResultsReason::NoFavoritesMatch.message()
        );
    }

    #[test]
    /// What: Category listing counts all records or only favorites.
    fn categories_list_counts() {
        let (store, fav) = fixture();
        let mut buf = Vec::new();
        write_categories(&store, &fav, &Settings::default(), false, &mut buf).expect("write");
        let s = text(buf);
        assert!(s.contains("Scope: 2"));
        assert!(s.contains("uncategorized: 1"));
        let mut buf = Vec::new();
        write_categories(&store, &fav, &Settings::default(), true, &mut buf).expect("write");
        assert_eq!(text(buf).lines().count(), 1);
    }
}
