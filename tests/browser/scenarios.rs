//! End-to-end browser scenarios driven through `AppState::apply`.

use casebook::panel::{CloseReason, PanelState};
use casebook::state::{Command, StatusLevel};
use casebook::view::{self, NoResultsReason, ViewInputs};

use super::common::{alpha_beta, app, favorites, mixed};

#[test]
/// What: Unfiltered view shows every card without highlighting.
///
/// Inputs:
/// - Records Alpha and Beta in category X, empty search, favorites-only off.
///
/// Output:
/// - Both visible, neither highlighted, category X has visible members.
fn scenario_unfiltered_view() {
    let store = alpha_beta();
    let fav = favorites(&store, &[]);
    let vm = view::compute(&store, &fav, &ViewInputs::default());
    for id in [1, 2] {
        let card = vm.card(id).expect("card");
        assert!(card.visible);
        assert!(!card.highlighted);
    }
    assert!(vm.category("X").expect("category").has_visible_members);
    assert!(vm.no_results.is_none());
}

#[test]
/// What: A case-insensitive search highlights the match and hides the rest.
fn scenario_search_highlights_match() {
    let mut app = app(alpha_beta());
    let _ = app.apply(Command::Search("  ALPHA ".into()));
    let a = app.view.card(1).expect("card 1");
    let b = app.view.card(2).expect("card 2");
    assert!(a.visible && a.highlighted);
    assert!(!b.visible && !b.highlighted);
    assert!(app.view.category("X").expect("X").has_visible_members);
    assert_eq!(app.view.search_term, "alpha");
}

#[test]
/// What: Favorites-only view shows just the favorite, unhighlighted, with no message.
fn scenario_favorites_only_view() {
    let mut app = app(alpha_beta());
    let _ = app.apply(Command::Activate(2));
    let _ = app.apply(Command::ToggleFavorite);
    let _ = app.apply(Command::Close(CloseReason::Button));
    let _ = app.apply(Command::ToggleFavoritesView);
    assert_eq!(app.view.visible_ids().collect::<Vec<_>>(), vec![2]);
    assert!(!app.view.card(2).expect("card").highlighted);
    assert!(app.view.no_results.is_none());
}

#[test]
/// What: Empty favorites in favorites-only view give the "no favorites yet" variant.
fn scenario_no_favorites_yet() {
    let mut app = app(alpha_beta());
    let _ = app.apply(Command::ToggleFavoritesView);
    assert!(!app.view.has_any_visible);
    assert_eq!(app.view.no_results, Some(NoResultsReason::NoFavoritesYet));
    assert_ne!(
        NoResultsReason::NoFavoritesYet.message(),
        NoResultsReason::NoMatches.message()
    );
    let _ = app.apply(Command::ToggleFavoritesView);
    let _ = app.apply(Command::Search("zzz".into()));
    assert_eq!(app.view.no_results, Some(NoResultsReason::NoMatches));
}

#[test]
/// What: Activating an unknown id leaves the panel closed and reports an error.
fn scenario_unknown_id() {
    let mut app = app(alpha_beta());
    let fx = app.apply(Command::Activate(999));
    assert_eq!(app.panel.state(), PanelState::Closed);
    assert!(fx.settle_after.is_none());
    let msg = app.status.current().expect("status");
    assert_eq!(msg.level, StatusLevel::Error);
    assert!(msg.text.contains("999"));
    assert!(msg.expires_at.is_some());
}

#[test]
/// What: Re-activating the open record neither transitions nor repopulates.
fn scenario_reactivate_open_record() {
    let mut app = app(alpha_beta());
    let first = app.apply(Command::Activate(1));
    assert!(first.settle_after.is_some());
    let generation = app.panel.generation();
    let content = app.panel.content().cloned();
    let again = app.apply(Command::Activate(1));
    assert!(again.settle_after.is_none());
    assert_eq!(app.panel.state(), PanelState::Open(1));
    assert_eq!(app.panel.generation(), generation);
    assert_eq!(app.panel.content().cloned(), content);
}

#[test]
/// What: Opening a second record replaces the first; a stale settle is ignored.
///
/// Inputs:
/// - Activate 1, then 3 (via its related-link path), then settle with 1's generation.
///
/// Output:
/// - Panel shows record 3 only; the old settle does not end 3's transition.
fn opening_replaces_and_stale_settle_is_ignored() {
    let mut app = app(mixed());
    let (old_gen, _) = app.apply(Command::Activate(1)).settle_after.expect("settle");
    let (new_gen, _) = app.apply(Command::Activate(3)).settle_after.expect("settle");
    assert_eq!(app.panel.state(), PanelState::Open(3));
    let _ = app.apply(Command::SettleTransition(old_gen));
    assert!(app.panel.is_settling());
    let _ = app.apply(Command::SettleTransition(new_gen));
    assert!(!app.panel.is_settling());

    let content = app.panel.content().expect("content");
    assert_eq!(content.heading, "3. Closure");
    assert_eq!(content.related.len(), 1);
    assert_eq!(content.related[0].label, "1. Hoisting");
    assert_eq!(content.example, casebook::panel::NO_EXAMPLE);
}

#[test]
/// What: Favoriting outside the favorites-only view still refreshes every card.
fn favorite_toggle_recomputes_full_view() {
    let mut app = app(mixed());
    let _ = app.apply(Command::Search("o".into()));
    let _ = app.apply(Command::Activate(4));
    let fx = app.apply(Command::ToggleFavorite);
    assert!(fx.view_changed);
    assert!(app.view.card(4).expect("card").favorite);
    assert!(app.panel.content().expect("content").is_favorite);
    assert_eq!(app.panel.state(), PanelState::Open(4));
}
