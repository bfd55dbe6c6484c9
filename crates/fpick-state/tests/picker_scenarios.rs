#![forbid(unsafe_code)]

//! End-to-end picker scenarios.
//!
//! Each test drives a `PickerController` the way a view would: typing,
//! focusing, opening, committing, and (for controlled state) pushing values
//! back from the owner.

use std::cell::RefCell;
use std::rc::Rc;

use fpick_core::{Collection, Item, Key, Node, Section, TextFilter};
use fpick_state::{
    FocusStrategy, MenuTriggerMode, PickerBuilder, PickerConfig, PickerController, Request,
    Transition, TriggerReason,
};

// ============================================================================
// Helpers
// ============================================================================

type Log = Rc<RefCell<Vec<String>>>;

fn langs() -> Collection<()> {
    Collection::new([
        Node::from(Item::text("rs", "Rust")),
        Section::new("jvm")
            .with_title("JVM")
            .child(Item::text("java", "Java"))
            .child(Item::text("kt", "Kotlin"))
            .into(),
        Node::from(Item::text("py", "Python")),
    ])
    .unwrap()
}

fn key(s: &str) -> Key {
    Key::from(s)
}

fn visible(p: &PickerController<()>) -> Vec<String> {
    p.collection().keys().map(|k| k.to_string()).collect()
}

/// Builder wired to log every hook call into a shared log.
fn logged(log: &Log) -> PickerBuilder<()> {
    let (input, select, open) = (log.clone(), log.clone(), log.clone());
    PickerController::builder(langs())
        .filter(TextFilter::contains())
        .on_input_change(move |text| input.borrow_mut().push(format!("input:{text}")))
        .on_selection_change(move |k| {
            let k = k.map(Key::as_str).unwrap_or("-");
            select.borrow_mut().push(format!("select:{k}"));
        })
        .on_open_change(move |is_open, reason| {
            open.borrow_mut().push(format!("open:{is_open}:{reason:?}"));
        })
}

fn picker() -> PickerController<()> {
    PickerController::builder(langs())
        .filter(TextFilter::contains())
        .build()
        .unwrap()
}

// ============================================================================
// Open suppression and show-all
// ============================================================================

#[test]
fn open_is_suppressed_when_nothing_matches() {
    let log = Log::default();
    let mut p = logged(&log).default_input_value("zzz").build().unwrap();
    assert!(p.collection().is_empty());

    assert_eq!(p.open(None, Some(TriggerReason::Input)), Transition::Unchanged);
    assert_eq!(p.toggle(None, None), Transition::Unchanged);
    assert!(!p.is_open());
    assert_eq!(p.trigger_reason(), None);
    assert!(log.borrow().is_empty());
}

#[test]
fn open_is_suppressed_for_every_trigger_over_empty_items() {
    let log = Log::default();
    let open_log = log.clone();
    let mut p = PickerController::builder(Collection::<()>::empty())
        .filter(TextFilter::contains())
        .config(PickerConfig::default().with_menu_trigger(MenuTriggerMode::Focus))
        .on_open_change(move |is_open, reason| {
            open_log.borrow_mut().push(format!("open:{is_open}:{reason:?}"));
        })
        .build()
        .unwrap();

    assert_eq!(p.open(None, Some(TriggerReason::Manual)), Transition::Unchanged);
    assert_eq!(
        p.open(Some(FocusStrategy::First), Some(TriggerReason::Focus)),
        Transition::Unchanged
    );
    assert_eq!(
        p.toggle(None, Some(TriggerReason::Manual)),
        Transition::Unchanged
    );
    p.set_focused(true);
    assert!(p.is_focused());
    assert!(!p.is_open());
    assert!(!p.show_all_items());
    assert_eq!(p.trigger_reason(), None);
    assert_eq!(p.focus_strategy(), None);
    assert!(log.borrow().is_empty());
}

#[test]
fn reopening_an_open_menu_keeps_its_focus_strategy() {
    let mut p = picker();
    p.open(None, Some(TriggerReason::Input));
    assert_eq!(
        p.open(Some(FocusStrategy::Last), Some(TriggerReason::Manual)),
        Transition::Unchanged
    );
    assert_eq!(p.focus_strategy(), None);
    assert_eq!(p.focused_key(), None);

    p.close_menu();
    p.open(Some(FocusStrategy::Last), Some(TriggerReason::Manual));
    assert_eq!(p.focus_strategy(), Some(FocusStrategy::Last));
    assert_eq!(p.focused_key(), Some(&key("py")));
}

#[test]
fn manual_open_shows_every_candidate() {
    let mut p = PickerController::builder(langs())
        .filter(TextFilter::contains())
        .default_input_value("zzz")
        .build()
        .unwrap();

    assert_eq!(p.open(None, Some(TriggerReason::Manual)), Transition::Opened);
    assert!(p.show_all_items());
    assert_eq!(p.collection(), p.original_collection());
    assert_eq!(p.input_value(), "zzz");
}

#[test]
fn focus_open_shows_all_only_in_focus_mode() {
    let mut input_mode = picker();
    input_mode.set_input_value("py");
    input_mode.open(None, Some(TriggerReason::Focus));
    assert!(!input_mode.show_all_items());
    assert_eq!(visible(&input_mode), ["py"]);

    let mut focus_mode = PickerController::builder(langs())
        .filter(TextFilter::contains())
        .default_input_value("py")
        .config(PickerConfig::default().with_menu_trigger(MenuTriggerMode::Focus))
        .build()
        .unwrap();
    focus_mode.set_focused(true);
    assert!(focus_mode.is_open());
    assert_eq!(focus_mode.trigger_reason(), Some(TriggerReason::Focus));
    assert!(focus_mode.show_all_items());
    assert_eq!(visible(&focus_mode), ["rs", "java", "kt", "py"]);
}

#[test]
fn allows_empty_collection_lets_an_empty_menu_open() {
    let mut p = PickerController::builder(langs())
        .filter(TextFilter::contains())
        .default_input_value("zzz")
        .config(PickerConfig::default().with_allows_empty_collection(true))
        .build()
        .unwrap();
    assert_eq!(p.open(None, Some(TriggerReason::Input)), Transition::Opened);
    assert!(p.collection().is_empty());
    p.set_input_value("zzzz");
    assert!(p.is_open());
}

#[test]
fn external_items_open_and_are_never_filtered() {
    let mut p = PickerController::builder(Collection::<()>::empty())
        .external_items()
        .build()
        .unwrap();
    assert_eq!(p.open(None, Some(TriggerReason::Input)), Transition::Opened);
    assert!(!p.show_all_items());

    p.set_items(langs());
    p.set_input_value("nothing matches this");
    assert!(p.is_open());
    assert_eq!(visible(&p), ["rs", "java", "kt", "py"]);
}

#[test]
fn trigger_reason_is_kept_while_open() {
    let mut p = picker();
    p.open(None, Some(TriggerReason::Input));
    assert_eq!(p.open(None, Some(TriggerReason::Manual)), Transition::Unchanged);
    assert_eq!(p.trigger_reason(), Some(TriggerReason::Input));
    assert!(!p.show_all_items());
}

// ============================================================================
// Commit / finalize
// ============================================================================

#[test]
fn commit_selects_focused_and_resets_query() {
    let mut p = picker();
    p.set_input_value("o");
    p.open(Some(FocusStrategy::First), Some(TriggerReason::Input));
    assert_eq!(p.focused_key(), Some(&key("kt")));

    p.commit();
    assert_eq!(p.selected_key(), Some(&key("kt")));
    assert_eq!(p.selected_item().map(Item::text_value), Some("Kotlin"));
    assert_eq!(p.input_value(), "");
    assert!(!p.is_open());
    assert_eq!(visible(&p), ["rs", "java", "kt", "py"]);
}

#[test]
fn commit_hooks_run_in_order() {
    let log = Log::default();
    let mut p = logged(&log).build().unwrap();
    p.set_input_value("ru");
    p.open(Some(FocusStrategy::First), Some(TriggerReason::Input));
    p.commit();

    assert_eq!(
        *log.borrow(),
        [
            "input:ru",
            "open:true:Some(Input)",
            "select:rs",
            "input:",
            "open:false:None",
        ]
    );
}

#[test]
fn committing_the_selected_key_does_not_renotify() {
    let log = Log::default();
    let mut p = logged(&log)
        .default_selected_key(Some(key("rs")))
        .build()
        .unwrap();
    p.open(Some(FocusStrategy::First), Some(TriggerReason::Manual));
    p.commit();

    assert!(!p.is_open());
    assert_eq!(p.selected_key(), Some(&key("rs")));
    assert!(!log.borrow().iter().any(|e| e.starts_with("select:")));
}

#[test]
fn commit_while_closed_only_finalizes() {
    let mut p = picker();
    p.set_input_value("ja");
    p.commit();
    assert_eq!(p.selected_key(), None);
    assert_eq!(p.input_value(), "");
}

#[test]
fn close_is_commit() {
    let mut p = picker();
    p.open(Some(FocusStrategy::Last), Some(TriggerReason::Manual));
    p.close();
    assert_eq!(p.selected_key(), Some(&key("py")));
    assert!(!p.is_open());
}

#[test]
fn controlled_finalize_leaves_query_alone() {
    let log = Log::default();
    let mut p = logged(&log)
        .input_value("Ja")
        .selected_key(Some(key("java")))
        .build()
        .unwrap();
    p.open(None, Some(TriggerReason::Manual));
    log.borrow_mut().clear();

    p.finalize_selection();
    assert_eq!(p.input_value(), "Ja");
    assert_eq!(p.last_committed_value(), "Java");
    assert!(!p.is_open());
    assert_eq!(*log.borrow(), ["select:java", "open:false:None"]);
}

#[test]
fn controlled_finalize_with_stale_key_commits_empty_text() {
    let mut p = PickerController::builder(langs())
        .filter(TextFilter::contains())
        .input_value("")
        .selected_key(Some(key("java")))
        .build()
        .unwrap();
    p.finalize_selection();
    assert_eq!(p.last_committed_value(), "Java");

    assert!(p.sync_selected_key(Some(key("gone"))));
    p.revert();
    assert_eq!(p.last_committed_value(), "");
    assert!(p.selected_item().is_none());
}

#[test]
fn controlled_query_only_resets_through_the_hook() {
    let log = Log::default();
    let mut p = logged(&log).input_value("ko").build().unwrap();
    p.open(None, Some(TriggerReason::Input));
    log.borrow_mut().clear();

    p.revert();
    assert_eq!(*log.borrow(), ["input:", "open:false:None"]);
    assert_eq!(p.input_value(), "ko");
    assert!(p.sync_input_value(""));
    assert_eq!(p.input_value(), "");
    assert!(!p.is_open());
}

#[test]
fn external_selection_change_resets_and_closes() {
    let mut p = picker();
    p.set_input_value("o");
    p.open(None, Some(TriggerReason::Input));
    assert_eq!(p.set_selected_key(Some(key("kt"))), Request::Stored);
    assert_eq!(p.input_value(), "");
    assert!(!p.is_open());
}

#[test]
fn controlled_selection_is_forwarded() {
    let log = Log::default();
    let mut p = logged(&log).selected_key(None).build().unwrap();
    p.open(Some(FocusStrategy::First), Some(TriggerReason::Manual));
    p.commit();

    assert_eq!(p.selected_key(), None);
    assert!(log.borrow().contains(&"select:rs".to_string()));
    assert!(!p.is_open());
    assert!(p.sync_selected_key(Some(key("rs"))));
    assert_eq!(p.selected_key(), Some(&key("rs")));
}

// ============================================================================
// Focus is cleared on every close
// ============================================================================

#[test]
fn commit_clears_focus() {
    let mut p = picker();
    p.open(Some(FocusStrategy::First), Some(TriggerReason::Manual));
    p.commit();
    assert_eq!(p.focused_key(), None);
}

#[test]
fn toggle_clears_focus() {
    let mut p = picker();
    p.toggle(Some(FocusStrategy::First), Some(TriggerReason::Manual));
    assert!(p.focused_key().is_some());
    assert_eq!(p.toggle(None, None), Transition::Closed);
    assert_eq!(p.focused_key(), None);
}

#[test]
fn close_menu_clears_focus_but_keeps_query() {
    let mut p = picker();
    p.set_input_value("o");
    p.open(Some(FocusStrategy::Last), Some(TriggerReason::Input));
    assert_eq!(p.close_menu(), Transition::Closed);
    assert_eq!(p.focused_key(), None);
    assert_eq!(p.input_value(), "o");
    assert_eq!(p.close_menu(), Transition::Unchanged);
}

#[test]
fn blur_finalizes_and_clears_focus() {
    let mut p = picker();
    p.set_focused(true);
    p.open(Some(FocusStrategy::First), Some(TriggerReason::Manual));
    p.set_focused(false);
    assert!(!p.is_focused());
    assert!(!p.is_open());
    assert_eq!(p.focused_key(), None);
    assert_eq!(p.selected_key(), None);
}

#[test]
fn blur_can_keep_the_menu_open() {
    let mut p = PickerController::builder(langs())
        .filter(TextFilter::contains())
        .config(PickerConfig::default().with_should_close_on_blur(false))
        .build()
        .unwrap();
    p.set_focused(true);
    p.open(Some(FocusStrategy::First), Some(TriggerReason::Manual));
    p.set_focused(false);
    assert!(p.is_open());
    assert_eq!(p.focused_key(), Some(&key("rs")));
}

#[test]
fn emptying_the_items_closes_and_clears_focus() {
    let mut p = picker();
    p.open(Some(FocusStrategy::First), Some(TriggerReason::Manual));
    p.set_items(Collection::empty());
    assert!(!p.is_open());
    assert_eq!(p.focused_key(), None);
}

// ============================================================================
// Typing
// ============================================================================

#[test]
fn typing_opens_a_focused_input() {
    let log = Log::default();
    let mut p = logged(&log).build().unwrap();
    p.set_focused(true);
    assert!(!p.is_open());

    p.set_input_value("py");
    assert!(p.is_open());
    assert_eq!(p.trigger_reason(), Some(TriggerReason::Input));
    assert_eq!(visible(&p), ["py"]);
    assert_eq!(*log.borrow(), ["input:py", "open:true:Some(Input)"]);
}

#[test]
fn typing_does_not_open_in_manual_mode_or_unfocused() {
    let mut manual = PickerController::builder(langs())
        .filter(TextFilter::contains())
        .config(PickerConfig::default().with_menu_trigger(MenuTriggerMode::Manual))
        .build()
        .unwrap();
    manual.set_focused(true);
    manual.set_input_value("py");
    assert!(!manual.is_open());

    let mut unfocused = picker();
    unfocused.set_input_value("py");
    assert!(!unfocused.is_open());
}

#[test]
fn typing_without_matches_stays_closed() {
    let mut p = picker();
    p.set_focused(true);
    p.set_input_value("zzz");
    assert!(!p.is_open());
}

#[test]
fn controlled_typing_reacts_on_sync() {
    let log = Log::default();
    let mut p = logged(&log).input_value("").build().unwrap();
    p.set_focused(true);

    assert_eq!(p.set_input_value("ko"), Request::Forwarded);
    assert_eq!(p.input_value(), "");
    assert!(!p.is_open());

    assert!(p.sync_input_value("ko"));
    assert!(p.is_open());
    assert_eq!(visible(&p), ["kt"]);
    assert!(!p.sync_input_value("ko"));
}

// ============================================================================
// Disabled keys and traversal
// ============================================================================

#[test]
fn disabled_keys_cannot_be_focused_or_selected() {
    let log = Log::default();
    let mut p = logged(&log).disabled_keys([key("py")]).build().unwrap();
    p.open(None, Some(TriggerReason::Manual));

    assert!(!p.set_focused_key(Some(key("py"))));
    assert_eq!(p.set_selected_key(Some(key("py"))), Request::Unchanged);
    assert!(!log.borrow().iter().any(|e| e.starts_with("select:")));
    assert!(p.is_open());
}

#[test]
fn traversal_walks_visible_leaves() {
    let mut p = PickerController::builder(langs())
        .filter(TextFilter::contains())
        .disabled_keys([key("java")])
        .config(PickerConfig::default().with_wrap_focus(true))
        .build()
        .unwrap();
    p.open(None, Some(TriggerReason::Manual));

    let mut seen = Vec::new();
    for _ in 0..4 {
        p.focus_next();
        seen.push(p.focused_key().map(|k| k.to_string()).unwrap_or_default());
    }
    assert_eq!(seen, ["rs", "kt", "py", "rs"]);

    p.focus_previous();
    assert_eq!(p.focused_key(), Some(&key("py")));
    p.focus_first();
    assert_eq!(p.focused_key(), Some(&key("rs")));
    p.focus_last();
    assert_eq!(p.focused_key(), Some(&key("py")));
    assert!(!p.set_focused_key(Some(key("jvm"))));
}

#[test]
fn focus_strategy_uses_the_filtered_view() {
    let mut p = picker();
    p.set_input_value("o");
    p.open(Some(FocusStrategy::Last), Some(TriggerReason::Input));
    assert_eq!(visible(&p), ["kt", "py"]);
    assert_eq!(p.focused_key(), Some(&key("py")));
}

// ============================================================================
// Configuration
// ============================================================================

#[cfg(feature = "config-json")]
#[test]
fn config_from_json_drives_the_controller() {
    let config = PickerConfig::from_json(r#"{"menu_trigger":"manual","wrap_focus":true}"#).unwrap();
    let mut p = PickerController::builder(langs())
        .filter(TextFilter::contains())
        .config(config)
        .build()
        .unwrap();
    p.set_focused(true);
    p.set_input_value("r");
    assert!(!p.is_open());
    assert!(p.config().wrap_focus);
}
