use std::path::Path;

use submarine_core::domain::today;
use submarine_core::repo::OpenParams;
use submarine_core::repo_factory::{Backend, open_repos};
use submarine_core::settings::{AppearanceMode, LeadTime};
use submarine_core::{Cycle, NewSubscription, Store, Subscription, format_money};

fn open(dir: &Path) -> Store {
    let params = OpenParams {
        data_dir: dir.to_path_buf(),
    };
    Store::open(open_repos(Backend::Fs, &params)).unwrap()
}

fn new_sub(name: &str, price: f64, cycle: Cycle, website: Option<&str>) -> Subscription {
    Subscription::create(
        NewSubscription {
            name: name.into(),
            price,
            cycle,
            website: website.map(String::from),
        },
        today(),
    )
    .unwrap()
}

#[test]
fn first_run_with_empty_file_reports_zero_totals() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(tmp.path().join("subscriptions.json"), "").unwrap();
    let store = open(tmp.path());
    assert!(store.is_empty());
    let t = store.totals();
    assert_eq!(format_money(t.monthly), "$0.00");
    assert_eq!(format_money(t.yearly), "$0.00");
}

#[test]
fn adding_foo_gives_expected_totals() {
    let tmp = tempfile::tempdir().unwrap();
    let mut store = open(tmp.path());
    store
        .add(new_sub("Foo", 9.99, Cycle::Monthly, None))
        .unwrap();
    let t = store.totals();
    assert_eq!(format_money(t.monthly), "$9.99");
    assert_eq!(format_money(t.yearly), "$119.88");
}

#[test]
fn mutations_survive_reopen_including_icons() {
    let tmp = tempfile::tempdir().unwrap();
    {
        let mut store = open(tmp.path());
        store
            .add(new_sub("Video", 15.49, Cycle::Monthly, Some("video.example")))
            .unwrap();
        store
            .add(
                new_sub("Cloud", 99.0, Cycle::Yearly, Some("http://cloud.example"))
                    .with_icon(Some(vec![0x89, b'P', b'N', b'G', 0x00, 0xff])),
            )
            .unwrap();
        store
            .add(new_sub("News", 4.0, Cycle::Monthly, None))
            .unwrap();
    }

    let reopened = open(tmp.path());
    let subs = reopened.subscriptions();
    assert_eq!(subs.len(), 3);
    assert_eq!(subs[0].website.as_deref(), Some("https://video.example"));
    assert_eq!(subs[1].website.as_deref(), Some("http://cloud.example"));
    assert_eq!(
        subs[1].icon.as_deref(),
        Some(&[0x89, b'P', b'N', b'G', 0x00, 0xff][..])
    );
    assert_eq!(subs[2].website, None);

    let raw = std::fs::read_to_string(tmp.path().join("subscriptions.json")).unwrap();
    assert!(raw.contains("89504e4700ff"), "icon should be hex encoded: {raw}");
}

#[test]
fn delete_removes_exactly_one_and_persists_order() {
    let tmp = tempfile::tempdir().unwrap();
    let mut store = open(tmp.path());
    for (n, p) in [("a", 1.0), ("b", 2.0), ("b", 2.0), ("c", 3.0)] {
        store.add(new_sub(n, p, Cycle::Monthly, None)).unwrap();
    }
    store.remove(2).unwrap();

    let names: Vec<String> = open(tmp.path())
        .subscriptions()
        .iter()
        .map(|s| s.name.clone())
        .collect();
    assert_eq!(names, ["a", "b", "c"]);
}

#[test]
fn settings_write_through() {
    let tmp = tempfile::tempdir().unwrap();
    {
        let mut store = open(tmp.path());
        store
            .update_settings(|s| {
                s.appearance_mode = AppearanceMode::Light;
                s.notification_when = LeadTime::OneWeek;
                s.set_scaling(1.5)
            })
            .unwrap();
    }
    let store = open(tmp.path());
    assert_eq!(store.settings().appearance_mode, AppearanceMode::Light);
    assert_eq!(store.settings().notification_when, LeadTime::OneWeek);
    assert_eq!(store.settings().scaling_factor, 1.5);
}

#[test]
fn corrupted_file_is_an_error_not_an_empty_list() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(tmp.path().join("subscriptions.json"), "{not json").unwrap();
    let params = OpenParams {
        data_dir: tmp.path().to_path_buf(),
    };
    assert!(Store::open(open_repos(Backend::Fs, &params)).is_err());
}
