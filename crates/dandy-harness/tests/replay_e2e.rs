//! Replays the bundled site fixture and tour script end to end.

use std::fs::File;
use std::io::{BufReader, Write};
use std::path::PathBuf;

use dandy_core::event::Disposition;
use dandy_harness::{PageFixture, Replay, ReplayOptions, Snapshot, Step, parse_script, to_jsonl};
use pretty_assertions::assert_eq;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

fn replay_tour() -> Vec<Snapshot> {
    let fixture = PageFixture::load(&fixtures_dir().join("dandy.json")).unwrap();
    let script = File::open(fixtures_dir().join("tour.jsonl")).unwrap();
    let steps = parse_script(BufReader::new(script)).unwrap();
    let mut replay = Replay::new(&fixture, ReplayOptions::default());
    replay.run(&steps).unwrap()
}

#[test]
fn tour_has_one_snapshot_per_step() {
    let snaps = replay_tour();
    assert_eq!(snaps.len(), 11);
    assert_eq!(
        snaps.iter().map(|s| s.seq).collect::<Vec<_>>(),
        (1..=11).collect::<Vec<_>>()
    );
}

#[test]
fn tour_scroll_spy_and_navigation() {
    let snaps = replay_tour();

    assert_eq!(snaps[0].active, vec![0]);
    assert_eq!(snaps[1].active, vec![1]);
    assert_eq!(snaps[1].disposition, Some(Disposition::Default));

    // Anchor click to #promotions: 3440 - 60.
    assert_eq!(snaps[2].disposition, Some(Disposition::PreventDefault));
    assert_eq!(snaps[2].scroll_offset, 3380.0);
    assert_eq!(snaps[2].active, vec![3]);

    // External link: host navigates, page state untouched.
    assert_eq!(snaps[3].disposition, Some(Disposition::Default));
    assert_eq!(snaps[3].scroll_offset, 3380.0);
    assert_eq!(snaps[3].active, vec![3]);

    // Past the last band nothing is active.
    assert!(snaps[10].active.is_empty());
}

#[test]
fn tour_promotions() {
    let snaps = replay_tour();

    // Empty title: rejected, inputs untouched.
    assert_eq!(snaps[5].step, Step::Submit);
    assert!(snaps[5].cards.is_empty());
    assert_eq!(snaps[5].inputs["promo-desc"], "X");
    assert_eq!(snaps[5].inputs["promo-price"], "10");

    // Valid: one card, inputs cleared.
    assert_eq!(snaps[7].cards.len(), 1);
    assert!(snaps[7].inputs.values().all(String::is_empty));
    assert_eq!(
        snaps[7].cards[0],
        "<h3>Combo Deal</h3><p>2 rolls + drink</p><div class=\"card-footer\">\
         <span class=\"price\">499₴</span><button class=\"order-btn\">Заказать</button></div>"
    );

    // Same data again: two identical cards.
    assert_eq!(snaps[9].cards.len(), 2);
    assert_eq!(snaps[9].cards[0], snaps[9].cards[1]);
}

#[test]
fn jsonl_output_round_trips_through_serde_json() {
    let snaps = replay_tour();
    let out = to_jsonl(&snaps).unwrap();
    for (line, snap) in out.lines().zip(&snaps) {
        let value: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(value["seq"], snap.seq);
        assert_eq!(value["active"].as_array().unwrap().len(), snap.active.len());
    }
}

#[test]
fn fixture_from_temp_file_with_custom_config() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r##"{{
            "nav": ["#a", "#b"],
            "regions": [{{"id": "a", "top": 0, "height": 100}}, {{"id": "b", "top": 100, "height": 100}}],
            "config": {{"header_offset": 0, "spy_band_offset": 0, "active_marker": "current"}}
        }}"##
    )
    .unwrap();

    let fixture = PageFixture::load(file.path()).unwrap();
    let mut replay = Replay::new(&fixture, ReplayOptions::default());
    let snap = replay.step(&Step::Click { entry: 1 }).unwrap();
    assert_eq!(snap.scroll_offset, 100.0);
    assert_eq!(snap.active, vec![1]);
    assert!(replay.tree().is_marked(1, "current"));
    assert!(snap.cards.is_empty());
}
