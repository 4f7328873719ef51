#![forbid(unsafe_code)]

//! Headless replay for the Dandy page controller.
//!
//! A [`PageFixture`] describes a page (navigation targets, region layout,
//! whether the promotion form exists, and any config overrides). A script is a
//! sequence of [`Step`]s. [`Replay`] builds a [`MemoryTree`] from the fixture,
//! initializes the controller once, and applies each step, producing one
//! [`Snapshot`] of observable page state per step.
//!
//! # Script format
//!
//! JSON Lines, one step per line; blank lines and lines starting with `#` are
//! skipped:
//!
//! ```text
//! {"step":"click","entry":1}
//! {"step":"scroll","offset":1200}
//! {"step":"fill","title":"Combo Deal","desc":"2 rolls + drink","price":"499₴"}
//! {"step":"submit"}
//! ```
//!
//! Snapshots are emitted as JSON Lines too, which makes them easy to diff
//! against a stored golden file.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io::{self, BufRead};
use std::path::Path;

use dandy_core::config::PageConfig;
use dandy_core::controller::PageController;
use dandy_core::event::{Disposition, PageEvent};
use dandy_core::geometry::Region;
use dandy_core::memory::MemoryTree;
use dandy_core::tree::{ContentTree, TreeError};
use serde::{Deserialize, Serialize};

// ============================================================================
// Errors
// ============================================================================

/// Replay error type.
#[derive(Debug)]
pub enum ReplayError {
    /// Reading a fixture or script failed.
    Io(io::Error),
    /// A fixture or script line is not valid JSON.
    Json {
        /// 1-based script line, `None` for fixtures.
        line: Option<usize>,
        source: serde_json::Error,
    },
    /// A snapshot could not be rendered.
    Render { seq: usize, source: serde_json::Error },
    /// A click step names an entry the page does not have.
    UnknownEntry { entry: usize, len: usize },
    /// The in-memory tree rejected a fill.
    Tree(TreeError),
}

impl fmt::Display for ReplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "i/o error: {err}"),
            Self::Json {
                line: Some(line),
                source,
            } => write!(f, "script line {line}: {source}"),
            Self::Json { line: None, source } => write!(f, "fixture: {source}"),
            Self::Render { seq, source } => write!(f, "snapshot {seq}: {source}"),
            Self::UnknownEntry { entry, len } => {
                write!(f, "click on entry {entry}, but the page has {len} nav entries")
            }
            Self::Tree(err) => write!(f, "tree error: {err}"),
        }
    }
}

impl std::error::Error for ReplayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Json { source, .. } | Self::Render { source, .. } => Some(source),
            Self::Tree(err) => Some(err),
            Self::UnknownEntry { .. } => None,
        }
    }
}

impl From<io::Error> for ReplayError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<TreeError> for ReplayError {
    fn from(err: TreeError) -> Self {
        Self::Tree(err)
    }
}

// ============================================================================
// Fixture & Script
// ============================================================================

/// A page layout to replay against.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PageFixture {
    /// Config overrides; unspecified fields keep the site defaults.
    pub config: PageConfig,
    /// Navigation targets in document order.
    pub nav: Vec<String>,
    /// Content regions in document order.
    pub regions: Vec<Region>,
    /// Whether the promotion form (inputs and container included) exists.
    pub promo_form: bool,
    /// Initial scroll offset.
    pub scroll_offset: f64,
}

impl PageFixture {
    /// Parse a fixture from JSON.
    pub fn from_json(json: &str) -> Result<Self, ReplayError> {
        serde_json::from_str(json).map_err(|source| ReplayError::Json { line: None, source })
    }

    /// Load a fixture file.
    pub fn load(path: &Path) -> Result<Self, ReplayError> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    /// Build the in-memory page.
    pub fn build(&self) -> MemoryTree {
        let mut tree = MemoryTree::new().with_scroll_offset(self.scroll_offset);
        for href in &self.nav {
            tree = tree.with_nav(href.clone());
        }
        for region in &self.regions {
            tree = tree.with_region(region.id.clone(), region.top, region.height);
        }
        if self.promo_form {
            tree = tree.with_promo_form(&self.config);
        }
        tree
    }
}

/// One scripted user action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum Step {
    /// Click navigation entry `entry`.
    Click { entry: usize },
    /// The user scrolls to `offset`.
    Scroll { offset: f64 },
    /// Type into the three promotion inputs.
    Fill {
        title: String,
        desc: String,
        price: String,
    },
    /// Submit the promotion form.
    Submit,
}

/// Parse a JSON Lines script.
pub fn parse_script<R: BufRead>(reader: R) -> Result<Vec<Step>, ReplayError> {
    let mut steps = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let step = serde_json::from_str(trimmed).map_err(|source| ReplayError::Json {
            line: Some(i + 1),
            source,
        })?;
        steps.push(step);
    }
    Ok(steps)
}

// ============================================================================
// Replay
// ============================================================================

/// Observable page state after a step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    /// 1-based step number.
    pub seq: usize,
    pub step: Step,
    /// What the host would do with its default action; `None` for steps
    /// that are not page events (fill).
    pub disposition: Option<Disposition>,
    pub scroll_offset: f64,
    /// Entries carrying the active marker, ascending.
    pub active: Vec<usize>,
    /// Promotion input values by id.
    pub inputs: BTreeMap<String, String>,
    /// Card markup in container order (newest first).
    pub cards: Vec<String>,
}

/// Replay options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplayOptions {
    /// After a click scrolls the page, deliver the scroll event the browser
    /// would fire once the animation settles.
    pub follow_scroll: bool,
}

impl Default for ReplayOptions {
    fn default() -> Self {
        Self {
            follow_scroll: true,
        }
    }
}

/// A controller driving an in-memory page.
#[derive(Debug)]
pub struct Replay {
    controller: PageController,
    tree: MemoryTree,
    options: ReplayOptions,
    seq: usize,
}

impl Replay {
    /// Build the page and initialize the controller.
    pub fn new(fixture: &PageFixture, options: ReplayOptions) -> Self {
        let tree = fixture.build();
        let controller = PageController::initialize(&tree, fixture.config.clone());
        Self {
            controller,
            tree,
            options,
            seq: 0,
        }
    }

    /// The page as it stands.
    pub fn tree(&self) -> &MemoryTree {
        &self.tree
    }

    /// Apply one step.
    pub fn step(&mut self, step: &Step) -> Result<Snapshot, ReplayError> {
        self.seq += 1;
        tracing::debug!(seq = self.seq, ?step, "replay step");

        let disposition = match step {
            Step::Click { entry } => {
                let len = self.tree.nav().len();
                if *entry >= len {
                    return Err(ReplayError::UnknownEntry { entry: *entry, len });
                }
                let d = self
                    .controller
                    .handle(&mut self.tree, &PageEvent::Click { entry: *entry });
                let scrolled = !self.tree.take_scroll_requests().is_empty();
                if scrolled && self.options.follow_scroll {
                    self.controller.handle(&mut self.tree, &PageEvent::Scroll);
                }
                Some(d)
            }
            Step::Scroll { offset } => {
                self.tree.set_scroll_offset(*offset);
                Some(self.controller.handle(&mut self.tree, &PageEvent::Scroll))
            }
            Step::Fill { title, desc, price } => {
                let [title_id, desc_id, price_id] = self.controller.config().input_ids();
                self.tree.fill(title_id, title)?;
                self.tree.fill(desc_id, desc)?;
                self.tree.fill(price_id, price)?;
                None
            }
            Step::Submit => Some(self.controller.handle(&mut self.tree, &PageEvent::Submit)),
        };

        Ok(self.snapshot(step.clone(), disposition))
    }

    /// Apply every step in order, stopping at the first error.
    pub fn run(&mut self, steps: &[Step]) -> Result<Vec<Snapshot>, ReplayError> {
        steps.iter().map(|step| self.step(step)).collect()
    }

    fn snapshot(&self, step: Step, disposition: Option<Disposition>) -> Snapshot {
        let config = self.controller.config();
        Snapshot {
            seq: self.seq,
            step,
            disposition,
            scroll_offset: self.tree.scroll_offset(),
            active: self.tree.marked_entries(&config.active_marker),
            inputs: self.tree.inputs().clone(),
            cards: self
                .tree
                .children(&config.container_id)
                .iter()
                .map(|node| node.inner_markup.clone())
                .collect(),
        }
    }
}

/// Render snapshots as JSON Lines, one line per snapshot.
pub fn to_jsonl(snapshots: &[Snapshot]) -> Result<String, ReplayError> {
    let mut out = String::new();
    for snapshot in snapshots {
        let line = serde_json::to_string(snapshot).map_err(|source| ReplayError::Render {
            seq: snapshot.seq,
            source,
        })?;
        out.push_str(&line);
        out.push('\n');
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fixture() -> PageFixture {
        PageFixture {
            nav: vec!["#hero".into(), "#menu".into(), "https://x.test".into()],
            regions: vec![Region::new("hero", 0.0, 600.0), Region::new("menu", 600.0, 900.0)],
            promo_form: true,
            ..PageFixture::default()
        }
    }

    #[test]
    fn fixture_defaults_fill_missing_fields() {
        let f = PageFixture::from_json(r##"{"nav": ["#a"]}"##).unwrap();
        assert_eq!(f.nav, vec!["#a".to_string()]);
        assert!(f.regions.is_empty());
        assert!(!f.promo_form);
        assert_eq!(f.config, PageConfig::default());
    }

    #[test]
    fn script_skips_blank_and_comment_lines() {
        let script = "# tour\n\n{\"step\":\"click\",\"entry\":1}\n  {\"step\":\"submit\"}\n";
        let steps = parse_script(script.as_bytes()).unwrap();
        assert_eq!(steps, vec![Step::Click { entry: 1 }, Step::Submit]);
    }

    #[test]
    fn script_errors_carry_line_numbers() {
        let script = "{\"step\":\"submit\"}\n{\"step\":\"dance\"}\n";
        let err = parse_script(script.as_bytes()).unwrap_err();
        assert!(matches!(err, ReplayError::Json { line: Some(2), .. }));
        assert!(err.to_string().starts_with("script line 2:"));
    }

    #[test]
    fn click_follows_with_scroll_spy() {
        let mut replay = Replay::new(&fixture(), ReplayOptions::default());
        let snap = replay.step(&Step::Click { entry: 1 }).unwrap();
        assert_eq!(snap.seq, 1);
        assert_eq!(snap.disposition, Some(Disposition::PreventDefault));
        assert_eq!(snap.scroll_offset, 540.0);
        assert_eq!(snap.active, vec![1]);
    }

    #[test]
    fn click_without_follow_leaves_markers() {
        let options = ReplayOptions {
            follow_scroll: false,
        };
        let mut replay = Replay::new(&fixture(), options);
        let snap = replay.step(&Step::Click { entry: 1 }).unwrap();
        assert_eq!(snap.scroll_offset, 540.0);
        assert!(snap.active.is_empty());
    }

    #[test]
    fn external_click_keeps_default() {
        let mut replay = Replay::new(&fixture(), ReplayOptions::default());
        let snap = replay.step(&Step::Click { entry: 2 }).unwrap();
        assert_eq!(snap.disposition, Some(Disposition::Default));
        assert_eq!(snap.scroll_offset, 0.0);
    }

    #[test]
    fn unknown_entry_is_an_error() {
        let mut replay = Replay::new(&fixture(), ReplayOptions::default());
        let err = replay.step(&Step::Click { entry: 9 }).unwrap_err();
        assert_eq!(
            err.to_string(),
            "click on entry 9, but the page has 3 nav entries"
        );
    }

    #[test]
    fn fill_without_form_is_a_tree_error() {
        let mut f = fixture();
        f.promo_form = false;
        let mut replay = Replay::new(&f, ReplayOptions::default());
        let err = replay
            .step(&Step::Fill {
                title: "a".into(),
                desc: "b".into(),
                price: "c".into(),
            })
            .unwrap_err();
        assert!(matches!(err, ReplayError::Tree(TreeError::MissingElement(_))));
    }

    #[test]
    fn fill_then_submit_adds_card() {
        let mut replay = Replay::new(&fixture(), ReplayOptions::default());
        let snaps = replay
            .run(&[
                Step::Fill {
                    title: "Combo Deal".into(),
                    desc: "2 rolls + drink".into(),
                    price: "499₴".into(),
                },
                Step::Submit,
            ])
            .unwrap();
        assert_eq!(snaps[0].disposition, None);
        assert_eq!(snaps[0].inputs["promo-title"], "Combo Deal");
        assert_eq!(snaps[1].disposition, Some(Disposition::PreventDefault));
        assert_eq!(snaps[1].cards.len(), 1);
        assert!(snaps[1].inputs.values().all(String::is_empty));
    }

    #[test]
    fn jsonl_has_one_line_per_snapshot() {
        let mut replay = Replay::new(&fixture(), ReplayOptions::default());
        let snaps = replay
            .run(&[Step::Scroll { offset: 10.0 }, Step::Submit])
            .unwrap();
        let out = to_jsonl(&snaps).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with(r#"{"seq":1,"step":{"step":"scroll","offset":10.0}"#));
        assert!(lines[1].contains(r#""disposition":"prevent_default""#));
    }

    #[test]
    fn jsonl_keeps_every_snapshot_in_order() {
        let mut replay = Replay::new(&fixture(), ReplayOptions::default());
        let mut snaps = replay
            .run(&[Step::Scroll { offset: 10.0 }, Step::Scroll { offset: 20.0 }])
            .unwrap();
        snaps[0].scroll_offset = f64::NAN;
        let out = to_jsonl(&snaps).unwrap();
        let seqs: Vec<u64> = out
            .lines()
            .map(|line| {
                let value: serde_json::Value = serde_json::from_str(line).unwrap();
                value["seq"].as_u64().unwrap()
            })
            .collect();
        assert_eq!(seqs, vec![1, 2]);
    }

    #[test]
    fn render_error_names_the_snapshot() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ReplayError::Render { seq: 7, source };
        assert!(err.to_string().starts_with("snapshot 7: "));
        assert!(std::error::Error::source(&err).is_some());
    }
}
