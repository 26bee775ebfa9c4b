//! Prober and updater behaviour against a scripted fetcher.

use std::cell::RefCell;
use std::collections::HashMap;
use std::time::Duration;

use parts_db::{RefreshError, load_snapshot};
use parts_remote::{
    Fetch, ProbeConfig, Prober, RemoteFetchError, SourceDescriptor, UpdateConfig, update,
};

#[derive(Default)]
struct ScriptedFetcher {
    responses: HashMap<String, String>,
    requests: RefCell<Vec<String>>,
}

impl ScriptedFetcher {
    fn respond(mut self, url: &str, body: &str) -> Self {
        self.responses.insert(url.to_string(), body.to_string());
        self
    }

    fn requested(&self, url: &str) -> usize {
        self.requests.borrow().iter().filter(|u| *u == url).count()
    }
}

impl Fetch for ScriptedFetcher {
    fn fetch(&self, url: &str) -> parts_remote::Result<Vec<u8>> {
        self.requests.borrow_mut().push(url.to_string());
        self.responses
            .get(url)
            .map(|body| body.clone().into_bytes())
            .ok_or_else(|| RemoteFetchError::Status {
                url: url.to_string(),
                status: 404,
            })
    }
}

const SHEET: &str = "https://docs.google.com/spreadsheets/d/s1/export?format=csv&gid=5";

fn export(gid: u32) -> String {
    format!("https://docs.google.com/spreadsheets/d/s1/export?format=csv&gid={gid}")
}

fn table(rows: usize) -> String {
    let mut text = String::from("Type ID,ID,String\n");
    for i in 0..rows {
        text.push_str(&format!("13,{i},Part {i}\n"));
    }
    text
}

#[test]
fn discovered_tabs_beat_the_blind_probe() {
    let fetcher = ScriptedFetcher::default()
        .respond(&export(5), &table(3))
        .respond(&export(1234), &table(10))
        .respond(
            "https://docs.google.com/spreadsheets/d/s1/edit",
            r#"<html>{"gid":1234} #gid=5</html>"#,
        );
    let descriptor = SourceDescriptor::new("parts_master", SHEET);

    let mut prober = Prober::new(&fetcher, ProbeConfig::default());
    let outcome = prober.fetch_table(&descriptor).unwrap();
    assert_eq!(outcome.url, export(1234));
    assert_eq!(outcome.score, (10, 3));

    assert_eq!(prober.discover_gids("s1"), vec![5, 1234]);
    assert_eq!(fetcher.requested("https://docs.google.com/spreadsheets/d/s1/edit"), 1);
}

#[test]
fn probing_stops_at_the_completeness_threshold() {
    let fetcher = ScriptedFetcher::default().respond(&export(5), &table(2));
    let descriptor = SourceDescriptor::new("parts_master", SHEET);

    let mut prober = Prober::new(&fetcher, ProbeConfig { complete_rows: 2 });
    let outcome = prober.fetch_table(&descriptor).unwrap();
    assert_eq!(outcome.url, export(5));
    assert_eq!(fetcher.requests.borrow().len(), 1);
}

#[test]
fn html_and_narrow_candidates_are_skipped() {
    let fetcher = ScriptedFetcher::default()
        .respond(&export(5), "<!DOCTYPE html><html>sign in</html>")
        .respond(&export(0), "only\n1\n2\n3\n")
        .respond(&export(1), &table(1));
    let descriptor = SourceDescriptor::new("parts_master", SHEET);

    let outcome = Prober::new(&fetcher, ProbeConfig::default())
        .fetch_table(&descriptor)
        .unwrap();
    assert_eq!(outcome.url, export(1));
}

#[test]
fn plain_urls_fall_back_to_a_direct_fetch() {
    let url = "https://mirror.example/parts.txt";
    let fetcher = ScriptedFetcher::default().respond(url, "single\n1\n");
    let outcome = Prober::new(&fetcher, ProbeConfig::default())
        .fetch_table(&SourceDescriptor::new("mirror", url))
        .unwrap();
    assert_eq!(outcome.text, "single\n1\n");
    assert_eq!(fetcher.requested(url), 2);

    let html = ScriptedFetcher::default().respond(url, "<html></html>");
    let err = Prober::new(&html, ProbeConfig::default())
        .fetch_table(&SourceDescriptor::new("mirror", url))
        .unwrap_err();
    assert!(matches!(err, RemoteFetchError::Html { .. }));
}

#[test]
fn update_merges_exports_and_reports() {
    let dir = tempfile::tempdir().unwrap();
    let grenade_url = "https://mirror.example/grenade.csv";
    let fetcher = ScriptedFetcher::default().respond(
        grenade_url,
        "Grenade_perk_main_ID,Part_ID,Part_type,Stat\n245,1,Perk,Damage\n245,2,Perk,Radius\n",
    );

    let mut config = UpdateConfig::new(
        vec![
            SourceDescriptor::new("grenade_main_perk", grenade_url),
            SourceDescriptor::new("offline", "https://mirror.example/offline.csv"),
        ],
        dir.path().join("db/community_parts_db.json"),
    );
    config.export_root = Some(dir.path().to_path_buf());
    config.politeness_delay = Duration::ZERO;

    let report = update(&fetcher, &config).unwrap();
    assert!(report.updated);
    assert_eq!((report.rows_before, report.rows_after), (0, 2));
    assert_eq!(report.diff.added, 2);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].name, "offline");
    assert_eq!(report.exports.get("grenade_main_perk"), Some(&2));

    let snapshot = load_snapshot(&report.output).unwrap();
    assert_eq!(snapshot.key_fields, vec!["code"]);
    assert_eq!(snapshot.rows[0].code, "{245:1}");
    assert_eq!(snapshot.sources[0].origin, grenade_url);

    let exported =
        std::fs::read_to_string(dir.path().join("grenade/grenade_main_perk.csv")).unwrap();
    assert_eq!(
        exported,
        "Grenade_perk_main_ID,Part_ID,Part_type,Stat\n245,1,Perk,Damage\n245,2,Perk,Radius\n"
    );

    let again = update(&fetcher, &config).unwrap();
    assert!(!again.updated);
    assert!(again.message().starts_with("Parts DB unchanged. Rows: 2 -> 2."));
}

#[test]
fn update_with_every_source_failing_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = UpdateConfig::new(
        vec![SourceDescriptor::new("offline", "https://mirror.example/offline.csv")],
        dir.path().join("db.json"),
    );
    config.politeness_delay = Duration::ZERO;

    let err = update(&ScriptedFetcher::default(), &config).unwrap_err();
    assert!(matches!(err, RefreshError::NoSources { ref failures } if failures.len() == 1));
    assert!(!dir.path().join("db.json").exists());
}
