//! Pipeline tests: every line attempted once, dedup under races, termination, ordering.

use gostatus::pipeline::{ClaimSet, drain_results, run_pipeline, write_results};
use gostatus::{Outcome, SkipReason};
use std::collections::{BTreeSet, HashMap};
use std::io::Cursor;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

fn input_of(lines: &[&str]) -> Cursor<Vec<u8>> {
    let mut s = lines.join("\n");
    if !lines.is_empty() {
        s.push('\n');
    }
    Cursor::new(s.into_bytes())
}

fn run_collect<E>(input: Cursor<Vec<u8>>, enricher: Arc<E>, jobs: usize) -> Vec<String>
where
    E: gostatus::pipeline::Enricher + 'static,
{
    let handles = run_pipeline(input, enricher, jobs);
    let mut out = Vec::new();
    drain_results(handles, |s| {
        out.push(s);
        Ok(())
    })
    .unwrap();
    out
}

/// Counts how many times each line was enriched.
struct Counting {
    seen: Mutex<HashMap<String, usize>>,
}

impl Counting {
    fn new() -> Self {
        Self {
            seen: Mutex::new(HashMap::new()),
        }
    }
}

impl gostatus::pipeline::Enricher for Counting {
    fn enrich(&self, item: &str) -> Outcome {
        *self.seen.lock().unwrap().entry(item.to_string()).or_default() += 1;
        Outcome::Status(item.to_string())
    }
}

#[test]
fn test_every_line_attempted_exactly_once() {
    let lines: Vec<String> = (0..1000).map(|i| format!("pkg/{i}")).collect();
    let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
    for jobs in [1, 2, 8, 32] {
        let enricher = Arc::new(Counting::new());
        let out = run_collect(input_of(&refs), Arc::clone(&enricher), jobs);
        assert_eq!(out.len(), lines.len(), "jobs={jobs}");
        let seen = enricher.seen.lock().unwrap();
        assert_eq!(seen.len(), lines.len());
        assert!(seen.values().all(|&n| n == 1), "jobs={jobs}");
    }
}

/// Mimics the status check: lines map to a repo key via `keys`; the first claimer wins.
struct Keyed {
    keys: HashMap<String, Option<String>>,
    standard: BTreeSet<String>,
    claims: ClaimSet<String>,
    inspected: Mutex<Vec<String>>,
}

impl Keyed {
    fn new(keys: &[(&str, Option<&str>)], standard: &[&str]) -> Self {
        Self {
            keys: keys
                .iter()
                .map(|(l, k)| (l.to_string(), k.map(str::to_string)))
                .collect(),
            standard: standard.iter().map(|s| s.to_string()).collect(),
            claims: ClaimSet::new(),
            inspected: Mutex::new(Vec::new()),
        }
    }
}

impl gostatus::pipeline::Enricher for Keyed {
    fn enrich(&self, item: &str) -> Outcome {
        let Some(key) = self.keys.get(item) else {
            return Outcome::Skipped(SkipReason::Invalid);
        };
        if self.standard.contains(item) {
            return Outcome::Skipped(SkipReason::Standard);
        }
        if let Some(key) = key {
            if !self.claims.claim(key.clone()) {
                return Outcome::Skipped(SkipReason::Duplicate);
            }
            // Widen the race window between claim and result.
            thread::sleep(Duration::from_millis(2));
            self.inspected.lock().unwrap().push(key.clone());
        }
        Outcome::Status(item.to_string())
    }
}

#[test]
fn test_five_lines_two_share_a_repo() {
    let keys = [
        ("line1", Some("K1")),
        ("line2", Some("R1")),
        ("line3", None),
        ("line4", Some("R1")),
        ("line5", Some("K5")),
    ];
    let lines: Vec<&str> = keys.iter().map(|(l, _)| *l).collect();
    for jobs in [1, 2, 5, 8] {
        let enricher = Arc::new(Keyed::new(&keys, &[]));
        let out = run_collect(input_of(&lines), Arc::clone(&enricher), jobs);
        assert_eq!(out.len(), 4, "jobs={jobs}: {out:?}");
        for l in ["line1", "line3", "line5"] {
            assert!(out.iter().any(|o| o == l), "jobs={jobs}: missing {l}");
        }
        let shared = out.iter().filter(|o| *o == "line2" || *o == "line4").count();
        assert_eq!(shared, 1);
        assert_eq!(enricher.claims.len(), 3);
    }
}

#[test]
fn test_many_lines_one_repo_single_inspection() {
    let lines: Vec<String> = (0..400).map(|i| format!("github.com/u/r/sub{i}")).collect();
    let keys: Vec<(&str, Option<&str>)> = lines.iter().map(|l| (l.as_str(), Some("R"))).collect();
    let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
    let enricher = Arc::new(Keyed::new(&keys, &[]));
    let handles = run_pipeline(input_of(&refs), Arc::clone(&enricher), 16);
    let mut out = Vec::new();
    let summary = write_results(handles, &mut out).unwrap();
    assert_eq!(summary.attempted, 400);
    assert_eq!(summary.emitted, 1);
    assert_eq!(summary.skipped_for(SkipReason::Duplicate), 399);
    assert_eq!(enricher.inspected.lock().unwrap().len(), 1);
    assert_eq!(String::from_utf8(out).unwrap().lines().count(), 1);
}

#[test]
fn test_claims_equal_distinct_keys() {
    let lines: Vec<String> = (0..600).map(|i| format!("p{i}")).collect();
    let key_names: Vec<String> = (0..600).map(|i| format!("R{}", i % 37)).collect();
    let keys: Vec<(&str, Option<&str>)> = lines
        .iter()
        .zip(&key_names)
        .map(|(l, k)| (l.as_str(), Some(k.as_str())))
        .collect();
    let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
    for jobs in [1, 3, 8, 24] {
        let enricher = Arc::new(Keyed::new(&keys, &[]));
        let out = run_collect(input_of(&refs), Arc::clone(&enricher), jobs);
        assert_eq!(enricher.claims.len(), 37);
        assert_eq!(out.len(), 37);
        let mut inspected = enricher.inspected.lock().unwrap().clone();
        inspected.sort();
        inspected.dedup();
        assert_eq!(inspected.len(), 37);
    }
}

#[test]
fn test_standard_items_never_printed() {
    let keys = [
        ("fmt", Some("GOROOT")),
        ("net/http", None),
        ("example.org/a", Some("A")),
    ];
    let enricher = Arc::new(Keyed::new(&keys, &["fmt", "net/http"]));
    let handles = run_pipeline(
        input_of(&["fmt", "net/http", "example.org/a"]),
        Arc::clone(&enricher),
        4,
    );
    let mut out = Vec::new();
    let summary = write_results(handles, &mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "example.org/a\n");
    assert_eq!(summary.skipped_for(SkipReason::Standard), 2);
    // Excluded items never reach the guard.
    assert_eq!(enricher.claims.len(), 1);
}

#[test]
fn test_output_count_is_input_minus_skips() {
    let keys = [
        ("a", Some("R1")),
        ("b", Some("R1")),
        ("c", None),
        ("std", None),
        ("d", Some("R2")),
    ];
    let enricher = Arc::new(Keyed::new(&keys, &["std"]));
    let handles = run_pipeline(
        input_of(&["a", "b", "c", "std", "d", "", "bogus"]),
        enricher,
        3,
    );
    let summary = write_results(handles, &mut Vec::<u8>::new()).unwrap();
    assert_eq!(summary.attempted, 7);
    assert_eq!(summary.skipped_for(SkipReason::Invalid), 2);
    assert_eq!(summary.skipped_for(SkipReason::Standard), 1);
    assert_eq!(summary.skipped_for(SkipReason::Duplicate), 1);
    assert_eq!(summary.emitted, 7 - 2 - 1 - 1);
    assert_eq!(summary.emitted + summary.skipped(), summary.attempted);
}

#[test]
fn test_empty_input_empty_output() {
    for jobs in [1, 8] {
        let handles = run_pipeline(
            Cursor::new(Vec::new()),
            Arc::new(|l: &str| Outcome::Status(l.to_string())),
            jobs,
        );
        let mut out = Vec::new();
        let summary = write_results(handles, &mut out).unwrap();
        assert!(out.is_empty());
        assert_eq!(summary.attempted, 0);
    }
}

#[test]
fn test_single_worker_preserves_order_and_matches_parallel_set() {
    let lines: Vec<String> = (0..300).map(|i| format!("pkg{i:03}")).collect();
    let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
    let enricher = |l: &str| -> Outcome {
        // Drop every fifth line so ordering is checked on a filtered stream.
        if l.ends_with('0') || l.ends_with('5') {
            Outcome::Skipped(SkipReason::Invalid)
        } else {
            Outcome::Status(format!("ok {l}"))
        }
    };

    let serial = run_collect(input_of(&refs), Arc::new(enricher), 1);
    let expected: Vec<String> = refs
        .iter()
        .filter_map(|&l| match enricher(l) {
            Outcome::Status(s) => Some(s),
            Outcome::Skipped(_) => None,
        })
        .collect();
    assert_eq!(serial, expected);

    for jobs in [2, 8, 16] {
        let parallel = run_collect(input_of(&refs), Arc::new(enricher), jobs);
        let a: BTreeSet<_> = serial.iter().collect();
        let b: BTreeSet<_> = parallel.iter().collect();
        assert_eq!(parallel.len(), serial.len());
        assert_eq!(a, b, "jobs={jobs}");
    }
}

#[test]
fn test_terminates_with_slow_enricher_and_small_pool() {
    let lines: Vec<String> = (0..200).map(|i| i.to_string()).collect();
    let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
    // More results than the channel holds, produced slower than they are drained.
    let enricher = |l: &str| -> Outcome {
        thread::sleep(Duration::from_micros(200));
        Outcome::Status(l.to_string())
    };
    for jobs in [1, 4, 64] {
        let out = run_collect(input_of(&refs), Arc::new(enricher), jobs);
        assert_eq!(out.len(), 200);
    }
}

#[test]
fn test_bounded_concurrency() {
    let active = Arc::new(Mutex::new((0usize, 0usize)));
    let tracker = Arc::clone(&active);
    let enricher = move |l: &str| -> Outcome {
        {
            let mut a = tracker.lock().unwrap();
            a.0 += 1;
            a.1 = a.1.max(a.0);
        }
        thread::sleep(Duration::from_millis(1));
        tracker.lock().unwrap().0 -= 1;
        Outcome::Status(l.to_string())
    };
    let lines: Vec<String> = (0..120).map(|i| i.to_string()).collect();
    let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
    let out = run_collect(input_of(&refs), Arc::new(enricher), 3);
    assert_eq!(out.len(), 120);
    let (now, peak) = *active.lock().unwrap();
    assert_eq!(now, 0);
    assert!(peak <= 3, "peak concurrency {peak}");
    assert!(peak >= 1);
}
