//! `pushstate replay`
//!
//! Runs a JSON script against an in-memory host:
//!
//! ```json
//! [
//!   {"push": {"url": "/work", "title": "Our Work", "state": {"sessionID": 42}}},
//!   "back",
//!   "forward",
//!   {"pop": {"state": {"historyStateURL": "/home"}}}
//! ]
//! ```

use anyhow::{Context, Result};
use clap::Args;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

use pushstate_core::{
    Config, EventKind, HistoryEvent, MemoryHost, NavigationHost, PopEvent, StateMap,
};

use super::{HistoryOverrides, DEFAULT_HOSTNAME};

#[derive(Debug, Args)]
pub struct ReplayArgs {
    /// Script file: a JSON array of steps
    pub script: PathBuf,

    #[command(flatten)]
    pub history: HistoryOverrides,

    /// Simulate a host without push-state support
    #[arg(long)]
    pub unsupported: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    Push {
        url: String,
        #[serde(default)]
        title: String,
        #[serde(default)]
        state: StateMap,
    },
    Back,
    Forward,
    /// Deliver a pop straight from the host, as browser navigation would
    Pop {
        #[serde(default)]
        state: Option<StateMap>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplaySummary {
    pub steps: usize,
    /// Indexes of push steps that were refused
    pub rejected: Vec<usize>,
    pub current_state: StateMap,
    pub length: usize,
    pub location_hash: String,
    /// Notifications in delivery order; printed as JSON lines
    #[serde(skip_serializing)]
    pub events: Vec<HistoryEvent>,
}

#[derive(Clone, Default)]
struct EventLog(Arc<Mutex<Vec<HistoryEvent>>>);

impl EventLog {
    fn record(&self, event: &HistoryEvent) {
        self.0.lock().push(event.clone());
    }

    fn take(&self) -> Vec<HistoryEvent> {
        std::mem::take(&mut *self.0.lock())
    }
}

pub fn run(mut config: Config, args: ReplayArgs) -> Result<()> {
    config.history = args.history.apply(config.history);

    let content = std::fs::read_to_string(&args.script)
        .with_context(|| format!("reading script {}", args.script.display()))?;
    let steps: Vec<Step> = serde_json::from_str(&content)
        .with_context(|| format!("parsing script {}", args.script.display()))?;

    let summary = replay(&config, &steps, args.unsupported)?;

    for event in &summary.events {
        println!("{}", serde_json::to_string(event)?);
    }
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}

/// Run `steps` against a fresh in-memory host and collect what happened.
pub fn replay(config: &Config, steps: &[Step], unsupported: bool) -> Result<ReplaySummary> {
    let hostname = config
        .history
        .top_level_domain
        .clone()
        .unwrap_or_else(|| DEFAULT_HOSTNAME.to_string());
    let host = Arc::new(if unsupported {
        MemoryHost::unsupported(hostname)
    } else {
        MemoryHost::new(hostname)
    });

    let history = config.open_history(host.clone())?;
    if !history.initialize(config.history.dev_mode) {
        tracing::warn!("Host has no history support; pops will not be observed");
    }

    let log = EventLog::default();
    for kind in [EventKind::Push, EventKind::Pop] {
        let sink = log.clone();
        history.subscribe(kind, move |event| sink.record(event));
    }

    let mut rejected = Vec::new();
    for (index, step) in steps.iter().enumerate() {
        match step {
            Step::Push { url, title, state } => {
                if !history.push(url, title, state.clone()) {
                    tracing::warn!(step = index, url = %url, "Push rejected");
                    rejected.push(index);
                }
            }
            Step::Back => history.back(),
            Step::Forward => history.forward(),
            Step::Pop { state } => {
                host.dispatch_pop(&PopEvent::new(state.clone()));
            }
        }
    }

    Ok(ReplaySummary {
        steps: steps.len(),
        rejected,
        current_state: history.current_state(),
        length: host.length(),
        location_hash: host.location_hash(),
        events: log.take(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pushstate_core::{HistoryConfig, HISTORY_STATE_URL};
    use serde_json::json;

    fn config() -> Config {
        Config {
            history: HistoryConfig::new().with_top_level_domain("example.com"),
            ..Config::default()
        }
    }

    fn script(value: serde_json::Value) -> Vec<Step> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_parse_script() {
        let steps = script(json!([
            {"push": {"url": "/a"}},
            "back",
            "forward",
            {"pop": {}}
        ]));

        assert_eq!(
            steps,
            vec![
                Step::Push {
                    url: "/a".to_string(),
                    title: String::new(),
                    state: StateMap::new(),
                },
                Step::Back,
                Step::Forward,
                Step::Pop { state: None },
            ]
        );
    }

    #[test]
    fn test_replay_session() {
        let steps = script(json!([
            {"push": {"url": "/work", "title": "Our Work", "state": {"sessionID": 42}}},
            {"push": {"url": "/about", "title": "About"}},
            {"push": {"url": "https://evil.com/x"}},
            "back"
        ]));

        let summary = replay(&config(), &steps, false).unwrap();

        assert_eq!(summary.steps, 4);
        assert_eq!(summary.rejected, vec![2]);
        assert_eq!(summary.length, 3);
        assert_eq!(summary.current_state["sessionID"], json!(42));
        assert_eq!(summary.current_state[HISTORY_STATE_URL], json!("/work"));

        let kinds: Vec<EventKind> = summary.events.iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![EventKind::Push, EventKind::Push, EventKind::Pop]);
    }

    #[test]
    fn test_replay_without_support() {
        let steps = script(json!([{"push": {"url": "/x"}}, "back"]));
        let summary = replay(&config(), &steps, true).unwrap();

        assert!(summary.rejected.is_empty());
        assert_eq!(summary.location_hash, "#!/x");
        assert_eq!(summary.length, 1);
        assert_eq!(summary.events.len(), 1);
    }

    #[test]
    fn test_summary_json_omits_events() {
        let summary = replay(&config(), &[], false).unwrap();
        let value = serde_json::to_value(&summary).unwrap();
        assert!(value.get("events").is_none());
        assert_eq!(value["length"], json!(1));
    }
}
