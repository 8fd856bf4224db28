use crate::cli::ReplayArgs;
use crate::output;
use crate::source::FixtureSource;
use serde::Serialize;
use serde_json::{json, Value};
use std::fmt;
use std::str::FromStr;
use timeline_core::{AppConfig, TimelineError, TimelineResult};
use timeline_domain::{NavIntent, Post, ViewKind};
use timeline_engine::{Session, StatusLine, ViewSnapshot};

/// One replayable user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Nav(NavIntent),
    Grow,
    Shrink,
    Reselect,
    Switch(ViewKind),
}

impl FromStr for Step {
    type Err = TimelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "grow" => Ok(Self::Grow),
            "shrink" => Ok(Self::Shrink),
            "reselect" => Ok(Self::Reselect),
            s => match s.strip_prefix("view:") {
                Some(spec) => Ok(Self::Switch(spec.parse()?)),
                None => Ok(Self::Nav(s.parse()?)),
            },
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nav(intent) => write!(f, "{}", intent),
            Self::Grow => write!(f, "grow"),
            Self::Shrink => write!(f, "shrink"),
            Self::Reselect => write!(f, "reselect"),
            Self::Switch(view) => write!(f, "view:{}", view),
        }
    }
}

#[derive(Serialize)]
struct StepReport {
    step: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    outcome: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl StepReport {
    fn new(step: &Step, result: TimelineResult<Value>) -> Self {
        let (outcome, error) = match result {
            Ok(value) => (Some(value), None),
            Err(e) => (None, Some(e.to_string())),
        };
        Self {
            step: step.to_string(),
            outcome,
            error,
        }
    }
}

#[derive(Serialize)]
struct ReplayReport {
    window_size: usize,
    steps: Vec<StepReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    snapshot: Option<ViewSnapshot<Post>>,
    status: StatusLine,
}

fn to_json<T: Serialize>(value: T) -> TimelineResult<Value> {
    serde_json::to_value(value).map_err(|e| TimelineError::Serialization(e.to_string()))
}

async fn run_step(session: &Session<FixtureSource>, step: &Step) -> TimelineResult<Value> {
    match step {
        Step::Nav(intent) => to_json(session.navigate(*intent).await?),
        Step::Grow => Ok(json!({ "window_size": session.grow_window().get() })),
        Step::Shrink => Ok(json!({ "window_size": session.shrink_window().get() })),
        Step::Reselect => to_json(session.reselect().await?),
        Step::Switch(view) => to_json(session.switch_to(view.clone()).await?),
    }
}

pub async fn handle(config: AppConfig, args: ReplayArgs) -> anyhow::Result<()> {
    let view: ViewKind = args.view.parse()?;
    let mut steps = vec![Step::Switch(view)];
    for raw in &args.steps {
        steps.push(raw.parse()?);
    }

    let config = AppConfig {
        window_size: args.window.or(config.window_size),
        page_size: args.page_size.or(config.page_size),
        ..config
    };
    let source = FixtureSource::load(&args.fixture).await?;
    let session = Session::new(source, config);

    // Failed steps are recorded and the replay carries on, like a user would
    let mut reports = Vec::with_capacity(steps.len());
    for step in &steps {
        let result = run_step(&session, step).await;
        if let Err(e) = &result {
            tracing::debug!("Step {} failed: {}", step, e);
        }
        reports.push(StepReport::new(step, result));
    }

    output::print_data(ReplayReport {
        window_size: session.store().window_size().get(),
        steps: reports,
        snapshot: session.snapshot(),
        status: session.status(),
    });
    Ok(())
}
